//! Transport seam shared by the dispatch core and the TCP backend.

use std::fmt;

/// The two logical channels of the controller's control plane.
///
/// The controller exposes them as separate TCP ports, but they form a single
/// sequential plane: the control channel must complete before the program
/// channel is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Dashboard-style command channel (non-motion commands, e.g. brake release).
    Control,
    /// Interpreter channel that receives the executable motion script.
    Program,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Control => f.write_str("control"),
            Channel::Program => f.write_str("program"),
        }
    }
}

/// One-shot, unacknowledged delivery of a payload on a channel.
///
/// Implementations write the payload and close whatever resource they opened;
/// success means "bytes were written", not "the controller acted on them".
pub trait Transport {
    fn send(
        &mut self,
        channel: Channel,
        payload: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
