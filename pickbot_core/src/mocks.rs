//! Test and helper mocks for pickbot_core

use pickbot_traits::{Channel, Transport};

/// A transport that records every send and can be scripted to fail on either
/// channel; useful for exercising the dispatch ordering and error mapping
/// without sockets.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<(Channel, String)>,
    pub fail_control: bool,
    pub fail_program: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for MockTransport {
    fn send(
        &mut self,
        channel: Channel,
        payload: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let fail = match channel {
            Channel::Control => self.fail_control,
            Channel::Program => self.fail_program,
        };
        if fail {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("{channel} connection refused (mock)"),
            )));
        }
        self.sent.push((channel, payload.to_string()));
        Ok(())
    }
}
