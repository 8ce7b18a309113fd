use pickbot_traits::Channel;
use thiserror::Error;

/// Typed dispatch failure. Every variant names the stage that failed:
/// resolve (`InvalidInput`), compile (`InvalidConfiguration`), or one of the
/// two delivery channels (`Network`, `PartialDispatch`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("resolve: invalid input: {0}")]
    InvalidInput(String),
    #[error("compile: invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("dispatch-{channel}: network error: {msg}")]
    Network { channel: Channel, msg: String },
    /// Control channel succeeded but the program channel failed. The physical
    /// state differs from a full failure: brakes are released with no motion
    /// commanded, so callers must surface this to the operator.
    #[error("dispatch-program: partial dispatch, brakes released but program delivery failed: {msg}")]
    PartialDispatch { msg: String },
}

impl DispatchError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
