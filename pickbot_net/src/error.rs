use pickbot_traits::Channel;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("{channel} channel: connect {addr}: {source}")]
    Connect {
        channel: Channel,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("{channel} channel: write {addr}: {source}")]
    Write {
        channel: Channel,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl NetError {
    /// Which channel the failure occurred on.
    pub fn channel(&self) -> Channel {
        match self {
            NetError::Connect { channel, .. } | NetError::Write { channel, .. } => *channel,
        }
    }
}

pub type Result<T> = std::result::Result<T, NetError>;
