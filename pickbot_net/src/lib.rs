#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! TCP delivery to the arm controller.
//!
//! The controller exposes two fixed plaintext ports on the local network:
//! a dashboard/control port accepting ASCII command lines, and a program
//! interpreter port accepting an ASCII script terminated by newline. No TLS,
//! no authentication, no framing beyond newline termination; this mirrors
//! the controller's actual exposure and must not be altered.
//!
//! Each connection is a short-lived, exclusively-owned resource: opened,
//! written and dropped within one `send`, closed on every exit path. The
//! controller has no queuing of its own, so dispatches to the same endpoint
//! are serialized through a per-endpoint gate held for the lifetime of a
//! `TcpTransport`.

pub mod error;
pub mod util;

pub use error::NetError;

use pickbot_traits::{Channel, Transport};
use std::collections::HashSet;
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::str::FromStr;
use std::sync::{Condvar, Mutex, OnceLock, PoisonError};
use std::time::Duration;

/// Dashboard/control port (non-motion commands, e.g. brake release).
pub const CONTROL_PORT: u16 = 29999;
/// Program-interpreter port (executable motion scripts).
pub const PROGRAM_PORT: u16 = 30002;

/// Network identity of one controller. The two well-known ports are protocol
/// constants, never configurable per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerEndpoint {
    pub host: Ipv4Addr,
}

impl ControllerEndpoint {
    pub fn new(host: Ipv4Addr) -> Self {
        Self { host }
    }

    pub fn control_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, CONTROL_PORT))
    }

    pub fn program_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, PROGRAM_PORT))
    }
}

impl FromStr for ControllerEndpoint {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4Addr::from_str(s.trim()).map(Self::new)
    }
}

impl std::fmt::Display for ControllerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.host.fmt(f)
    }
}

// ── Per-endpoint serialization gate ──────────────────────────────────────────

struct EndpointGate {
    busy: Mutex<HashSet<Ipv4Addr>>,
    freed: Condvar,
}

impl EndpointGate {
    fn global() -> &'static EndpointGate {
        static GATE: OnceLock<EndpointGate> = OnceLock::new();
        GATE.get_or_init(|| EndpointGate {
            busy: Mutex::new(HashSet::new()),
            freed: Condvar::new(),
        })
    }

    /// Block until no other dispatch to `host` is in flight, then mark it busy.
    fn acquire(&'static self, host: Ipv4Addr) -> GateGuard {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        while busy.contains(&host) {
            busy = self
                .freed
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(host);
        GateGuard { gate: self, host }
    }
}

/// Marks one endpoint busy for the lifetime of a dispatch. Dropping releases
/// the endpoint and wakes any waiter.
pub struct GateGuard {
    gate: &'static EndpointGate,
    host: Ipv4Addr,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        let mut busy = self
            .gate
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        busy.remove(&self.host);
        self.gate.freed.notify_all();
    }
}

// ── Transport implementation ─────────────────────────────────────────────────

/// Two short-lived line-oriented TCP channels to one controller.
///
/// Construction acquires the per-endpoint gate, so at most one `TcpTransport`
/// per endpoint exists at a time; interleaved writes from two dispatches
/// would corrupt the interpreter's input stream.
pub struct TcpTransport {
    control_addr: SocketAddr,
    program_addr: SocketAddr,
    connect_timeout: Duration,
    write_timeout: Duration,
    _serial: GateGuard,
}

impl TcpTransport {
    /// Open a transport on the controller's fixed protocol ports. Blocks
    /// while another dispatch to the same endpoint is in flight.
    pub fn open(
        endpoint: ControllerEndpoint,
        connect_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        Self::open_with_ports(
            endpoint.host,
            CONTROL_PORT,
            PROGRAM_PORT,
            connect_timeout,
            write_timeout,
        )
    }

    /// Bring-up/test constructor with explicit ports. Production callers use
    /// `open`; the real controller's ports are not negotiable.
    pub fn open_with_ports(
        host: Ipv4Addr,
        control_port: u16,
        program_port: u16,
        connect_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        let serial = EndpointGate::global().acquire(host);
        Self {
            control_addr: SocketAddr::from((host, control_port)),
            program_addr: SocketAddr::from((host, program_port)),
            connect_timeout,
            write_timeout,
            _serial: serial,
        }
    }

    fn addr_for(&self, channel: Channel) -> SocketAddr {
        match channel {
            Channel::Control => self.control_addr,
            Channel::Program => self.program_addr,
        }
    }

    /// Connect, write the newline-terminated payload, and close. The stream
    /// drops on every path, so no socket outlives the call.
    fn send_line(&self, channel: Channel, payload: &str) -> error::Result<()> {
        let addr = self.addr_for(channel);
        let mut stream =
            TcpStream::connect_timeout(&addr, self.connect_timeout).map_err(|source| {
                NetError::Connect {
                    channel,
                    addr,
                    source,
                }
            })?;
        // None would mean a blocking write with no bound; always set one.
        stream
            .set_write_timeout(Some(self.write_timeout))
            .map_err(|source| NetError::Write {
                channel,
                addr,
                source,
            })?;
        let framed = util::ensure_trailing_newline(payload);
        stream
            .write_all(framed.as_bytes())
            .map_err(|source| NetError::Write {
                channel,
                addr,
                source,
            })?;
        tracing::debug!(%channel, %addr, bytes = framed.len(), "payload written");
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send(
        &mut self,
        channel: Channel,
        payload: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.send_line(channel, payload).map_err(Into::into)
    }
}
