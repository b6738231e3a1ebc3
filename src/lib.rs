//! A small unicast DNS responder
//!
//! Queries are decoded by [`dns_parser`], answered from a [`Lookup`] and
//! replied to over UDP by a [`Responder`].

use log::warn;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

pub mod dns_parser;

mod fsm;
mod net;
mod zone;

pub use crate::fsm::respond;
pub use crate::zone::{Lookup, Record, StaticZone};

use crate::fsm::{Command, FSM};

pub const DNS_PORT: u16 = 53;
pub const DEFAULT_TTL: u32 = 3000;

/// Where to listen and what to answer
#[derive(Clone, Debug)]
pub struct ResponderConfig {
    pub bind_addr: SocketAddr,
    pub zone: Arc<dyn Lookup>,
}

impl ResponderConfig {
    pub fn new(bind_addr: SocketAddr, zone: Arc<dyn Lookup>) -> Self {
        ResponderConfig { bind_addr, zone }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            bind_addr: SocketAddr::new(Ipv4Addr::LOCALHOST.into(), DNS_PORT),
            zone: Arc::new(StaticZone::new()),
        }
    }
}

/// A DNS responder serving one UDP socket
///
/// The responder stops when dropped.
pub struct Responder {
    handle: Option<thread::JoinHandle<()>>,
    shutdown: mpsc::UnboundedSender<Command>,
    local_addr: SocketAddr,
}

impl Responder {
    /// Spawn a `Responder` with its own tokio runtime on a dedicated thread
    pub fn new(config: ResponderConfig) -> io::Result<Responder> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()?;
        let (fsm, shutdown, local_addr) = {
            let _guard = runtime.enter();
            Self::setup(config)?
        };

        let handle = thread::Builder::new()
            .name("dns-responder".to_owned())
            .spawn(move || runtime.block_on(fsm))?;

        Ok(Responder {
            handle: Some(handle),
            shutdown,
            local_addr,
        })
    }

    /// Spawn a `Responder` on the given tokio runtime
    pub fn spawn(handle: &Handle, config: ResponderConfig) -> io::Result<Responder> {
        let (fsm, shutdown, local_addr) = {
            let _guard = handle.enter();
            Self::setup(config)?
        };
        handle.spawn(fsm);

        Ok(Responder {
            handle: None,
            shutdown,
            local_addr,
        })
    }

    fn setup(
        config: ResponderConfig,
    ) -> io::Result<(FSM, mpsc::UnboundedSender<Command>, SocketAddr)> {
        let socket = net::bind(config.bind_addr)?;
        let local_addr = socket.local_addr()?;
        let (fsm, shutdown) = FSM::new(socket, config.zone)?;
        Ok((fsm, shutdown, local_addr))
    }

    /// The address the socket is actually bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        if self.shutdown.send(Command::Shutdown).is_err() {
            warn!("responder already stopped");
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("responder thread panicked");
            }
        }
    }
}
