//! System port probing.
//!
//! Trait-based probing so the allocator can be driven by the real
//! network stack in production and by a deterministic mock in tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::net::TcpListener;

use crate::error::{Error, Result};

/// Probes the local system for port state.
pub trait PortProbe {
    /// Whether something is currently listening on the port on
    /// localhost.
    fn is_listening(&self, port: u16) -> bool;

    /// Asks the OS for an ephemeral port by binding to port 0.
    ///
    /// # Errors
    ///
    /// Returns an error if no socket can be bound.
    fn ephemeral_port(&self) -> Result<u16>;
}

/// Production probe using the real network stack.
///
/// Listening checks go through the port-selector crate; ephemeral ports
/// come from a throwaway localhost bind to port 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPortProbe;

impl PortProbe for SystemPortProbe {
    fn is_listening(&self, port: u16) -> bool {
        !port_selector::is_free(port)
    }

    fn ephemeral_port(&self) -> Result<u16> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        Ok(listener.local_addr()?.port())
    }
}

/// Deterministic probe for tests.
///
/// Listening state is a fixed set; ephemeral ports are handed out from
/// a queue and the probe errors when the queue runs dry.
#[derive(Debug, Default)]
pub struct MockPortProbe {
    listening: HashSet<u16>,
    ephemeral: RefCell<VecDeque<u16>>,
}

impl MockPortProbe {
    /// Creates a probe with nothing listening and no ephemeral ports
    /// queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a port as having a live listener.
    pub fn mark_listening(&mut self, port: u16) {
        self.listening.insert(port);
    }

    /// Queues ports to be returned by successive `ephemeral_port` calls.
    pub fn queue_ephemeral(&mut self, ports: impl IntoIterator<Item = u16>) {
        self.ephemeral.borrow_mut().extend(ports);
    }
}

impl PortProbe for MockPortProbe {
    fn is_listening(&self, port: u16) -> bool {
        self.listening.contains(&port)
    }

    fn ephemeral_port(&self) -> Result<u16> {
        self.ephemeral
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Validation {
                field: "ephemeral_port".into(),
                message: "mock probe exhausted".into(),
            })
    }
}
