//! Port allocation against the registry and the live system.

mod allocator;
mod probe;

pub use allocator::{PortAllocator, DEFAULT_PORT_ATTEMPTS};
pub use probe::{MockPortProbe, PortProbe, SystemPortProbe};
