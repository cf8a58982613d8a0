//! Domain model: snapshots and the services they inventory.

pub mod service;
pub mod snapshot;

pub use service::{Service, Software, Tls};
pub use snapshot::Snapshot;
