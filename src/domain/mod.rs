//! Domain Layer
//!
//! The watch-and-mirror model without I/O: what a job is, and the ports the
//! runtime talks through.
//!
//! ## Structure
//!
//! - `entities/` - `WatchJob` and the daemon `Roster`
//! - `value_objects/` - `RemoteTarget`
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod value_objects;
