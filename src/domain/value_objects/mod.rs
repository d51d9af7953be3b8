//! Value objects

mod remote_target;

pub use remote_target::RemoteTarget;
