//! Command handlers for the two run modes

pub mod daemon;
pub mod foreground;
