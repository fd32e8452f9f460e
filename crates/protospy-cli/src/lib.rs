//! Shared plumbing for the `send-tcp-packet` and `send-udp-packet` executables.

pub mod runner;
pub mod tcp;
pub mod udp;
