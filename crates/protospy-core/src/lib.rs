//! Core types and error handling for the proto-spy packet senders.
//!
//! This crate provides the pieces shared by both senders:
//!
//! - [`SenderError`] for error handling
//! - [`defaults`] with the built-in parameter values
//! - [`field`] for narrowing user-supplied integers to header widths
//! - [`privilege`] for the raw-socket privilege check

pub mod defaults;
pub mod error;
pub mod field;
pub mod privilege;

pub use error::{SenderError, SenderResult};
pub use field::narrow;
pub use privilege::{has_raw_socket_privileges, require_raw_socket_privileges};
