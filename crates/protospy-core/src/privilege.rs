//! Raw-socket privilege check.

use crate::{SenderError, SenderResult};

/// Returns true if the current process runs with an effective UID of 0.
///
/// Emitting packets with a hand-written IP header needs a raw socket, which
/// the kernel only hands out to root (or a process holding `CAP_NET_RAW`,
/// which this check does not try to detect).
#[cfg(unix)]
pub fn has_raw_socket_privileges() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn has_raw_socket_privileges() -> bool {
    false
}

/// Fails with [`SenderError::InsufficientPrivileges`] unless running as root.
pub fn require_raw_socket_privileges() -> SenderResult<()> {
    if has_raw_socket_privileges() {
        Ok(())
    } else {
        Err(SenderError::InsufficientPrivileges)
    }
}
