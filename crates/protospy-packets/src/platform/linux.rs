//! Linux raw-socket sink.

use super::{close_fd, open_hdrincl_socket, sendto_v4};
use crate::PacketSink;
use protospy_core::{SenderError, SenderResult};
use std::net::SocketAddr;
use std::os::unix::io::RawFd;
use tracing::trace;

/// `IPPROTO_RAW` socket with `IP_HDRINCL`; the kernel sends our IPv4 header as is.
pub struct RawSink {
    fd: RawFd,
}

impl RawSink {
    /// Opens the raw socket.
    pub fn new() -> SenderResult<Self> {
        let fd = open_hdrincl_socket()?;
        trace!(fd, "opened raw socket");
        Ok(Self { fd })
    }
}

impl PacketSink for RawSink {
    fn write_to(&mut self, buf: &[u8], addr: SocketAddr) -> SenderResult<()> {
        let SocketAddr::V4(addr) = addr else {
            return Err(SenderError::Internal(format!(
                "raw sink only handles IPv4 destinations, got {}",
                addr
            )));
        };
        sendto_v4(self.fd, buf, addr)
    }

    fn close(&mut self) -> SenderResult<()> {
        if self.fd < 0 {
            return Ok(());
        }
        let fd = std::mem::replace(&mut self.fd, -1);
        close_fd(fd)
    }
}

impl Drop for RawSink {
    fn drop(&mut self) {
        if self.fd >= 0 {
            unsafe { libc::close(self.fd) };
        }
    }
}
