//! macOS raw-socket sink.

use super::{close_fd, open_hdrincl_socket, sendto_v4};
use crate::PacketSink;
use protospy_core::{SenderError, SenderResult};
use std::net::SocketAddr;
use std::os::unix::io::RawFd;
use tracing::trace;

/// `IPPROTO_RAW` socket with `IP_HDRINCL`.
///
/// BSD raw sockets read `ip_len` and `ip_off` in host byte order, so both are
/// swapped before the buffer is handed to the kernel.
pub struct RawSink {
    fd: RawFd,
    write_buf: Vec<u8>,
}

impl RawSink {
    /// Opens the raw socket.
    pub fn new() -> SenderResult<Self> {
        let fd = open_hdrincl_socket()?;
        trace!(fd, "opened raw socket");
        Ok(Self {
            fd,
            write_buf: Vec::new(),
        })
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

        self.write_buf.clear();
        self.write_buf.extend_from_slice(buf);
        if self.write_buf.len() >= 20 {
            let ip_len = u16::from_be_bytes([self.write_buf[2], self.write_buf[3]]);
            self.write_buf[2..4].copy_from_slice(&ip_len.to_ne_bytes());

            let ip_off = u16::from_be_bytes([self.write_buf[6], self.write_buf[7]]);
            self.write_buf[6..8].copy_from_slice(&ip_off.to_ne_bytes());
        }

        sendto_v4(self.fd, &self.write_buf, addr)
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
