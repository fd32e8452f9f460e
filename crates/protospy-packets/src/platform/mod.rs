//! Platform-specific raw-socket sinks.

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod darwin;

use crate::PacketSink;
use protospy_core::{SenderError, SenderResult};
use std::net::IpAddr;

/// Creates the raw-socket sink for the current platform.
pub fn new_sink(target_addr: IpAddr) -> SenderResult<Box<dyn PacketSink>> {
    if target_addr.is_ipv6() {
        return Err(SenderError::Internal(
            "IPv6 transmission is not supported".to_string(),
        ));
    }

    #[cfg(target_os = "linux")]
    return Ok(Box::new(linux::RawSink::new()?));

    #[cfg(target_os = "macos")]
    return Ok(Box::new(darwin::RawSink::new()?));

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    return Err(SenderError::UnsupportedPlatform);
}

/// Converts an IPv4 socket address into a `sockaddr_in`.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn sockaddr_v4(addr: std::net::SocketAddrV4) -> libc::sockaddr_in {
    let mut sockaddr: libc::sockaddr_in = unsafe { std::mem::zeroed() };
    #[cfg(target_os = "macos")]
    {
        sockaddr.sin_len = std::mem::size_of::<libc::sockaddr_in>() as u8;
    }
    sockaddr.sin_family = libc::AF_INET as libc::sa_family_t;
    sockaddr.sin_port = addr.port().to_be();
    sockaddr.sin_addr = libc::in_addr {
        s_addr: u32::from_ne_bytes(addr.ip().octets()),
    };
    sockaddr
}

/// Opens an `AF_INET` raw socket that expects a caller-built IP header.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn open_hdrincl_socket() -> SenderResult<libc::c_int> {
    let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_RAW, libc::IPPROTO_RAW) };
    if fd < 0 {
        return Err(SenderError::SocketCreation(std::io::Error::last_os_error()));
    }

    let one: libc::c_int = 1;
    let rc = unsafe {
        libc::setsockopt(
            fd,
            libc::IPPROTO_IP,
            libc::IP_HDRINCL,
            &one as *const _ as *const libc::c_void,
            std::mem::size_of_val(&one) as libc::socklen_t,
        )
    };
    if rc < 0 {
        let source = std::io::Error::last_os_error();
        unsafe { libc::close(fd) };
        return Err(SenderError::SocketOption {
            option: "IP_HDRINCL",
            source,
        });
    }

    Ok(fd)
}

/// Closes a raw-socket descriptor, reporting a failed `close`.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn close_fd(fd: libc::c_int) -> SenderResult<()> {
    let rc = unsafe { libc::close(fd) };
    if rc < 0 {
        return Err(SenderError::Internal(format!(
            "Failed to close raw socket: {}",
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

/// Sends `buf` once, retrying only when interrupted by a signal.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn sendto_v4(fd: libc::c_int, buf: &[u8], addr: std::net::SocketAddrV4) -> SenderResult<()> {
    let sockaddr = sockaddr_v4(addr);
    loop {
        let rc = unsafe {
            libc::sendto(
                fd,
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
                0,
                &sockaddr as *const _ as *const libc::sockaddr,
                std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
            )
        };
        if rc >= 0 {
            let sent = rc as usize;
            if sent != buf.len() {
                return Err(SenderError::ShortWrite {
                    sent,
                    expected: buf.len(),
                });
            }
            return Ok(());
        }
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::Interrupted {
            continue;
        }
        return Err(SenderError::WriteFailed(err));
    }
}
