//! Packet transmission sink trait.

use protospy_core::SenderResult;
use std::net::SocketAddr;

/// Trait for packet transmission.
pub trait PacketSink {
    /// Writes a complete IP packet (header included) towards the given address.
    fn write_to(&mut self, buf: &[u8], addr: SocketAddr) -> SenderResult<()>;

    /// Closes the sink.
    fn close(&mut self) -> SenderResult<()>;
}
