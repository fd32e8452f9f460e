//! Layered packet model: IPv4 header, transport header and raw payload.

use crate::ipv4::{write_ipv4_header, IPV4_HEADER_LEN};
use pnet_packet::ip::IpNextHeaderProtocol;
use protospy_core::{SenderError, SenderResult};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs};
use tracing::trace;

/// IPv4 header descriptor.
///
/// Addresses are kept exactly as supplied and only parsed, or resolved when
/// they name a host, when the packet is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Layer {
    /// Source address string.
    pub source: String,
    /// Destination address string.
    pub destination: String,
}

impl Ipv4Layer {
    /// Parses or resolves the source address.
    pub fn source_addr(&self) -> SenderResult<Ipv4Addr> {
        parse_addr("source", &self.source)
    }

    /// Parses or resolves the destination address.
    pub fn destination_addr(&self) -> SenderResult<Ipv4Addr> {
        parse_addr("destination", &self.destination)
    }
}

fn parse_addr(field: &'static str, value: &str) -> SenderResult<Ipv4Addr> {
    if let Ok(addr) = value.parse::<Ipv4Addr>() {
        return Ok(addr);
    }

    let invalid = || SenderError::InvalidAddress {
        field,
        value: value.to_string(),
    };
    // Digits and dots only is a malformed literal, not a host name
    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    let mut addrs = (value, 0)
        .to_socket_addrs()
        .map_err(|source| SenderError::AddressResolution {
            field,
            value: value.to_string(),
            source,
        })?;
    let resolved = addrs
        .find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(invalid)?;

    trace!(field, host = value, %resolved, "resolved host name");
    Ok(resolved)
}

/// Raw payload segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raw {
    pub load: Vec<u8>,
}

impl Raw {
    pub fn len(&self) -> usize {
        self.load.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }
}

/// A transport header that can serialize itself behind an IPv4 header.
pub trait TransportLayer {
    /// Protocol name used in diagnostics.
    const NAME: &'static str;

    /// IP protocol number carried in the IPv4 header.
    fn protocol(&self) -> IpNextHeaderProtocol;

    /// Destination port, narrowed to 16 bits.
    fn destination_port(&self) -> SenderResult<u16>;

    /// Header length in bytes, options included.
    fn header_len(&self) -> usize;

    /// Writes the header followed by `payload` into `segment`.
    ///
    /// `segment` is exactly `header_len() + payload.len()` bytes long. The
    /// addresses are needed for the pseudo-header checksum.
    fn write_segment(
        &self,
        segment: &mut [u8],
        payload: &[u8],
        src: Ipv4Addr,
        dst: Ipv4Addr,
    ) -> SenderResult<()>;
}

/// An assembled IPv4 packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet<T> {
    pub ip: Ipv4Layer,
    pub transport: T,
    pub payload: Raw,
}

impl<T: TransportLayer> Packet<T> {
    /// Composes the three layers into a packet.
    pub fn new(ip: Ipv4Layer, transport: T, payload: Raw) -> Self {
        Self {
            ip,
            transport,
            payload,
        }
    }

    /// Total length of the serialized packet in bytes.
    pub fn wire_len(&self) -> usize {
        IPV4_HEADER_LEN + self.transport.header_len() + self.payload.len()
    }

    /// Destination address and port.
    pub fn destination(&self) -> SenderResult<SocketAddrV4> {
        Ok(SocketAddrV4::new(
            self.ip.destination_addr()?,
            self.transport.destination_port()?,
        ))
    }

    /// Serializes the packet, computing lengths and checksums.
    pub fn to_bytes(&self) -> SenderResult<Vec<u8>> {
        let src = self.ip.source_addr()?;
        let dst = self.ip.destination_addr()?;

        let total_len = self.wire_len();
        if total_len > u16::MAX as usize {
            return Err(SenderError::PacketTooLarge { len: total_len });
        }

        let mut buffer = vec![0u8; total_len];
        write_ipv4_header(&mut buffer, src, dst, self.transport.protocol())?;
        self.transport.write_segment(
            &mut buffer[IPV4_HEADER_LEN..],
            &self.payload.load,
            src,
            dst,
        )?;

        Ok(buffer)
    }
}

/// Builds the network layer from source and destination address strings.
pub fn build_ip_layer(src: &str, dst: &str) -> Ipv4Layer {
    Ipv4Layer {
        source: src.to_string(),
        destination: dst.to_string(),
    }
}

/// Wraps a string as a raw payload, byte for byte.
pub fn build_payload(data: &str) -> Raw {
    Raw {
        load: data.as_bytes().to_vec(),
    }
}
