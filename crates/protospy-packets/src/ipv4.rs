//! IPv4 header serialization using pnet.

use pnet_packet::ip::IpNextHeaderProtocol;
use pnet_packet::ipv4::MutableIpv4Packet;
use protospy_core::defaults::{DEFAULT_IP_ID, DEFAULT_TTL};
use protospy_core::{SenderError, SenderResult};
use std::net::Ipv4Addr;

/// Length of an IPv4 header without options.
pub const IPV4_HEADER_LEN: usize = 20;

/// Writes an option-less IPv4 header at the start of `buffer`.
///
/// The total length field covers the whole buffer, so the caller sizes the
/// buffer to the complete packet before calling this.
pub fn write_ipv4_header(
    buffer: &mut [u8],
    src: Ipv4Addr,
    dst: Ipv4Addr,
    protocol: IpNextHeaderProtocol,
) -> SenderResult<()> {
    let total_len = buffer.len();
    if total_len > u16::MAX as usize {
        return Err(SenderError::PacketTooLarge { len: total_len });
    }

    let mut ip_packet = MutableIpv4Packet::new(buffer).ok_or_else(|| SenderError::BuildFailed {
        layer: "IP",
        reason: format!("buffer of {} bytes cannot hold an IPv4 header", total_len),
    })?;

    ip_packet.set_version(4);
    ip_packet.set_header_length(5); // 5 * 4 = 20 bytes
    ip_packet.set_dscp(0);
    ip_packet.set_ecn(0);
    ip_packet.set_total_length(total_len as u16);
    ip_packet.set_identification(DEFAULT_IP_ID);
    ip_packet.set_flags(0);
    ip_packet.set_fragment_offset(0);
    ip_packet.set_ttl(DEFAULT_TTL);
    ip_packet.set_next_level_protocol(protocol);
    ip_packet.set_source(src);
    ip_packet.set_destination(dst);

    let checksum = pnet_packet::ipv4::checksum(&ip_packet.to_immutable());
    ip_packet.set_checksum(checksum);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet_packet::ip::IpNextHeaderProtocols;

    #[test]
    fn test_write_ipv4_header() {
        let mut buffer = vec![0u8; 48];
        write_ipv4_header(
            &mut buffer,
            Ipv4Addr::new(127, 0, 0, 1),
            Ipv4Addr::new(192, 168, 0, 104),
            IpNextHeaderProtocols::Udp,
        )
        .unwrap();

        // Version 4, IHL 5
        assert_eq!(buffer[0], 0x45);
        // Total length
        assert_eq!(u16::from_be_bytes([buffer[2], buffer[3]]), 48);
        // Identification
        assert_eq!(u16::from_be_bytes([buffer[4], buffer[5]]), 1);
        // No flags, no fragment offset
        assert_eq!(&buffer[6..8], &[0, 0]);
        assert_eq!(buffer[8], 64);
        assert_eq!(buffer[9], 17);
        assert_eq!(&buffer[12..16], &[127, 0, 0, 1]);
        assert_eq!(&buffer[16..20], &[192, 168, 0, 104]);
    }

    #[test]
    fn test_header_checksum_verifies() {
        let mut buffer = vec![0u8; 40];
        write_ipv4_header(
            &mut buffer,
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            IpNextHeaderProtocols::Tcp,
        )
        .unwrap();

        // One's complement sum over a valid header folds to 0xffff
        let mut sum: u32 = buffer[..IPV4_HEADER_LEN]
            .chunks(2)
            .map(|w| u16::from_be_bytes([w[0], w[1]]) as u32)
            .sum();
        while sum > 0xffff {
            sum = (sum & 0xffff) + (sum >> 16);
        }
        assert_eq!(sum, 0xffff);
    }

    #[test]
    fn test_rejects_oversized_buffer() {
        let mut buffer = vec![0u8; u16::MAX as usize + 1];
        let err = write_ipv4_header(
            &mut buffer,
            Ipv4Addr::LOCALHOST,
            Ipv4Addr::LOCALHOST,
            IpNextHeaderProtocols::Udp,
        )
        .unwrap_err();
        assert!(matches!(err, SenderError::PacketTooLarge { len: 65536 }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let mut buffer = vec![0u8; 10];
        let err = write_ipv4_header(
            &mut buffer,
            Ipv4Addr::LOCALHOST,
            Ipv4Addr::LOCALHOST,
            IpNextHeaderProtocols::Udp,
        )
        .unwrap_err();
        assert!(matches!(err, SenderError::BuildFailed { layer: "IP", .. }));
    }
}
