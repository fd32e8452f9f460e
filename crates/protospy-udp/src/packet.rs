//! UDP header descriptor and its wire encoding using pnet.

use crate::params::{Checksum, UdpParams};
use pnet_packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet_packet::udp::MutableUdpPacket;
use protospy_core::{narrow, SenderError, SenderResult};
use protospy_packets::{build_ip_layer, build_payload, Packet, TransportLayer};
use std::net::Ipv4Addr;
use tracing::trace;

/// UDP header length.
const UDP_HEADER_LEN: usize = 8;

/// UDP header descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpLayer {
    pub source_port: i64,
    pub destination_port: i64,
    pub checksum: Checksum,
}

impl TransportLayer for UdpLayer {
    const NAME: &'static str = "UDP";

    fn protocol(&self) -> IpNextHeaderProtocol {
        IpNextHeaderProtocols::Udp
    }

    fn destination_port(&self) -> SenderResult<u16> {
        narrow("dport", self.destination_port)
    }

    fn header_len(&self) -> usize {
        UDP_HEADER_LEN
    }

    fn write_segment(
        &self,
        segment: &mut [u8],
        payload: &[u8],
        src: Ipv4Addr,
        dst: Ipv4Addr,
    ) -> SenderResult<()> {
        let source_port: u16 = narrow("sport", self.source_port)?;
        let destination_port: u16 = narrow("dport", self.destination_port)?;
        let forced: Option<u16> = match self.checksum {
            Checksum::Forced(value) => Some(narrow("checksum", value)?),
            Checksum::Auto => None,
        };

        let udp_len = segment.len();
        let mut udp_packet =
            MutableUdpPacket::new(segment).ok_or_else(|| SenderError::BuildFailed {
                layer: "UDP",
                reason: "segment shorter than a UDP header".to_string(),
            })?;

        udp_packet.set_source(source_port);
        udp_packet.set_destination(destination_port);
        udp_packet.set_length(udp_len as u16);
        udp_packet.set_payload(payload);

        let checksum = match forced {
            Some(value) => value,
            None => match pnet_packet::udp::ipv4_checksum(&udp_packet.to_immutable(), &src, &dst) {
                // Zero means "no checksum" on the wire
                0 => 0xffff,
                sum => sum,
            },
        };
        udp_packet.set_checksum(checksum);

        Ok(())
    }
}

/// Builds the UDP header descriptor from resolved parameters.
pub fn build_udp_layer(params: &UdpParams) -> UdpLayer {
    UdpLayer {
        source_port: params.sport,
        destination_port: params.dport,
        checksum: params.checksum,
    }
}

/// Builds the complete IPv4/UDP/payload packet.
pub fn build_packet(params: &UdpParams) -> Packet<UdpLayer> {
    let ip = build_ip_layer(&params.src_ip, &params.dst_ip);
    let udp = build_udp_layer(params);
    let payload = build_payload(&params.payload);

    trace!(
        src = %params.src_ip,
        dst = %params.dst_ip,
        sport = params.sport,
        dport = params.dport,
        checksum = ?params.checksum,
        "built UDP packet"
    );

    Packet::new(ip, udp, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::UdpOverrides;
    use etherparse::{Ipv4Header, UdpHeader};
    use pnet_packet::udp::UdpPacket;

    const UDP_START: usize = 20;

    fn encode(params: &UdpParams) -> Vec<u8> {
        build_packet(params).to_bytes().unwrap()
    }

    fn wire_checksum(bytes: &[u8]) -> u16 {
        u16::from_be_bytes([bytes[UDP_START + 6], bytes[UDP_START + 7]])
    }

    #[test]
    fn test_default_packet() {
        let bytes = encode(&UdpParams::default());

        // 20 IP + 8 UDP + 16 payload
        assert_eq!(bytes.len(), 44);
        assert_eq!(bytes[9], 17);

        let (ip, rest) = Ipv4Header::from_slice(&bytes).unwrap();
        let (udp, payload) = UdpHeader::from_slice(rest).unwrap();
        assert_eq!(ip.source, [127, 0, 0, 1]);
        assert_eq!(ip.destination, [192, 168, 0, 104]);
        assert_eq!(udp.source_port, 45258);
        assert_eq!(udp.destination_port, 47873);
        assert_eq!(udp.length, 24);
        assert_eq!(payload, b"hello from scapy");
    }

    #[test]
    fn test_auto_checksum_is_computed() {
        let bytes = encode(&UdpParams::default());
        let view = UdpPacket::new(&bytes[UDP_START..]).unwrap();
        let expected = pnet_packet::udp::ipv4_checksum(
            &view,
            &Ipv4Addr::new(127, 0, 0, 1),
            &Ipv4Addr::new(192, 168, 0, 104),
        );
        assert_ne!(wire_checksum(&bytes), 0);
        assert_eq!(wire_checksum(&bytes), expected);
    }

    #[test]
    fn test_forced_zero_checksum_is_literal() {
        let params = UdpParams::resolve(UdpOverrides {
            checksum: Some(0),
            ..Default::default()
        });
        let bytes = encode(&params);
        assert_eq!(&bytes[UDP_START + 6..UDP_START + 8], &[0, 0]);
    }

    #[test]
    fn test_forced_checksum_is_literal() {
        let params = UdpParams::resolve(UdpOverrides {
            checksum: Some(0x1234),
            ..Default::default()
        });
        let bytes = encode(&params);
        assert_eq!(wire_checksum(&bytes), 0x1234);
    }

    #[test]
    fn test_overrides_reach_the_wire() {
        let params = UdpParams::resolve(UdpOverrides {
            src_ip: Some("10.0.0.1".to_string()),
            dst_ip: Some("10.0.0.2".to_string()),
            sport: Some(5353),
            dport: Some(53),
            payload: Some(String::new()),
            checksum: None,
        });
        let bytes = encode(&params);
        assert_eq!(bytes.len(), 28);

        let (ip, rest) = Ipv4Header::from_slice(&bytes).unwrap();
        let (udp, payload) = UdpHeader::from_slice(rest).unwrap();
        assert_eq!(ip.source, [10, 0, 0, 1]);
        assert_eq!(ip.destination, [10, 0, 0, 2]);
        assert_eq!(udp.source_port, 5353);
        assert_eq!(udp.destination_port, 53);
        assert_eq!(udp.length, 8);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_invalid_source_fails_at_serialization() {
        let params = UdpParams {
            src_ip: "10.0.0.256".to_string(),
            ..Default::default()
        };
        let err = build_packet(&params).to_bytes().unwrap_err();
        assert!(matches!(err, SenderError::InvalidAddress { field: "source", .. }));
    }

    #[test]
    fn test_host_name_destination_is_resolved() {
        let params = UdpParams {
            dst_ip: "localhost".to_string(),
            ..Default::default()
        };
        let packet = build_packet(&params);
        let bytes = packet.to_bytes().unwrap();
        let (ip, _) = Ipv4Header::from_slice(&bytes).unwrap();
        assert_eq!(ip.destination, [127, 0, 0, 1]);
        assert_eq!(packet.destination().unwrap().to_string(), "127.0.0.1:47873");
    }

    #[test]
    fn test_out_of_range_checksum_fails_at_serialization() {
        let params = UdpParams::resolve(UdpOverrides {
            checksum: Some(-1),
            ..Default::default()
        });
        let err = build_packet(&params).to_bytes().unwrap_err();
        assert!(matches!(
            err,
            SenderError::FieldOutOfRange {
                field: "checksum",
                value: -1,
                bits: 16
            }
        ));
    }

    #[test]
    fn test_out_of_range_port_fails_at_serialization() {
        let params = UdpParams {
            sport: 70000,
            ..Default::default()
        };
        let err = build_packet(&params).to_bytes().unwrap_err();
        assert_eq!(err.to_string(), "Value 70000 for sport does not fit in 16 bits");
    }

    #[test]
    fn test_destination_for_report() {
        let packet = build_packet(&UdpParams::default());
        assert_eq!(packet.destination().unwrap().to_string(), "192.168.0.104:47873");
        assert_eq!(packet.wire_len(), 44);
    }
}
