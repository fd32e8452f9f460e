//! Single-shot packet transmission.

use crate::{describe, new_sink, Packet, PacketSink, TransportLayer};
use protospy_core::SenderResult;
use std::fmt;
use std::net::{IpAddr, SocketAddr, SocketAddrV4};
use tracing::debug;

/// Outcome of a successful transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    /// Length of the packet handed to the sink, IP header included.
    pub bytes_sent: usize,
    /// Destination address and port.
    pub destination: SocketAddrV4,
}

impl fmt::Display for SendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes to {}", self.bytes_sent, self.destination)
    }
}

/// Serializes `packet` and writes it to `sink` exactly once.
pub fn send<T: TransportLayer>(
    packet: &Packet<T>,
    sink: &mut dyn PacketSink,
) -> SenderResult<SendReport> {
    let destination = packet.destination()?;
    let bytes = packet.to_bytes()?;

    match describe(&bytes) {
        Ok(summary) => debug!(protocol = T::NAME, %summary, "sending packet"),
        Err(e) => debug!(protocol = T::NAME, error = %e, "sending undecodable packet"),
    }

    sink.write_to(&bytes, SocketAddr::V4(destination))?;

    Ok(SendReport {
        bytes_sent: bytes.len(),
        destination,
    })
}

/// Sends `packet` through a freshly opened raw-socket sink.
pub fn send_packet<T: TransportLayer>(packet: &Packet<T>) -> SenderResult<SendReport> {
    let destination = packet.destination()?;
    let mut sink = new_sink(IpAddr::V4(*destination.ip()))?;

    let result = send(packet, sink.as_mut());
    let closed = sink.close();
    let report = result?;
    closed?;

    debug!(%report, "packet sent");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_ip_layer, build_payload, Raw};
    use pnet_packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
    use protospy_core::SenderError;
    use std::net::Ipv4Addr;

    struct Blank;

    impl TransportLayer for Blank {
        const NAME: &'static str = "BLANK";

        fn protocol(&self) -> IpNextHeaderProtocol {
            IpNextHeaderProtocols::Test2
        }

        fn destination_port(&self) -> SenderResult<u16> {
            Ok(47873)
        }

        fn header_len(&self) -> usize {
            0
        }

        fn write_segment(
            &self,
            segment: &mut [u8],
            payload: &[u8],
            _src: Ipv4Addr,
            _dst: Ipv4Addr,
        ) -> SenderResult<()> {
            segment.copy_from_slice(payload);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<(Vec<u8>, SocketAddr)>,
        fail_with: Option<std::io::ErrorKind>,
    }

    impl PacketSink for RecordingSink {
        fn write_to(&mut self, buf: &[u8], addr: SocketAddr) -> SenderResult<()> {
            if let Some(kind) = self.fail_with {
                return Err(SenderError::WriteFailed(std::io::Error::new(
                    kind,
                    "Network is unreachable",
                )));
            }
            self.writes.push((buf.to_vec(), addr));
            Ok(())
        }

        fn close(&mut self) -> SenderResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_send_writes_once() {
        let packet = Packet::new(
            build_ip_layer("127.0.0.1", "192.168.0.104"),
            Blank,
            build_payload("hello"),
        );
        let mut sink = RecordingSink::default();

        let report = send(&packet, &mut sink).unwrap();

        assert_eq!(sink.writes.len(), 1);
        assert_eq!(report.bytes_sent, 25);
        assert_eq!(report.destination.to_string(), "192.168.0.104:47873");
        let (bytes, addr) = &sink.writes[0];
        assert_eq!(bytes.len(), report.bytes_sent);
        assert_eq!(addr.to_string(), "192.168.0.104:47873");
    }

    #[test]
    fn test_send_propagates_sink_error() {
        let packet = Packet::new(
            build_ip_layer("127.0.0.1", "192.168.0.104"),
            Blank,
            build_payload("hello"),
        );
        let mut sink = RecordingSink {
            fail_with: Some(std::io::ErrorKind::Other),
            ..Default::default()
        };

        let err = send(&packet, &mut sink).unwrap_err();
        assert!(err.to_string().contains("Network is unreachable"));
    }

    #[test]
    fn test_bad_address_never_reaches_sink() {
        let packet = Packet::new(build_ip_layer("127.0.0.1", "192.168.0"), Blank, Raw::default());
        let mut sink = RecordingSink::default();

        let err = send(&packet, &mut sink).unwrap_err();
        assert!(matches!(err, SenderError::InvalidAddress { .. }));
        assert!(sink.writes.is_empty());
    }
}
