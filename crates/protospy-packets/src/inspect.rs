//! Human-readable decoding of serialized packets using etherparse.

use etherparse::{Ipv4Header, TcpHeader, TcpOptionElement, UdpHeader};
use protospy_core::{SenderError, SenderResult};
use std::fmt::Write;
use std::net::Ipv4Addr;

const PROTO_TCP: u8 = 6;
const PROTO_UDP: u8 = 17;

/// Renders a one-line summary of an IPv4 packet with a TCP or UDP header.
///
/// Checksums are printed but not verified.
pub fn describe(packet: &[u8]) -> SenderResult<String> {
    let (ip, rest) = Ipv4Header::from_slice(packet).map_err(|e| SenderError::PacketParseFailed {
        layer: "IP",
        reason: e.to_string(),
    })?;

    let mut out = format!(
        "IPv4 {} -> {} ttl={} id={}",
        Ipv4Addr::from(ip.source),
        Ipv4Addr::from(ip.destination),
        ip.time_to_live,
        ip.identification,
    );

    match packet[9] {
        PROTO_TCP => {
            let (tcp, payload) =
                TcpHeader::from_slice(rest).map_err(|e| SenderError::PacketParseFailed {
                    layer: "TCP",
                    reason: e.to_string(),
                })?;
            let _ = write!(
                out,
                " | TCP {} -> {} seq={} ack={} flags={} window={} urg={} dataofs={} options=[{}] chksum={:#06x} | payload {} bytes",
                tcp.source_port,
                tcp.destination_port,
                tcp.sequence_number,
                tcp.acknowledgment_number,
                tcp_flag_letters(&tcp),
                tcp.window_size,
                tcp.urgent_pointer,
                tcp.data_offset(),
                tcp_option_names(&tcp).join(","),
                tcp.checksum,
                payload.len(),
            );
        }
        PROTO_UDP => {
            let (udp, payload) =
                UdpHeader::from_slice(rest).map_err(|e| SenderError::PacketParseFailed {
                    layer: "UDP",
                    reason: e.to_string(),
                })?;
            let _ = write!(
                out,
                " | UDP {} -> {} len={} chksum={:#06x} | payload {} bytes",
                udp.source_port,
                udp.destination_port,
                udp.length,
                udp.checksum,
                payload.len(),
            );
        }
        other => {
            return Err(SenderError::PacketParseFailed {
                layer: "Transport",
                reason: format!("unsupported IP protocol {}", other),
            });
        }
    }

    Ok(out)
}

/// Flag letters in FIN, SYN, RST, PSH, ACK, URG, ECE, CWR, NS order.
fn tcp_flag_letters(tcp: &TcpHeader) -> String {
    [
        (tcp.fin, 'F'),
        (tcp.syn, 'S'),
        (tcp.rst, 'R'),
        (tcp.psh, 'P'),
        (tcp.ack, 'A'),
        (tcp.urg, 'U'),
        (tcp.ece, 'E'),
        (tcp.cwr, 'C'),
        (tcp.ns, 'N'),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|(_, letter)| *letter)
    .collect()
}

fn tcp_option_names(tcp: &TcpHeader) -> Vec<String> {
    tcp.options_iterator()
        .map(|option| match option {
            Ok(TcpOptionElement::Noop) => "NOP".to_string(),
            Ok(TcpOptionElement::MaximumSegmentSize(mss)) => format!("MSS({})", mss),
            Ok(TcpOptionElement::WindowScale(shift)) => format!("WScale({})", shift),
            Ok(TcpOptionElement::SelectiveAcknowledgementPermitted) => "SAckOK".to_string(),
            Ok(TcpOptionElement::SelectiveAcknowledgement(..)) => "SAck".to_string(),
            Ok(TcpOptionElement::Timestamp(value, echo)) => format!("TS({:#x},{:#x})", value, echo),
            Err(e) => format!("?({})", e),
        })
        .collect()
}
