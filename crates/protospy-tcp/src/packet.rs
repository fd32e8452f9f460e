//! TCP header descriptor and its wire encoding using pnet.

use crate::flags::TcpFlagSet;
use crate::options::{fixture_options, TcpOptionSpec, FIXTURE_DATA_OFFSET, FIXTURE_URGENT_PTR};
use crate::params::TcpParams;
use pnet_packet::ip::{IpNextHeaderProtocol, IpNextHeaderProtocols};
use pnet_packet::tcp::{MutableTcpPacket, TcpPacket};
use protospy_core::{narrow, SenderError, SenderResult};
use protospy_packets::{build_ip_layer, build_payload, Packet, TransportLayer};
use std::net::Ipv4Addr;
use tracing::trace;

/// Length of a TCP header without options.
const TCP_BASE_HEADER_LEN: usize = 20;

/// TCP header descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpLayer {
    pub source_port: i64,
    pub destination_port: i64,
    pub sequence: i64,
    pub acknowledgement: i64,
    /// Header length in 32-bit words.
    pub data_offset: u8,
    /// Flag letters, parsed when the header is written.
    pub flags: String,
    pub window: i64,
    pub urgent_ptr: u16,
    pub options: Vec<TcpOptionSpec>,
}

impl TransportLayer for TcpLayer {
    const NAME: &'static str = "TCP";

    fn protocol(&self) -> IpNextHeaderProtocol {
        IpNextHeaderProtocols::Tcp
    }

    fn destination_port(&self) -> SenderResult<u16> {
        narrow("dport", self.destination_port)
    }

    fn header_len(&self) -> usize {
        self.data_offset as usize * 4
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
        let sequence: u32 = narrow("seq", self.sequence)?;
        let acknowledgement: u32 = narrow("ack", self.acknowledgement)?;
        let window: u16 = narrow("window", self.window)?;
        let flags = TcpFlagSet::parse(&self.flags)?;
        trace!(%flags, data_offset = self.data_offset, "writing TCP header");

        if !(5..=15).contains(&self.data_offset) {
            return Err(SenderError::BuildFailed {
                layer: "TCP",
                reason: format!("data offset {} outside 5..=15", self.data_offset),
            });
        }
        let option_space = self.header_len() - TCP_BASE_HEADER_LEN;
        let options_len: usize = self.options.iter().map(TcpOptionSpec::wire_len).sum();
        if options_len > option_space {
            return Err(SenderError::BuildFailed {
                layer: "TCP",
                reason: format!(
                    "{} bytes of options do not fit in {} bytes of option space",
                    options_len, option_space
                ),
            });
        }

        {
            let mut tcp_packet = MutableTcpPacket::new(segment).ok_or_else(|| {
                SenderError::BuildFailed {
                    layer: "TCP",
                    reason: "segment shorter than a TCP header".to_string(),
                }
            })?;

            tcp_packet.set_source(source_port);
            tcp_packet.set_destination(destination_port);
            tcp_packet.set_sequence(sequence);
            tcp_packet.set_acknowledgement(acknowledgement);
            tcp_packet.set_data_offset(self.data_offset);
            tcp_packet.set_reserved(0);
            tcp_packet.set_flags(flags.flags_byte());
            tcp_packet.set_window(window);
            tcp_packet.set_urgent_ptr(self.urgent_ptr);

            // Unused option space stays zero (End of Option List)
            let options: Vec<_> = self.options.iter().map(|o| o.to_pnet()).collect();
            tcp_packet.set_options(&options);

            tcp_packet.set_payload(payload);
        }

        if flags.ns() {
            segment[12] |= 0x01;
        }

        let checksum = {
            let view = TcpPacket::new(segment).ok_or_else(|| SenderError::BuildFailed {
                layer: "TCP",
                reason: "segment shorter than a TCP header".to_string(),
            })?;
            pnet_packet::tcp::ipv4_checksum(&view, &src, &dst)
        };
        segment[16..18].copy_from_slice(&checksum.to_be_bytes());

        Ok(())
    }
}

/// Builds the TCP header descriptor from resolved parameters.
///
/// Data offset, urgent pointer and options always come from the fixtures.
pub fn build_tcp_layer(params: &TcpParams) -> TcpLayer {
    TcpLayer {
        source_port: params.sport,
        destination_port: params.dport,
        sequence: params.seq,
        acknowledgement: params.ack,
        data_offset: FIXTURE_DATA_OFFSET,
        flags: params.flags.clone(),
        window: params.window,
        urgent_ptr: FIXTURE_URGENT_PTR,
        options: fixture_options(),
    }
}

/// Builds the complete IPv4/TCP/payload packet.
pub fn build_packet(params: &TcpParams) -> Packet<TcpLayer> {
    let ip = build_ip_layer(&params.src_ip, &params.dst_ip);
    let tcp = build_tcp_layer(params);
    let payload = build_payload(&params.payload);

    trace!(
        src = %params.src_ip,
        dst = %params.dst_ip,
        sport = params.sport,
        dport = params.dport,
        flags = %params.flags,
        "built TCP packet"
    );

    Packet::new(ip, tcp, payload)
}
