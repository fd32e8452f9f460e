//! Packet model and raw-socket transmission for the proto-spy senders.
//!
//! A packet is an IPv4 layer, a transport layer and a raw payload. The
//! transport layer is pluggable through [`TransportLayer`]; the TCP and UDP
//! crates provide the implementations.

pub mod inspect;
pub mod ipv4;
pub mod layers;
pub mod platform;
pub mod sink;
pub mod transmit;

pub use inspect::describe;
pub use ipv4::IPV4_HEADER_LEN;
pub use layers::{build_ip_layer, build_payload, Ipv4Layer, Packet, Raw, TransportLayer};
pub use platform::new_sink;
pub use sink::PacketSink;
pub use transmit::{send, send_packet, SendReport};
