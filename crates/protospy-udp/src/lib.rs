//! UDP packet crafting.
//!
//! Resolves [`UdpParams`], builds a [`UdpLayer`] with either an automatic or a
//! forced checksum, and assembles a full packet ready for
//! [`protospy_packets::send_packet`].

mod packet;
mod params;

pub use packet::{build_packet, build_udp_layer, UdpLayer};
pub use params::{Checksum, UdpOverrides, UdpParams};
