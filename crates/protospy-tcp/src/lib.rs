//! TCP packet crafting.
//!
//! Resolves [`TcpParams`], builds a [`TcpLayer`] carrying the fixed option
//! fixtures, and assembles a full packet ready for
//! [`protospy_packets::send_packet`].

mod flags;
mod options;
mod packet;
mod params;

pub use flags::TcpFlagSet;
pub use options::{
    fixture_options, TcpOptionSpec, FIXTURE_DATA_OFFSET, FIXTURE_TS_ECHO_REPLY, FIXTURE_TS_VALUE,
    FIXTURE_URGENT_PTR,
};
pub use packet::{build_packet, build_tcp_layer, TcpLayer};
pub use params::{TcpOverrides, TcpParams};
