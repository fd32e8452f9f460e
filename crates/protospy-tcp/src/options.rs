//! TCP option descriptors and the fixed option fixtures.
//!
//! The inspector's test expectations are written against one exact header
//! layout: a 32-byte header (data offset 8), urgent pointer 3, and the option
//! bytes `01 01 08 0a 19 a2 fc 43 f3 79 fb 67`. The constants below pin that
//! layout; they are not derived from any input.

use pnet_packet::tcp::TcpOption;

/// Data offset of every crafted TCP header, in 32-bit words.
pub const FIXTURE_DATA_OFFSET: u8 = 8;

/// Urgent pointer of every crafted TCP header.
pub const FIXTURE_URGENT_PTR: u16 = 3;

/// Timestamp value (TSval) carried in the timestamp option.
pub const FIXTURE_TS_VALUE: u32 = 0x19a2fc43;

/// Timestamp echo reply (TSecr) carried in the timestamp option.
pub const FIXTURE_TS_ECHO_REPLY: u32 = 0xf379fb67;

/// One TCP option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpOptionSpec {
    /// No-operation padding (kind 1).
    Nop,
    /// Timestamps (kind 8, length 10).
    Timestamp { value: u32, echo_reply: u32 },
}

impl TcpOptionSpec {
    /// Encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        match self {
            TcpOptionSpec::Nop => 1,
            TcpOptionSpec::Timestamp { .. } => 10,
        }
    }

    pub(crate) fn to_pnet(self) -> TcpOption {
        match self {
            TcpOptionSpec::Nop => TcpOption::nop(),
            TcpOptionSpec::Timestamp { value, echo_reply } => {
                TcpOption::timestamp(value, echo_reply)
            }
        }
    }
}

/// The option list every crafted TCP header carries: NOP, NOP, Timestamp.
pub fn fixture_options() -> Vec<TcpOptionSpec> {
    vec![
        TcpOptionSpec::Nop,
        TcpOptionSpec::Nop,
        TcpOptionSpec::Timestamp {
            value: FIXTURE_TS_VALUE,
            echo_reply: FIXTURE_TS_ECHO_REPLY,
        },
    ]
}
