//! TCP flag strings.

use pnet_packet::tcp::TcpFlags;
use protospy_core::{SenderError, SenderResult};
use std::fmt;

/// Nonce-sum bit; lives in the low bit of the reserved nibble on the wire.
const NS: u16 = 0x100;

/// Letter to bit mapping, in wire bit order.
const LETTERS: [(char, u16); 9] = [
    ('F', TcpFlags::FIN as u16),
    ('S', TcpFlags::SYN as u16),
    ('R', TcpFlags::RST as u16),
    ('P', TcpFlags::PSH as u16),
    ('A', TcpFlags::ACK as u16),
    ('U', TcpFlags::URG as u16),
    ('E', TcpFlags::ECE as u16),
    ('C', TcpFlags::CWR as u16),
    ('N', NS),
];

/// Set of TCP control bits parsed from a flag string such as `"SA"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcpFlagSet(u16);

impl TcpFlagSet {
    /// Parses a case-sensitive string of flag letters.
    ///
    /// Letters may appear in any order and more than once; the empty string is
    /// the empty set.
    pub fn parse(value: &str) -> SenderResult<Self> {
        let mut bits = 0u16;
        for c in value.chars() {
            let bit = LETTERS
                .iter()
                .find(|(letter, _)| *letter == c)
                .map(|(_, bit)| *bit)
                .ok_or_else(|| SenderError::InvalidFlags {
                    value: value.to_string(),
                    flag: c,
                })?;
            bits |= bit;
        }
        Ok(Self(bits))
    }

    /// All nine bits, NS in bit 8.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// The eight bits of the TCP flags byte (CWR..FIN).
    pub fn flags_byte(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Whether the nonce-sum bit is set.
    pub fn ns(self) -> bool {
        self.0 & NS != 0
    }
}

impl fmt::Display for TcpFlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, bit) in LETTERS {
            if self.0 & bit != 0 {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}
