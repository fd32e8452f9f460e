//! UDP parameter set and override resolution.

use protospy_core::defaults::{
    DEFAULT_DPORT, DEFAULT_DST_IP, DEFAULT_PAYLOAD, DEFAULT_SPORT, DEFAULT_SRC_IP,
};

/// How the UDP checksum field is filled.
///
/// `Auto` and `Forced(0)` are different packets: the first always carries a
/// computed, nonzero checksum, the second carries zero ("no checksum").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Checksum {
    /// Compute over the IPv4 pseudo-header; a computed zero is sent as `0xffff`.
    #[default]
    Auto,
    /// Write this exact value, narrowed to 16 bits when serialized.
    Forced(i64),
}

impl From<Option<i64>> for Checksum {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Checksum::Auto, Checksum::Forced)
    }
}

/// Resolved field values for one UDP packet.
///
/// Ports are kept wide and narrowed to 16 bits when the packet is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpParams {
    pub src_ip: String,
    pub dst_ip: String,
    pub sport: i64,
    pub dport: i64,
    pub payload: String,
    pub checksum: Checksum,
}

impl Default for UdpParams {
    fn default() -> Self {
        Self {
            src_ip: DEFAULT_SRC_IP.to_string(),
            dst_ip: DEFAULT_DST_IP.to_string(),
            sport: DEFAULT_SPORT.into(),
            dport: DEFAULT_DPORT.into(),
            payload: DEFAULT_PAYLOAD.to_string(),
            checksum: Checksum::Auto,
        }
    }
}

/// Caller-supplied values; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UdpOverrides {
    pub src_ip: Option<String>,
    pub dst_ip: Option<String>,
    pub sport: Option<i64>,
    pub dport: Option<i64>,
    pub payload: Option<String>,
    /// `Some(value)` forces the checksum, `Some(0)` included.
    pub checksum: Option<i64>,
}

impl UdpParams {
    /// Applies `overrides` field by field on top of the defaults.
    pub fn resolve(overrides: UdpOverrides) -> Self {
        let defaults = Self::default();
        Self {
            src_ip: overrides.src_ip.unwrap_or(defaults.src_ip),
            dst_ip: overrides.dst_ip.unwrap_or(defaults.dst_ip),
            sport: overrides.sport.unwrap_or(defaults.sport),
            dport: overrides.dport.unwrap_or(defaults.dport),
            payload: overrides.payload.unwrap_or(defaults.payload),
            checksum: overrides.checksum.into(),
        }
    }
}
