//! TCP parameter set and override resolution.

use protospy_core::defaults::{
    DEFAULT_ACK, DEFAULT_DPORT, DEFAULT_DST_IP, DEFAULT_FLAGS, DEFAULT_PAYLOAD, DEFAULT_SEQ,
    DEFAULT_SPORT, DEFAULT_SRC_IP, DEFAULT_WINDOW,
};

/// Resolved field values for one TCP packet.
///
/// Integers are kept wide and narrowed to their header widths when the packet
/// is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpParams {
    pub src_ip: String,
    pub dst_ip: String,
    pub sport: i64,
    pub dport: i64,
    pub seq: i64,
    pub ack: i64,
    pub window: i64,
    /// Flag letters, e.g. `"A"` or `"SA"`. Validated only at serialization.
    pub flags: String,
    pub payload: String,
}

impl Default for TcpParams {
    fn default() -> Self {
        Self {
            src_ip: DEFAULT_SRC_IP.to_string(),
            dst_ip: DEFAULT_DST_IP.to_string(),
            sport: DEFAULT_SPORT.into(),
            dport: DEFAULT_DPORT.into(),
            seq: DEFAULT_SEQ.into(),
            ack: DEFAULT_ACK.into(),
            window: DEFAULT_WINDOW.into(),
            flags: DEFAULT_FLAGS.to_string(),
            payload: DEFAULT_PAYLOAD.to_string(),
        }
    }
}

/// Caller-supplied values; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TcpOverrides {
    pub src_ip: Option<String>,
    pub dst_ip: Option<String>,
    pub sport: Option<i64>,
    pub dport: Option<i64>,
    pub seq: Option<i64>,
    pub ack: Option<i64>,
    pub window: Option<i64>,
    pub flags: Option<String>,
    pub payload: Option<String>,
}

impl TcpParams {
    /// Applies `overrides` field by field on top of the defaults.
    pub fn resolve(overrides: TcpOverrides) -> Self {
        let defaults = Self::default();
        Self {
            src_ip: overrides.src_ip.unwrap_or(defaults.src_ip),
            dst_ip: overrides.dst_ip.unwrap_or(defaults.dst_ip),
            sport: overrides.sport.unwrap_or(defaults.sport),
            dport: overrides.dport.unwrap_or(defaults.dport),
            seq: overrides.seq.unwrap_or(defaults.seq),
            ack: overrides.ack.unwrap_or(defaults.ack),
            window: overrides.window.unwrap_or(defaults.window),
            flags: overrides.flags.unwrap_or(defaults.flags),
            payload: overrides.payload.unwrap_or(defaults.payload),
        }
    }
}
