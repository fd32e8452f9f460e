//! Built-in parameter values used when a field is not overridden.

/// Source IPv4 address.
pub const DEFAULT_SRC_IP: &str = "127.0.0.1";
/// Destination IPv4 address.
pub const DEFAULT_DST_IP: &str = "192.168.0.104";
/// Transport source port.
pub const DEFAULT_SPORT: u16 = 45258;
/// Transport destination port.
pub const DEFAULT_DPORT: u16 = 47873;
/// TCP sequence number.
pub const DEFAULT_SEQ: u32 = 25000;
/// TCP acknowledgment number.
pub const DEFAULT_ACK: u32 = 12500;
/// TCP window size.
pub const DEFAULT_WINDOW: u16 = 0x4e02;
/// TCP flag string (ACK only).
pub const DEFAULT_FLAGS: &str = "A";
/// Payload carried by both senders.
pub const DEFAULT_PAYLOAD: &str = "hello from scapy";

/// Time to live of every crafted IPv4 header.
pub const DEFAULT_TTL: u8 = 64;
/// Identification field of every crafted IPv4 header.
pub const DEFAULT_IP_ID: u16 = 1;
