//! Command-line surface of the TCP sender.

use clap::Parser;
use protospy_tcp::TcpOverrides;

/// TCP Packet Sender for proto-spy testing.
///
/// Integer flags only have to be integers here. A value too wide for its
/// header field is reported when the packet is sent.
#[derive(Parser, Debug)]
#[command(name = "send-tcp-packet")]
#[command(version)]
#[command(about = "TCP Packet Sender for proto-spy testing")]
pub struct TcpArgs {
    /// Source IP.
    #[arg(long = "src-ip")]
    pub src_ip: Option<String>,

    /// Destination IP.
    #[arg(long = "dst-ip")]
    pub dst_ip: Option<String>,

    /// Source port.
    #[arg(long, allow_negative_numbers = true)]
    pub sport: Option<i64>,

    /// Destination port.
    #[arg(long, allow_negative_numbers = true)]
    pub dport: Option<i64>,

    /// Sequence number.
    #[arg(long, allow_negative_numbers = true)]
    pub seq: Option<i64>,

    /// Acknowledgment number.
    #[arg(long, allow_negative_numbers = true)]
    pub ack: Option<i64>,

    /// Window size.
    #[arg(long, allow_negative_numbers = true)]
    pub window: Option<i64>,

    /// TCP flags, e.g. "A", "SA", "FPU".
    #[arg(long, allow_hyphen_values = true)]
    pub flags: Option<String>,

    /// Payload content.
    #[arg(long, allow_hyphen_values = true)]
    pub payload: Option<String>,

    /// Enable verbose logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TcpArgs {
    /// The supplied flags as parameter overrides.
    pub fn overrides(&self) -> TcpOverrides {
        TcpOverrides {
            src_ip: self.src_ip.clone(),
            dst_ip: self.dst_ip.clone(),
            sport: self.sport,
            dport: self.dport,
            seq: self.seq,
            ack: self.ack,
            window: self.window,
            flags: self.flags.clone(),
            payload: self.payload.clone(),
        }
    }
}
