//! Command-line surface of the UDP sender.

use clap::Parser;
use protospy_udp::UdpOverrides;

/// UDP Packet Sender for proto-spy testing.
#[derive(Parser, Debug)]
#[command(name = "send-udp-packet")]
#[command(version)]
#[command(about = "UDP Packet Sender for proto-spy testing")]
pub struct UdpArgs {
    /// Source IP address.
    #[arg(long = "src-ip")]
    pub src_ip: Option<String>,

    /// Destination IP address.
    #[arg(long = "dst-ip")]
    pub dst_ip: Option<String>,

    /// Source port.
    #[arg(long, allow_negative_numbers = true)]
    pub sport: Option<i64>,

    /// Destination port.
    #[arg(long, allow_negative_numbers = true)]
    pub dport: Option<i64>,

    /// Payload content.
    #[arg(long, allow_hyphen_values = true)]
    pub payload: Option<String>,

    /// Force specific UDP checksum (0 for none).
    #[arg(long, allow_negative_numbers = true)]
    pub checksum: Option<i64>,

    /// Enable verbose logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl UdpArgs {
    /// The supplied flags as parameter overrides.
    pub fn overrides(&self) -> UdpOverrides {
        UdpOverrides {
            src_ip: self.src_ip.clone(),
            dst_ip: self.dst_ip.clone(),
            sport: self.sport,
            dport: self.dport,
            payload: self.payload.clone(),
            checksum: self.checksum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protospy_udp::{Checksum, UdpParams};

    #[test]
    fn test_no_flags_means_auto_checksum() {
        let args = UdpArgs::try_parse_from(["send-udp-packet"]).unwrap();
        assert_eq!(args.overrides(), UdpOverrides::default());
        assert_eq!(UdpParams::resolve(args.overrides()).checksum, Checksum::Auto);
    }

    #[test]
    fn test_checksum_zero_is_forced() {
        let args = UdpArgs::try_parse_from(["send-udp-packet", "--checksum", "0"]).unwrap();
        assert_eq!(args.checksum, Some(0));
        assert_eq!(
            UdpParams::resolve(args.overrides()).checksum,
            Checksum::Forced(0)
        );
    }

    #[test]
    fn test_every_flag_maps_to_its_field() {
        let args = UdpArgs::try_parse_from([
            "send-udp-packet",
            "--src-ip",
            "10.0.0.1",
            "--dst-ip",
            "10.0.0.2",
            "--sport",
            "1",
            "--dport",
            "2",
            "--payload",
            "-dash-first",
            "--checksum",
            "65535",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose);
        let params = UdpParams::resolve(args.overrides());
        assert_eq!(params.src_ip, "10.0.0.1");
        assert_eq!(params.dst_ip, "10.0.0.2");
        assert_eq!(params.sport, 1);
        assert_eq!(params.dport, 2);
        assert_eq!(params.payload, "-dash-first");
        assert_eq!(params.checksum, Checksum::Forced(0xffff));
    }

    #[test]
    fn test_checksum_is_type_checked() {
        assert!(UdpArgs::try_parse_from(["send-udp-packet", "--checksum", "none"]).is_err());
    }

    #[test]
    fn test_out_of_range_checksum_reaches_the_params() {
        let args = UdpArgs::try_parse_from(["send-udp-packet", "--checksum", "-1"]).unwrap();
        assert_eq!(args.checksum, Some(-1));
        assert_eq!(
            UdpParams::resolve(args.overrides()).checksum,
            Checksum::Forced(-1)
        );

        let args = UdpArgs::try_parse_from(["send-udp-packet", "--checksum", "65536"]).unwrap();
        assert_eq!(args.checksum, Some(65536));
    }
}
