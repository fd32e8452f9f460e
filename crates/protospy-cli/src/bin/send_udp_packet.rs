//! Sends one crafted UDP packet for proto-spy testing.

use clap::Parser;
use protospy_cli::runner::{check_privileges, init_logging, transmit};
use protospy_cli::udp::UdpArgs;
use protospy_udp::{build_packet, UdpParams};
use std::process::ExitCode;

fn main() -> ExitCode {
    if !check_privileges("[!] Error: Packet sending requires root privileges (use sudo)") {
        return ExitCode::FAILURE;
    }

    let args = UdpArgs::parse();
    init_logging(args.verbose);

    let params = UdpParams::resolve(args.overrides());
    tracing::debug!(?params, "resolved UDP parameters");

    let packet = build_packet(&params);
    transmit(&packet, "UDP packet")
}
