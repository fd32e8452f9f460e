//! Sends one crafted TCP packet for proto-spy testing.

use clap::Parser;
use protospy_cli::runner::{check_privileges, init_logging, transmit};
use protospy_cli::tcp::TcpArgs;
use protospy_tcp::{build_packet, TcpParams};
use std::process::ExitCode;

fn main() -> ExitCode {
    if !check_privileges("[!] Error: Requires root privileges (use sudo)") {
        return ExitCode::FAILURE;
    }

    let args = TcpArgs::parse();
    init_logging(args.verbose);

    let params = TcpParams::resolve(args.overrides());
    tracing::debug!(?params, "resolved TCP parameters");

    let packet = build_packet(&params);
    transmit(&packet, "packet")
}
