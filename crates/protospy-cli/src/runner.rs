//! Privilege gate, logging setup and the transmit-and-report step.

use protospy_core::{require_raw_socket_privileges, SenderResult};
use protospy_packets::{send, send_packet, Packet, PacketSink, SendReport, TransportLayer};
use std::process::ExitCode;
use tracing::debug;

/// Returns false, after printing `message`, when raw sockets are unavailable.
///
/// Runs before logging is set up, so nothing but `message` is printed.
pub fn check_privileges(message: &str) -> bool {
    match require_raw_socket_privileges() {
        Ok(()) => true,
        Err(_) => {
            println!("{}", message);
            false
        }
    }
}

/// Installs the stderr log subscriber. Stdout is reserved for the report.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Lines printed for the outcome of a send.
///
/// `noun` completes "sent N byte ...", e.g. `"packet"` or `"UDP packet"`.
pub fn render_outcome(result: &SenderResult<SendReport>, noun: &str) -> String {
    match result {
        Ok(report) => format!(
            "[+] Successfully sent {} byte {}\n    Destination: {}:{}",
            report.bytes_sent,
            noun,
            report.destination.ip(),
            report.destination.port()
        ),
        Err(e) => format!("[!] Error sending packet: {}", e),
    }
}

/// Sends `packet` once through a raw socket, prints the outcome and maps it to
/// an exit code.
pub fn transmit<T: TransportLayer>(packet: &Packet<T>, noun: &str) -> ExitCode {
    report::<T>(send_packet(packet), noun)
}

/// Like [`transmit`], writing to `sink` instead of opening a raw socket.
pub fn transmit_with<T: TransportLayer>(
    packet: &Packet<T>,
    sink: &mut dyn PacketSink,
    noun: &str,
) -> ExitCode {
    report::<T>(send(packet, sink), noun)
}

fn report<T: TransportLayer>(result: SenderResult<SendReport>, noun: &str) -> ExitCode {
    if let Err(e) = &result {
        debug!(
            protocol = T::NAME,
            input_error = e.is_input_error(),
            error = ?e,
            "transmission failed"
        );
    }

    println!("{}", render_outcome(&result, noun));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
