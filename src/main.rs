mod args;
mod checksum;
mod error;
mod icmpv4;
mod ping;

use crate::error::PingError;
use crate::ping::{Shutdown, SEND_INTERVAL};
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            if let PingError::Socket(io_err) = &e {
                if io_err.kind() == ErrorKind::PermissionDenied && !ping::is_privileged() {
                    println!("Raw ICMP sockets need root or CAP_NET_RAW.");
                }
            }
            e.exit_code()
        }
    }
}

fn start() -> Result<(), PingError> {
    let args = args::parse_from(std::env::args_os())?;

    let target_ip = ping::resolve(&args.destination)?;
    log::debug!("{} resolved to {}", args.destination, target_ip);

    let socket = ping::open_socket()?;
    log::debug!("raw ICMP socket open");

    let mut stdout = io::stdout();
    println!("PING {} ({}):", args.destination, target_ip);

    let shutdown = Shutdown::install()?;
    if let Err(e) = ping::run(socket, target_ip, &shutdown, SEND_INTERVAL, &mut stdout) {
        log::error!("writing to stdout failed: {}", e);
    }
    Ok(())
}
