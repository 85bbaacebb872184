use std::io;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PingError {
    #[error("Usage: echo-ping <hostname>")]
    Usage,
    #[error("Error resolving host: {0:#}")]
    Resolve(#[source] anyhow::Error),
    #[error("Error creating ICMP connection: {0}")]
    Socket(#[source] io::Error),
    #[error("Error sending ICMP packet: {0}")]
    Send(#[source] io::Error),
    #[error("Error installing signal handler: {0}")]
    Signal(#[source] ctrlc::Error),
}

impl PingError {
    /// Send failures are reported by the loop and never end the process.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PingError::Send(_))
    }

    pub fn exit_status(&self) -> u8 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
