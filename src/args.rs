use crate::error::PingError;
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "echo-ping", disable_help_flag = true, disable_version_flag = true)]
pub(crate) struct Args {
    /// Hostname or IPv4 address to ping
    pub(crate) destination: String,
}

/// Anything other than exactly one hostname argument is a usage error.
pub(crate) fn parse_from<I, T>(args: I) -> Result<Args, PingError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() != 2 || args[1] == "--" {
        log::debug!("expected one argument, got {}", args.len().saturating_sub(1));
        return Err(PingError::Usage);
    }

    Args::try_parse_from(args).map_err(|e| {
        log::debug!("argument parsing failed: {}", e);
        PingError::Usage
    })
}
