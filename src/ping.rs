use crate::error::PingError;
use crate::icmpv4::IcmpEchoRequest;
use anyhow::{bail, Context};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use zerocopy::IntoBytes;

pub(crate) const SEND_INTERVAL: Duration = Duration::from_secs(1);

/// Where echo requests go. Implemented for the raw socket; tests record instead.
pub(crate) trait Transport {
    fn send_to(&self, packet: &[u8], target: Ipv4Addr) -> io::Result<usize>;
}

impl Transport for Socket {
    fn send_to(&self, packet: &[u8], target: Ipv4Addr) -> io::Result<usize> {
        Socket::send_to(self, packet, &SocketAddr::new(IpAddr::V4(target), 0).into())
    }
}

/// Cancellation token polled once per loop iteration.
#[derive(Clone, Default, Debug)]
pub(crate) struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    /// Creates a token that SIGINT and SIGTERM will trigger.
    pub(crate) fn install() -> Result<Self, PingError> {
        let shutdown = Self::default();
        let handle = shutdown.clone();
        ctrlc::set_handler(move || handle.trigger()).map_err(PingError::Signal)?;
        Ok(shutdown)
    }

    pub(crate) fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) fn resolve(host: &str) -> Result<Ipv4Addr, PingError> {
    lookup_ipv4(host).map_err(PingError::Resolve)
}

fn lookup_ipv4(host: &str) -> anyhow::Result<Ipv4Addr> {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => return Ok(ip),
        Ok(IpAddr::V6(ip)) => bail!("{} is not an IPv4 address", ip),
        Err(_) => {}
    }

    let mut addrs = (host, 0)
        .to_socket_addrs()
        .with_context(|| format!("lookup of {} failed", host))?;
    addrs
        .find_map(|addr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .with_context(|| format!("no IPv4 address for {}", host))
}

/// Raw ICMPv4 socket bound to the wildcard address.
pub(crate) fn open_socket() -> Result<Socket, PingError> {
    let socket =
        Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)).map_err(PingError::Socket)?;
    let wildcard = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
    socket.bind(&wildcard.into()).map_err(PingError::Socket)?;
    Ok(socket)
}

#[cfg(unix)]
pub(crate) fn is_privileged() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub(crate) fn is_privileged() -> bool {
    true
}

/// Sends one echo request per `interval` until `shutdown` is triggered.
///
/// The token is only checked at the top of each iteration, so shutdown takes
/// up to one interval. Send failures are written to `out` and the loop keeps
/// going. `transport` is consumed and dropped on return.
pub(crate) fn run<T, W>(
    transport: T,
    target: Ipv4Addr,
    shutdown: &Shutdown,
    interval: Duration,
    out: &mut W,
) -> io::Result<()>
where
    T: Transport,
    W: Write,
{
    let mut sequence: u16 = 1;
    loop {
        if shutdown.is_triggered() {
            writeln!(out, "\nPing utility terminated.")?;
            return Ok(());
        }

        let packet = IcmpEchoRequest::new(sequence);
        match transport.send_to(packet.as_bytes(), target) {
            Ok(n) => log::trace!(
                "sent {} bytes to {}: icmp_seq={} checksum={:#06x}",
                n,
                target,
                packet.sequence(),
                packet.checksum()
            ),
            Err(e) => {
                let err = PingError::Send(e);
                log::debug!("icmp_seq={}: {}", sequence, err);
                writeln!(out, "{}", err)?;
            }
        }

        sequence = sequence.wrapping_add(1);
        sleep(interval);
    }
}
