use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::{Error, Result};

const BUF_SIZE: usize = 8192;

/// Bytes copied by one relay session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// inbound -> outbound
    pub sent: u64,
    /// outbound -> inbound
    pub received: u64,
}

/// Dial `target` and relay bytes between it and `inbound` until either side
/// finishes. `inbound` is closed on every path, including a failed dial.
pub async fn relay(inbound: TcpStream, target: &str) -> Result<RelayStats> {
    let outbound = TcpStream::connect(target)
        .await
        .map_err(|source| Error::Connect {
            addr: target.to_string(),
            source,
        })?;

    Ok(bridge(inbound, outbound).await)
}

/// Bridge two TCP streams, copying in both directions.
///
/// Returns once either direction reaches EOF or fails. The other copy is
/// dropped where it stands and both sockets are closed on return; neither
/// side gets a half-close.
pub async fn bridge(inbound: TcpStream, outbound: TcpStream) -> RelayStats {
    let (mut in_read, mut in_write) = inbound.into_split();
    let (mut out_read, mut out_write) = outbound.into_split();

    let mut stats = RelayStats::default();

    let up = pipe(&mut in_read, &mut out_write, &mut stats.sent);
    let down = pipe(&mut out_read, &mut in_write, &mut stats.received);

    tokio::select! {
        r = up => match r {
            Ok(()) => debug!("inbound reached eof"),
            Err(e) => debug!("inbound -> outbound copy failed: {e}"),
        },
        r = down => match r {
            Ok(()) => debug!("outbound reached eof"),
            Err(e) => debug!("outbound -> inbound copy failed: {e}"),
        },
    }

    stats
}

async fn pipe<R, W>(src: &mut R, dest: &mut W, copied: &mut u64) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0; BUF_SIZE];

    loop {
        let len = src.read(&mut buf).await?;
        if len == 0 {
            return Ok(());
        }
        dest.write_all(&buf[..len]).await?;
        *copied += len as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn connected_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
        (client.unwrap(), accepted.unwrap().0)
    }

    #[tokio::test]
    async fn pipe_counts_bytes_until_eof() {
        let mut src: &[u8] = b"hello world";
        let mut dest = Vec::new();
        let mut copied = 0;

        pipe(&mut src, &mut dest, &mut copied).await.unwrap();

        assert_eq!(dest, b"hello world");
        assert_eq!(copied, 11);
    }

    #[tokio::test]
    async fn bridge_reports_both_directions() {
        let (mut client, inbound) = connected_pair().await;
        let (outbound, mut server) = connected_pair().await;

        let session = tokio::spawn(bridge(inbound, outbound));

        client.write_all(b"ping").await.unwrap();
        let mut buf = [0; 4];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        server.write_all(b"pong!").await.unwrap();
        let mut buf = [0; 5];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"pong!");

        drop(client);
        let stats = session.await.unwrap();
        assert_eq!(
            stats,
            RelayStats {
                sent: 4,
                received: 5
            }
        );

        let mut rest = Vec::new();
        server.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty());
    }

    #[tokio::test]
    async fn relay_to_closed_port_fails() {
        let unused = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = unused.local_addr().unwrap().to_string();
        drop(unused);

        let (_client, inbound) = connected_pair().await;
        let err = relay(inbound, &target).await.unwrap_err();
        assert!(matches!(err, Error::Connect { addr, .. } if addr == target));
    }
}
