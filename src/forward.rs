use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::tunnel;
use crate::{Error, Result, Rule};

/// A bound listener for one rule
pub struct Forwarder {
    listener: TcpListener,
    rule: Rule,
}

impl Forwarder {
    pub async fn bind(rule: Rule) -> Result<Self> {
        let listener = TcpListener::bind(&rule.source)
            .await
            .map_err(|source| Error::Bind {
                addr: rule.source.clone(),
                source,
            })?;

        info!("listening on {rule}");

        Ok(Self { listener, rule })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, relaying each one on its own task.
    pub async fn serve(self) {
        loop {
            match self.listener.accept().await {
                Ok((socket, peer)) => {
                    debug!("accepted {peer} on {}", self.rule.source);
                    let target = self.rule.target.clone();
                    tokio::spawn(async move {
                        process(socket, peer, &target).await;
                    });
                }
                Err(e) => warn!("failed to accept connection on {}: {e}", self.rule.source),
            }
        }
    }
}

async fn process(socket: TcpStream, peer: SocketAddr, target: &str) {
    match tunnel::relay(socket, target).await {
        Ok(stats) => debug!(
            "{peer} <-> {target} closed, sent {} bytes, received {} bytes",
            stats.sent, stats.received
        ),
        Err(e) => warn!("{e}"),
    }
}
