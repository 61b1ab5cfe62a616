use std::net::SocketAddr;

use strum_macros::{Display, EnumString};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::{Forwarder, Result, Rules};

/// What to do when a rule's listener cannot be bound
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BindPolicy {
    /// abort startup, nothing is served
    #[default]
    Fatal,
    /// log and skip the rule, the rest keep serving
    Isolate,
}

/// Starts one listener per rule
pub struct Supervisor {
    rules: Rules,
    policy: BindPolicy,
}

impl Supervisor {
    pub fn new(rules: Rules, policy: BindPolicy) -> Self {
        Self { rules, policy }
    }

    /// Bind every rule, then spawn each accept loop as its own task.
    pub async fn start(self) -> Result<Running> {
        if self.rules.is_empty() {
            warn!("no forwarding rules configured");
        }

        let mut forwarders = Vec::with_capacity(self.rules.len());
        for rule in self.rules {
            match Forwarder::bind(rule).await {
                Ok(forwarder) => forwarders.push(forwarder),
                Err(e) => match self.policy {
                    BindPolicy::Fatal => return Err(e),
                    BindPolicy::Isolate => error!("{e}, skipping rule"),
                },
            }
        }

        let mut local_addrs = Vec::with_capacity(forwarders.len());
        let mut tasks = JoinSet::new();
        for forwarder in forwarders {
            local_addrs.push(forwarder.local_addr()?);
            tasks.spawn(forwarder.serve());
        }

        info!("{} listener(s) running", local_addrs.len());

        Ok(Running { local_addrs, tasks })
    }
}

/// Listeners spawned by [`Supervisor::start`]
pub struct Running {
    local_addrs: Vec<SocketAddr>,
    tasks: JoinSet<()>,
}

impl Running {
    /// Bound addresses, in rule order, of the listeners that started.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Keep the listeners alive. Does not return.
    pub async fn wait(mut self) {
        while let Some(res) = self.tasks.join_next().await {
            if let Err(e) = res {
                error!("listener task stopped: {e}");
            }
        }
        std::future::pending::<()>().await
    }
}
