pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
pub mod error;
pub mod forward;
pub mod rule;
pub mod supervisor;
pub mod tunnel;

pub use config::Config;
pub use error::Error;
pub use forward::Forwarder;
pub use rule::{Rule, Rules};
pub use supervisor::{BindPolicy, Running, Supervisor};
