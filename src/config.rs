use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result, Rules};

pub const DEFAULT_PATH: &str = "config.json";

const DEFAULT_ADDR: &str = "127.0.0.1:80";

/// Parallel source/target lists, `source[i]` forwards to `target[i]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: vec![DEFAULT_ADDR.to_string()],
            target: vec![DEFAULT_ADDR.to_string()],
        }
    }
}

impl Config {
    /// Read the config at `path`, writing and returning the default when the
    /// file does not exist yet.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "config file not found, creating default config file: {}",
                    path.display()
                );
                let config = Self::default();
                config.save(path)?;
                return Ok(config);
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write as two-space indented JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_err = |source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_vec_pretty(self)
            .map_err(std::io::Error::from)
            .map_err(write_err)?;
        std::fs::write(path, json).map_err(write_err)
    }

    pub fn rules(self) -> Result<Rules> {
        Rules::pair(self.source, self.target)
    }
}
