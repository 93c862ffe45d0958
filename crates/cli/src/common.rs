//! Common utilities for the CLI
//!
//! Protocol configuration, JSON file helpers and logging setup.

use crate::{CliError, Result};
use clap::Args;
use pedersen_core::{CommitmentKey, GeneratorDeriver, BLINDING_LABEL, VALUE_LABEL};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Parameters shared by every protocol session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Length `N` of committed vectors
    pub vector_length: usize,
    /// Number `m` of batched commitments in the vector-opening proof
    pub commitment_count: usize,
    /// Label of the value generator family
    pub value_label: String,
    /// Label of the blinding generator family
    pub blinding_label: String,
    /// Sessions to run per invocation
    pub trials: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            vector_length: 3,
            commitment_count: 2,
            value_label: VALUE_LABEL.to_string(),
            blinding_label: BLINDING_LABEL.to_string(),
            trials: 1,
        }
    }
}

impl ProtocolConfig {
    /// Loads configuration from file or returns default
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading configuration");
                FileOps::read_json(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.vector_length == 0 {
            return Err(CliError::InvalidArguments("vector_length must be positive".to_string()));
        }
        if self.commitment_count == 0 {
            return Err(CliError::InvalidArguments("commitment_count must be positive".to_string()));
        }
        if self.trials == 0 {
            return Err(CliError::InvalidArguments("trials must be positive".to_string()));
        }
        if self.value_label == self.blinding_label {
            return Err(CliError::InvalidArguments(format!(
                "value and blinding labels must differ, both are {:?}",
                self.value_label
            )));
        }
        Ok(())
    }

    /// Commitment key for this configuration's families and vector length
    pub fn commitment_key(&self, deriver: &GeneratorDeriver) -> Result<CommitmentKey> {
        Ok(CommitmentKey::with_labels(
            deriver,
            &self.value_label,
            &self.blinding_label,
            self.vector_length,
        )?)
    }
}

/// Flags shared by the session commands; each one overrides the config file
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Path to a JSON protocol configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Length of committed vectors
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Number of sessions to run
    #[arg(short, long)]
    pub trials: Option<usize>,
}

impl SessionArgs {
    /// Load the config file (or default), apply overrides and validate
    pub fn resolve(&self) -> Result<ProtocolConfig> {
        let mut config = ProtocolConfig::load_or_default(self.config.as_deref())?;
        if let Some(length) = self.length {
            config.vector_length = length;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Common file operations for CLI tools
pub struct FileOps;

impl FileOps {
    /// Reads a JSON file and deserializes it
    pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes data to a JSON file
    pub fn write_json<T: Serialize>(data: &T, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), data)?;
        Ok(())
    }
}

/// Install the global subscriber: `RUST_LOG` if set, else `info` (`debug` when verbose)
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
