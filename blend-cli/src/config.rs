use blend::ledger::primitives::{TimeBounds, TESTNET_PASSPHRASE};
use blend::ledger::txbuilder::{TxBuilderOptions, BASE_FEE};
use blend::pipeline::PollPolicy;
use blend::rpc::RpcConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PollConfig {
    pub poll_interval_ms: u64,
    pub submit_window_ms: u64,
    pub confirm_timeout_ms: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();

        Self {
            poll_interval_ms: policy.poll_interval.as_millis() as u64,
            submit_window_ms: policy.submit_window.as_millis() as u64,
            confirm_timeout_ms: None,
        }
    }
}

/// Everything needed to talk to one network
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub rpc_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    pub network_passphrase: String,

    #[serde(default = "default_fee")]
    pub fee: u32,

    #[serde(default)]
    pub timebounds: Option<TimeBounds>,

    #[serde(default)]
    pub poll: PollConfig,
}

fn default_fee() -> u32 {
    BASE_FEE
}

impl NetworkConfig {
    pub fn testnet() -> Self {
        Self {
            rpc_url: TESTNET_RPC_URL.into(),
            api_key: None,
            network_passphrase: TESTNET_PASSPHRASE.into(),
            fee: BASE_FEE,
            timebounds: None,
            poll: PollConfig::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Config file if any, testnet otherwise, with explicit values on top
    pub fn resolve(
        path: Option<&Path>,
        rpc_url: Option<String>,
        passphrase: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::testnet(),
        };

        if let Some(url) = rpc_url {
            config.rpc_url = url;
        }

        if let Some(passphrase) = passphrase {
            config.network_passphrase = passphrase;
        }

        Ok(config)
    }

    pub fn builder_options(&self) -> TxBuilderOptions {
        TxBuilderOptions {
            fee: self.fee,
            timebounds: self.timebounds,
            network_passphrase: self.network_passphrase.clone(),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            poll_interval: Duration::from_millis(self.poll.poll_interval_ms),
            submit_window: Duration::from_millis(self.poll.submit_window_ms),
            confirm_timeout: self.poll.confirm_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            api_key: self.api_key.clone(),
            ..RpcConfig::new(self.rpc_url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn minimal_file_gets_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"rpcUrl": "http://localhost:8000/soroban/rpc", "networkPassphrase": "Standalone Network ; February 2017"}}"#
        )
        .unwrap();

        let config = NetworkConfig::load(file.path()).unwrap();

        assert_eq!(config.fee, BASE_FEE);
        assert_eq!(config.poll_policy(), PollPolicy::default());
        assert_eq!(config.builder_options().network_passphrase, "Standalone Network ; February 2017");
    }

    #[test]
    fn poll_settings_are_read_in_millis() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{
                "rpcUrl": "http://localhost:8000",
                "networkPassphrase": "x",
                "fee": 1000,
                "poll": { "pollIntervalMs": 250, "confirmTimeoutMs": 60000 }
            }"#,
        )
        .unwrap();

        let policy = config.poll_policy();

        assert_eq!(policy.poll_interval, Duration::from_millis(250));
        assert_eq!(policy.submit_window, Duration::from_secs(20));
        assert_eq!(policy.confirm_timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.builder_options().fee, 1000);
    }

    #[test]
    fn explicit_values_override_file() {
        let config = NetworkConfig::resolve(
            None,
            Some("http://127.0.0.1:1".into()),
            Some("custom".into()),
        )
        .unwrap();

        assert_eq!(config.rpc_url, "http://127.0.0.1:1");
        assert_eq!(config.network_passphrase, "custom");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = NetworkConfig::load(Path::new("/nonexistent/blend.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
