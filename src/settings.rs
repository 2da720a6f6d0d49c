use crate::consts::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_DATA_DIR, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE,
    DEFAULT_RPC_URL,
};
use anyhow::anyhow;
use config::{Config, File};
use ethers_core::types::Address;
use serde::{de::IgnoredAny, Deserialize};
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

const ENV_PREFIX: &str = "CONTRACT_AUTOTEST";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub node: NodeSettings,
    pub transaction: TransactionSettings,
    pub receipt: ReceiptSettings,
    pub data_source: DataSourceSettings,
    pub contracts: ContractsSettings,

    pub config: IgnoredAny,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSettings {
    pub rpc_url: Url,
    /// Timeout of a single JSON-RPC request, in seconds.
    pub request_timeout: u64,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            rpc_url: Url::try_from(DEFAULT_RPC_URL).expect("valid url"),
            request_timeout: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionSettings {
    /// Sender of deployment transactions. The node must hold its key unlocked.
    /// When omitted, the first account reported by the node is used.
    pub from: Option<Address>,
    pub gas_limit: u64,
    pub gas_price: u64,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self {
            from: None,
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: DEFAULT_GAS_PRICE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiptSettings {
    /// Delay between two receipt lookups, in milliseconds.
    pub poll_interval: u64,
    pub attempts: NonZeroUsize,
}

impl ReceiptSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            poll_interval: 500,
            attempts: NonZeroUsize::new(40).expect("Is not zero"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSourceSettings {
    /// Directory the data files named by the cases are looked up in.
    pub dir: PathBuf,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractsSettings {
    pub artifacts_dir: PathBuf,
}

impl Default for ContractsSettings {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

impl Settings {
    /// Same as [`Settings::load`] without a config path from the command line.
    pub fn new() -> anyhow::Result<Self> {
        Self::load(None)
    }

    /// Reads the config file, then the `CONTRACT_AUTOTEST__*` environment on top of it.
    ///
    /// The file is `config_path` if given, otherwise the one named by
    /// `CONTRACT_AUTOTEST__CONFIG`. Either must exist. Without both,
    /// `config.toml` is read when present.
    pub fn load(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = config_path
            .or_else(|| std::env::var_os(format!("{ENV_PREFIX}__CONFIG")).map(PathBuf::from));
        Self::build(config_path, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn build(config_path: Option<PathBuf>, default_path: &Path) -> anyhow::Result<Self> {
        let file = match config_path {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file {} not found", path.display());
                }
                File::from(path)
            }
            None => File::from(default_path).required(false),
        };
        let builder = Config::builder().add_source(file).add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()?
            .try_deserialize()
            .map_err(|err| anyhow!(err))
    }
}
