//! Deployer configuration.
//!
//! Loaded from an optional `deploy.{toml,json,yaml}` file, then `MARKET_*`
//! environment variables (e.g. `MARKET_ACCOUNT_ID`, `MARKET_WASM_PATH`).

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    /// Account the market contract is deployed to.
    #[serde(default = "defaults::account_id")]
    pub account_id: String,

    /// `owner_id` passed to `new`; defaults to the market account itself.
    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default = "defaults::wasm_path")]
    pub wasm_path: String,

    /// Directory of `<account_id>.json` credential files.
    #[serde(default = "defaults::credentials_dir")]
    pub credentials_dir: PathBuf,

    #[serde(default = "defaults::bid_history_length")]
    pub bid_history_length: u8,

    /// `manual` or `auto_accept_at_price`.
    #[serde(default = "defaults::acceptance_policy")]
    pub acceptance_policy: String,

    #[serde(default = "defaults::gas_tgas")]
    pub gas_tgas: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            account_id: defaults::account_id(),
            owner_id: None,
            wasm_path: defaults::wasm_path(),
            credentials_dir: defaults::credentials_dir(),
            bid_history_length: defaults::bid_history_length(),
            acceptance_policy: defaults::acceptance_policy(),
            gas_tgas: defaults::gas_tgas(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("deploy").required(false))
            .add_source(config::Environment::with_prefix("MARKET"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn owner_id(&self) -> &str {
        self.owner_id.as_deref().unwrap_or(&self.account_id)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.credentials_dir.join(format!("{}.json", self.account_id))
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn rpc_url() -> String {
        "https://rpc.testnet.near.org".into()
    }

    pub fn account_id() -> String {
        "market.nft-auction.testnet".into()
    }

    pub fn wasm_path() -> String {
        "./target/near/nft_auction/nft_auction.wasm".into()
    }

    pub fn credentials_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".near-credentials")
            .join("testnet")
    }

    pub fn bid_history_length() -> u8 {
        1
    }

    pub fn acceptance_policy() -> String {
        "manual".into()
    }

    pub fn gas_tgas() -> u64 {
        100
    }
}
