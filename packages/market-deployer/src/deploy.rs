use anyhow::{Context, Result};
use near_workspaces::network::Testnet;
use near_workspaces::operations::Function;
use near_workspaces::types::{Gas as NearGas, KeyType, SecretKey};
use near_workspaces::{Account, AccountId, Worker};
use serde_json::json;
use tracing::{info, warn};

use crate::Config;

/// Code hash of an account with no contract.
pub const EMPTY_CODE_HASH: &str = "11111111111111111111111111111111";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deployed,
    AlreadyDeployed { code_hash: String },
}

pub async fn run(config: &Config) -> Result<Outcome> {
    let worker = near_workspaces::testnet()
        .rpc_addr(&config.rpc_url)
        .await
        .context("connecting to testnet RPC")?;

    let account = load_or_create_account(&worker, config).await?;
    let state = account.view_account().await?;
    let code_hash = state.code_hash.to_string();
    info!(account = %account.id(), balance = %state.balance, %code_hash, "Market account state");

    if code_hash != EMPTY_CODE_HASH {
        info!("Contract already deployed, skipping");
        return Ok(Outcome::AlreadyDeployed { code_hash });
    }

    let wasm = std::fs::read(&config.wasm_path)
        .with_context(|| format!("reading {}", config.wasm_path))?;
    info!(bytes = wasm.len(), "Deploying market contract");

    let init = Function::new("new")
        .args_json(json!({
            "owner_id": config.owner_id(),
            "bid_history_length": config.bid_history_length,
            "acceptance_policy": config.acceptance_policy,
        }))
        .gas(NearGas::from_tgas(config.gas_tgas));

    account
        .batch(account.id())
        .deploy(&wasm)
        .call(init)
        .transact()
        .await?
        .into_result()
        .context("deploy + new transaction failed")?;

    info!(owner = %config.owner_id(), "Market deployed and initialized");
    Ok(Outcome::Deployed)
}

async fn load_or_create_account(worker: &Worker<Testnet>, config: &Config) -> Result<Account> {
    let path = config.credentials_file();
    if path.exists() {
        info!(path = %path.display(), "Loading market credentials");
        return Account::from_file(&path, worker)
            .with_context(|| format!("loading credentials from {}", path.display()));
    }

    warn!(path = %path.display(), "No credentials found, creating account through the testnet helper");
    let account_id: AccountId = config
        .account_id
        .parse()
        .with_context(|| format!("invalid account id {}", config.account_id))?;
    let secret_key = SecretKey::from_random(KeyType::ED25519);
    let account = worker
        .create_tla(account_id, secret_key)
        .await?
        .into_result()
        .context("creating market account")?;

    std::fs::create_dir_all(&config.credentials_dir)?;
    account.store_credentials(&config.credentials_dir).await?;
    info!(account = %account.id(), "Stored new market credentials");
    Ok(account)
}
