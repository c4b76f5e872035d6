//! # Market Deployer
//!
//! Creates (or loads) the market account on testnet and deploys the
//! nft-auction contract into it when the account has no code yet.
//!
//! ## Quick Start
//! ```bash
//! MARKET_ACCOUNT_ID=market.example.testnet cargo run --bin deploy-market
//! ```

pub mod config;
mod deploy;

pub use crate::config::Config;
pub use deploy::{EMPTY_CODE_HASH, Outcome, run};
