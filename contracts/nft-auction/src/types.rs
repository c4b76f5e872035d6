use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use near_sdk::json_types::U128;
use near_sdk::serde::{Deserialize, Deserializer};
use near_sdk::{AccountId, near};

use crate::constants::{DELIMETER, NEAR_TOKEN_TYPE};
use crate::errors::MarketplaceError;

/// Identity of a sale: one per (token contract, token) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SaleKey {
    pub nft_contract_id: AccountId,
    pub token_id: String,
}

impl SaleKey {
    pub fn new(nft_contract_id: AccountId, token_id: impl Into<String>) -> Self {
        Self {
            nft_contract_id,
            token_id: token_id.into(),
        }
    }
}

impl fmt::Display for SaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.nft_contract_id, DELIMETER, self.token_id)
    }
}

impl FromStr for SaleKey {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (contract, token_id) = s.split_once(DELIMETER).ok_or_else(|| {
            MarketplaceError::InvalidInput(format!(
                "Sale key must be \"<nft_contract_id>{}<token_id>\"",
                DELIMETER
            ))
        })?;
        let nft_contract_id = contract.parse::<AccountId>().map_err(|_| {
            MarketplaceError::InvalidInput(format!("Invalid NFT contract ID: {}", contract))
        })?;
        if token_id.is_empty() {
            return Err(MarketplaceError::InvalidInput("Empty token ID in sale key".into()));
        }
        Ok(Self::new(nft_contract_id, token_id))
    }
}

/// Currency a sale is priced in. Serialized as the `token_type` account ID,
/// with `"near"` standing for native NEAR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentToken {
    Native,
    Fungible(AccountId),
}

impl PaymentToken {
    pub fn from_token_type(token_type: &AccountId) -> Self {
        if token_type.as_str() == NEAR_TOKEN_TYPE {
            Self::Native
        } else {
            Self::Fungible(token_type.clone())
        }
    }

    pub fn token_type(&self) -> AccountId {
        match self {
            Self::Native => near_token_type(),
            Self::Fungible(ft_id) => ft_id.clone(),
        }
    }
}

pub fn near_token_type() -> AccountId {
    NEAR_TOKEN_TYPE
        .parse()
        .unwrap_or_else(|_| near_sdk::env::panic_str("native token type is a valid account ID"))
}

/// What happens when an offer reaches the listed price.
#[near(serializers = [borsh, json])]
#[serde(rename_all = "snake_case")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Bids accumulate until the seller calls `accept_offer`.
    #[default]
    Manual,
    /// A bid at or above a non-zero listed price settles immediately.
    AutoAcceptAtPrice,
}

impl AcceptancePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AutoAcceptAtPrice => "auto_accept_at_price",
        }
    }
}

/// Price argument accepted either as a decimal string or as a plain JSON number.
/// Numbers beyond `u64` must be sent as strings.
#[near(serializers = [json])]
#[serde(untagged)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceInput {
    Decimal(U128),
    Number(u64),
}

impl From<PriceInput> for U128 {
    fn from(input: PriceInput) -> Self {
        match input {
            PriceInput::Decimal(price) => price,
            PriceInput::Number(price) => U128(price as u128),
        }
    }
}

impl From<U128> for PriceInput {
    fn from(price: U128) -> Self {
        Self::Decimal(price)
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<U128, D::Error>
where
    D: Deserializer<'de>,
{
    PriceInput::deserialize(deserializer).map(U128::from)
}

/// `msg` attached to `nft_approve` on the token contract.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct SaleArgs {
    #[serde(deserialize_with = "deserialize_price")]
    pub price: U128,
    /// Listing duration in milliseconds.
    pub period: u64,
    /// Absent means native NEAR.
    #[serde(default)]
    pub token_type: Option<AccountId>,
    pub nft_contract_id: AccountId,
}

/// `msg` attached to `ft_transfer_call` when bidding with a fungible token.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct PurchaseArgs {
    pub nft_contract_id: AccountId,
    pub token_id: String,
}

/// NEP-199 payout returned by `nft_transfer_payout`.
#[near(serializers = [json])]
#[derive(Clone, Debug, Default)]
pub struct Payout {
    pub payout: HashMap<AccountId, U128>,
}

#[near(serializers = [json])]
pub struct ContractConfig {
    pub version: String,
    pub owner_id: AccountId,
    pub bid_history_length: u8,
    pub acceptance_policy: AcceptancePolicy,
    pub storage_per_sale: U128,
    pub storage_per_bid: U128,
}
