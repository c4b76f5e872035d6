//! Typed call failures.
//!
//! Public methods return `Result<_, MarketplaceError>` under `#[handle_result]`;
//! the SDK panics with the `Display` text, so a failed precondition aborts the
//! whole call with no state change.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MarketplaceError {
    /// Caller lacks permission (not the owner, wrong signer, wrong token contract).
    Unauthorized(String),
    InvalidInput(String),
    NotFound(String),
    /// Not allowed in the current sale or account state.
    InvalidState(String),
    InsufficientDeposit(String),
    InsufficientStorage(String),
    InternalError(String),
}

impl std::fmt::Display for MarketplaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
            Self::InsufficientStorage(msg) => write!(f, "Insufficient storage: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl MarketplaceError {
    pub fn sale_not_found() -> Self {
        Self::NotFound("No sale found".into())
    }
    pub fn settlement_in_progress() -> Self {
        Self::InvalidState("Sale settlement in progress".into())
    }
    pub fn only_owner(what: &str) -> Self {
        Self::Unauthorized(format!("Only {} can perform this action", what))
    }
}
