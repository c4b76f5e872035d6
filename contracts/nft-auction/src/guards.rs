use crate::*;

pub(crate) fn hash_account_id(account_id: &AccountId) -> Vec<u8> {
    env::sha256(account_id.as_bytes())
}

pub(crate) fn check_one_yocto() -> Result<(), MarketplaceError> {
    if env::attached_deposit() != ONE_YOCTO {
        return Err(MarketplaceError::InsufficientDeposit(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_token_id(token_id: &str) -> Result<(), MarketplaceError> {
    if token_id.is_empty() || token_id.len() > MAX_TOKEN_ID_LEN {
        return Err(MarketplaceError::InvalidInput(format!(
            "Token ID must be 1..={} characters",
            MAX_TOKEN_ID_LEN
        )));
    }
    Ok(())
}

pub(crate) fn check_bid_history_length(length: u8) -> Result<(), MarketplaceError> {
    if length == 0 || length > MAX_BID_HISTORY_LENGTH {
        return Err(MarketplaceError::InvalidInput(format!(
            "Bid history length must be 1..={}",
            MAX_BID_HISTORY_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn page_bounds(from_index: Option<U64>, limit: Option<u64>) -> (usize, usize) {
    let start = from_index.map(|i| i.0).unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).min(MAX_PAGE_LIMIT);
    // usize is 32 bits on wasm; an out-of-range start must yield an empty page, not wrap.
    (usize::try_from(start).unwrap_or(usize::MAX), limit as usize)
}

impl Contract {
    pub(crate) fn check_contract_owner(&self) -> Result<(), MarketplaceError> {
        if env::predecessor_account_id() != self.owner_id {
            return Err(MarketplaceError::only_owner("contract owner"));
        }
        Ok(())
    }
}
