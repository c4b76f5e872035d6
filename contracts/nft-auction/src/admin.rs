use crate::*;

#[near]
impl Contract {
    #[payable]
    #[handle_result]
    pub fn add_token_types(&mut self, token_types: Vec<AccountId>) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        self.check_contract_owner()?;

        for token_type in token_types {
            if token_type.as_str() == NEAR_TOKEN_TYPE {
                continue;
            }
            if self.ft_token_ids.insert(token_type.clone()) {
                events::emit_token_type_added(&self.owner_id, &token_type);
            }
        }
        Ok(())
    }

    /// Existing escrow in the token can still be refunded and paid out.
    #[payable]
    #[handle_result]
    pub fn remove_token_type(&mut self, token_type: AccountId) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        self.check_contract_owner()?;

        if !self.ft_token_ids.remove(&token_type) {
            return Err(MarketplaceError::NotFound(format!(
                "Token {} is not supported",
                token_type
            )));
        }
        events::emit_token_type_removed(&self.owner_id, &token_type);
        Ok(())
    }

    #[payable]
    #[handle_result]
    pub fn set_acceptance_policy(
        &mut self,
        policy: AcceptancePolicy,
    ) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        self.check_contract_owner()?;

        let old = self.acceptance_policy;
        self.acceptance_policy = policy;
        events::emit_acceptance_policy_updated(&self.owner_id, old, policy);
        Ok(())
    }

    /// Shorter histories are trimmed on the next bid of each sale.
    #[payable]
    #[handle_result]
    pub fn set_bid_history_length(&mut self, length: u8) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        self.check_contract_owner()?;
        guards::check_bid_history_length(length)?;

        let old = self.bid_history_length;
        self.bid_history_length = length;
        events::emit_bid_history_length_updated(&self.owner_id, old, length);
        Ok(())
    }

    #[payable]
    #[handle_result]
    pub fn set_owner(&mut self, new_owner_id: AccountId) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        self.check_contract_owner()?;

        let old_owner_id = std::mem::replace(&mut self.owner_id, new_owner_id);
        events::emit_owner_transferred(&old_owner_id, &self.owner_id);
        Ok(())
    }

    pub fn supported_ft_token_ids(&self) -> Vec<AccountId> {
        self.ft_token_ids.iter().cloned().collect()
    }

    pub fn get_config(&self) -> ContractConfig {
        ContractConfig {
            version: self.version.clone(),
            owner_id: self.owner_id.clone(),
            bid_history_length: self.bid_history_length,
            acceptance_policy: self.acceptance_policy,
            storage_per_sale: U128(STORAGE_PER_SALE),
            storage_per_bid: U128(STORAGE_PER_BID),
        }
    }
}
