// NEP-178 approval receiver: the token contract hands over sale terms in `msg`.

use crate::*;

#[near]
impl Contract {
    /// Lists the approved token. The predecessor is the token contract and the signer must be
    /// the token owner, so listings can only originate from a real `nft_approve`.
    #[handle_result]
    pub fn nft_on_approve(
        &mut self,
        token_id: String,
        owner_id: AccountId,
        approval_id: u64,
        msg: String,
    ) -> Result<(), MarketplaceError> {
        let nft_contract_id = env::predecessor_account_id();
        let signer_id = env::signer_account_id();

        if nft_contract_id == signer_id {
            return Err(MarketplaceError::Unauthorized(
                "nft_on_approve should only be called via cross-contract call".into(),
            ));
        }
        if owner_id != signer_id {
            return Err(MarketplaceError::Unauthorized(
                "owner_id should be signer_id".into(),
            ));
        }

        let args: SaleArgs = near_sdk::serde_json::from_str(&msg)
            .map_err(|e| MarketplaceError::InvalidInput(format!("Not valid SaleArgs: {}", e)))?;
        if args.nft_contract_id != nft_contract_id {
            return Err(MarketplaceError::Unauthorized(format!(
                "Approval came from {} but msg names {}",
                nft_contract_id, args.nft_contract_id
            )));
        }

        self.internal_list(nft_contract_id, token_id, owner_id, approval_id, args)
    }
}

impl Contract {
    pub(crate) fn internal_list(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        owner_id: AccountId,
        approval_id: u64,
        args: SaleArgs,
    ) -> Result<(), MarketplaceError> {
        guards::check_token_id(&token_id)?;
        if args.period == 0 {
            return Err(MarketplaceError::InvalidInput(
                "Sale period must be greater than 0".into(),
            ));
        }

        let token_type = args.token_type.unwrap_or_else(types::near_token_type);
        self.check_token_type_supported(&token_type)?;

        let key = SaleKey::new(nft_contract_id, token_id);
        let stale = match self.sales.get(&key.to_string()) {
            None => false,
            Some(existing) if existing.owner_id == owner_id => {
                return Err(MarketplaceError::InvalidState(format!(
                    "Sale {} already exists; remove it before listing again",
                    key
                )));
            }
            Some(existing) if existing.is_settling() => {
                return Err(MarketplaceError::settlement_in_progress());
            }
            // The token changed hands outside the market; the old listing can never settle.
            Some(_) => true,
        };

        self.check_storage_covers(&owner_id, STORAGE_PER_SALE)?;

        let created_at = env::block_timestamp_ms();
        let end_at = created_at.checked_add(args.period).ok_or_else(|| {
            MarketplaceError::InvalidInput("Sale period overflows the clock".into())
        })?;

        if stale {
            let old_sale = self.internal_remove_sale(&key)?;
            self.refund_all_bids(&old_sale);
            events::emit_sale_remove(&old_sale.owner_id, &key);
        }

        self.internal_add_sale(Sale {
            owner_id: owner_id.clone(),
            approval_id,
            nft_contract_id: key.nft_contract_id.clone(),
            token_id: key.token_id.clone(),
            price: args.price,
            token_type: token_type.clone(),
            created_at: U64(created_at),
            end_at: U64(end_at),
            bids: Default::default(),
            settlement: None,
        });

        events::emit_sale_list(&owner_id, &key, args.price.0, &token_type, end_at);
        Ok(())
    }

    pub(crate) fn check_token_type_supported(
        &self,
        token_type: &AccountId,
    ) -> Result<(), MarketplaceError> {
        match PaymentToken::from_token_type(token_type) {
            PaymentToken::Native => Ok(()),
            PaymentToken::Fungible(ft_id) if self.ft_token_ids.contains(&ft_id) => Ok(()),
            PaymentToken::Fungible(ft_id) => Err(MarketplaceError::InvalidInput(format!(
                "Token {} not supported by this market",
                ft_id
            ))),
        }
    }
}
