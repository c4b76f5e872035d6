use crate::*;

#[near]
impl Contract {
    /// Native NEAR bid; the attached deposit is the escrowed bid.
    #[payable]
    #[handle_result]
    pub fn offer(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        offer_price: PriceInput,
    ) -> Result<Option<Promise>, MarketplaceError> {
        let offer_price = U128::from(offer_price);
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit != offer_price.0 {
            return Err(MarketplaceError::InsufficientDeposit(format!(
                "Attached deposit {} must equal offer price {}",
                deposit, offer_price.0
            )));
        }

        let key = SaleKey::new(nft_contract_id, token_id);
        self.internal_place_bid(
            &key,
            &env::predecessor_account_id(),
            &types::near_token_type(),
            offer_price.0,
        )
    }

    /// NEP-141 receiver: fungible-token bid. `msg` is a JSON `PurchaseArgs`.
    /// The whole amount is kept in escrow, so `U128(0)` is returned as unused.
    #[handle_result]
    pub fn ft_on_transfer(
        &mut self,
        sender_id: AccountId,
        amount: U128,
        msg: String,
    ) -> Result<PromiseOrValue<U128>, MarketplaceError> {
        let PurchaseArgs {
            nft_contract_id,
            token_id,
        } = near_sdk::serde_json::from_str(&msg)
            .map_err(|e| MarketplaceError::InvalidInput(format!("Invalid PurchaseArgs: {}", e)))?;

        let ft_token_id = env::predecessor_account_id();
        if !self.ft_token_ids.contains(&ft_token_id) {
            return Err(MarketplaceError::Unauthorized(format!(
                "Token {} not supported by this market",
                ft_token_id
            )));
        }

        let key = SaleKey::new(nft_contract_id, token_id);
        // An auto-accept settlement runs detached; the FT contract only needs the unused amount.
        let _ = self.internal_place_bid(&key, &sender_id, &ft_token_id, amount.0)?;
        Ok(PromiseOrValue::Value(U128(0)))
    }
}

impl Contract {
    pub(crate) fn internal_place_bid(
        &mut self,
        key: &SaleKey,
        bidder: &AccountId,
        token_type: &AccountId,
        amount: u128,
    ) -> Result<Option<Promise>, MarketplaceError> {
        if amount == 0 {
            return Err(MarketplaceError::InvalidInput(
                "Offer must be greater than 0".into(),
            ));
        }
        self.check_token_type_supported(token_type)?;

        let sale = self.sale(key)?;
        if sale.is_settling() {
            return Err(MarketplaceError::settlement_in_progress());
        }
        if sale.is_expired(env::block_timestamp_ms()) {
            return Err(MarketplaceError::InvalidState("Sale has expired".into()));
        }
        if &sale.owner_id == bidder {
            return Err(MarketplaceError::InvalidInput(
                "Cannot bid on your own sale".into(),
            ));
        }
        // The reserve only binds bids in the currency the sale is priced in.
        let priced_in = &sale.token_type == token_type;
        if priced_in && amount < sale.price.0 {
            return Err(MarketplaceError::InvalidInput(format!(
                "Offer {} is below the reserve price {}",
                amount, sale.price.0
            )));
        }
        let meets_price = priced_in && sale.price.0 > 0 && amount >= sale.price.0;

        self.check_storage_covers(bidder, STORAGE_PER_BID)?;

        let history_length = self.bid_history_length as usize;
        let sale = self.sale_mut(key)?;
        let history = sale.bids.entry(token_type.clone()).or_default();
        history.push(Bid {
            owner_id: bidder.clone(),
            price: U128(amount),
        });
        let overflow = history.len().saturating_sub(history_length);
        let evicted: Vec<Bid> = history.drain(..overflow).collect();
        let position = history.len() - 1;

        self.track_bid_added(bidder);
        events::emit_offer_made(bidder, key, token_type, amount);

        for bid in &evicted {
            self.refund_bid(token_type, bid);
            events::emit_offer_evicted(&bid.owner_id, key, token_type, bid.price.0);
        }

        if meets_price && self.acceptance_policy == AcceptancePolicy::AutoAcceptAtPrice {
            return self
                .internal_begin_settlement(key, token_type, position)
                .map(Some);
        }
        Ok(None)
    }
}
