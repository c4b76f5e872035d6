// Two-phase acceptance: `accept_offer` stages the winning bid and locks the sale,
// `resolve_offer` commits on a successful token transfer or restores the sale otherwise.

use crate::external::ext_nft_contract;
use crate::*;

#[near]
impl Contract {
    /// Accepts the highest bid in `token_type` (defaults to the currency the sale is priced in).
    #[handle_result]
    pub fn accept_offer(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        token_type: Option<AccountId>,
    ) -> Result<Promise, MarketplaceError> {
        let key = SaleKey::new(nft_contract_id, token_id);
        self.internal_accept_offer(&env::predecessor_account_id(), &key, token_type)
    }

    /// Must not panic: the token may already belong to the bidder.
    #[private]
    pub fn resolve_offer(&mut self, nft_contract_id: AccountId, token_id: String) -> U128 {
        let key = SaleKey::new(nft_contract_id, token_id);
        match env::promise_result_checked(0, MAX_PAYOUT_RESULT_LEN) {
            Ok(value) => {
                let payout = near_sdk::serde_json::from_slice::<Payout>(&value).ok();
                if payout.is_none() {
                    env::log_str("Warning: could not parse payout, paying seller directly");
                }
                self.internal_commit_settlement(&key, payout.as_ref())
            }
            Err(_) => self.internal_abort_settlement(&key),
        }
    }
}

impl Contract {
    pub(crate) fn internal_accept_offer(
        &mut self,
        caller: &AccountId,
        key: &SaleKey,
        token_type: Option<AccountId>,
    ) -> Result<Promise, MarketplaceError> {
        let sale = self.sale(key)?;
        if &sale.owner_id != caller {
            return Err(MarketplaceError::only_owner("the sale owner"));
        }
        if sale.is_settling() {
            return Err(MarketplaceError::settlement_in_progress());
        }

        let token_type = token_type.unwrap_or_else(|| sale.token_type.clone());
        let position = sale.winning_bid_index(&token_type).ok_or_else(|| {
            MarketplaceError::InvalidState(format!("No {} bids to accept", token_type))
        })?;

        self.internal_begin_settlement(key, &token_type, position)
    }

    /// Moves the bid at `position` into `sale.settlement` and starts the token transfer.
    pub(crate) fn internal_begin_settlement(
        &mut self,
        key: &SaleKey,
        token_type: &AccountId,
        position: usize,
    ) -> Result<Promise, MarketplaceError> {
        let sale = self.sale_mut(key)?;
        let history = sale
            .bids
            .get_mut(token_type)
            .filter(|history| position < history.len())
            .ok_or_else(|| {
                MarketplaceError::InternalError(format!("No bid at {} for {}", position, token_type))
            })?;
        let bid = history.remove(position);
        if history.is_empty() {
            sale.bids.remove(token_type);
        }
        sale.settlement = Some(PendingSettlement {
            token_type: token_type.clone(),
            position: position as u32,
            bid: bid.clone(),
        });
        let approval_id = sale.approval_id;

        Ok(ext_nft_contract::ext(key.nft_contract_id.clone())
            .with_static_gas(Gas::from_tgas(GAS_NFT_TRANSFER_PAYOUT))
            .with_attached_deposit(ONE_YOCTO)
            .nft_transfer_payout(
                bid.owner_id,
                key.token_id.clone(),
                Some(approval_id),
                Some("Sold on NFT auction market".to_string()),
                bid.price,
                Some(DEFAULT_MAX_LEN_PAYOUT),
            )
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(GAS_RESOLVE_OFFER))
                    .resolve_offer(key.nft_contract_id.clone(), key.token_id.clone()),
            ))
    }

    /// Token reached the bidder: drop the sale, refund the losing bids, pay the seller side.
    /// Returns the settled price.
    pub(crate) fn internal_commit_settlement(
        &mut self,
        key: &SaleKey,
        payout: Option<&Payout>,
    ) -> U128 {
        let Some(pending) = self
            .sales
            .get(&key.to_string())
            .and_then(|sale| sale.settlement.clone())
        else {
            env::log_str(&format!("Settlement commit skipped: no pending settlement for {}", key));
            return U128(0);
        };

        let sale = match self.internal_remove_sale(key) {
            Ok(sale) => sale,
            Err(e) => {
                env::log_str(&format!("Settlement commit skipped: {}", e));
                return U128(0);
            }
        };

        self.track_bid_released(&pending.bid.owner_id);
        self.refund_all_bids(&sale);

        let price = pending.bid.price.0;
        self.distribute_payout(&pending.token_type, payout, price, &sale.owner_id);

        events::emit_offer_accepted(
            &sale.owner_id,
            &pending.bid.owner_id,
            key,
            &pending.token_type,
            price,
        );
        U128(price)
    }

    /// Transfer failed: put the staged bid back where it was and unlock the sale.
    pub(crate) fn internal_abort_settlement(&mut self, key: &SaleKey) -> U128 {
        let Some(sale) = self.sales.get_mut(&key.to_string()) else {
            env::log_str(&format!("Settlement abort skipped: no sale {}", key));
            return U128(0);
        };
        let Some(pending) = sale.settlement.take() else {
            env::log_str(&format!("Settlement abort skipped: {} is not settling", key));
            return U128(0);
        };

        let history = sale.bids.entry(pending.token_type.clone()).or_default();
        let position = (pending.position as usize).min(history.len());
        history.insert(position, pending.bid.clone());
        let seller_id = sale.owner_id.clone();

        events::emit_settlement_failed(&seller_id, &pending.bid.owner_id, key, &pending.token_type);
        U128(0)
    }
}
