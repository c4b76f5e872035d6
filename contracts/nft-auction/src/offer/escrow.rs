use crate::external::ext_ft_contract;
use crate::*;

#[near]
impl Contract {
    /// Credits a failed payout or refund to the receiver's claimable balance.
    #[private]
    pub fn resolve_payment(&mut self, receiver_id: AccountId, token_type: AccountId, amount: U128) -> bool {
        let succeeded = env::promise_result_checked(0, 0).is_ok();
        self.internal_resolve_payment(&receiver_id, &token_type, amount.0, succeeded)
    }

    /// Retries every failed payment of `token_type` owed to the caller.
    #[payable]
    #[handle_result]
    pub fn claim(&mut self, token_type: AccountId) -> Result<Promise, MarketplaceError> {
        guards::check_one_yocto()?;
        let account_id = env::predecessor_account_id();

        let amount = self
            .claimable
            .remove(&(account_id.clone(), token_type.clone()))
            .unwrap_or(0);
        if amount == 0 {
            return Err(MarketplaceError::NotFound(format!(
                "Nothing to claim in {}",
                token_type
            )));
        }

        events::emit_claim(&account_id, &token_type, amount);
        Ok(self.payment_promise(&token_type, &account_id, amount))
    }

    pub fn get_claimable(&self, account_id: AccountId, token_type: AccountId) -> U128 {
        U128(self.claimable_of(&account_id, &token_type))
    }
}

impl Contract {
    /// Sends `amount` of `token_type` out of escrow; a failed transfer lands in `claimable`.
    pub(crate) fn pay(&self, token_type: &AccountId, receiver_id: &AccountId, amount: u128) {
        if amount == 0 {
            return;
        }
        let _ = self.payment_promise(token_type, receiver_id, amount);
    }

    pub(crate) fn payment_promise(
        &self,
        token_type: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
    ) -> Promise {
        let transfer = match PaymentToken::from_token_type(token_type) {
            PaymentToken::Native => {
                Promise::new(receiver_id.clone()).transfer(NearToken::from_yoctonear(amount))
            }
            PaymentToken::Fungible(ft_id) => ext_ft_contract::ext(ft_id)
                .with_attached_deposit(ONE_YOCTO)
                .with_static_gas(Gas::from_tgas(GAS_FT_TRANSFER))
                .ft_transfer(receiver_id.clone(), U128(amount), None),
        };
        transfer.then(
            Self::ext(env::current_account_id())
                .with_static_gas(Gas::from_tgas(GAS_RESOLVE_PAYMENT))
                .resolve_payment(receiver_id.clone(), token_type.clone(), U128(amount)),
        )
    }

    pub(crate) fn internal_resolve_payment(
        &mut self,
        receiver_id: &AccountId,
        token_type: &AccountId,
        amount: u128,
        succeeded: bool,
    ) -> bool {
        if succeeded {
            return true;
        }
        env::log_str(&format!(
            "Payment of {} {} to {} failed; credited as claimable",
            amount, token_type, receiver_id
        ));
        let balance = self.claimable_of(receiver_id, token_type) + amount;
        self.claimable
            .insert((receiver_id.clone(), token_type.clone()), balance);
        events::emit_payment_credited(receiver_id, token_type, amount, balance);
        false
    }

    pub(crate) fn claimable_of(&self, account_id: &AccountId, token_type: &AccountId) -> u128 {
        self.claimable
            .get(&(account_id.clone(), token_type.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn refund_bid(&mut self, token_type: &AccountId, bid: &Bid) {
        self.track_bid_released(&bid.owner_id);
        self.pay(token_type, &bid.owner_id, bid.price.0);
    }

    pub(crate) fn refund_all_bids(&mut self, sale: &Sale) {
        for (token_type, history) in &sale.bids {
            for bid in history {
                self.refund_bid(token_type, bid);
            }
        }
    }

    /// Pays royalty recipients per `payout` and the rest of `price` to the seller.
    /// A missing, empty, or over-price payout sends everything to the seller.
    pub(crate) fn distribute_payout(
        &self,
        token_type: &AccountId,
        payout: Option<&Payout>,
        price: u128,
        seller_id: &AccountId,
    ) {
        let payout = payout.filter(|p| {
            !p.payout.is_empty() && p.payout.values().map(|a| a.0).sum::<u128>() <= price
        });

        let Some(payout) = payout else {
            self.pay(token_type, seller_id, price);
            return;
        };

        let mut distributed: u128 = 0;
        for (receiver_id, amount) in &payout.payout {
            self.pay(token_type, receiver_id, amount.0);
            distributed += amount.0;
        }
        self.pay(token_type, seller_id, price - distributed);
    }
}
