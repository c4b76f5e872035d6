//! Prepaid storage: every live sale and every live bid reserves a fixed slice of its owner's deposit.

use crate::*;

#[near]
impl Contract {
    #[payable]
    #[handle_result]
    pub fn storage_deposit(&mut self, account_id: Option<AccountId>) -> Result<U128, MarketplaceError> {
        let account_id = account_id.unwrap_or_else(env::predecessor_account_id);
        let deposit = env::attached_deposit().as_yoctonear();
        if deposit == 0 {
            return Err(MarketplaceError::InsufficientDeposit(
                "Requires attached deposit of at least 1 yoctoNEAR".into(),
            ));
        }

        let new_balance = self.storage_balance(&account_id) + deposit;
        self.storage_deposits.insert(account_id.clone(), new_balance);

        events::emit_storage_deposit(&account_id, deposit, new_balance);
        Ok(U128(new_balance))
    }

    /// Refunds the whole balance. A zero balance is a no-op; any live sale or bid blocks the withdrawal.
    #[payable]
    #[handle_result]
    pub fn storage_withdraw(&mut self) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        let account_id = env::predecessor_account_id();

        let balance = self.storage_balance(&account_id);
        if balance == 0 {
            return Ok(());
        }

        let sales = self.sales_count_of(&account_id);
        let bids = self.live_bids_of(&account_id);
        if sales > 0 || bids > 0 {
            return Err(MarketplaceError::InvalidState(format!(
                "Storage still reserved by {} sales and {} bids",
                sales, bids
            )));
        }

        self.storage_deposits.remove(&account_id);
        let _ = Promise::new(account_id.clone()).transfer(NearToken::from_yoctonear(balance));

        events::emit_storage_withdraw(&account_id, balance);
        Ok(())
    }

    pub fn storage_paid(&self, account_id: AccountId) -> U128 {
        U128(self.storage_balance(&account_id))
    }

    /// Deposit reserved per live sale.
    pub fn storage_amount(&self) -> U128 {
        U128(STORAGE_PER_SALE)
    }

    /// Deposit reserved per live bid.
    pub fn storage_bid_amount(&self) -> U128 {
        U128(STORAGE_PER_BID)
    }
}

impl Contract {
    pub(crate) fn storage_balance(&self, account_id: &AccountId) -> u128 {
        self.storage_deposits.get(account_id).copied().unwrap_or(0)
    }

    pub(crate) fn sales_count_of(&self, account_id: &AccountId) -> u64 {
        self.by_owner_id
            .get(account_id)
            .map(|set| set.len() as u64)
            .unwrap_or(0)
    }

    pub(crate) fn live_bids_of(&self, account_id: &AccountId) -> u32 {
        self.bids_by_owner.get(account_id).copied().unwrap_or(0)
    }

    pub(crate) fn storage_reserved(&self, account_id: &AccountId) -> u128 {
        self.sales_count_of(account_id) as u128 * STORAGE_PER_SALE
            + self.live_bids_of(account_id) as u128 * STORAGE_PER_BID
    }

    /// Fails unless the deposit also covers `extra` more yoctoNEAR of reservations.
    pub(crate) fn check_storage_covers(
        &self,
        account_id: &AccountId,
        extra: u128,
    ) -> Result<(), MarketplaceError> {
        let paid = self.storage_balance(account_id);
        let required = self.storage_reserved(account_id) + extra;
        if paid < required {
            return Err(MarketplaceError::InsufficientStorage(format!(
                "Paid {} but {} required; deposit via storage_deposit()",
                paid, required
            )));
        }
        Ok(())
    }

    pub(crate) fn track_bid_added(&mut self, bidder: &AccountId) {
        let count = self.live_bids_of(bidder) + 1;
        self.bids_by_owner.insert(bidder.clone(), count);
    }

    pub(crate) fn track_bid_released(&mut self, bidder: &AccountId) {
        match self.live_bids_of(bidder) {
            0 | 1 => {
                self.bids_by_owner.remove(bidder);
            }
            n => {
                self.bids_by_owner.insert(bidder.clone(), n - 1);
            }
        }
    }
}
