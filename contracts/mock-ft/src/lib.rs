//! Minimal NEP-141 Mock FT for Integration Testing
//!
//! Implements only what the market needs to take fungible-token bids:
//! - ft_transfer_call (bid via ft_on_transfer, unused amount refunded)
//! - ft_transfer (market refunds and payouts)
//! - ft_balance_of (view balance)
//! - storage_deposit (acknowledged, no accounting)

use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{AccountId, Gas, NearToken, PanicOnDefault, Promise, PromiseOrValue, env, near};

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct MockFT {
    balances: LookupMap<AccountId, u128>,
    total_supply: u128,
    /// Test helper: while set, ft_transfer panics
    fail_transfers: bool,
}

#[near(serializers = [json])]
pub struct StorageBalance {
    pub total: U128,
    pub available: U128,
}

#[near]
impl MockFT {
    #[init]
    pub fn new(owner_id: AccountId, total_supply: U128) -> Self {
        let mut balances = LookupMap::new(b"b");
        balances.insert(owner_id, total_supply.0);
        Self {
            balances,
            total_supply: total_supply.0,
            fail_transfers: false,
        }
    }

    // =========================================================================
    // NEP-141 Core
    // =========================================================================

    #[payable]
    pub fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>) {
        assert_eq!(
            env::attached_deposit(),
            NearToken::from_yoctonear(1),
            "Requires 1 yoctoNEAR"
        );

        if self.fail_transfers {
            env::panic_str("MockFT: Simulated transfer failure");
        }

        let sender_id = env::predecessor_account_id();
        self.internal_transfer(&sender_id, &receiver_id, amount.0, memo);
    }

    #[payable]
    pub fn ft_transfer_call(
        &mut self,
        receiver_id: AccountId,
        amount: U128,
        memo: Option<String>,
        msg: String,
    ) -> PromiseOrValue<U128> {
        assert_eq!(
            env::attached_deposit(),
            NearToken::from_yoctonear(1),
            "Requires 1 yoctoNEAR"
        );
        let sender_id = env::predecessor_account_id();
        self.internal_transfer(&sender_id, &receiver_id, amount.0, memo);

        Promise::new(receiver_id.clone())
            .function_call(
                "ft_on_transfer".to_string(),
                near_sdk::serde_json::json!({
                    "sender_id": sender_id,
                    "amount": amount,
                    "msg": msg
                })
                .to_string()
                .into_bytes(),
                NearToken::from_near(0),
                Gas::from_tgas(250),
            )
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(Gas::from_tgas(10))
                    .ft_resolve_transfer(sender_id, receiver_id, amount),
            )
            .into()
    }

    pub fn ft_balance_of(&self, account_id: AccountId) -> U128 {
        U128(self.balances.get(&account_id).copied().unwrap_or(0))
    }

    pub fn ft_total_supply(&self) -> U128 {
        U128(self.total_supply)
    }

    // Acknowledged only; the mock keeps no per-account storage.
    #[payable]
    pub fn storage_deposit(&mut self, account_id: Option<AccountId>) -> StorageBalance {
        let _ = account_id;
        StorageBalance {
            total: U128(env::attached_deposit().as_yoctonear()),
            available: U128(0),
        }
    }

    // =========================================================================
    // Test Helpers (not in real FT)
    // =========================================================================

    pub fn mint(&mut self, account_id: AccountId, amount: U128) {
        let current = self.balances.get(&account_id).copied().unwrap_or(0);
        self.balances.insert(account_id, current + amount.0);
        self.total_supply += amount.0;
    }

    /// A panicking receipt reverts its own writes, so the switch stays on until cleared.
    pub fn set_fail_transfers(&mut self, should_fail: bool) {
        self.fail_transfers = should_fail;
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn internal_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        _memo: Option<String>,
    ) {
        let sender_balance = self.balances.get(sender_id).copied().unwrap_or(0);
        assert!(sender_balance >= amount, "Insufficient balance");

        self.balances.insert(sender_id.clone(), sender_balance - amount);
        let receiver_balance = self.balances.get(receiver_id).copied().unwrap_or(0);
        self.balances
            .insert(receiver_id.clone(), receiver_balance + amount);
    }

    /// Refunds whatever the receiver reported unused; a failed receiver call refunds everything.
    #[private]
    pub fn ft_resolve_transfer(
        &mut self,
        sender_id: AccountId,
        receiver_id: AccountId,
        amount: U128,
    ) -> U128 {
        let unused = match env::promise_result_checked(0, 64) {
            Ok(data) => near_sdk::serde_json::from_slice::<U128>(&data)
                .map(|unused| unused.0.min(amount.0))
                .unwrap_or(0),
            Err(_) => amount.0,
        };

        if unused > 0 {
            let receiver_balance = self.balances.get(&receiver_id).copied().unwrap_or(0);
            let refund = unused.min(receiver_balance);
            if refund > 0 {
                self.balances.insert(receiver_id, receiver_balance - refund);
                let sender_balance = self.balances.get(&sender_id).copied().unwrap_or(0);
                self.balances.insert(sender_id, sender_balance + refund);
            }
        }

        U128(amount.0 - unused)
    }
}
