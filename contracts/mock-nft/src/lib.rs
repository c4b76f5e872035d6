//! Minimal NEP-171/178/199 Mock NFT for Integration Testing
//!
//! Implements only the methods the market touches:
//! - nft_approve (fires nft_on_approve on the approved account)
//! - nft_transfer / nft_transfer_payout (owner or approved sender only)
//! - nft_token / nft_is_approved (views)
//! - nft_mint with optional royalties (test helper)

use std::collections::HashMap;

use near_sdk::json_types::U128;
use near_sdk::store::LookupMap;
use near_sdk::{AccountId, Gas, NearToken, PanicOnDefault, Promise, env, ext_contract, near};

/// Royalty shares are in basis points of the sale balance.
const ROYALTY_DENOMINATOR: u128 = 10_000;
const NFT_ON_APPROVE_GAS: Gas = Gas::from_tgas(30);

#[near(serializers = [borsh])]
pub struct Token {
    owner_id: AccountId,
    approved_account_ids: HashMap<AccountId, u64>,
    royalty: HashMap<AccountId, u32>,
}

#[near(serializers = [json])]
pub struct JsonToken {
    pub token_id: String,
    pub owner_id: AccountId,
    pub approved_account_ids: HashMap<AccountId, u64>,
}

#[near(serializers = [json])]
pub struct Payout {
    pub payout: HashMap<AccountId, U128>,
}

#[ext_contract(ext_approval_receiver)]
pub trait ApprovalReceiver {
    fn nft_on_approve(&mut self, token_id: String, owner_id: AccountId, approval_id: u64, msg: String);
}

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct MockNFT {
    owner_id: AccountId,
    tokens: LookupMap<String, Token>,
    next_approval_id: u64,
    /// Test helper: while set, transfers panic
    fail_transfers: bool,
}

#[near]
impl MockNFT {
    #[init]
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            owner_id,
            tokens: LookupMap::new(b"t"),
            next_approval_id: 1,
            fail_transfers: false,
        }
    }

    // =========================================================================
    // NEP-171 Core
    // =========================================================================

    #[payable]
    pub fn nft_transfer(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        approval_id: Option<u64>,
        memo: Option<String>,
    ) {
        assert_one_yocto();
        let _ = memo;
        self.internal_transfer(&env::predecessor_account_id(), &receiver_id, &token_id, approval_id);
    }

    pub fn nft_token(&self, token_id: String) -> Option<JsonToken> {
        self.tokens.get(&token_id).map(|token| JsonToken {
            token_id: token_id.clone(),
            owner_id: token.owner_id.clone(),
            approved_account_ids: token.approved_account_ids.clone(),
        })
    }

    // =========================================================================
    // NEP-178 Approval Management
    // =========================================================================

    /// With a `msg`, the approved account is notified through `nft_on_approve`.
    #[payable]
    pub fn nft_approve(
        &mut self,
        token_id: String,
        account_id: AccountId,
        msg: Option<String>,
    ) -> Option<Promise> {
        assert!(
            env::attached_deposit() >= NearToken::from_yoctonear(1),
            "Requires attached deposit of at least 1 yoctoNEAR"
        );
        let owner_id = env::predecessor_account_id();
        let approval_id = self.next_approval_id;
        let token = self.tokens.get_mut(&token_id).unwrap_or_else(|| env::panic_str("Token not found"));
        assert_eq!(token.owner_id, owner_id, "Only token owner can approve");

        token
            .approved_account_ids
            .insert(account_id.clone(), approval_id);
        self.next_approval_id += 1;

        msg.map(|msg| {
            ext_approval_receiver::ext(account_id)
                .with_static_gas(NFT_ON_APPROVE_GAS)
                .nft_on_approve(token_id, owner_id, approval_id, msg)
        })
    }

    pub fn nft_is_approved(
        &self,
        token_id: String,
        approved_account_id: AccountId,
        approval_id: Option<u64>,
    ) -> bool {
        let Some(token) = self.tokens.get(&token_id) else {
            return false;
        };
        match (token.approved_account_ids.get(&approved_account_id), approval_id) {
            (Some(actual), Some(expected)) => *actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    // =========================================================================
    // NEP-199 Payouts
    // =========================================================================

    #[payable]
    pub fn nft_transfer_payout(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        approval_id: Option<u64>,
        memo: Option<String>,
        balance: U128,
        max_len_payout: Option<u32>,
    ) -> Payout {
        assert_one_yocto();
        let _ = memo;
        let token = self.tokens.get(&token_id).unwrap_or_else(|| env::panic_str("Token not found"));
        let payout = compute_payout(token, balance.0, max_len_payout.unwrap_or(10));

        self.internal_transfer(&env::predecessor_account_id(), &receiver_id, &token_id, approval_id);
        payout
    }

    // =========================================================================
    // Test Helpers (not in real NFT)
    // =========================================================================

    /// Mint a token; anyone may mint on the mock.
    pub fn nft_mint(
        &mut self,
        token_id: String,
        receiver_id: AccountId,
        royalty: Option<HashMap<AccountId, u32>>,
    ) -> JsonToken {
        assert!(self.tokens.get(&token_id).is_none(), "Token already exists");
        self.tokens.insert(
            token_id.clone(),
            Token {
                owner_id: receiver_id.clone(),
                approved_account_ids: HashMap::new(),
                royalty: royalty.unwrap_or_default(),
            },
        );
        JsonToken {
            token_id,
            owner_id: receiver_id,
            approved_account_ids: HashMap::new(),
        }
    }

    /// A panicking receipt reverts its own writes, so the switch stays on until cleared.
    pub fn set_fail_transfers(&mut self, should_fail: bool) {
        self.fail_transfers = should_fail;
    }

    pub fn get_owner(&self) -> AccountId {
        self.owner_id.clone()
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn internal_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        token_id: &String,
        approval_id: Option<u64>,
    ) {
        if self.fail_transfers {
            env::panic_str("MockNFT: Simulated transfer failure");
        }

        let token = self.tokens.get_mut(token_id).unwrap_or_else(|| env::panic_str("Token not found"));
        if &token.owner_id != sender_id {
            let approved = token
                .approved_account_ids
                .get(sender_id)
                .unwrap_or_else(|| env::panic_str("Sender not approved"));
            if let Some(expected) = approval_id {
                assert_eq!(*approved, expected, "Approval ID mismatch");
            }
        }
        assert_ne!(&token.owner_id, receiver_id, "Receiver already owns the token");

        token.owner_id = receiver_id.clone();
        token.approved_account_ids.clear();
    }
}

fn assert_one_yocto() {
    assert_eq!(
        env::attached_deposit(),
        NearToken::from_yoctonear(1),
        "Requires 1 yoctoNEAR"
    );
}

fn compute_payout(token: &Token, balance: u128, max_len_payout: u32) -> Payout {
    assert!(
        token.royalty.len() < max_len_payout as usize,
        "Too many royalty recipients"
    );
    let mut payout = HashMap::new();
    let mut royalties: u128 = 0;
    for (account_id, bps) in &token.royalty {
        let amount = balance * (*bps as u128) / ROYALTY_DENOMINATOR;
        royalties += amount;
        payout.insert(account_id.clone(), U128(amount));
    }
    let owner_share = payout
        .get(&token.owner_id)
        .map(|a: &U128| a.0)
        .unwrap_or(0)
        + (balance - royalties);
    payout.insert(token.owner_id.clone(), U128(owner_share));
    Payout { payout }
}
