use crate::tests::test_utils::*;
use crate::*;
use near_sdk::json_types::U128;
use near_sdk::testing_env;
use std::collections::HashMap;

fn accept(contract: &mut Contract, caller: &AccountId, key: &SaleKey) -> Result<Promise, MarketplaceError> {
    testing_env!(context(caller.clone()).build());
    contract.accept_offer(key.nft_contract_id.clone(), key.token_id.clone(), None)
}

fn royalty_payout(seller: u128, royalty: u128) -> Payout {
    Payout {
        payout: HashMap::from([(owner(), U128(seller)), (creator(), U128(royalty))]),
    }
}

// --- accept_offer ---

#[test]
fn accept_then_commit_clears_sale() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);

    accept(&mut contract, &owner(), &key).unwrap();
    let settled = contract.internal_commit_settlement(&key, None);

    assert_eq!(settled, U128(500));
    assert!(contract
        .get_sale("nft.cheddar.testnet||78".to_string())
        .unwrap()
        .is_none());
    assert_eq!(contract.get_supply_sales(), U64(0));
    assert_eq!(contract.get_supply_by_owner_id(owner()), U64(0));
    assert_eq!(contract.get_supply_by_nft_contract_id(nft_contract()), U64(0));
    assert_eq!(contract.live_bids_of(&buyer()), 0);
}

#[test]
fn accept_stages_winning_bid() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);

    accept(&mut contract, &owner(), &key).unwrap();

    let sale = contract.sale(&key).unwrap();
    let pending = sale.settlement.clone().expect("settlement staged");
    assert_eq!(pending.token_type, near_type());
    assert_eq!(pending.position, 0);
    assert_eq!(pending.bid.owner_id, buyer());
    assert_eq!(pending.bid.price, U128(500));
    assert!(sale.bids.is_empty());
}

#[test]
fn accept_picks_highest_not_latest() {
    let mut contract = new_contract_with(Some(3), None);
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 100);
    funded_offer(&mut contract, &creator(), &key, 900);
    funded_offer(&mut contract, &other_bidder(), &key, 300);

    accept(&mut contract, &owner(), &key).unwrap();

    let pending = contract.sale(&key).unwrap().settlement.clone().unwrap();
    assert_eq!(pending.bid.owner_id, creator());
    assert_eq!(pending.position, 1);
}

#[test]
fn accept_by_non_owner_fails() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);

    let err = expect_err(accept(&mut contract, &buyer(), &key));
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));
    assert!(!contract.sale(&key).unwrap().is_settling());
}

#[test]
fn accept_without_bids_fails() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);

    let err = expect_err(accept(&mut contract, &owner(), &key));
    assert!(matches!(err, MarketplaceError::InvalidState(_)));
}

#[test]
fn accept_missing_sale_fails() {
    let mut contract = new_contract();

    let key = SaleKey::new(nft_contract(), "78");
    let err = expect_err(accept(&mut contract, &owner(), &key));
    assert!(matches!(err, MarketplaceError::NotFound(_)));
}

#[test]
fn accept_ft_history_by_token_type() {
    let mut contract = new_contract();
    support_ft(&mut contract);
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    fund_storage(&mut contract, &creator(), STORAGE_PER_BID);
    place_ft_offer(&mut contract, &creator(), &key, 800).unwrap();

    testing_env!(context(owner()).build());
    contract
        .accept_offer(nft_contract(), "78".into(), Some(ft_contract()))
        .unwrap();

    let pending = contract.sale(&key).unwrap().settlement.clone().unwrap();
    assert_eq!(pending.token_type, ft_contract());
    assert_eq!(pending.bid.owner_id, creator());
    // The NEAR history is untouched until commit.
    assert_eq!(bids_in(&contract, &key, &near_type()).len(), 1);
}

// --- Sale lock ---

#[test]
fn settling_sale_rejects_changes() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    accept(&mut contract, &owner(), &key).unwrap();

    fund_storage(&mut contract, &creator(), STORAGE_PER_BID);
    let err = expect_err(place_offer(&mut contract, &creator(), &key, 600));
    assert!(matches!(err, MarketplaceError::InvalidState(_)));

    let err = expect_err(accept(&mut contract, &owner(), &key));
    assert!(matches!(err, MarketplaceError::InvalidState(_)));

    testing_env!(context_with_deposit(owner(), 1).build());
    let err = contract.remove_sale(nft_contract(), "78".into()).unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidState(_)));

    testing_env!(context_with_deposit(owner(), 1).build());
    let err = contract
        .update_price(nft_contract(), "78".into(), U128(1))
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidState(_)));
}

// --- Commit ---

#[test]
fn commit_refunds_losing_bids() {
    let mut contract = new_contract_with(Some(3), None);
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    funded_offer(&mut contract, &creator(), &key, 200);

    accept(&mut contract, &owner(), &key).unwrap();
    contract.internal_commit_settlement(&key, Some(&royalty_payout(450, 50)));

    assert_eq!(contract.live_bids_of(&buyer()), 0);
    assert_eq!(contract.live_bids_of(&creator()), 0);
    assert!(contract.sales.get(&key.to_string()).is_none());
}

#[test]
fn commit_emits_offer_accepted() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    accept(&mut contract, &owner(), &key).unwrap();

    testing_env!(context("marketplace.near".parse().unwrap()).build());
    contract.internal_commit_settlement(&key, None);

    let event = find_event("offer_accepted").expect("accepted event");
    assert_eq!(event["event"], "OFFER_UPDATE");
    assert_eq!(event["data"][0]["seller_id"], owner().to_string());
    assert_eq!(event["data"][0]["buyer_id"], buyer().to_string());
    assert_eq!(event["data"][0]["price"], "500");
    assert_eq!(event["data"][0]["sale_id"], "nft.cheddar.testnet||78");
}

#[test]
fn commit_without_pending_settlement_is_noop() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);

    let settled = contract.internal_commit_settlement(&key, None);

    assert_eq!(settled, U128(0));
    assert!(contract.sale(&key).is_ok());
    assert_eq!(bids_in(&contract, &key, &near_type()).len(), 1);
}

#[test]
fn commit_on_missing_sale_does_not_panic() {
    let mut contract = new_contract();
    let key = SaleKey::new(nft_contract(), "78");
    assert_eq!(contract.internal_commit_settlement(&key, None), U128(0));
    assert_eq!(contract.internal_abort_settlement(&key), U128(0));
}

// --- Abort ---

#[test]
fn abort_restores_bid_position() {
    let mut contract = new_contract_with(Some(3), None);
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 100);
    funded_offer(&mut contract, &creator(), &key, 900);
    funded_offer(&mut contract, &other_bidder(), &key, 300);
    let before = bids_in(&contract, &key, &near_type());

    accept(&mut contract, &owner(), &key).unwrap();
    contract.internal_abort_settlement(&key);

    let sale = contract.sale(&key).unwrap();
    assert!(sale.settlement.is_none());
    assert_eq!(bids_in(&contract, &key, &near_type()), before);
    assert_eq!(contract.live_bids_of(&creator()), 1);
}

#[test]
fn abort_unlocks_sale_for_new_offers() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    accept(&mut contract, &owner(), &key).unwrap();

    testing_env!(context("marketplace.near".parse().unwrap()).build());
    contract.internal_abort_settlement(&key);
    assert!(find_event("settlement_failed").is_some());

    // Default history length is 1, so the new bid evicts the restored one.
    funded_offer(&mut contract, &creator(), &key, 600);
    let bids = bids_in(&contract, &key, &near_type());
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].owner_id, creator());
    assert_eq!(contract.live_bids_of(&buyer()), 0);
}

#[test]
fn abort_allows_accept_again() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    accept(&mut contract, &owner(), &key).unwrap();
    contract.internal_abort_settlement(&key);

    accept(&mut contract, &owner(), &key).unwrap();
    assert!(contract.sale(&key).unwrap().is_settling());
}

// --- Payout handling ---

#[test]
fn over_price_payout_still_settles() {
    let mut contract = new_contract();
    let key = list_sale(&mut contract, &owner(), "78", 10, None);
    funded_offer(&mut contract, &buyer(), &key, 500);
    accept(&mut contract, &owner(), &key).unwrap();

    let settled = contract.internal_commit_settlement(&key, Some(&royalty_payout(500, 500)));
    assert_eq!(settled, U128(500));
    assert_eq!(contract.get_supply_sales(), U64(0));
}
