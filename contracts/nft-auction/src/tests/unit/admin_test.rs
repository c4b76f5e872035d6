use crate::tests::test_utils::*;
use crate::*;
use near_sdk::json_types::U128;
use near_sdk::testing_env;

// --- Init ---

#[test]
fn init_uses_defaults() {
    let contract = new_contract();
    let config = contract.get_config();

    assert_eq!(config.owner_id, owner());
    assert_eq!(config.bid_history_length, DEFAULT_BID_HISTORY_LENGTH);
    assert_eq!(config.acceptance_policy, AcceptancePolicy::Manual);
    assert_eq!(config.storage_per_sale, U128(STORAGE_PER_SALE));
    assert_eq!(config.storage_per_bid, U128(STORAGE_PER_BID));
    assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn init_rejects_bad_history_length() {
    testing_env!(context(owner()).build());
    assert!(matches!(
        Contract::new(owner(), Some(0), None),
        Err(MarketplaceError::InvalidInput(_))
    ));
    assert!(matches!(
        Contract::new(owner(), Some(MAX_BID_HISTORY_LENGTH + 1), None),
        Err(MarketplaceError::InvalidInput(_))
    ));
}

#[test]
fn init_emits_event() {
    let _contract = new_contract_with(Some(4), Some(AcceptancePolicy::AutoAcceptAtPrice));

    let event = find_event("init").expect("init event");
    assert_eq!(event["standard"], "nft_auction");
    assert_eq!(event["event"], "CONTRACT_UPDATE");
    assert_eq!(event["data"][0]["bid_history_length"], 4);
    assert_eq!(event["data"][0]["acceptance_policy"], "auto_accept_at_price");
}

// --- Token types ---

#[test]
fn add_and_remove_token_types() {
    let mut contract = new_contract();
    support_ft(&mut contract);
    assert_eq!(contract.supported_ft_token_ids(), vec![ft_contract()]);

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.remove_token_type(ft_contract()).unwrap();
    assert!(contract.supported_ft_token_ids().is_empty());
}

#[test]
fn add_token_types_skips_native() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(owner(), 1).build());
    contract
        .add_token_types(vec![near_type(), ft_contract(), ft_contract()])
        .unwrap();
    assert_eq!(contract.supported_ft_token_ids(), vec![ft_contract()]);
}

#[test]
fn remove_unknown_token_type_fails() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(owner(), 1).build());
    let err = contract.remove_token_type(ft_contract()).unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound(_)));
}

#[test]
fn admin_calls_require_owner() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(buyer(), 1).build());
    let err = contract.add_token_types(vec![ft_contract()]).unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));

    testing_env!(context_with_deposit(buyer(), 1).build());
    let err = contract
        .set_acceptance_policy(AcceptancePolicy::AutoAcceptAtPrice)
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));

    testing_env!(context_with_deposit(buyer(), 1).build());
    let err = contract.set_owner(buyer()).unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));
}

#[test]
fn admin_calls_require_one_yocto() {
    let mut contract = new_contract();

    testing_env!(context(owner()).build());
    let err = contract.add_token_types(vec![ft_contract()]).unwrap_err();
    assert!(matches!(err, MarketplaceError::InsufficientDeposit(_)));
}

// --- Settings ---

#[test]
fn set_acceptance_policy_updates_config() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(owner(), 1).build());
    contract
        .set_acceptance_policy(AcceptancePolicy::AutoAcceptAtPrice)
        .unwrap();
    assert_eq!(
        contract.get_config().acceptance_policy,
        AcceptancePolicy::AutoAcceptAtPrice
    );

    let event = find_event("acceptance_policy_updated").expect("policy event");
    assert_eq!(event["data"][0]["old_policy"], "manual");
    assert_eq!(event["data"][0]["new_policy"], "auto_accept_at_price");
}

#[test]
fn set_bid_history_length_bounds() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.set_bid_history_length(MAX_BID_HISTORY_LENGTH).unwrap();
    assert_eq!(contract.get_config().bid_history_length, MAX_BID_HISTORY_LENGTH);

    testing_env!(context_with_deposit(owner(), 1).build());
    let err = contract
        .set_bid_history_length(MAX_BID_HISTORY_LENGTH + 1)
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidInput(_)));
}

#[test]
fn set_owner_hands_over_admin() {
    let mut contract = new_contract();

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.set_owner(creator()).unwrap();
    assert_eq!(contract.get_config().owner_id, creator());

    testing_env!(context_with_deposit(owner(), 1).build());
    let err = contract.add_token_types(vec![ft_contract()]).unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized(_)));

    testing_env!(context_with_deposit(creator(), 1).build());
    contract.add_token_types(vec![ft_contract()]).unwrap();
}

#[test]
fn removed_token_type_blocks_new_listings() {
    let mut contract = new_contract();
    support_ft(&mut contract);

    testing_env!(context_with_deposit(owner(), 1).build());
    contract.remove_token_type(ft_contract()).unwrap();

    fund_storage(&mut contract, &owner(), STORAGE_PER_SALE);
    testing_env!(approval_context(&owner()).build());
    let err = contract
        .nft_on_approve("78".into(), owner(), 1, sale_msg(10, Some(&ft_contract())))
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidInput(_)));
}
