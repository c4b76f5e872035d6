// =============================================================================
// Offer Integration Tests
// =============================================================================
// Native NEAR bids: the recorded history, its bound, and eviction refunds.

use anyhow::Result;
use near_workspaces::types::NearToken;

use super::helpers::*;

#[tokio::test]
async fn test_offer_recorded_in_history() -> Result<()> {
    let s = setup().await?;
    list_via_approval(&s.nft, &s.seller, &s.market, TOKEN_ID, "10", None)
        .await?
        .into_result()?;
    let bob = bidder(&s).await?;

    offer(&s.market, &bob, &s.nft, TOKEN_ID, NearToken::from_yoctonear(500))
        .await?
        .into_result()?;

    let sale = get_sale(&s.market, &s.nft, TOKEN_ID).await?.expect("sale");
    let last = sale.bids["near"].last().expect("one bid");
    assert_eq!(last.owner_id, bob.id().to_string());
    assert_eq!(last.price, "500");
    Ok(())
}

#[tokio::test]
async fn test_offer_below_reserve_rejected() -> Result<()> {
    let s = setup().await?;
    list_via_approval(&s.nft, &s.seller, &s.market, TOKEN_ID, "1000", None)
        .await?
        .into_result()?;
    let bob = bidder(&s).await?;

    let result = offer(&s.market, &bob, &s.nft, TOKEN_ID, NearToken::from_yoctonear(999)).await?;
    assert!(result.is_failure(), "offer below the listed price must fail");

    let sale = get_sale(&s.market, &s.nft, TOKEN_ID).await?.expect("sale");
    assert!(sale.bids.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_seller_cannot_bid() -> Result<()> {
    let s = setup().await?;
    list_via_approval(&s.nft, &s.seller, &s.market, TOKEN_ID, "10", None)
        .await?
        .into_result()?;

    let result = offer(&s.market, &s.seller, &s.nft, TOKEN_ID, NearToken::from_yoctonear(500)).await?;
    assert!(result.is_failure());
    Ok(())
}

#[tokio::test]
async fn test_history_bound_refunds_evicted_bid() -> Result<()> {
    let s = setup_with_history(Some(2)).await?;
    list_via_approval(&s.nft, &s.seller, &s.market, TOKEN_ID, "0", None)
        .await?
        .into_result()?;
    let first = bidder(&s).await?;
    let second = bidder(&s).await?;
    let third = bidder(&s).await?;

    offer(&s.market, &first, &s.nft, TOKEN_ID, NearToken::from_near(1))
        .await?
        .into_result()?;
    let after_bid = balance_of(&first).await?;

    offer(&s.market, &second, &s.nft, TOKEN_ID, NearToken::from_near(2))
        .await?
        .into_result()?;
    offer(&s.market, &third, &s.nft, TOKEN_ID, NearToken::from_near(3))
        .await?
        .into_result()?;

    let sale = get_sale(&s.market, &s.nft, TOKEN_ID).await?.expect("sale");
    let bidders: Vec<&str> = sale.bids["near"].iter().map(|b| b.owner_id.as_str()).collect();
    assert_eq!(bidders, vec![second.id().as_str(), third.id().as_str()]);

    // The first bidder paid no gas since, so the whole escrow came back.
    let refunded = balance_of(&first).await? - after_bid;
    assert_eq!(refunded, NearToken::from_near(1).as_yoctonear());
    Ok(())
}

#[tokio::test]
async fn test_remove_sale_refunds_bids() -> Result<()> {
    let s = setup().await?;
    list_via_approval(&s.nft, &s.seller, &s.market, TOKEN_ID, "10", None)
        .await?
        .into_result()?;
    let bob = bidder(&s).await?;
    offer(&s.market, &bob, &s.nft, TOKEN_ID, NearToken::from_near(1))
        .await?
        .into_result()?;
    let after_bid = balance_of(&bob).await?;

    remove_sale(&s.market, &s.seller, &s.nft, TOKEN_ID)
        .await?
        .into_result()?;

    assert!(get_sale(&s.market, &s.nft, TOKEN_ID).await?.is_none());
    assert_eq!(
        balance_of(&bob).await? - after_bid,
        NearToken::from_near(1).as_yoctonear()
    );
    Ok(())
}
