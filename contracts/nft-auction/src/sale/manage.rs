use crate::*;

#[near]
impl Contract {
    /// Cancels the sale and refunds every escrowed bid.
    #[payable]
    #[handle_result]
    pub fn remove_sale(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
    ) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        let key = SaleKey::new(nft_contract_id, token_id);
        self.internal_cancel_sale(&env::predecessor_account_id(), &key)
    }

    #[payable]
    #[handle_result]
    pub fn update_price(
        &mut self,
        nft_contract_id: AccountId,
        token_id: String,
        price: U128,
    ) -> Result<(), MarketplaceError> {
        guards::check_one_yocto()?;
        let key = SaleKey::new(nft_contract_id, token_id);
        self.internal_update_price(&env::predecessor_account_id(), &key, price)
    }
}

impl Contract {
    pub(crate) fn internal_cancel_sale(
        &mut self,
        caller: &AccountId,
        key: &SaleKey,
    ) -> Result<(), MarketplaceError> {
        let sale = self.sale(key)?;
        if &sale.owner_id != caller {
            return Err(MarketplaceError::only_owner("the sale owner"));
        }
        if sale.is_settling() {
            return Err(MarketplaceError::settlement_in_progress());
        }

        let sale = self.internal_remove_sale(key)?;
        self.refund_all_bids(&sale);

        events::emit_sale_remove(caller, key);
        Ok(())
    }

    pub(crate) fn internal_update_price(
        &mut self,
        caller: &AccountId,
        key: &SaleKey,
        price: U128,
    ) -> Result<(), MarketplaceError> {
        let sale = self.sale_mut(key)?;
        if &sale.owner_id != caller {
            return Err(MarketplaceError::only_owner("the sale owner"));
        }
        if sale.is_settling() {
            return Err(MarketplaceError::settlement_in_progress());
        }

        let old_price = sale.price;
        sale.price = price;

        events::emit_sale_update_price(caller, key, old_price.0, price.0);
        Ok(())
    }
}
