use crate::*;

#[near]
impl Contract {
    /// `nft_contract_token` is `"<nft_contract_id>||<token_id>"`.
    #[handle_result]
    pub fn get_sale(&self, nft_contract_token: String) -> Result<Option<Sale>, MarketplaceError> {
        let key: SaleKey = nft_contract_token.parse()?;
        Ok(self.sales.get(&key.to_string()).cloned())
    }

    pub fn get_supply_sales(&self) -> U64 {
        U64(self.sales.len() as u64)
    }

    pub fn get_sales(&self, from_index: Option<U64>, limit: Option<u64>) -> Vec<Sale> {
        let (start, limit) = guards::page_bounds(from_index, limit);
        self.sales
            .values()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get_supply_by_owner_id(&self, account_id: AccountId) -> U64 {
        U64(self.sales_count_of(&account_id))
    }

    pub fn get_sales_by_owner_id(
        &self,
        account_id: AccountId,
        from_index: Option<U64>,
        limit: Option<u64>,
    ) -> Vec<Sale> {
        self.by_owner_id
            .get(&account_id)
            .map(|set| self.page_of(set, from_index, limit))
            .unwrap_or_default()
    }

    pub fn get_supply_by_nft_contract_id(&self, nft_contract_id: AccountId) -> U64 {
        U64(self
            .by_nft_contract_id
            .get(&nft_contract_id)
            .map(|set| set.len() as u64)
            .unwrap_or(0))
    }

    pub fn get_sales_by_nft_contract_id(
        &self,
        nft_contract_id: AccountId,
        from_index: Option<U64>,
        limit: Option<u64>,
    ) -> Vec<Sale> {
        self.by_nft_contract_id
            .get(&nft_contract_id)
            .map(|set| self.page_of(set, from_index, limit))
            .unwrap_or_default()
    }
}

impl Contract {
    fn page_of(
        &self,
        sale_ids: &IterableSet<String>,
        from_index: Option<U64>,
        limit: Option<u64>,
    ) -> Vec<Sale> {
        let (start, limit) = guards::page_bounds(from_index, limit);
        sale_ids
            .iter()
            .skip(start)
            .take(limit)
            .filter_map(|sale_id| self.sales.get(sale_id).cloned())
            .collect()
    }
}
