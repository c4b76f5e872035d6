use crate::*;

impl Contract {
    pub(crate) fn internal_add_sale(&mut self, sale: Sale) {
        let key = sale.key();
        let sale_id = key.to_string();
        let owner_id = sale.owner_id.clone();
        self.sales.insert(sale_id.clone(), sale);

        let mut by_owner_id = self.by_owner_id.remove(&owner_id).unwrap_or_else(|| {
            IterableSet::new(StorageKey::ByOwnerIdInner {
                account_id_hash: guards::hash_account_id(&owner_id),
            })
        });
        by_owner_id.insert(sale_id.clone());
        self.by_owner_id.insert(owner_id, by_owner_id);

        let mut by_nft_contract_id = self
            .by_nft_contract_id
            .remove(&key.nft_contract_id)
            .unwrap_or_else(|| {
                IterableSet::new(StorageKey::ByNftContractIdInner {
                    account_id_hash: guards::hash_account_id(&key.nft_contract_id),
                })
            });
        by_nft_contract_id.insert(sale_id);
        self.by_nft_contract_id
            .insert(key.nft_contract_id, by_nft_contract_id);
    }

    /// Drops the sale and its index entries; escrowed bids are the caller's concern.
    pub(crate) fn internal_remove_sale(&mut self, key: &SaleKey) -> Result<Sale, MarketplaceError> {
        let sale_id = key.to_string();
        let sale = self
            .sales
            .remove(&sale_id)
            .ok_or_else(MarketplaceError::sale_not_found)?;

        if let Some(mut owner_set) = self.by_owner_id.remove(&sale.owner_id) {
            owner_set.remove(&sale_id);
            if !owner_set.is_empty() {
                self.by_owner_id.insert(sale.owner_id.clone(), owner_set);
            }
        }

        if let Some(mut contract_set) = self.by_nft_contract_id.remove(&key.nft_contract_id) {
            contract_set.remove(&sale_id);
            if !contract_set.is_empty() {
                self.by_nft_contract_id
                    .insert(key.nft_contract_id.clone(), contract_set);
            }
        }

        Ok(sale)
    }

    pub(crate) fn sale(&self, key: &SaleKey) -> Result<&Sale, MarketplaceError> {
        self.sales
            .get(&key.to_string())
            .ok_or_else(MarketplaceError::sale_not_found)
    }

    pub(crate) fn sale_mut(&mut self, key: &SaleKey) -> Result<&mut Sale, MarketplaceError> {
        self.sales
            .get_mut(&key.to_string())
            .ok_or_else(MarketplaceError::sale_not_found)
    }
}
