use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Credentials, SellerAccount};
use super::errors::AuthError;

/// Persistence for seller accounts and their password hashes.
#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn find_by_account(&self, account: &str) -> Result<Option<SellerAccount>, AuthError>;
    /// Create the seller and its credentials together; `Conflict` when the
    /// account is taken.
    async fn create(
        &self,
        account: &str,
        brand_name: &str,
        password_hash: String,
        password_algorithm: &str,
    ) -> Result<SellerAccount, AuthError>;
    async fn get_credentials(&self, seller_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockSellerRepository {
        sellers: Mutex<HashMap<String, SellerAccount>>, // key: account
        creds: Mutex<HashMap<Uuid, Credentials>>,       // key: seller_id
    }

    #[async_trait]
    impl SellerRepository for MockSellerRepository {
        async fn find_by_account(&self, account: &str) -> Result<Option<SellerAccount>, AuthError> {
            Ok(self.sellers.lock().await.get(account).cloned())
        }

        async fn create(
            &self,
            account: &str,
            brand_name: &str,
            password_hash: String,
            password_algorithm: &str,
        ) -> Result<SellerAccount, AuthError> {
            let mut sellers = self.sellers.lock().await;
            if sellers.contains_key(account) {
                return Err(AuthError::Conflict);
            }
            let seller = SellerAccount {
                id: Uuid::new_v4(),
                account: account.to_string(),
                brand_name: brand_name.trim().to_string(),
            };
            sellers.insert(account.to_string(), seller.clone());
            self.creds.lock().await.insert(
                seller.id,
                Credentials { seller_id: seller.id, password_hash, password_algorithm: password_algorithm.to_string() },
            );
            Ok(seller)
        }

        async fn get_credentials(&self, seller_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            Ok(self.creds.lock().await.get(&seller_id).cloned())
        }
    }
}
