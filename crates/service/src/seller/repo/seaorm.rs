use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use models::errors::ModelError;
use models::{seller, seller_credentials};

use crate::seller::domain::{Credentials, SellerAccount};
use crate::seller::errors::AuthError;
use crate::seller::repository::SellerRepository;

pub struct SeaOrmSellerRepository {
    pub db: DatabaseConnection,
}

fn account_of(m: seller::Model) -> SellerAccount {
    SellerAccount { id: m.id, account: m.account, brand_name: m.brand_name }
}

fn repo_err(e: sea_orm::DbErr) -> AuthError { AuthError::Repository(e.to_string()) }

#[async_trait::async_trait]
impl SellerRepository for SeaOrmSellerRepository {
    async fn find_by_account(&self, account: &str) -> Result<Option<SellerAccount>, AuthError> {
        let found = seller::find_by_account(&self.db, account).await?;
        Ok(found.map(account_of))
    }

    async fn create(
        &self,
        account: &str,
        brand_name: &str,
        password_hash: String,
        password_algorithm: &str,
    ) -> Result<SellerAccount, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        if seller::find_by_account(&txn, account).await?.is_some() {
            txn.rollback().await.map_err(repo_err)?;
            return Err(AuthError::Conflict);
        }
        let created = match seller::create(&txn, account, brand_name).await {
            Ok(m) => m,
            Err(e) => {
                txn.rollback().await.map_err(repo_err)?;
                return Err(match e {
                    // lost a race against a concurrent signup
                    ModelError::Db(msg) if msg.contains("duplicate key") => AuthError::Conflict,
                    other => other.into(),
                });
            }
        };
        if let Err(e) = seller_credentials::upsert_password(&txn, created.id, password_hash, password_algorithm).await {
            txn.rollback().await.map_err(repo_err)?;
            return Err(e.into());
        }
        txn.commit().await.map_err(repo_err)?;
        Ok(account_of(created))
    }

    async fn get_credentials(&self, seller_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let found = seller_credentials::Entity::find_by_id(seller_id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(found.map(|c| Credentials {
            seller_id: c.seller_id,
            password_hash: c.password_hash,
            password_algorithm: c.password_algorithm,
        }))
    }
}
