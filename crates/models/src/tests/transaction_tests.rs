use sea_orm::{ActiveModelTrait, EntityTrait, TransactionTrait};
use uuid::Uuid;

use super::crud_tests::sample_product;
use super::setup_test_db;
use crate::{product, seller};

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let account = format!("tx_{}", &Uuid::new_v4().simple().to_string()[..12]);
    let s = seller::create(&db, &account, "Tx Brand").await?;

    let txn = db.begin().await?;
    let p = sample_product(s.id).insert(&txn).await?;
    txn.commit().await?;

    assert!(product::Entity::find_by_id(p.id).one(&db).await?.is_some());

    seller::Entity::delete_by_id(s.id).exec(&db).await?;
    Ok(())
}

/// Test transaction rollback leaves no partial write
#[tokio::test]
async fn test_transaction_rollback() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let account = format!("tx_{}", &Uuid::new_v4().simple().to_string()[..12]);
    let s = seller::create(&db, &account, "Tx Brand").await?;

    let txn = db.begin().await?;
    let p = sample_product(s.id).insert(&txn).await?;
    txn.rollback().await?;

    assert!(product::Entity::find_by_id(p.id).one(&db).await?.is_none());

    seller::Entity::delete_by_id(s.id).exec(&db).await?;
    Ok(())
}

/// Dropping a transaction without commit behaves like rollback
#[tokio::test]
async fn test_transaction_drop_rolls_back() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let account = format!("tx_{}", &Uuid::new_v4().simple().to_string()[..12]);
    let s = seller::create(&db, &account, "Tx Brand").await?;

    let id = {
        let txn = db.begin().await?;
        let p = sample_product(s.id).insert(&txn).await?;
        p.id
    };

    assert!(product::Entity::find_by_id(id).one(&db).await?.is_none());

    seller::Entity::delete_by_id(s.id).exec(&db).await?;
    Ok(())
}
