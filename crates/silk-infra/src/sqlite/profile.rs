//! SQLite customer-profile store implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use silk_core::chat::store::ProfileStore;
use silk_types::error::RepositoryError;
use silk_types::profile::CustomerProfile;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileStore`.
///
/// `existing_products` is stored as a JSON array in a TEXT column.
pub struct SqliteProfileStore {
    pool: DatabasePool,
}

impl SqliteProfileStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ProfileRow {
    user_id: String,
    full_name: String,
    email: String,
    existing_products: String,
    loyalty_years: i64,
    credit_score: i64,
    created_at: String,
}

impl ProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            existing_products: row.try_get("existing_products")?,
            loyalty_years: row.try_get("loyalty_years")?,
            credit_score: row.try_get("credit_score")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_profile(self) -> Result<CustomerProfile, RepositoryError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let existing_products: Vec<String> = serde_json::from_str(&self.existing_products)
            .map_err(|e| RepositoryError::Query(format!("invalid existing_products: {e}")))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepositoryError::Query(format!("invalid timestamp: {e}")))?;

        Ok(CustomerProfile {
            user_id,
            full_name: self.full_name,
            email: self.email,
            existing_products,
            loyalty_years: self.loyalty_years as u32,
            credit_score: self.credit_score as u32,
            created_at,
        })
    }
}

impl ProfileStore for SqliteProfileStore {
    async fn get_profile(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<CustomerProfile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM customer_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| {
            ProfileRow::from_row(&r)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_profile()
        })
        .transpose()
    }

    async fn save_profile(&self, profile: &CustomerProfile) -> Result<(), RepositoryError> {
        let existing_products = serde_json::to_string(&profile.existing_products)
            .map_err(|e| RepositoryError::Query(format!("serialize existing_products: {e}")))?;

        sqlx::query(
            "INSERT OR REPLACE INTO customer_profiles
             (user_id, full_name, email, existing_products, loyalty_years, credit_score, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(profile.user_id.to_string())
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(existing_products)
        .bind(profile.loyalty_years as i64)
        .bind(profile.credit_score as i64)
        .bind(profile.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, SqliteProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteProfileStore::new(pool))
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let (_dir, store) = test_store().await;
        let found = store.get_profile(&Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_save_and_get_profile() {
        let (_dir, store) = test_store().await;
        let user_id = Uuid::now_v7();
        let profile = CustomerProfile::with_defaults(user_id, "asha@example.com");

        store.save_profile(&profile).await.unwrap();
        let fetched = store.get_profile(&user_id).await.unwrap().unwrap();

        assert_eq!(fetched.full_name, "asha");
        assert_eq!(fetched.email, "asha@example.com");
        assert_eq!(fetched.existing_products, vec!["Savings Account".to_string()]);
        assert_eq!(fetched.credit_score, 720);
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let (_dir, store) = test_store().await;
        let user_id = Uuid::now_v7();
        let mut profile = CustomerProfile::with_defaults(user_id, "asha@example.com");

        store.save_profile(&profile).await.unwrap();
        profile.credit_score = 780;
        store.save_profile(&profile).await.unwrap();

        let fetched = store.get_profile(&user_id).await.unwrap().unwrap();
        assert_eq!(fetched.credit_score, 780);
    }
}
