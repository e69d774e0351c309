//! Customer profile record used for personalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer's profile, fetched (or created with defaults) per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Products the customer already holds with us.
    pub existing_products: Vec<String>,
    pub loyalty_years: u32,
    pub credit_score: u32,
    pub created_at: DateTime<Utc>,
}

impl CustomerProfile {
    /// Default profile for a first-time customer.
    ///
    /// The display name falls back to the email's local part, matching the
    /// onboarding behavior of the insights endpoint.
    pub fn with_defaults(user_id: Uuid, email: &str) -> Self {
        let full_name = email
            .split('@')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("Valued Customer")
            .to_string();

        Self {
            user_id,
            full_name,
            email: email.to_string(),
            existing_products: vec!["Savings Account".to_string()],
            loyalty_years: 1,
            credit_score: 720,
            created_at: Utc::now(),
        }
    }
}
