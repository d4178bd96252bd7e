use crate::core::reconcile::ReconcileStore;
use crate::models::{Application, Campaign, InfluencerProfile};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the marketplace database
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL client for marketplace records.
///
/// Owns campaigns, influencer profiles, and applications. The campaign
/// and application status updates are single conditional statements so
/// concurrent payment confirmations race safely at the database.
pub struct MarketplaceStore {
    pool: PgPool,
}

impl MarketplaceStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a single influencer profile
    pub async fn get_influencer(&self, influencer_id: &str) -> Result<InfluencerProfile, StoreError> {
        let query = r#"
            SELECT id, display_name, niches, location, audience_size,
                   engagement_rate, follower_count, is_active, created_at
            FROM influencer_profiles
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(influencer_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| influencer_from_row(&r))
            .ok_or_else(|| StoreError::NotFound(format!("influencer {}", influencer_id)))
    }

    /// Fetch all active influencer profiles as matching candidates
    pub async fn list_active_influencers(&self) -> Result<Vec<InfluencerProfile>, StoreError> {
        let query = r#"
            SELECT id, display_name, niches, location, audience_size,
                   engagement_rate, follower_count, is_active, created_at
            FROM influencer_profiles
            WHERE is_active = TRUE
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let profiles = rows.iter().map(influencer_from_row).collect();

        Ok(profiles)
    }

    /// Fetch a single campaign
    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, StoreError> {
        let query = r#"
            SELECT id, brand_id, title, niches, target_location, budget,
                   status, start_date, end_date, created_at
            FROM campaigns
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(campaign_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| campaign_from_row(&r))
            .ok_or_else(|| StoreError::NotFound(format!("campaign {}", campaign_id)))
    }

    /// Fetch campaigns currently open for matching (scheduled or active)
    pub async fn list_open_campaigns(&self) -> Result<Vec<Campaign>, StoreError> {
        let query = r#"
            SELECT id, brand_id, title, niches, target_location, budget,
                   status, start_date, end_date, created_at
            FROM campaigns
            WHERE status IN ('scheduled', 'active')
            ORDER BY start_date
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        let campaigns = rows.iter().map(campaign_from_row).collect();

        Ok(campaigns)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

impl ReconcileStore for MarketplaceStore {
    type Error = StoreError;

    async fn find_application(
        &self,
        campaign_id: &str,
        influencer_id: &str,
    ) -> Result<Option<Application>, StoreError> {
        let query = r#"
            SELECT id, campaign_id, influencer_id, status, applied_at, paid_at
            FROM applications
            WHERE campaign_id = $1 AND influencer_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(campaign_id)
            .bind(influencer_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| application_from_row(&r)))
    }

    /// The status predicate keeps the update idempotent and keeps
    /// terminal applications untouched, whatever order confirmations
    /// arrive in.
    async fn mark_application_paid(&self, application_id: &str) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE applications
            SET status = 'approved_and_paid', paid_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'approved')
        "#;

        let result = sqlx::query(query)
            .bind(application_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Marked application {} paid (rows affected: {})",
            application_id,
            result.rows_affected()
        );

        Ok(result.rows_affected() > 0)
    }

    /// Single compare-and-set: two concurrent payment confirmations for
    /// the same campaign see exactly one row affected between them.
    async fn begin_campaign_progress(&self, campaign_id: &str) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE campaigns
            SET status = 'in_progress'
            WHERE id = $1 AND status IN ('scheduled', 'active')
        "#;

        let result = sqlx::query(query)
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn campaign_from_row(row: &PgRow) -> Campaign {
    Campaign {
        id: row.get("id"),
        brand_id: row.get("brand_id"),
        title: row.get("title"),
        niches: row.get("niches"),
        target_location: row.get("target_location"),
        budget: row.get("budget"),
        status: row.get("status"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
    }
}

fn influencer_from_row(row: &PgRow) -> InfluencerProfile {
    InfluencerProfile {
        id: row.get("id"),
        display_name: row.get("display_name"),
        niches: row.get("niches"),
        location: row.get("location"),
        audience_size: row.get("audience_size"),
        engagement_rate: row.get("engagement_rate"),
        follower_count: row.get("follower_count"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}

fn application_from_row(row: &PgRow) -> Application {
    Application {
        id: row.get("id"),
        campaign_id: row.get("campaign_id"),
        influencer_id: row.get("influencer_id"),
        status: row.get("status"),
        applied_at: row.get("applied_at"),
        paid_at: row.get("paid_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::NotFound("campaign cmp_42".to_string());
        assert_eq!(err.to_string(), "Not found: campaign cmp_42");
    }
}
