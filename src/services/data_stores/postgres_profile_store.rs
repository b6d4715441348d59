use color_eyre::eyre::Report;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Connection, ConnectionStatus, Profile, ProfileId, ProfileRecord,
    ProfileStore, ProfileStoreError, RoleCategory,
};

const PROFILE_COLUMNS: &str =
    "profile_id, full_name, username, role, city, avatar_url, bio";

pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected(e: impl Into<Report>) -> ProfileStoreError {
    ProfileStoreError::UnexpectedError(e.into())
}

fn like_pattern(token: &str) -> String {
    let escaped = token
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn uuids(profile_ids: &[ProfileId]) -> Vec<Uuid> {
    profile_ids.iter().map(|id| *id.as_ref()).collect()
}

fn status_str(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Pending => "pending",
        ConnectionStatus::Accepted => "accepted",
    }
}

#[async_trait::async_trait]
impl ProfileStore for PostgresProfileStore {
    #[tracing::instrument(name = "Adding profile to PostgreSQL", skip_all)]
    async fn add_profile(&mut self, profile: &Profile) -> Result<(), ProfileStoreError> {
        sqlx::query(&format!(
            "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(profile.id.as_ref())
        .bind(&profile.full_name)
        .bind(&profile.username)
        .bind(&profile.primary_role)
        .bind(&profile.city)
        .bind(&profile.avatar_url)
        .bind(&profile.bio)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProfileStoreError::ProfileAlreadyExists
            }
            err => unexpected(err),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting profile from PostgreSQL", skip_all)]
    async fn get_profile(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Profile, ProfileStoreError> {
        sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE profile_id = $1"
        ))
        .bind(profile_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map(Profile::from)
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProfileStoreError::ProfileNotFound,
            err => unexpected(err),
        })
    }

    #[tracing::instrument(name = "Getting profiles from PostgreSQL", skip_all)]
    async fn get_profiles(
        &self,
        profile_ids: &[ProfileId],
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        if profile_ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE profile_id = ANY($1)"
        ))
        .bind(uuids(profile_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(Profile::from).collect())
    }

    #[tracing::instrument(name = "Searching profiles in PostgreSQL", skip_all)]
    async fn search_profiles(
        &self,
        token: &str,
        within: &[ProfileId],
        limit: usize,
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        if within.is_empty() {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit).map_err(unexpected)?;

        let records = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles
             WHERE (full_name ILIKE $1 OR username ILIKE $1 OR city ILIKE $1)
               AND profile_id = ANY($2)
             ORDER BY profile_id
             LIMIT $3"
        ))
        .bind(like_pattern(token))
        .bind(uuids(within))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(Profile::from).collect())
    }

    #[tracing::instrument(name = "Getting profiles by category from PostgreSQL", skip_all)]
    async fn get_profiles_in_category(
        &self,
        within: &[ProfileId],
        category: RoleCategory,
    ) -> Result<Vec<Profile>, ProfileStoreError> {
        if within.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles
             WHERE profile_id = ANY($1) AND lower(trim(role)) = $2"
        ))
        .bind(uuids(within))
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(Profile::from).collect())
    }

    #[tracing::instrument(name = "Adding connection to PostgreSQL", skip_all)]
    async fn add_connection(
        &mut self,
        connection: &Connection,
    ) -> Result<(), ProfileStoreError> {
        sqlx::query(
            r#"
            INSERT INTO connections (requester_id, addressee_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (requester_id, addressee_id)
            DO UPDATE SET status = EXCLUDED.status
            "#,
        )
        .bind(connection.requester_id.as_ref())
        .bind(connection.addressee_id.as_ref())
        .bind(status_str(connection.status))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProfileStoreError::ProfileNotFound
            }
            err => unexpected(err),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting connections from PostgreSQL", skip_all)]
    async fn get_connections(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<ProfileId>, ProfileStoreError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT addressee_id FROM connections
            WHERE requester_id = $1 AND status = $2
            UNION
            SELECT requester_id FROM connections
            WHERE addressee_id = $1 AND status = $2
            "#,
        )
        .bind(profile_id.as_ref())
        .bind(status_str(ConnectionStatus::Accepted))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(|(id,)| ProfileId::new(id)).collect())
    }
}
