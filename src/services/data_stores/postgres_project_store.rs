use color_eyre::eyre::eyre;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationId, ApplicationRecord, ApplicationStatus,
    ProfileId, Project, ProjectId, ProjectRecord, ProjectStore,
    ProjectStoreError, Role, RoleId, RoleRecord,
};

const PROJECT_COLUMNS: &str =
    "project_id, owner_id, title, project_type, city, status, created_at";

const ROLE_COLUMNS: &str = r#"
    role_id, project_id, category, title, description, status,
    assigned_profile_id, age_min, age_max, gender, experience_level,
    height_min, height_max, hair_color, eye_color, equipment, software,
    is_paid, remuneration_amount, is_boosted, boost_expires_at,
    is_category_admin, created_at
"#;

const APPLICATION_COLUMNS: &str =
    "application_id, role_id, candidate_id, status, message, created_at";

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected(e: impl Into<color_eyre::eyre::Report>) -> ProjectStoreError {
    ProjectStoreError::UnexpectedError(e.into())
}

fn into_role(record: RoleRecord) -> Result<Role, ProjectStoreError> {
    Role::try_from(record).map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
}

fn into_application(
    record: ApplicationRecord,
) -> Result<Application, ProjectStoreError> {
    Application::try_from(record)
        .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
}

/// Overwrites the role row, but only if its status and assignee are still
/// the ones `previous` was read with.
async fn write_role<'e>(
    executor: impl PgExecutor<'e>,
    previous: &Role,
    updated: &Role,
) -> Result<(), ProjectStoreError> {
    let row = RoleRecord::from(updated);
    let result = sqlx::query(
        r#"
        UPDATE project_roles SET
            title = $2, description = $3, status = $4,
            assigned_profile_id = $5, age_min = $6, age_max = $7,
            gender = $8, experience_level = $9, height_min = $10,
            height_max = $11, hair_color = $12, eye_color = $13,
            equipment = $14, software = $15, is_paid = $16,
            remuneration_amount = $17, is_boosted = $18,
            boost_expires_at = $19, is_category_admin = $20
        WHERE role_id = $1
            AND status = $21
            AND assigned_profile_id IS NOT DISTINCT FROM $22
        "#,
    )
    .bind(row.role_id)
    .bind(row.title)
    .bind(row.description)
    .bind(row.status)
    .bind(row.assigned_profile_id)
    .bind(row.age_min)
    .bind(row.age_max)
    .bind(row.gender)
    .bind(row.experience_level)
    .bind(row.height_min)
    .bind(row.height_max)
    .bind(row.hair_color)
    .bind(row.eye_color)
    .bind(row.equipment)
    .bind(row.software)
    .bind(row.is_paid)
    .bind(row.remuneration_amount)
    .bind(row.is_boosted)
    .bind(row.boost_expires_at)
    .bind(row.is_category_admin)
    .bind(previous.status().as_str())
    .bind(previous.assigned_profile_id().map(|id| *id.as_ref()))
    .execute(executor)
    .await
    .map_err(unexpected)?;

    if result.rows_affected() == 0 {
        return Err(ProjectStoreError::NoRowsAffected);
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        project: &Project,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(
            r#"
            INSERT INTO tournages
                (project_id, owner_id, title, project_type, city, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(project.id.as_ref())
        .bind(project.owner_id.as_ref())
        .bind(project.title.as_ref())
        .bind(&project.project_type)
        .bind(&project.city)
        .bind(project.status.as_str())
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::ProjectIDExists
            }
            err => unexpected(err),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting project from PostgreSQL", skip_all)]
    async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Project, ProjectStoreError> {
        let record = sqlx::query_as::<_, ProjectRecord>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM tournages WHERE project_id = $1"
        ))
        .bind(project_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ProjectIDNotFound,
            err => unexpected(err),
        })?;

        Project::try_from(record)
            .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(
        name = "Getting project list from PostgreSQL",
        skip_all
    )]
    async fn get_project_list(
        &self,
        owner_id: &ProfileId,
    ) -> Result<Vec<Project>, ProjectStoreError> {
        let records = sqlx::query_as::<_, ProjectRecord>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM tournages
             WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records
            .into_iter()
            .map(|record| {
                Project::try_from(record)
                    .map_err(|e| ProjectStoreError::UnexpectedError(eyre!(e)))
            })
            .collect()
    }

    #[tracing::instrument(name = "Adding role to PostgreSQL", skip_all)]
    async fn add_role(&mut self, role: &Role) -> Result<(), ProjectStoreError> {
        let row = RoleRecord::from(role);
        sqlx::query(&format!(
            "INSERT INTO project_roles ({ROLE_COLUMNS}) VALUES
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
              $15, $16, $17, $18, $19, $20, $21, $22, $23)"
        ))
        .bind(row.role_id)
        .bind(row.project_id)
        .bind(row.category)
        .bind(row.title)
        .bind(row.description)
        .bind(row.status)
        .bind(row.assigned_profile_id)
        .bind(row.age_min)
        .bind(row.age_max)
        .bind(row.gender)
        .bind(row.experience_level)
        .bind(row.height_min)
        .bind(row.height_max)
        .bind(row.hair_color)
        .bind(row.eye_color)
        .bind(row.equipment)
        .bind(row.software)
        .bind(row.is_paid)
        .bind(row.remuneration_amount)
        .bind(row.is_boosted)
        .bind(row.boost_expires_at)
        .bind(row.is_category_admin)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::RoleIDExists
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::ProjectIDNotFound
            }
            err => unexpected(err),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting role from PostgreSQL", skip_all)]
    async fn get_role(&self, role_id: &RoleId) -> Result<Role, ProjectStoreError> {
        let record = sqlx::query_as::<_, RoleRecord>(&format!(
            "SELECT {ROLE_COLUMNS} FROM project_roles WHERE role_id = $1"
        ))
        .bind(role_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::RoleIDNotFound,
            err => unexpected(err),
        })?;
        into_role(record)
    }

    #[tracing::instrument(name = "Getting roles from PostgreSQL", skip_all)]
    async fn get_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Role>, ProjectStoreError> {
        self.get_project(project_id).await?;

        let records = sqlx::query_as::<_, RoleRecord>(&format!(
            "SELECT {ROLE_COLUMNS} FROM project_roles
             WHERE project_id = $1 ORDER BY created_at"
        ))
        .bind(project_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(into_role).collect()
    }

    #[tracing::instrument(name = "Updating role in PostgreSQL", skip_all)]
    async fn update_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError> {
        write_role(&self.pool, previous, updated).await
    }

    #[tracing::instrument(name = "Deleting role from PostgreSQL", skip_all)]
    async fn delete_role(&mut self, role_id: &RoleId) -> Result<(), ProjectStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("DELETE FROM applications WHERE role_id = $1")
            .bind(role_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let result = sqlx::query("DELETE FROM project_roles WHERE role_id = $1")
            .bind(role_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::RoleIDNotFound);
        }

        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Releasing role in PostgreSQL", skip_all)]
    async fn release_role(
        &mut self,
        previous: &Role,
        updated: &Role,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        write_role(&mut *tx, previous, updated).await?;
        sqlx::query(
            "DELETE FROM applications WHERE role_id = $1 AND status = $2",
        )
        .bind(updated.id.as_ref())
        .bind(ApplicationStatus::Accepted.as_str())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Adding application to PostgreSQL", skip_all)]
    async fn add_application(
        &mut self,
        application: &Application,
    ) -> Result<(), ProjectStoreError> {
        sqlx::query(&format!(
            "INSERT INTO applications ({APPLICATION_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(application.id.as_ref())
        .bind(application.role_id.as_ref())
        .bind(application.candidate_id.as_ref())
        .bind(application.status.as_str())
        .bind(application.message.as_ref().map(|m| m.as_ref().to_owned()))
        .bind(application.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ProjectStoreError::DuplicateApplication
            }
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                ProjectStoreError::RoleIDNotFound
            }
            err => unexpected(err),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting application from PostgreSQL", skip_all)]
    async fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, ProjectStoreError> {
        let record = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE application_id = $1"
        ))
        .bind(application_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ApplicationIDNotFound,
            err => unexpected(err),
        })?;
        into_application(record)
    }

    #[tracing::instrument(name = "Finding application in PostgreSQL", skip_all)]
    async fn find_application(
        &self,
        role_id: &RoleId,
        candidate_id: &ProfileId,
    ) -> Result<Application, ProjectStoreError> {
        let record = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE role_id = $1 AND candidate_id = $2"
        ))
        .bind(role_id.as_ref())
        .bind(candidate_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ProjectStoreError::ApplicationIDNotFound,
            err => unexpected(err),
        })?;
        into_application(record)
    }

    #[tracing::instrument(
        name = "Getting role applications from PostgreSQL",
        skip_all
    )]
    async fn get_applications_for_role(
        &self,
        role_id: &RoleId,
    ) -> Result<Vec<Application>, ProjectStoreError> {
        let records = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE role_id = $1 ORDER BY created_at"
        ))
        .bind(role_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(into_application).collect()
    }

    #[tracing::instrument(
        name = "Getting candidate applications from PostgreSQL",
        skip_all
    )]
    async fn get_applications_for_candidate(
        &self,
        candidate_id: &ProfileId,
    ) -> Result<Vec<Application>, ProjectStoreError> {
        let records = sqlx::query_as::<_, ApplicationRecord>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE candidate_id = $1 ORDER BY created_at"
        ))
        .bind(candidate_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(into_application).collect()
    }

    #[tracing::instrument(
        name = "Setting application status in PostgreSQL",
        skip_all
    )]
    async fn set_application_status(
        &mut self,
        application_id: &ApplicationId,
        previous: ApplicationStatus,
        status: ApplicationStatus,
    ) -> Result<(), ProjectStoreError> {
        let result = sqlx::query(
            "UPDATE applications SET status = $2
             WHERE application_id = $1 AND status = $3",
        )
        .bind(application_id.as_ref())
        .bind(status.as_str())
        .bind(previous.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            // Distinguish a missing application from a stale status.
            self.get_application(application_id).await?;
            return Err(ProjectStoreError::NoRowsAffected);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting application from PostgreSQL", skip_all)]
    async fn delete_application(
        &mut self,
        application_id: &ApplicationId,
    ) -> Result<(), ProjectStoreError> {
        let result =
            sqlx::query("DELETE FROM applications WHERE application_id = $1")
                .bind(application_id.as_ref())
                .execute(&self.pool)
                .await
                .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(ProjectStoreError::ApplicationIDNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Accepting application in PostgreSQL", skip_all)]
    async fn accept_application(
        &mut self,
        application: &Application,
        previous_role: &Role,
        updated_role: &Role,
    ) -> Result<(), ProjectStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let accepted = sqlx::query(
            "UPDATE applications SET status = $2
             WHERE application_id = $1 AND status = $3",
        )
        .bind(application.id.as_ref())
        .bind(ApplicationStatus::Accepted.as_str())
        .bind(ApplicationStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;
        if accepted.rows_affected() == 0 {
            return Err(ProjectStoreError::NoRowsAffected);
        }

        let role_id: &Uuid = application.role_id.as_ref();
        sqlx::query(
            "UPDATE applications SET status = $2
             WHERE role_id = $1 AND application_id <> $3 AND status = $4",
        )
        .bind(role_id)
        .bind(ApplicationStatus::Rejected.as_str())
        .bind(application.id.as_ref())
        .bind(ApplicationStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        write_role(&mut *tx, previous_role, updated_role).await?;

        // Dropping `tx` on any early return above rolls everything back.
        tx.commit().await.map_err(unexpected)
    }
}
