//! Repository for the `trainer_applications` and `trainer_certificates`
//! tables.
//!
//! The review transition is a single UPDATE guarded on `status = 'pending'`
//! that sets the status and the reviewer fields together, so a decision and
//! its audit trail can never diverge.

use pawclass_core::application::STATUS_PENDING;
use pawclass_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{CreateApplication, TrainerApplication, TrainerCertificate};

/// Column list for trainer_applications queries.
const APPLICATION_COLUMNS: &str = "id, user_id, full_name, age, gender, phone, \
    email_snapshot, intro, portfolio_link, status, reviewed_by, reviewed_at, created_at";

/// Column list for trainer_certificates queries.
const CERTIFICATE_COLUMNS: &str = "id, application_id, file, uploaded_at";

/// Provides CRUD and workflow operations for trainer applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Create a pending application; reviewer fields stay unset.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateApplication,
        email_snapshot: &str,
    ) -> Result<TrainerApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainer_applications
                (user_id, full_name, age, gender, phone, email_snapshot,
                 intro, portfolio_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(input.age)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(email_snapshot)
            .bind(&input.intro)
            .bind(&input.portfolio_link)
            .fetch_one(pool)
            .await
    }

    /// Find an application by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainerApplication>, sqlx::Error> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM trainer_applications WHERE id = $1");
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The applicant's most recent application, if any.
    pub async fn latest_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<TrainerApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM trainer_applications
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all applications, newest first, with an optional status filter.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<TrainerApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM trainer_applications
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Transition a pending application to a decision, recording the
    /// reviewer and review time atomically with the status change.
    ///
    /// Returns `None` when the application was no longer pending (or does
    /// not exist) -- the caller resolves whether that is an idempotent
    /// repeat or a state conflict.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        decision: &str,
        reviewer_id: DbId,
    ) -> Result<Option<TrainerApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE trainer_applications
             SET status = $1, reviewed_by = $2, reviewed_at = NOW()
             WHERE id = $3 AND status = $4
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(decision)
            .bind(reviewer_id)
            .bind(id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Refresh the reviewer fields on an application already in `decision`
    /// state (bulk re-review path; no status change).
    pub async fn refresh_review(
        pool: &PgPool,
        id: DbId,
        decision: &str,
        reviewer_id: DbId,
    ) -> Result<Option<TrainerApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE trainer_applications
             SET reviewed_by = $1, reviewed_at = NOW()
             WHERE id = $2 AND status = $3
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, TrainerApplication>(&query)
            .bind(reviewer_id)
            .bind(id)
            .bind(decision)
            .fetch_optional(pool)
            .await
    }

    /// Attach one certificate file to an application.
    pub async fn attach_certificate(
        pool: &PgPool,
        application_id: DbId,
        file: &str,
    ) -> Result<TrainerCertificate, sqlx::Error> {
        let query = format!(
            "INSERT INTO trainer_certificates (application_id, file)
             VALUES ($1, $2)
             RETURNING {CERTIFICATE_COLUMNS}"
        );
        sqlx::query_as::<_, TrainerCertificate>(&query)
            .bind(application_id)
            .bind(file)
            .fetch_one(pool)
            .await
    }

    /// List an application's certificates, newest first.
    pub async fn certificates_for(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<TrainerCertificate>, sqlx::Error> {
        let query = format!(
            "SELECT {CERTIFICATE_COLUMNS} FROM trainer_certificates
             WHERE application_id = $1
             ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, TrainerCertificate>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }
}
