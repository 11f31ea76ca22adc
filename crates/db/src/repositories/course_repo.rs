//! Repository for the `courses` and `course_rounds` tables.
//!
//! Public catalog queries join the owner row and require both the
//! published flag and a current trainer role, so a published course whose
//! owner was demoted disappears from listings and direct views alike.

use pawclass_core::roles::ROLE_TRAINER;
use pawclass_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseRound, CreateCourse, RoundInput, UpdateCourse};

/// Column list for courses queries.
const COURSE_COLUMNS: &str = "id, trainer_id, title, description, duration_hr, \
    price, deposit_price, cover_image, location, max_dogs, benefits, \
    is_published, created_at, updated_at";

/// Column list for course_rounds queries.
const ROUND_COLUMNS: &str = "id, course_id, days, start_time, end_time";

/// Provides CRUD operations for courses and their rounds.
pub struct CourseRepo;

impl CourseRepo {
    /// List publicly visible courses, newest first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT c.* FROM courses c
             INNER JOIN users u ON u.id = c.trainer_id
             WHERE c.is_published = TRUE AND u.role = $1
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(ROLE_TRAINER)
        .fetch_all(pool)
        .await
    }

    /// Find a publicly visible course by ID.
    pub async fn find_published(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            "SELECT c.* FROM courses c
             INNER JOIN users u ON u.id = c.trainer_id
             WHERE c.id = $1 AND c.is_published = TRUE AND u.role = $2",
        )
        .bind(id)
        .bind(ROLE_TRAINER)
        .fetch_optional(pool)
        .await
    }

    /// Find a course by ID with no visibility scoping.
    ///
    /// Used where ownership must be established before the visibility rule
    /// is applied (the self-booking check).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a trainer's own courses, newest first.
    pub async fn list_for_trainer(
        pool: &PgPool,
        trainer_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE trainer_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(trainer_id)
            .fetch_all(pool)
            .await
    }

    /// Find a course by ID scoped to its owning trainer.
    ///
    /// A miss covers both "does not exist" and "not yours".
    pub async fn find_for_trainer(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND trainer_id = $2");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(trainer_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a course together with its initial rounds, atomically.
    ///
    /// Round inputs must already be validated and normalized by the caller.
    pub async fn create_with_rounds(
        pool: &PgPool,
        trainer_id: DbId,
        input: &CreateCourse,
        rounds: &[RoundInput],
    ) -> Result<Course, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO courses
                (trainer_id, title, description, duration_hr, price, deposit_price,
                 location, max_dogs, benefits, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COURSE_COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(trainer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_hr)
            .bind(input.price)
            .bind(input.deposit_price)
            .bind(&input.location)
            .bind(input.max_dogs)
            .bind(&input.benefits)
            .bind(input.is_published)
            .fetch_one(&mut *tx)
            .await?;

        for round in rounds {
            insert_round(&mut tx, course.id, round).await?;
        }

        tx.commit().await?;
        Ok(course)
    }

    /// Update a course and, when a replace-set is supplied, diff-and-apply
    /// its rounds -- all inside one transaction.
    ///
    /// Submitted rounds with an id update the stored row; rounds without an
    /// id are inserted; stored rounds whose id was not resubmitted are
    /// deleted. Returns `None` when the course does not exist or is not
    /// owned by `trainer_id`.
    pub async fn update_with_rounds(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
        input: &UpdateCourse,
        rounds: Option<&[RoundInput]>,
    ) -> Result<Option<Course>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE courses SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                duration_hr = COALESCE($3, duration_hr),
                price = COALESCE($4, price),
                deposit_price = COALESCE($5, deposit_price),
                location = COALESCE($6, location),
                max_dogs = COALESCE($7, max_dogs),
                benefits = COALESCE($8, benefits),
                is_published = COALESCE($9, is_published),
                updated_at = NOW()
             WHERE id = $10 AND trainer_id = $11
             RETURNING {COURSE_COLUMNS}"
        );
        let Some(course) = sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_hr)
            .bind(input.price)
            .bind(input.deposit_price)
            .bind(&input.location)
            .bind(input.max_dogs)
            .bind(&input.benefits)
            .bind(input.is_published)
            .bind(id)
            .bind(trainer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(submitted) = rounds {
            let stored_ids: Vec<DbId> =
                sqlx::query_scalar("SELECT id FROM course_rounds WHERE course_id = $1")
                    .bind(course.id)
                    .fetch_all(&mut *tx)
                    .await?;

            let submitted_ids: Vec<DbId> = submitted.iter().filter_map(|r| r.id).collect();

            // Stored rounds that were not resubmitted are removed.
            for stale in stored_ids.iter().filter(|id| !submitted_ids.contains(id)) {
                sqlx::query("DELETE FROM course_rounds WHERE id = $1 AND course_id = $2")
                    .bind(stale)
                    .bind(course.id)
                    .execute(&mut *tx)
                    .await?;
            }

            for round in submitted {
                match round.id {
                    Some(round_id) => {
                        sqlx::query(
                            "UPDATE course_rounds
                             SET days = $1, start_time = $2, end_time = $3
                             WHERE id = $4 AND course_id = $5",
                        )
                        .bind(&round.days)
                        .bind(round.start_time)
                        .bind(round.end_time)
                        .bind(round_id)
                        .bind(course.id)
                        .execute(&mut *tx)
                        .await?;
                    }
                    None => insert_round(&mut tx, course.id, round).await?,
                }
            }
        }

        tx.commit().await?;
        Ok(Some(course))
    }

    /// Delete a course owned by `trainer_id`; rounds and bookings cascade.
    pub async fn delete(pool: &PgPool, id: DbId, trainer_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND trainer_id = $2")
            .bind(id)
            .bind(trainer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle the published flag on a course owned by `trainer_id`.
    pub async fn set_published(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
        published: bool,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET is_published = $1, updated_at = NOW()
             WHERE id = $2 AND trainer_id = $3
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(published)
            .bind(id)
            .bind(trainer_id)
            .fetch_optional(pool)
            .await
    }

    /// Store the cover image reference on a course owned by `trainer_id`.
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
        path: &str,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET cover_image = $1, updated_at = NOW()
             WHERE id = $2 AND trainer_id = $3
             RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(path)
            .bind(id)
            .bind(trainer_id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's rounds in id order.
    pub async fn rounds_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseRound>, sqlx::Error> {
        let query =
            format!("SELECT {ROUND_COLUMNS} FROM course_rounds WHERE course_id = $1 ORDER BY id");
        sqlx::query_as::<_, CourseRound>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find a round scoped to its parent course.
    pub async fn find_round(
        pool: &PgPool,
        round_id: DbId,
        course_id: DbId,
    ) -> Result<Option<CourseRound>, sqlx::Error> {
        let query =
            format!("SELECT {ROUND_COLUMNS} FROM course_rounds WHERE id = $1 AND course_id = $2");
        sqlx::query_as::<_, CourseRound>(&query)
            .bind(round_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }
}

async fn insert_round(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    course_id: DbId,
    round: &RoundInput,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO course_rounds (course_id, days, start_time, end_time)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(course_id)
    .bind(&round.days)
    .bind(round.start_time)
    .bind(round.end_time)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
