//! Repository for the `bookings` table.
//!
//! Trainer-side queries join `courses` and scope on `courses.trainer_id`,
//! so "belongs to another trainer" and "does not exist" are the same miss.
//! Status transitions are single optimistic UPDATEs guarded on
//! `status = 'pending'`; the first concurrent caller wins and later ones
//! observe zero affected rows.

use pawclass_core::booking::STATUS_PENDING;
use pawclass_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, CreateBooking};

/// Column list for bookings queries.
const BOOKING_COLUMNS: &str = "id, user_id, course_id, round_id, owner_full_name, \
    owner_nickname, owner_phone, dog_name, dog_count, dog_gender, dog_age_year, \
    dog_breed, message, status, created_at, updated_at";

/// Provides CRUD and workflow operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Create a pending booking for `user_id` against a course.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        round_id: Option<DbId>,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (user_id, course_id, round_id, owner_full_name, owner_nickname,
                 owner_phone, dog_name, dog_count, dog_gender, dog_age_year,
                 dog_breed, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(round_id)
            .bind(&input.owner_full_name)
            .bind(&input.owner_nickname)
            .bind(&input.owner_phone)
            .bind(&input.dog_name)
            .bind(input.dog_count)
            .bind(&input.dog_gender)
            .bind(input.dog_age_year)
            .bind(&input.dog_breed)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List a requester's own bookings, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a booking scoped to its requester.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings against the trainer's courses, newest first, with an
    /// optional status filter.
    pub async fn list_for_trainer(
        pool: &PgPool,
        trainer_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b
             INNER JOIN courses c ON c.id = b.course_id
             WHERE c.trainer_id = $1 AND ($2::TEXT IS NULL OR b.status = $2)
             ORDER BY b.created_at DESC, b.id DESC",
        )
        .bind(trainer_id)
        .bind(status)
        .fetch_all(pool)
        .await
    }

    /// Find a booking scoped to the owning trainer of its course.
    pub async fn find_for_trainer(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT b.* FROM bookings b
             INNER JOIN courses c ON c.id = b.course_id
             WHERE b.id = $1 AND c.trainer_id = $2",
        )
        .bind(id)
        .bind(trainer_id)
        .fetch_optional(pool)
        .await
    }

    /// Transition a booking out of pending.
    ///
    /// Returns `None` when the booking was no longer pending (or does not
    /// exist) -- the caller reports the state conflict.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $1, updated_at = NOW()
             WHERE id = $2 AND status = $3
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(new_status)
            .bind(id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Transition a requester's own pending booking (the cancel path).
    pub async fn transition_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        new_status: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3 AND status = $4
             RETURNING {BOOKING_COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(new_status)
            .bind(id)
            .bind(user_id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Remove a booking against one of the trainer's courses, any status.
    pub async fn delete_for_trainer(
        pool: &PgPool,
        id: DbId,
        trainer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM bookings b
             USING courses c
             WHERE b.id = $1 AND b.course_id = c.id AND c.trainer_id = $2",
        )
        .bind(id)
        .bind(trainer_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
