use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingDetail};
use crate::models::movie::MovieSummary;
use crate::models::user::UserSummary;
use crate::utils::error::AppError;

const DETAIL_SELECT: &str = r#"
    SELECT b.*,
           m.title    AS summary_title,
           m.image    AS summary_image,
           m.genre    AS summary_genre,
           m.director AS summary_director,
           u.name     AS owner_name,
           u.email    AS owner_email,
           u.phone    AS owner_phone
    FROM bookings b
    JOIN movies m ON m.id = b.movie_id
    JOIN users  u ON u.id = b.user_id
"#;

/// A booking row joined with the movie and owner columns used for display.
#[derive(Debug, FromRow)]
pub struct BookingDetailRow {
    #[sqlx(flatten)]
    pub booking: Booking,
    pub summary_title: String,
    pub summary_image: String,
    pub summary_genre: String,
    pub summary_director: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: Option<String>,
}

impl BookingDetailRow {
    /// Admin views and single-booking fetches embed the owning user; the
    /// self-service list embeds the movie only.
    pub fn into_detail(self, include_user: bool) -> BookingDetail {
        let movie = MovieSummary {
            id: self.booking.movie_id,
            title: self.summary_title,
            image: self.summary_image,
            genre: self.summary_genre,
            director: self.summary_director,
        };
        let user = include_user.then(|| UserSummary {
            id: self.booking.user_id,
            name: self.owner_name,
            email: self.owner_email,
            phone: self.owner_phone,
        });
        BookingDetail {
            booking: self.booking,
            movie,
            user,
        }
    }
}

#[derive(Clone)]
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, booking: &Booking) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, user_id, movie_id, movie_title, user_name, user_email,
                 user_phone, show_date, show_time, number_of_tickets,
                 ticket_price, total_amount, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.movie_id)
        .bind(&booking.movie_title)
        .bind(&booking.user_name)
        .bind(&booking.user_email)
        .bind(&booking.user_phone)
        .bind(booking.show_date)
        .bind(&booking.show_time)
        .bind(booking.number_of_tickets)
        .bind(booking.ticket_price)
        .bind(booking.total_amount)
        .bind(booking.status)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    pub async fn find_detailed(&self, id: Uuid) -> Result<Option<BookingDetailRow>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_all_detailed(&self) -> Result<Vec<BookingDetailRow>, AppError> {
        let sql = format!("{DETAIL_SELECT} ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_for_user_detailed(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingDetailRow>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE b.user_id = $1 ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Full set for the statistics overview; aggregation happens in process.
    pub async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>("SELECT * FROM bookings")
            .fetch_all(&self.pool)
            .await?;
        Ok(bookings)
    }

    /// Persist the mutable parts of a booking, re-deriving the total first
    /// so the amount invariant holds on every write path.
    pub async fn update(&self, booking: &mut Booking) -> Result<(), AppError> {
        booking.recompute_total();
        sqlx::query(
            "UPDATE bookings SET status = $2, number_of_tickets = $3, \
             total_amount = $4, updated_at = $5 WHERE id = $1",
        )
        .bind(booking.id)
        .bind(booking.status)
        .bind(booking.number_of_tickets)
        .bind(booking.total_amount)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
