use sqlx::PgPool;
use uuid::Uuid;

use crate::models::movie::Movie;
use crate::store::like_pattern;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct MovieStore {
    pool: PgPool,
}

impl MovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<Movie>, AppError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE is_active ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    /// Case-insensitive substring match on title or genre, active movies only.
    pub async fn search_active(&self, query: &str) -> Result<Vec<Movie>, AppError> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies \
             WHERE is_active AND (title ILIKE $1 OR genre ILIKE $1) \
             ORDER BY created_at DESC",
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Movie>, AppError> {
        let movie = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(movie)
    }

    pub async fn insert(&self, movie: &Movie) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO movies
                (id, title, description, rating, image, genre, "cast", director,
                 duration, language, release_date, ticket_price, showtimes,
                 is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(&movie.rating)
        .bind(&movie.image)
        .bind(&movie.genre)
        .bind(&movie.cast)
        .bind(&movie.director)
        .bind(&movie.duration)
        .bind(&movie.language)
        .bind(movie.release_date)
        .bind(movie.ticket_price)
        .bind(&movie.showtimes)
        .bind(movie.is_active)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn update(&self, movie: &Movie) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE movies SET
                title = $2, description = $3, rating = $4, image = $5,
                genre = $6, "cast" = $7, director = $8, duration = $9,
                language = $10, release_date = $11, ticket_price = $12,
                showtimes = $13, is_active = $14, updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(&movie.rating)
        .bind(&movie.image)
        .bind(&movie.genre)
        .bind(&movie.cast)
        .bind(&movie.director)
        .bind(&movie.duration)
        .bind(&movie.language)
        .bind(movie.release_date)
        .bind(movie.ticket_price)
        .bind(&movie.showtimes)
        .bind(movie.is_active)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Soft-delete: flips the active flag, never removes the row. Returns
    /// false when no such movie exists.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE movies SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
