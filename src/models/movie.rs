use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Price applied when a movie record carries no ticket price of its own.
pub fn default_ticket_price() -> Decimal {
    Decimal::from(12)
}

pub fn default_showtimes() -> Vec<String> {
    vec![
        "12:00 PM".to_string(),
        "3:00 PM".to_string(),
        "7:00 PM".to_string(),
        "10:00 PM".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub rating: String,
    pub image: String,
    pub genre: String,
    pub cast: String,
    pub director: String,
    pub duration: String,
    pub language: String,
    pub release_date: Option<DateTime<Utc>>,
    pub ticket_price: Decimal,
    pub showtimes: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            genre: self.genre.clone(),
            director: self.director.clone(),
        }
    }
}

/// Subset of movie fields embedded in booking responses for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub genre: String,
    pub director: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub rating: Option<String>,
    pub image: String,
    pub genre: String,
    pub cast: String,
    pub director: String,
    pub duration: String,
    pub language: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub ticket_price: Option<Decimal>,
    pub showtimes: Option<Vec<String>>,
}

impl MovieInput {
    /// Build a fresh movie record, filling unset fields with catalog defaults.
    pub fn into_movie(self) -> Movie {
        let now = Utc::now();
        let showtimes = match self.showtimes {
            Some(times) if !times.is_empty() => times,
            _ => default_showtimes(),
        };
        Movie {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            rating: self.rating.unwrap_or_else(|| "8.0/10".to_string()),
            image: self.image,
            genre: self.genre,
            cast: self.cast,
            director: self.director,
            duration: self.duration,
            language: self.language.unwrap_or_else(|| "English".to_string()),
            release_date: self.release_date,
            ticket_price: self.ticket_price.unwrap_or_else(default_ticket_price),
            showtimes,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update payload; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
    pub genre: Option<String>,
    pub cast: Option<String>,
    pub director: Option<String>,
    pub duration: Option<String>,
    pub language: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub ticket_price: Option<Decimal>,
    pub showtimes: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl MovieUpdateInput {
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(description) = self.description {
            movie.description = description;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(image) = self.image {
            movie.image = image;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if let Some(cast) = self.cast {
            movie.cast = cast;
        }
        if let Some(director) = self.director {
            movie.director = director;
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
        if let Some(language) = self.language {
            movie.language = language;
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = Some(release_date);
        }
        if let Some(ticket_price) = self.ticket_price {
            movie.ticket_price = ticket_price;
        }
        if let Some(showtimes) = self.showtimes {
            movie.showtimes = showtimes;
        }
        if let Some(is_active) = self.is_active {
            movie.is_active = is_active;
        }
        movie.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> MovieInput {
        MovieInput {
            title: "Dune".to_string(),
            description: "Spice and sand".to_string(),
            rating: None,
            image: "dune.jpg".to_string(),
            genre: "Sci-Fi".to_string(),
            cast: "Timothee Chalamet".to_string(),
            director: "Denis Villeneuve".to_string(),
            duration: "2h 35m".to_string(),
            language: None,
            release_date: None,
            ticket_price: None,
            showtimes: None,
        }
    }

    #[test]
    fn create_fills_catalog_defaults() {
        let movie = sample_input().into_movie();
        assert_eq!(movie.rating, "8.0/10");
        assert_eq!(movie.language, "English");
        assert_eq!(movie.ticket_price, default_ticket_price());
        assert_eq!(movie.showtimes, default_showtimes());
        assert!(movie.is_active);
    }

    #[test]
    fn empty_showtime_list_is_replaced_with_defaults() {
        let mut input = sample_input();
        input.showtimes = Some(vec![]);
        assert_eq!(input.into_movie().showtimes, default_showtimes());

        let mut input = sample_input();
        input.showtimes = Some(vec!["9:00 PM".to_string()]);
        assert_eq!(input.into_movie().showtimes, vec!["9:00 PM".to_string()]);
    }

    #[test]
    fn partial_update_keeps_unset_fields() {
        let mut movie = sample_input().into_movie();
        let update = MovieUpdateInput {
            title: None,
            description: None,
            rating: None,
            image: None,
            genre: Some("Adventure".to_string()),
            cast: None,
            director: None,
            duration: None,
            language: None,
            release_date: None,
            ticket_price: Some(Decimal::from(15)),
            showtimes: None,
            is_active: None,
        };
        update.apply_to(&mut movie);
        assert_eq!(movie.genre, "Adventure");
        assert_eq!(movie.ticket_price, Decimal::from(15));
        assert_eq!(movie.title, "Dune");
        assert!(movie.is_active);
    }
}
