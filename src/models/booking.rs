use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::movie::{default_ticket_price, Movie, MovieSummary};
use crate::models::user::{User, UserSummary};
use crate::utils::error::AppError;

pub const MIN_TICKETS: i32 = 1;
pub const MAX_TICKETS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub movie_id: Uuid,
    pub movie_title: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub show_date: DateTime<Utc>,
    pub show_time: String,
    pub number_of_tickets: i32,
    pub ticket_price: Decimal,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub movie_id: Uuid,
    pub movie_title: Option<String>,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub show_date: DateTime<Utc>,
    pub show_time: String,
    pub number_of_tickets: i32,
}

pub fn validate_ticket_count(count: i32) -> Result<(), AppError> {
    if !(MIN_TICKETS..=MAX_TICKETS).contains(&count) {
        return Err(AppError::Validation(format!(
            "numberOfTickets must be between {MIN_TICKETS} and {MAX_TICKETS}"
        )));
    }
    Ok(())
}

impl Booking {
    /// Build a confirmed booking for `user` against `movie`, snapshotting the
    /// movie's current ticket price. The snapshot never changes afterwards,
    /// even if the catalog price does.
    pub fn create(user: &User, movie: &Movie, input: BookingInput) -> Result<Self, AppError> {
        validate_ticket_count(input.number_of_tickets)?;

        let ticket_price = if movie.ticket_price > Decimal::ZERO {
            movie.ticket_price
        } else {
            default_ticket_price()
        };
        let now = Utc::now();

        let mut booking = Booking {
            id: Uuid::new_v4(),
            user_id: user.id,
            movie_id: movie.id,
            movie_title: input.movie_title.unwrap_or_else(|| movie.title.clone()),
            user_name: input.user_name,
            user_email: input.user_email,
            user_phone: input.user_phone,
            show_date: input.show_date,
            show_time: input.show_time,
            number_of_tickets: input.number_of_tickets,
            ticket_price,
            total_amount: Decimal::ZERO,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };
        booking.recompute_total();
        Ok(booking)
    }

    /// Re-derive `total_amount` from its factors. Called before every persist
    /// that could have touched either one.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.ticket_price * Decimal::from(self.number_of_tickets);
    }

    pub fn ensure_owned_by(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.user_id != user_id {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }
        Ok(())
    }

    /// Cancellation is only refused for shows already in the past. A booking
    /// that is already cancelled passes this check; re-cancelling is a silent
    /// no-op rather than an error.
    pub fn ensure_cancellable(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.show_date < now {
            return Err(AppError::Domain("Cannot cancel past bookings".to_string()));
        }
        Ok(())
    }
}

/// A booking joined with display summaries of its movie and (for admin
/// views) its owning user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub movie: MovieSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularMovie {
    pub title: String,
    pub bookings: i64,
    pub total_tickets: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    pub total_revenue: Decimal,
    pub popular_movies: Vec<PopularMovie>,
}

impl BookingStats {
    /// Aggregate over the full booking set: status counts, confirmed revenue,
    /// and the five most-booked titles. Titles with equal booking counts keep
    /// their first-encountered order.
    pub fn compute(bookings: &[Booking]) -> Self {
        let mut confirmed = 0_i64;
        let mut cancelled = 0_i64;
        let mut total_revenue = Decimal::ZERO;
        let mut popular: Vec<PopularMovie> = Vec::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();

        for booking in bookings {
            match booking.status {
                BookingStatus::Confirmed => {
                    confirmed += 1;
                    total_revenue += booking.total_amount;

                    let index = *by_title
                        .entry(booking.movie_title.clone())
                        .or_insert_with(|| {
                            popular.push(PopularMovie {
                                title: booking.movie_title.clone(),
                                bookings: 0,
                                total_tickets: 0,
                                revenue: Decimal::ZERO,
                            });
                            popular.len() - 1
                        });
                    let entry = &mut popular[index];
                    entry.bookings += 1;
                    entry.total_tickets += i64::from(booking.number_of_tickets);
                    entry.revenue += booking.total_amount;
                }
                BookingStatus::Cancelled => cancelled += 1,
                BookingStatus::Pending => {}
            }
        }

        // Stable sort keeps grouping order between equal counts.
        popular.sort_by(|a, b| b.bookings.cmp(&a.bookings));
        popular.truncate(5);

        BookingStats {
            total_bookings: bookings.len() as i64,
            confirmed_bookings: confirmed,
            cancelled_bookings: cancelled,
            total_revenue,
            popular_movies: popular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::MovieInput;
    use crate::models::user::Role;
    use chrono::Duration;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            phone: None,
            role: Role::User,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_movie(price: i64) -> Movie {
        let mut movie = MovieInput {
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
        .into_movie();
        movie.ticket_price = Decimal::from(price);
        movie
    }

    fn sample_input(movie: &Movie, tickets: i32) -> BookingInput {
        BookingInput {
            movie_id: movie.id,
            movie_title: None,
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            user_phone: None,
            show_date: Utc::now() + Duration::days(3),
            show_time: "7:00 PM".to_string(),
            number_of_tickets: tickets,
        }
    }

    #[test]
    fn total_is_price_times_ticket_count() {
        let user = sample_user();
        let movie = sample_movie(10);
        let booking = Booking::create(&user, &movie, sample_input(&movie, 2)).unwrap();
        assert_eq!(booking.total_amount, Decimal::from(20));
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(
            booking.total_amount,
            booking.ticket_price * Decimal::from(booking.number_of_tickets)
        );
    }

    #[test]
    fn ticket_price_is_snapshotted_at_creation() {
        let user = sample_user();
        let mut movie = sample_movie(10);
        let booking = Booking::create(&user, &movie, sample_input(&movie, 2)).unwrap();

        movie.ticket_price = Decimal::from(25);
        assert_eq!(booking.ticket_price, Decimal::from(10));
        assert_eq!(booking.total_amount, Decimal::from(20));
    }

    #[test]
    fn unset_movie_price_falls_back_to_default() {
        let user = sample_user();
        let mut movie = sample_movie(0);
        movie.ticket_price = Decimal::ZERO;
        let booking = Booking::create(&user, &movie, sample_input(&movie, 3)).unwrap();
        assert_eq!(booking.ticket_price, default_ticket_price());
        assert_eq!(booking.total_amount, Decimal::from(36));
    }

    #[test]
    fn ticket_count_bounds_are_inclusive() {
        assert!(validate_ticket_count(1).is_ok());
        assert!(validate_ticket_count(10).is_ok());
        for count in [0, 11, -3] {
            let err = validate_ticket_count(count).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "count {count}");
        }
    }

    #[test]
    fn out_of_range_ticket_count_rejects_creation() {
        let user = sample_user();
        let movie = sample_movie(10);
        let err = Booking::create(&user, &movie, sample_input(&movie, 11)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn caller_supplied_title_wins_over_movie_title() {
        let user = sample_user();
        let movie = sample_movie(10);
        let mut input = sample_input(&movie, 1);
        input.movie_title = Some("Dune (IMAX)".to_string());
        let booking = Booking::create(&user, &movie, input).unwrap();
        assert_eq!(booking.movie_title, "Dune (IMAX)");

        let booking = Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap();
        assert_eq!(booking.movie_title, "Dune");
    }

    #[test]
    fn ownership_check_rejects_other_users() {
        let user = sample_user();
        let movie = sample_movie(10);
        let booking = Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap();

        assert!(booking.ensure_owned_by(user.id).is_ok());
        let err = booking.ensure_owned_by(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn past_show_cannot_be_cancelled() {
        let user = sample_user();
        let movie = sample_movie(10);
        let mut input = sample_input(&movie, 1);
        input.show_date = Utc::now() - Duration::days(1);
        let booking = Booking::create(&user, &movie, input).unwrap();

        let err = booking.ensure_cancellable(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[test]
    fn already_cancelled_booking_may_be_cancelled_again() {
        // Re-cancelling is not guarded against; the second call re-persists
        // the same status without error.
        let user = sample_user();
        let movie = sample_movie(10);
        let mut booking = Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap();
        booking.status = BookingStatus::Cancelled;

        assert!(booking.ensure_cancellable(Utc::now()).is_ok());
    }

    #[test]
    fn stats_over_mixed_statuses() {
        let user = sample_user();
        let movie = sample_movie(12);
        let mut bookings = vec![
            Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap(),
            Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap(),
            Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap(),
            Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap(),
        ];
        bookings[3].status = BookingStatus::Cancelled;

        let stats = BookingStats::compute(&bookings);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.confirmed_bookings, 3);
        assert_eq!(stats.cancelled_bookings, 1);
        assert_eq!(stats.total_revenue, Decimal::from(36));
    }

    #[test]
    fn stats_are_zero_for_no_bookings() {
        let stats = BookingStats::compute(&[]);
        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert!(stats.popular_movies.is_empty());
    }

    #[test]
    fn popular_movies_rank_by_confirmed_count_with_stable_ties() {
        let user = sample_user();
        let titles = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta"];
        let mut bookings = Vec::new();
        for title in titles {
            let mut movie = sample_movie(10);
            movie.title = title.to_string();
            bookings.push(Booking::create(&user, &movie, sample_input(&movie, 2)).unwrap());
        }
        // A second confirmed booking pushes Gamma to the top.
        let mut movie = sample_movie(10);
        movie.title = "Gamma".to_string();
        bookings.push(Booking::create(&user, &movie, sample_input(&movie, 1)).unwrap());
        // Cancelled bookings never count toward popularity.
        let mut cancelled = Booking::create(&user, &movie, sample_input(&movie, 5)).unwrap();
        cancelled.status = BookingStatus::Cancelled;
        bookings.push(cancelled);

        let stats = BookingStats::compute(&bookings);
        assert_eq!(stats.popular_movies.len(), 5);
        assert_eq!(stats.popular_movies[0].title, "Gamma");
        assert_eq!(stats.popular_movies[0].bookings, 2);
        assert_eq!(stats.popular_movies[0].total_tickets, 3);
        assert_eq!(stats.popular_movies[0].revenue, Decimal::from(30));
        // Remaining single-booking titles keep first-seen order.
        let rest: Vec<&str> = stats.popular_movies[1..]
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(rest, vec!["Alpha", "Beta", "Delta", "Epsilon"]);
    }
}
