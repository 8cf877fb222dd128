use axum::extract::{Path, State};
use axum::response::Response;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{AdminUser, AuthUser};
use crate::models::booking::{Booking, BookingDetail, BookingInput, BookingStats, BookingStatus};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, success};

/// Resolve the movie, snapshot its price, persist one booking owned by the
/// caller. No capacity check exists; overlapping bookings for the same
/// showtime are all accepted.
pub async fn create_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<BookingInput>,
) -> Result<Response, AppError> {
    let movie = state
        .movies
        .find(input.movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let booking = Booking::create(&user, &movie, input)?;
    state.bookings.insert(&booking).await?;
    tracing::info!(booking_id = %booking.id, movie_id = %movie.id, "Booking created");

    let detail = BookingDetail {
        movie: movie.summary(),
        user: None,
        booking,
    };
    Ok(created(detail, "Booking created successfully"))
}

/// Owner-only fetch. Admins get no bypass on this path.
pub async fn get_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let row = state
        .bookings
        .find_detailed(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    row.booking.ensure_owned_by(user.id)?;

    Ok(success(
        row.into_detail(true),
        "Booking details fetched successfully",
    ))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let mut booking = state
        .bookings
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    booking.ensure_owned_by(user.id)?;
    let now = Utc::now();
    booking.ensure_cancellable(now)?;

    booking.status = BookingStatus::Cancelled;
    booking.updated_at = now;
    state.bookings.update(&mut booking).await?;
    tracing::info!(booking_id = %booking.id, "Booking cancelled");

    Ok(success(booking, "Booking cancelled successfully"))
}

pub async fn all_bookings(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Response, AppError> {
    let bookings: Vec<_> = state
        .bookings
        .list_all_detailed()
        .await?
        .into_iter()
        .map(|row| row.into_detail(true))
        .collect();

    Ok(success(bookings, "All bookings fetched successfully"))
}

pub async fn booking_stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Response, AppError> {
    let bookings = state.bookings.list_all().await?;
    let stats = BookingStats::compute(&bookings);

    Ok(success(stats, "Booking statistics fetched successfully"))
}
