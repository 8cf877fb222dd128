use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use crate::config::{create_cors_layer, set_security_headers};
use crate::handlers::{bookings, health_check, movies, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(users::register_user))
        .route("/login", post(users::login_user))
        .route(
            "/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/bookings", get(users::get_user_bookings));

    // Literal segments before parameterized ones.
    let movie_routes = Router::new()
        .route("/getAllMovies", get(movies::list_movies))
        .route("/search", get(movies::search_movies))
        .route("/", get(movies::list_movies).post(movies::add_movie))
        .route(
            "/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        );

    let booking_routes = Router::new()
        .route("/stats/overview", get(bookings::booking_stats))
        .route("/all", get(bookings::all_bookings))
        .route("/", post(bookings::create_booking))
        .route("/:id", get(bookings::get_booking))
        .route("/:id/cancel", put(bookings::cancel_booking));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/user", user_routes)
        .nest("/api/movies", movie_routes)
        .nest("/api/bookings", booking_routes)
        .layer(middleware::from_fn(set_security_headers))
        .layer(create_cors_layer())
        .with_state(state)
}
