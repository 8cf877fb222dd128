//! Store handles over the shared Postgres pool. One handle per collection;
//! all constructed in `main` and injected through [`crate::state::AppState`].

pub mod bookings;
pub mod movies;
pub mod users;

pub use bookings::BookingStore;
pub use movies::MovieStore;
pub use users::UserStore;

/// Escape LIKE metacharacters in user input and wrap it for a substring
/// match. Postgres treats backslash as the default escape character.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn pattern_wraps_query_for_substring_match() {
        assert_eq!(like_pattern("action"), "%action%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("sci_fi"), "%sci\\_fi%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
