use chrono::{DateTime, Utc};
use log::info;

use crate::modules::models::rating::Rating;
use crate::modules::models::user::User;
use crate::modules::store::Store;

/// # seed demo data
/// populates the store with a fixed demo dataset exactly once: any existing
/// rating disables the whole seed. user inserts are id-deduplicated, the
/// rating collection is written wholesale, which is only reachable while it
/// is empty.
pub fn seed_if_empty(store: &Store) {
    if !Rating::get_all(store).is_empty() {
        return;
    }

    for user in demo_users() {
        User::ensure_exists(store, &user);
    }

    Rating::replace_all(store, &demo_ratings());
    info!(target: "seed", "demo data seeded");
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "demo-user-1".to_string(),
            username: "F1Fan2024".to_string(),
            email: "f1fan@example.com".to_string(),
            created_at: timestamp("2024-01-01T00:00:00Z"),
        },
        User {
            id: "demo-user-2".to_string(),
            username: "RacingEnthusiast".to_string(),
            email: "racing@example.com".to_string(),
            created_at: timestamp("2024-01-15T00:00:00Z"),
        },
    ]
}

fn demo_ratings() -> Vec<Rating> {
    vec![
        // 2024 Bahrain GP
        Rating {
            id: "rating-1".to_string(),
            meeting_key: 1217,
            user_id: "demo-user-1".to_string(),
            rating: 4,
            review: Some(
                "Great season opener! The battle between Verstappen and the field was intense throughout the race."
                    .to_string(),
            ),
            created_at: timestamp("2024-03-03T00:00:00Z"),
            updated_at: timestamp("2024-03-03T00:00:00Z"),
        },
        Rating {
            id: "rating-2".to_string(),
            meeting_key: 1217,
            user_id: "demo-user-2".to_string(),
            rating: 5,
            review: Some(
                "Absolutely incredible racing! The strategy battles and close wheel-to-wheel action made this a classic."
                    .to_string(),
            ),
            created_at: timestamp("2024-03-03T00:00:00Z"),
            updated_at: timestamp("2024-03-03T00:00:00Z"),
        },
        // 2024 Saudi Arabian GP
        Rating {
            id: "rating-3".to_string(),
            meeting_key: 1218,
            user_id: "demo-user-1".to_string(),
            rating: 3,
            review: Some(
                "Decent race but the street circuit felt a bit processional at times. Good for qualifying though."
                    .to_string(),
            ),
            created_at: timestamp("2024-03-10T00:00:00Z"),
            updated_at: timestamp("2024-03-10T00:00:00Z"),
        },
    ]
}
