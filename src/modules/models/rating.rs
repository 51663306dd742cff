use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::errors::{CustomResult, InvalidRatingSnafu};
use crate::modules::helpers::math::Math;
use crate::modules::store::{Store, RATINGS_KEY};

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Rating {
    pub id: String,
    pub meeting_key: i32,
    pub user_id: String,
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// the read model shown on meeting cards and the profile header.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_ratings: usize,
}

impl Rating {
    /// linear scan for the unique (meeting, user) match.
    pub fn get(store: &Store, meeting_key: i32, user_id: &str) -> Option<Rating> {
        Rating::get_all(store)
            .into_iter()
            .find(|rating| rating.meeting_key == meeting_key && rating.user_id == user_id)
    }

    /// # upsert a rating
    /// at most one rating exists per (meeting, user) pair. an existing
    /// record keeps its id and creation timestamp, score and review are
    /// replaced and the update timestamp refreshed.
    ///
    /// ## Arguments
    /// * `store` - the persistent store
    /// * `meeting_key` - the rated meeting
    /// * `user_id` - the rating user
    /// * `rating` - 1 to 5 stars
    /// * `review` - optional free text
    pub fn upsert(
        store: &Store,
        meeting_key: i32,
        user_id: &str,
        rating: i32,
        review: Option<String>,
    ) -> CustomResult<Rating> {
        ensure!((1..=5).contains(&rating), InvalidRatingSnafu { rating });

        let mut ratings = Rating::get_all(store);
        let existing = ratings
            .iter()
            .position(|known| known.meeting_key == meeting_key && known.user_id == user_id);

        let now = Utc::now();
        let record = match existing {
            Some(index) => Rating {
                id: ratings[index].id.clone(),
                meeting_key,
                user_id: user_id.to_string(),
                rating,
                review,
                created_at: ratings[index].created_at,
                updated_at: now,
            },
            None => Rating {
                id: now.timestamp_millis().to_string(),
                meeting_key,
                user_id: user_id.to_string(),
                rating,
                review,
                created_at: now,
                updated_at: now,
            },
        };

        match existing {
            Some(index) => ratings[index] = record.clone(),
            None => ratings.push(record.clone()),
        }
        store.write_collection(RATINGS_KEY, &ratings);

        Ok(record)
    }

    pub fn get_all(store: &Store) -> Vec<Rating> {
        store.read_collection(RATINGS_KEY)
    }

    pub fn for_meeting(store: &Store, meeting_key: i32) -> Vec<Rating> {
        Rating::get_all(store)
            .into_iter()
            .filter(|rating| rating.meeting_key == meeting_key)
            .collect()
    }

    /// overwrite the whole collection. only the seed loader writes through
    /// here, and only after its emptiness guard.
    pub(crate) fn replace_all(store: &Store, ratings: &[Rating]) {
        store.write_collection(RATINGS_KEY, ratings);
    }

    pub fn stats_for_meeting(store: &Store, meeting_key: i32) -> RatingStats {
        Rating::stats_of(&Rating::for_meeting(store, meeting_key))
    }

    pub fn stats_for_user(store: &Store, user_id: &str) -> RatingStats {
        let ratings: Vec<Rating> = Rating::get_all(store)
            .into_iter()
            .filter(|rating| rating.user_id == user_id)
            .collect();

        Rating::stats_of(&ratings)
    }

    fn stats_of(ratings: &[Rating]) -> RatingStats {
        if ratings.is_empty() {
            return RatingStats {
                average_rating: 0.0,
                total_ratings: 0,
            };
        }

        let scores: Vec<f64> = ratings.iter().map(|rating| rating.rating as f64).collect();
        RatingStats {
            average_rating: Math::mean(&scores),
            total_ratings: ratings.len(),
        }
    }
}
