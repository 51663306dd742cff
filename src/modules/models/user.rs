use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::store::{Store, CURRENT_USER_KEY, USERS_KEY};

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// # create user
    /// generates a millisecond id, appends the record to the user collection
    /// and marks it as the current user. the record is returned even when
    /// the medium is unavailable, the writes degrade to no-ops.
    pub fn create(store: &Store, username: &str, email: &str) -> User {
        let user = User {
            id: Utc::now().timestamp_millis().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };

        let mut users = User::get_all(store);
        users.push(user.clone());
        store.write_collection(USERS_KEY, &users);
        User::set_current(store, &user);

        user
    }

    pub fn current(store: &Store) -> Option<User> {
        store.read_record(CURRENT_USER_KEY)
    }

    pub fn set_current(store: &Store, user: &User) {
        store.write_record(CURRENT_USER_KEY, user);
    }

    /// clears the pointer only, the user record itself is never deleted.
    pub fn clear_current(store: &Store) {
        store.remove_record(CURRENT_USER_KEY);
    }

    pub fn get_all(store: &Store) -> Vec<User> {
        store.read_collection(USERS_KEY)
    }

    pub fn exists(store: &Store, id_in: &str) -> bool {
        User::get_all(store).iter().any(|user| user.id == id_in)
    }

    /// insert the user unless a record with the same id is already present.
    pub fn ensure_exists(store: &Store, user: &User) {
        if User::exists(store, &user.id) {
            return;
        }

        let mut users = User::get_all(store);
        users.push(user.clone());
        store.write_collection(USERS_KEY, &users);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_appends_and_sets_current() {
        let store = Store::in_memory();

        let user = User::create(&store, "alice", "a@x.com");
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "a@x.com");

        let all = User::get_all(&store);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], user);
        assert_eq!(User::current(&store), Some(user));
    }

    #[test]
    fn clear_current_keeps_the_record() {
        let store = Store::in_memory();
        let user = User::create(&store, "alice", "a@x.com");

        User::clear_current(&store);
        assert_eq!(User::current(&store), None);
        assert_eq!(User::get_all(&store), vec![user]);
    }

    #[test]
    fn ensure_exists_deduplicates_on_id() {
        let store = Store::in_memory();
        let user = User {
            id: "demo-user-1".to_string(),
            username: "F1Fan2024".to_string(),
            email: "f1fan@example.com".to_string(),
            created_at: Utc::now(),
        };

        User::ensure_exists(&store, &user);
        User::ensure_exists(&store, &user);

        assert_eq!(User::get_all(&store).len(), 1);
    }
}
