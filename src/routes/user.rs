use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket::{get, post};
use serde::Deserialize;

use crate::modules::models::rating::{Rating, RatingStats};
use crate::modules::models::user::User;
use crate::modules::store::Store;

#[derive(Deserialize)]
pub struct NewUserData {
    pub username: String,
    pub email: String,
}

/// create an account and mark it as the current user.
#[post("/users", format = "json", data = "<new_user>")]
pub fn create(store: &State<Store>, new_user: Json<NewUserData>) -> Result<Json<User>, Status> {
    let data = new_user.into_inner();
    if data.username.trim().is_empty() || data.email.trim().is_empty() {
        return Err(Status::BadRequest);
    }

    Ok(Json(User::create(store, data.username.trim(), data.email.trim())))
}

#[get("/users/current")]
pub fn current(store: &State<Store>) -> Result<Json<User>, Status> {
    match User::current(store) {
        Some(user) => Ok(Json(user)),
        None => Err(Status::NotFound),
    }
}

/// logout only clears the current user pointer, the record stays.
#[post("/users/logout")]
pub fn logout(store: &State<Store>) -> Status {
    User::clear_current(store);
    Status::NoContent
}

#[get("/users/<user_id>/stats")]
pub fn stats(store: &State<Store>, user_id: String) -> Json<RatingStats> {
    Json(Rating::stats_for_user(store, &user_id))
}
