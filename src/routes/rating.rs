use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use rocket::{get, post};
use serde::Deserialize;

use crate::errors::Error;
use crate::modules::models::rating::Rating;
use crate::modules::store::Store;

#[derive(Deserialize)]
pub struct NewRatingData {
    pub meeting_key: i32,
    pub user_id: String,
    pub rating: i32,
    pub review: Option<String>,
}

/// # save a rating
/// upserts the caller's rating for a meeting, 1 to 5 stars with an optional
/// review.
#[post("/ratings", format = "json", data = "<new_rating>")]
pub fn save(store: &State<Store>, new_rating: Json<NewRatingData>) -> Result<Json<Rating>, Status> {
    let data = new_rating.into_inner();

    match Rating::upsert(store, data.meeting_key, &data.user_id, data.rating, data.review) {
        Ok(rating) => Ok(Json(rating)),
        Err(Error::InvalidRating { .. }) => Err(Status::BadRequest),
        Err(error) => {
            error!(target: "routes/rating", "failed saving rating: {}", error);
            Err(Status::InternalServerError)
        }
    }
}

#[get("/ratings/<meeting_key>/<user_id>")]
pub fn get_one(
    store: &State<Store>,
    meeting_key: i32,
    user_id: String,
) -> Result<Json<Rating>, Status> {
    match Rating::get(store, meeting_key, &user_id) {
        Some(rating) => Ok(Json(rating)),
        None => Err(Status::NotFound),
    }
}

#[get("/ratings")]
pub fn get_all(store: &State<Store>) -> Json<Vec<Rating>> {
    Json(Rating::get_all(store))
}
