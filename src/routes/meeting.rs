use std::collections::HashSet;

use log::error;
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use crate::modules::helpers::meeting::MeetingHelper;
use crate::modules::models::race_result::RaceResult;
use crate::modules::models::rating::{Rating, RatingStats};
use crate::modules::openf1_api::{self, Meeting};
use crate::modules::store::Store;

/// # list meetings
/// optional season filter plus the card filters of the ui: a search term
/// over name/location/country/circuit and a restriction to meetings a given
/// user has rated. newest meetings come first.
#[get("/meetings?<year>&<search>&<rated_by>")]
pub async fn list(
    store: &State<Store>,
    year: Option<i32>,
    search: Option<String>,
    rated_by: Option<String>,
) -> Result<Json<Vec<Meeting>>, Status> {
    let meetings = match openf1_api::get_meetings(year).await {
        Ok(meetings) => meetings,
        Err(error) => {
            error!(target: "routes/meeting", "failed listing meetings: {}", error);
            return Err(Status::BadGateway);
        }
    };

    let rated_keys = rated_by.map(|user_id| {
        Rating::get_all(store)
            .into_iter()
            .filter(|rating| rating.user_id == user_id)
            .map(|rating| rating.meeting_key)
            .collect::<HashSet<i32>>()
    });

    Ok(Json(MeetingHelper::filter_meetings(
        meetings,
        search.as_deref(),
        rated_keys.as_ref(),
    )))
}

#[get("/meetings/<meeting_key>")]
pub async fn single(meeting_key: i32) -> Result<Json<Meeting>, Status> {
    match openf1_api::get_meeting(meeting_key).await {
        Ok(Some(meeting)) => Ok(Json(meeting)),
        Ok(None) => Err(Status::NotFound),
        Err(error) => {
            error!(target: "routes/meeting", "failed fetching meeting {}: {}", meeting_key, error);
            Err(Status::BadGateway)
        }
    }
}

/// an empty list means the race has not been run yet, upstream being down
/// is a 502 instead.
#[get("/meetings/<meeting_key>/results")]
pub async fn results(meeting_key: i32) -> Result<Json<Vec<RaceResult>>, Status> {
    match openf1_api::get_race_results(meeting_key).await {
        Ok(results) => Ok(Json(results)),
        Err(error) => {
            error!(target: "routes/meeting", "failed fetching results for {}: {}", meeting_key, error);
            Err(Status::BadGateway)
        }
    }
}

#[get("/meetings/<meeting_key>/stats")]
pub fn stats(store: &State<Store>, meeting_key: i32) -> Json<RatingStats> {
    Json(Rating::stats_for_meeting(store, meeting_key))
}

#[get("/years")]
pub fn years() -> Json<Vec<i32>> {
    Json(openf1_api::get_available_years())
}
