use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::errors::{CustomResult, FetchFailedSnafu};
use crate::modules::models::race_result::RaceResult;

const OPENF1_API_BASE: &str = "https://api.openf1.org/v1";

/// seasons before 2023 are not covered by the openf1 api.
pub const EARLIEST_SEASON: i32 = 2023;

pub async fn get_meetings(year: Option<i32>) -> CustomResult<Vec<Meeting>> {
    let request_url = match year {
        Some(year) => format!("{OPENF1_API_BASE}/meetings?year={year}"),
        None => format!("{OPENF1_API_BASE}/meetings"),
    };

    fetch_resource(&request_url, "meetings").await
}

pub async fn get_meeting(meeting_key: i32) -> CustomResult<Option<Meeting>> {
    let request_url = format!("{OPENF1_API_BASE}/meetings?meeting_key={meeting_key}");
    let meetings: Vec<Meeting> = fetch_resource(&request_url, "meetings").await?;

    Ok(meetings.into_iter().next())
}

/// # race results for a meeting
/// joins the latest position record per driver with the driver list of the
/// meeting's main race session, ordered by final position. an empty result
/// means the race has not been run yet, upstream failures are errors.
pub async fn get_race_results(meeting_key: i32) -> CustomResult<Vec<RaceResult>> {
    info!(target: "openf1", "aggregating race results for meeting {}", meeting_key);

    let request_url =
        format!("{OPENF1_API_BASE}/sessions?meeting_key={meeting_key}&session_type=Race");
    let sessions: Vec<Session> = fetch_resource(&request_url, "sessions").await?;

    let session = match pick_primary_session(&sessions) {
        Some(session) => session,
        None => return Ok(Vec::new()),
    };

    let request_url = format!(
        "{OPENF1_API_BASE}/position?session_key={}",
        session.session_key
    );
    let positions: Vec<PositionEntry> = fetch_resource(&request_url, "position").await?;
    if positions.is_empty() {
        return Ok(Vec::new());
    }

    let request_url = format!(
        "{OPENF1_API_BASE}/drivers?session_key={}",
        session.session_key
    );
    let drivers: Vec<DriverEntry> = fetch_resource(&request_url, "drivers").await?;

    Ok(build_results(final_positions(positions), &drivers))
}

/// seasons selectable in the listing filter, newest first. no network
/// access, purely the inclusive range from the earliest supported season
/// through the current calendar year.
pub fn get_available_years() -> Vec<i32> {
    let current_year = Utc::now().year();
    (EARLIEST_SEASON..=current_year).rev().collect()
}

async fn fetch_resource<T: DeserializeOwned>(
    request_url: &str,
    resource: &'static str,
) -> CustomResult<Vec<T>> {
    let response = reqwest::get(request_url)
        .await
        .context(FetchFailedSnafu { resource })?
        .error_for_status()
        .context(FetchFailedSnafu { resource })?;

    response
        .json::<Vec<T>>()
        .await
        .context(FetchFailedSnafu { resource })
}

/// a meeting can hold both a sprint and the full race. prefer the session
/// literally named "Race", then any race-typed session that is not the
/// sprint, then whatever the api returned first.
fn pick_primary_session(sessions: &[Session]) -> Option<&Session> {
    sessions
        .iter()
        .find(|session| session.session_name == "Race")
        .or_else(|| {
            sessions
                .iter()
                .find(|session| session.session_type == "Race" && session.session_name != "Sprint")
        })
        .or_else(|| sessions.first())
}

/// the position resource is a time series of rank changes. only the entry
/// with the latest timestamp per driver number is the final classification.
fn final_positions(positions: Vec<PositionEntry>) -> Vec<PositionEntry> {
    let mut latest: HashMap<i32, PositionEntry> = HashMap::new();
    for entry in positions {
        let newer = match latest.get(&entry.driver_number) {
            Some(known) => entry.date > known.date,
            None => true,
        };

        if newer {
            latest.insert(entry.driver_number, entry);
        }
    }

    latest.into_values().collect()
}

fn build_results(positions: Vec<PositionEntry>, drivers: &[DriverEntry]) -> Vec<RaceResult> {
    let drivers_by_number: HashMap<i32, &DriverEntry> = drivers
        .iter()
        .map(|driver| (driver.driver_number, driver))
        .collect();

    let mut results: Vec<RaceResult> = positions
        .iter()
        .filter_map(|entry| {
            let driver = match drivers_by_number.get(&entry.driver_number) {
                Some(driver) => driver,
                None => {
                    warn!(target: "openf1", "no driver record for #{}, dropping the position", entry.driver_number);
                    return None;
                }
            };

            Some(RaceResult {
                position: entry.position,
                driver_number: entry.driver_number,
                driver_name: driver.full_name.clone(),
                driver_acronym: driver.name_acronym.clone(),
                team_name: driver.team_name.clone(),
                // upstream ships the colour without the leading '#'
                team_colour: format!("#{}", driver.team_colour),
            })
        })
        .collect();

    results.sort_by_key(|result| result.position);
    results
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Meeting {
    pub meeting_key: i32,
    pub meeting_name: String,
    pub meeting_official_name: String,
    pub meeting_code: String,
    pub location: String,
    pub country_name: String,
    pub circuit_short_name: String,
    pub date_start: DateTime<Utc>,
    pub year: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Session {
    pub session_key: i32,
    pub session_name: String,
    pub session_type: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DriverEntry {
    pub driver_number: i32,
    pub full_name: String,
    pub name_acronym: String,
    pub team_name: String,
    pub team_colour: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PositionEntry {
    pub driver_number: i32,
    pub position: i32,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(key: i32, name: &str, session_type: &str) -> Session {
        Session {
            session_key: key,
            session_name: name.to_string(),
            session_type: session_type.to_string(),
        }
    }

    fn position(driver_number: i32, position_in: i32, minute: u32) -> PositionEntry {
        PositionEntry {
            driver_number,
            position: position_in,
            date: Utc.with_ymd_and_hms(2024, 3, 2, 15, minute, 0).unwrap(),
        }
    }

    fn driver(number: i32, acronym: &str, colour: &str) -> DriverEntry {
        DriverEntry {
            driver_number: number,
            full_name: format!("Driver {}", number),
            name_acronym: acronym.to_string(),
            team_name: "Team".to_string(),
            team_colour: colour.to_string(),
        }
    }

    #[test]
    fn primary_session_prefers_the_race() {
        let sessions = vec![session(1, "Sprint", "Race"), session(2, "Race", "Race")];
        assert_eq!(pick_primary_session(&sessions).unwrap().session_key, 2);
    }

    #[test]
    fn primary_session_falls_back_to_non_sprint() {
        let sessions = vec![
            session(1, "Sprint", "Race"),
            session(2, "Sprint Shootout", "Race"),
        ];
        assert_eq!(pick_primary_session(&sessions).unwrap().session_key, 2);
    }

    #[test]
    fn primary_session_falls_back_to_the_first() {
        let sessions = vec![session(1, "Sprint", "Race")];
        assert_eq!(pick_primary_session(&sessions).unwrap().session_key, 1);

        assert!(pick_primary_session(&[]).is_none());
    }

    #[test]
    fn final_positions_keep_the_latest_entry_per_driver() {
        let entries = vec![
            position(1, 5, 0),
            position(1, 2, 30),
            position(1, 1, 55),
            position(44, 1, 0),
            position(44, 3, 40),
        ];

        let mut finals = final_positions(entries);
        finals.sort_by_key(|entry| entry.driver_number);

        assert_eq!(finals.len(), 2);
        assert_eq!(finals[0].driver_number, 1);
        assert_eq!(finals[0].position, 1);
        assert_eq!(finals[1].driver_number, 44);
        assert_eq!(finals[1].position, 3);
    }

    #[test]
    fn build_results_joins_sorts_and_prefixes_colours() {
        let positions = vec![position(44, 2, 55), position(1, 1, 55)];
        let drivers = vec![driver(1, "VER", "3671C6"), driver(44, "HAM", "27F4D2")];

        let results = build_results(positions, &drivers);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 1);
        assert_eq!(results[0].driver_acronym, "VER");
        assert_eq!(results[0].team_colour, "#3671C6");
        assert_eq!(results[1].position, 2);
        assert_eq!(results[1].driver_acronym, "HAM");
    }

    #[test]
    fn build_results_drops_positions_without_a_driver() {
        let positions = vec![position(1, 1, 55), position(99, 2, 55)];
        let drivers = vec![driver(1, "VER", "3671C6")];

        let results = build_results(positions, &drivers);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].driver_number, 1);
    }

    #[test]
    fn available_years_run_from_now_back_to_the_earliest_season() {
        let years = get_available_years();
        let current_year = Utc::now().year();

        assert_eq!(years.first(), Some(&current_year));
        assert_eq!(years.last(), Some(&EARLIEST_SEASON));
        assert!(years.windows(2).all(|pair| pair[0] == pair[1] + 1));
    }
}
