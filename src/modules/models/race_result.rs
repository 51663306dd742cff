use serde::{Deserialize, Serialize};

/// one driver's final classification row for a meeting. derived by joining
/// the latest position record per driver with the session's driver list,
/// never persisted.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RaceResult {
    pub position: i32,
    pub driver_number: i32,
    pub driver_name: String,
    pub driver_acronym: String,
    pub team_name: String,
    pub team_colour: String,
}
