use std::collections::HashSet;

use crate::modules::openf1_api::Meeting;

pub struct MeetingHelper {}

impl MeetingHelper {
    /// case insensitive substring match over the fields shown on a meeting
    /// card: name, location, country and circuit.
    pub fn matches_search(meeting: &Meeting, term: &str) -> bool {
        let term = term.to_lowercase();

        meeting.meeting_name.to_lowercase().contains(&term)
            || meeting.location.to_lowercase().contains(&term)
            || meeting.country_name.to_lowercase().contains(&term)
            || meeting.circuit_short_name.to_lowercase().contains(&term)
    }

    /// apply the listing filters and order the result newest first.
    pub fn filter_meetings(
        meetings: Vec<Meeting>,
        search: Option<&str>,
        rated_keys: Option<&HashSet<i32>>,
    ) -> Vec<Meeting> {
        let mut filtered: Vec<Meeting> = meetings
            .into_iter()
            .filter(|meeting| match search {
                Some(term) if !term.is_empty() => MeetingHelper::matches_search(meeting, term),
                _ => true,
            })
            .filter(|meeting| match rated_keys {
                Some(keys) => keys.contains(&meeting.meeting_key),
                None => true,
            })
            .collect();

        filtered.sort_by(|a, b| b.date_start.cmp(&a.date_start));
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meeting(key: i32, name: &str, location: &str, country: &str, circuit: &str, month: u32) -> Meeting {
        Meeting {
            meeting_key: key,
            meeting_name: name.to_string(),
            meeting_official_name: format!("Formula 1 {} 2024", name),
            meeting_code: "XXX".to_string(),
            location: location.to_string(),
            country_name: country.to_string(),
            circuit_short_name: circuit.to_string(),
            date_start: Utc.with_ymd_and_hms(2024, month, 1, 13, 0, 0).unwrap(),
            year: 2024,
        }
    }

    #[test]
    fn search_matches_any_card_field_ignoring_case() {
        let bahrain = meeting(1217, "Bahrain Grand Prix", "Sakhir", "Bahrain", "Sakhir", 3);

        assert!(MeetingHelper::matches_search(&bahrain, "bahrain"));
        assert!(MeetingHelper::matches_search(&bahrain, "SAKHIR"));
        assert!(MeetingHelper::matches_search(&bahrain, "grand prix"));
        assert!(!MeetingHelper::matches_search(&bahrain, "monza"));
    }

    #[test]
    fn filter_orders_newest_first() {
        let meetings = vec![
            meeting(1217, "Bahrain Grand Prix", "Sakhir", "Bahrain", "Sakhir", 3),
            meeting(1220, "Monaco Grand Prix", "Monaco", "Monaco", "Monte Carlo", 5),
            meeting(1218, "Saudi Arabian Grand Prix", "Jeddah", "Saudi Arabia", "Jeddah", 4),
        ];

        let filtered = MeetingHelper::filter_meetings(meetings, None, None);
        let keys: Vec<i32> = filtered.iter().map(|m| m.meeting_key).collect();
        assert_eq!(keys, vec![1220, 1218, 1217]);
    }

    #[test]
    fn filter_restricts_to_rated_meetings() {
        let meetings = vec![
            meeting(1217, "Bahrain Grand Prix", "Sakhir", "Bahrain", "Sakhir", 3),
            meeting(1218, "Saudi Arabian Grand Prix", "Jeddah", "Saudi Arabia", "Jeddah", 4),
        ];
        let rated: HashSet<i32> = [1218].into_iter().collect();

        let filtered = MeetingHelper::filter_meetings(meetings, None, Some(&rated));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].meeting_key, 1218);
    }

    #[test]
    fn empty_search_term_matches_everything() {
        let meetings = vec![
            meeting(1217, "Bahrain Grand Prix", "Sakhir", "Bahrain", "Sakhir", 3),
            meeting(1218, "Saudi Arabian Grand Prix", "Jeddah", "Saudi Arabia", "Jeddah", 4),
        ];

        let filtered = MeetingHelper::filter_meetings(meetings, Some(""), None);
        assert_eq!(filtered.len(), 2);
    }
}
