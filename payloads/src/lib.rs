pub mod api_client;
pub mod dom;
pub mod range;
pub mod zones;

pub use api_client::{ApiClient, ClientError};

use serde::{Deserialize, Serialize};

/// One converted zone in the results region, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    pub zone_id: String,
    /// Display name; falls back to the raw zone id when the zone is not in
    /// the reference table.
    pub label: String,
    /// ISO `yyyy-MM-dd` of the range start in this zone.
    pub local_date: String,
    /// `HH:mm` of the range start in this zone.
    pub local_start_time: String,
    /// `HH:mm` of the range end in this zone.
    pub local_end_time: String,
    /// Signed calendar-day offset of `local_date` relative to the base date.
    pub day_diff: i32,
    /// Whether the local start hour falls in the zone's working hours.
    pub is_working_hours: bool,
    pub is_base: bool,
}

/// Raw query parameters for a conversion page view. Every field is optional;
/// the server substitutes defaults for anything missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionParams {
    pub date: Option<String>,
    pub time: Option<String>,
    pub end_time: Option<String>,
    pub base_zone: Option<String>,
    /// Explicit target zones; deduplicated, order preserved.
    pub zones: Vec<String>,
    /// Free-text zone search, consulted only when `zones` is empty.
    pub search: Option<String>,
}

impl ConversionParams {
    /// Parse from a raw query string. Unknown keys are ignored; the `zones`
    /// key is repeatable.
    pub fn from_query_string(query: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).unwrap_or_default();
        let mut params = ConversionParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "date" => params.date = non_empty(value),
                "time" => params.time = non_empty(value),
                "endTime" => params.end_time = non_empty(value),
                "baseZone" => params.base_zone = non_empty(value),
                "zones" => {
                    if !value.is_empty() && !params.zones.contains(&value) {
                        params.zones.push(value);
                    }
                }
                "q" | "query" | "keyword" => {
                    if params.search.is_none() {
                        params.search = non_empty(value);
                    }
                }
                _ => {}
            }
        }
        params
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Fully-resolved form state, as committed by the client controller.
///
/// Serializing this is the single source of the query-string layout, so the
/// client's "did anything change" comparison works against queries the
/// server previously echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub date: String,
    pub time: String,
    pub end_time: String,
    pub base_zone: String,
    pub zones: Vec<String>,
}

impl FormState {
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = vec![
            ("date", &self.date),
            ("time", &self.time),
            ("endTime", &self.end_time),
            ("baseZone", &self.base_zone),
        ];
        for zone in &self.zones {
            pairs.push(("zones", zone));
        }
        // Serializing borrowed pairs cannot fail
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }
}

/// Human label for a signed day offset.
///
/// Exact strings are part of the page contract: `0` is "same day", `±1` are
/// "next day"/"previous day", larger offsets render as "+n days"/"-n days".
pub fn day_diff_label(day_diff: i32) -> String {
    match day_diff {
        0 => "same day".to_string(),
        1 => "next day".to_string(),
        -1 => "previous day".to_string(),
        n if n > 1 => format!("+{n} days"),
        n => format!("{n} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_diff_labels() {
        assert_eq!(day_diff_label(0), "same day");
        assert_eq!(day_diff_label(1), "next day");
        assert_eq!(day_diff_label(-1), "previous day");
        assert_eq!(day_diff_label(2), "+2 days");
        assert_eq!(day_diff_label(-2), "-2 days");
    }

    #[test]
    fn params_parse_repeatable_zones() {
        let params = ConversionParams::from_query_string(
            "date=2024-06-01&time=09%3A00&endTime=17%3A00&baseZone=Asia%2FTokyo\
             &zones=America%2FNew_York&zones=Europe%2FLondon&zones=America%2FNew_York",
        );
        assert_eq!(params.date.as_deref(), Some("2024-06-01"));
        assert_eq!(params.time.as_deref(), Some("09:00"));
        assert_eq!(params.end_time.as_deref(), Some("17:00"));
        assert_eq!(params.base_zone.as_deref(), Some("Asia/Tokyo"));
        // duplicates collapse, order preserved
        assert_eq!(params.zones, vec!["America/New_York", "Europe/London"]);
    }

    #[test]
    fn params_search_aliases() {
        for key in ["q", "query", "keyword"] {
            let params = ConversionParams::from_query_string(&format!(
                "{key}=ny+office"
            ));
            assert_eq!(params.search.as_deref(), Some("ny office"));
        }
    }

    #[test]
    fn params_ignore_empty_values() {
        let params =
            ConversionParams::from_query_string("date=&time=&zones=&q=+");
        assert_eq!(params, ConversionParams::default());
    }

    #[test]
    fn form_state_round_trips_through_params() {
        let state = FormState {
            date: "2024-06-01".to_string(),
            time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            base_zone: "Asia/Tokyo".to_string(),
            zones: vec![
                "America/New_York".to_string(),
                "Europe/London".to_string(),
            ],
        };
        let params = ConversionParams::from_query_string(
            &state.to_query_string(),
        );
        assert_eq!(params.date.as_deref(), Some("2024-06-01"));
        assert_eq!(params.base_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(params.zones, state.zones);
    }
}
