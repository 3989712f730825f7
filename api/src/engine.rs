//! The conversion engine.
//!
//! Interprets the base date and time range as wall-clock time in the base
//! zone, converts through absolute instants into every requested zone, and
//! produces one [`TimeRow`] per zone. Stateless; every request recomputes a
//! fresh row set.

use jiff::Timestamp;
use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use payloads::zones::{self, TimeZoneDef};
use payloads::{ConversionParams, TimeRow, range};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Structurally invalid zone identifier. Unknown-but-valid identifiers
    /// do not land here; they degrade to raw-id labels instead.
    #[error("invalid timezone identifier: {id}")]
    InvalidZone {
        id: String,
        #[source]
        source: jiff::Error,
    },
    #[error("unrepresentable wall-clock time in {zone_id}")]
    InvalidWallClock {
        zone_id: String,
        #[source]
        source: jiff::Error,
    },
}

/// A conversion request with all defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub base_date: Date,
    pub base_start_time: Time,
    pub base_end_time: Time,
    pub base_zone_id: String,
    /// Explicit or suggested target zones; the base zone is unioned in at
    /// conversion time regardless.
    pub target_zone_ids: Vec<String>,
}

impl ConversionRequest {
    /// Resolve raw query parameters, substituting defaults.
    ///
    /// Malformed date/time values are not errors: they fall back to the
    /// current wall clock in the base zone (or UTC when the base zone id is
    /// itself unusable), and a missing end time defaults to start + 8h,
    /// wrapping past midnight. The free-text search is consulted only when
    /// no explicit `zones` selection is present, and an empty suggestion
    /// falls back to the fixed default target set.
    pub fn resolve(params: &ConversionParams, now: Timestamp) -> Self {
        let base_zone_id = params
            .base_zone
            .clone()
            .unwrap_or_else(|| zones::DEFAULT_BASE_ZONE.to_string());
        let tz =
            TimeZone::get(&base_zone_id).unwrap_or_else(|_| TimeZone::UTC);
        let local_now = now.to_zoned(tz);

        let base_date = params
            .date
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| local_now.date());
        let base_start_time = params
            .time
            .as_deref()
            .and_then(parse_hhmm_time)
            .unwrap_or_else(|| truncate_to_minute(local_now.time()));
        let base_end_time = params
            .end_time
            .as_deref()
            .and_then(parse_hhmm_time)
            .unwrap_or_else(|| add_minutes_wrapping(base_start_time, 8 * 60));

        let target_zone_ids = if !params.zones.is_empty() {
            params.zones.clone()
        } else {
            let suggested = params
                .search
                .as_deref()
                .map(zones::suggest_zones)
                .unwrap_or_default();
            if suggested.is_empty() {
                zones::DEFAULT_TARGET_ZONES
                    .iter()
                    .map(|id| id.to_string())
                    .collect()
            } else {
                suggested.iter().map(|id| id.to_string()).collect()
            }
        };

        Self {
            base_date,
            base_start_time,
            base_end_time,
            base_zone_id,
            target_zone_ids,
        }
    }
}

/// Convert the request into one row per zone in `{base} ∪ targets`.
///
/// Rows come back sorted with the base zone first, then ascending by zone
/// identifier.
pub fn convert(
    request: &ConversionRequest,
) -> Result<Vec<TimeRow>, EngineError> {
    let start_instant =
        to_instant(request.base_date, request.base_start_time, request)?;
    let end_instant =
        to_instant(request.base_date, request.base_end_time, request)?;

    // deduplicated union; the base zone is always present
    let mut zone_ids: Vec<&str> = vec![request.base_zone_id.as_str()];
    for id in &request.target_zone_ids {
        if !zone_ids.contains(&id.as_str()) {
            zone_ids.push(id);
        }
    }

    let mut rows = Vec::with_capacity(zone_ids.len());
    for zone_id in zone_ids {
        let tz = lookup_zone(zone_id)?;
        let local_start = start_instant.to_zoned(tz.clone());
        let local_end = end_instant.to_zoned(tz);
        let local_date = local_start.date();

        // calendar-day subtraction, not instant subtraction, so DST shifts
        // cannot produce fractional-day artifacts
        let day_diff = request
            .base_date
            .until(local_date)
            .map(|span| span.get_days())
            .unwrap_or(0);

        let def = zones::find_zone(zone_id);
        let (work_start, work_end) = def
            .map(TimeZoneDef::work_hours_or_default)
            .unwrap_or(zones::DEFAULT_WORK_HOURS);
        let start_hour = local_start.time().hour();

        rows.push(TimeRow {
            zone_id: zone_id.to_string(),
            label: def
                .map(|d| d.label.to_string())
                .unwrap_or_else(|| zone_id.to_string()),
            local_date: local_date.to_string(),
            local_start_time: format_hhmm(local_start.time()),
            local_end_time: format_hhmm(local_end.time()),
            day_diff,
            is_working_hours: start_hour >= work_start
                && start_hour < work_end,
            is_base: zone_id == request.base_zone_id,
        });
    }

    rows.sort_by(|a, b| {
        b.is_base
            .cmp(&a.is_base)
            .then_with(|| a.zone_id.cmp(&b.zone_id))
    });
    Ok(rows)
}

/// Zoned wall clock in the base zone -> absolute instant, DST-aware.
fn to_instant(
    date: Date,
    time: Time,
    request: &ConversionRequest,
) -> Result<Timestamp, EngineError> {
    let tz = lookup_zone(&request.base_zone_id)?;
    let zoned = date.at(time.hour(), time.minute(), 0, 0).to_zoned(tz).map_err(
        |source| EngineError::InvalidWallClock {
            zone_id: request.base_zone_id.clone(),
            source,
        },
    )?;
    Ok(zoned.timestamp())
}

fn lookup_zone(id: &str) -> Result<TimeZone, EngineError> {
    TimeZone::get(id).map_err(|source| EngineError::InvalidZone {
        id: id.to_string(),
        source,
    })
}

pub fn format_hhmm(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn parse_hhmm_time(value: &str) -> Option<Time> {
    let minutes = range::parse_hhmm(value)?;
    Time::new((minutes / 60) as i8, (minutes % 60) as i8, 0, 0).ok()
}

fn truncate_to_minute(time: Time) -> Time {
    Time::new(time.hour(), time.minute(), 0, 0).unwrap_or(time)
}

fn add_minutes_wrapping(time: Time, minutes: i32) -> Time {
    let total = (time.hour() as i32 * 60 + time.minute() as i32 + minutes)
        .rem_euclid(range::MINUTES_PER_DAY);
    Time::new((total / 60) as i8, (total % 60) as i8, 0, 0)
        .unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        date: &str,
        time: &str,
        end_time: &str,
        base_zone: &str,
        zones: &[&str],
    ) -> ConversionRequest {
        let params = ConversionParams {
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            end_time: Some(end_time.to_string()),
            base_zone: Some(base_zone.to_string()),
            zones: zones.iter().map(|z| z.to_string()).collect(),
            search: None,
        };
        ConversionRequest::resolve(&params, Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn base_row_reflects_the_request_unchanged() {
        let rows = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Asia/Tokyo",
            &["America/New_York"],
        ))
        .unwrap();

        let base = &rows[0];
        assert!(base.is_base);
        assert_eq!(base.zone_id, "Asia/Tokyo");
        assert_eq!(base.local_date, "2024-06-01");
        assert_eq!(base.local_start_time, "09:00");
        assert_eq!(base.local_end_time, "17:00");
        assert_eq!(base.day_diff, 0);
        assert!(base.is_working_hours);
    }

    #[test]
    fn tokyo_morning_is_new_york_previous_evening() {
        // 2024-06-01 09:00 JST = 2024-05-31 20:00 EDT (UTC-4)
        let rows = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Asia/Tokyo",
            &["America/New_York"],
        ))
        .unwrap();

        let ny = rows
            .iter()
            .find(|row| row.zone_id == "America/New_York")
            .unwrap();
        assert_eq!(ny.local_date, "2024-05-31");
        assert_eq!(ny.local_start_time, "20:00");
        assert_eq!(ny.local_end_time, "04:00");
        assert_eq!(ny.day_diff, -1);
        assert!(!ny.is_working_hours);
        assert!(!ny.is_base);
    }

    #[test]
    fn round_trip_through_a_zone_has_no_drift() {
        let request = request(
            "2024-03-10",
            "12:00",
            "13:00",
            "America/New_York",
            &["Asia/Tokyo", "Europe/London"],
        );
        let rows = convert(&request).unwrap();
        let base = &rows[0];
        assert_eq!(base.local_start_time, "12:00");
        assert_eq!(base.local_end_time, "13:00");
        assert_eq!(base.local_date, "2024-03-10");
    }

    #[test]
    fn rows_sort_base_first_then_lexicographic() {
        let rows = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Europe/London",
            &["Asia/Tokyo", "America/New_York", "Australia/Sydney"],
        ))
        .unwrap();

        assert!(rows[0].is_base);
        let rest: Vec<&str> =
            rows[1..].iter().map(|r| r.zone_id.as_str()).collect();
        let mut sorted = rest.clone();
        sorted.sort();
        assert_eq!(rest, sorted);
    }

    #[test]
    fn base_zone_is_unioned_and_deduplicated() {
        let rows = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Asia/Tokyo",
            &["Asia/Tokyo", "Europe/London", "Europe/London"],
        ))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].zone_id, "Asia/Tokyo");
    }

    #[test]
    fn unknown_but_valid_zone_falls_back_to_raw_id_label() {
        // America/Adak is a real IANA zone that is not in the reference
        // table
        let rows = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Asia/Tokyo",
            &["America/Adak"],
        ))
        .unwrap();
        let adak = rows
            .iter()
            .find(|row| row.zone_id == "America/Adak")
            .unwrap();
        assert_eq!(adak.label, "America/Adak");
    }

    #[test]
    fn structurally_invalid_zone_is_a_request_error() {
        let result = convert(&request(
            "2024-06-01",
            "09:00",
            "17:00",
            "Asia/Tokyo",
            &["Not/A_Zone"],
        ));
        assert!(matches!(
            result,
            Err(EngineError::InvalidZone { ref id, .. }) if id == "Not/A_Zone"
        ));
    }

    #[test]
    fn working_hours_interval_is_half_open() {
        let at = |time: &str| {
            let rows = convert(&request(
                "2024-06-03",
                time,
                "23:00",
                "Asia/Tokyo",
                &[],
            ))
            .unwrap();
            rows[0].is_working_hours
        };
        assert!(!at("08:59"));
        assert!(at("09:00"));
        assert!(at("17:59"));
        assert!(!at("18:00"));
    }

    #[test]
    fn dst_transition_day_converts_by_rules_of_that_date() {
        // 2024-03-10 is the US spring-forward date; 07:00 UTC is 03:00 EDT
        let rows = convert(&request(
            "2024-03-10",
            "07:00",
            "08:00",
            "Etc/UTC",
            &["America/New_York"],
        ))
        .unwrap();
        let ny = rows
            .iter()
            .find(|row| row.zone_id == "America/New_York")
            .unwrap();
        assert_eq!(ny.local_start_time, "03:00");
    }

    #[test]
    fn malformed_date_and_time_fall_back_to_now_defaults() {
        let params = ConversionParams {
            date: Some("junk".to_string()),
            time: Some("25:99".to_string()),
            end_time: None,
            base_zone: Some("Etc/UTC".to_string()),
            zones: vec![],
            search: None,
        };
        // 2024-06-01 10:30:45 UTC
        let now: Timestamp = "2024-06-01T10:30:45Z".parse().unwrap();
        let request = ConversionRequest::resolve(&params, now);
        assert_eq!(request.base_date.to_string(), "2024-06-01");
        assert_eq!(format_hhmm(request.base_start_time), "10:30");
        // default end is start + 8h
        assert_eq!(format_hhmm(request.base_end_time), "18:30");
    }

    #[test]
    fn default_end_time_wraps_past_midnight() {
        let params = ConversionParams {
            time: Some("20:00".to_string()),
            base_zone: Some("Etc/UTC".to_string()),
            ..Default::default()
        };
        let request =
            ConversionRequest::resolve(&params, Timestamp::UNIX_EPOCH);
        assert_eq!(format_hhmm(request.base_end_time), "04:00");
    }

    #[test]
    fn search_fallback_applies_only_without_explicit_zones() {
        let now = Timestamp::UNIX_EPOCH;

        let suggested = ConversionRequest::resolve(
            &ConversionParams {
                search: Some("ny office".to_string()),
                ..Default::default()
            },
            now,
        );
        assert_eq!(suggested.target_zone_ids, vec!["America/New_York"]);

        let explicit = ConversionRequest::resolve(
            &ConversionParams {
                search: Some("ny office".to_string()),
                zones: vec!["Europe/London".to_string()],
                ..Default::default()
            },
            now,
        );
        assert_eq!(explicit.target_zone_ids, vec!["Europe/London"]);

        let unmatched = ConversionRequest::resolve(
            &ConversionParams {
                search: Some("qqq zzz".to_string()),
                ..Default::default()
            },
            now,
        );
        assert_eq!(
            unmatched.target_zone_ids.len(),
            zones::DEFAULT_TARGET_ZONES.len()
        );
    }
}
