//! The static timezone reference table.
//!
//! Defined once at startup and never mutated. The `keywords` lists back the
//! free-text zone suggestion: a zone matches when any of its keywords is a
//! substring of the lowercased query.

/// Work hours used when a zone does not configure its own interval.
pub const DEFAULT_WORK_HOURS: (i8, i8) = (9, 18);

pub const DEFAULT_BASE_ZONE: &str = "Asia/Tokyo";

pub const DEFAULT_TARGET_ZONES: &[&str] = &[
    "America/Los_Angeles",
    "America/New_York",
    "Europe/London",
    "Europe/Paris",
    "Asia/Singapore",
    "Australia/Sydney",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneDef {
    /// Canonical IANA identifier, e.g. "Asia/Tokyo".
    pub id: &'static str,
    pub label: &'static str,
    /// Half-open hour interval `[start, end)`; `None` means no working-hours
    /// flagging beyond the default.
    pub work_hours: Option<(i8, i8)>,
    pub keywords: &'static [&'static str],
}

impl TimeZoneDef {
    /// The configured interval, or the `[9, 18)` default.
    pub fn work_hours_or_default(&self) -> (i8, i8) {
        self.work_hours.unwrap_or(DEFAULT_WORK_HOURS)
    }
}

pub fn zone_table() -> &'static [TimeZoneDef] {
    ZONE_TABLE
}

pub fn find_zone(id: &str) -> Option<&'static TimeZoneDef> {
    ZONE_TABLE.iter().find(|tz| tz.id == id)
}

/// Suggest zone ids for a free-text query by keyword containment.
///
/// The query is lowercased and each zone matches when the query contains one
/// of its keywords. Results keep table order; ids are unique in the table so
/// no further deduplication is needed. An empty result is the caller's cue
/// to fall back to [`DEFAULT_TARGET_ZONES`].
pub fn suggest_zones(query: &str) -> Vec<&'static str> {
    let normalized = query.to_lowercase();
    ZONE_TABLE
        .iter()
        .filter(|tz| tz.keywords.iter().any(|k| normalized.contains(k)))
        .map(|tz| tz.id)
        .collect()
}

const ZONE_TABLE: &[TimeZoneDef] = &[
    TimeZoneDef {
        id: "Asia/Tokyo",
        label: "Tokyo (JST)",
        work_hours: Some((9, 18)),
        keywords: &["tokyo", "jst", "japan"],
    },
    TimeZoneDef {
        id: "Etc/UTC",
        label: "UTC (Coordinated Universal Time)",
        work_hours: None,
        keywords: &["utc", "universal time"],
    },
    TimeZoneDef {
        id: "America/Los_Angeles",
        label: "Los Angeles (PST/PDT)",
        work_hours: Some((9, 18)),
        keywords: &["los angeles", "la", "pdt", "pst"],
    },
    TimeZoneDef {
        id: "America/New_York",
        label: "New York (EST/EDT)",
        work_hours: Some((9, 18)),
        keywords: &["new york", "ny", "est", "edt", "nyc"],
    },
    TimeZoneDef {
        id: "Europe/London",
        label: "London (GMT/BST)",
        work_hours: Some((9, 18)),
        keywords: &["london", "gmt", "bst", "uk"],
    },
    TimeZoneDef {
        id: "Europe/Paris",
        label: "Paris (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["paris", "cet", "cest", "france"],
    },
    TimeZoneDef {
        id: "Asia/Singapore",
        label: "Singapore (SGT)",
        work_hours: Some((9, 18)),
        keywords: &["singapore", "sgt"],
    },
    TimeZoneDef {
        id: "Australia/Sydney",
        label: "Sydney (AEST/AEDT)",
        work_hours: Some((9, 18)),
        keywords: &["sydney", "aest", "aedt", "australia"],
    },
    TimeZoneDef {
        id: "Asia/Seoul",
        label: "Seoul (KST)",
        work_hours: Some((9, 18)),
        keywords: &["seoul", "kst", "korea"],
    },
    TimeZoneDef {
        id: "Asia/Shanghai",
        label: "Beijing (CST)",
        work_hours: Some((9, 18)),
        keywords: &["beijing", "china", "shanghai"],
    },
    TimeZoneDef {
        id: "Asia/Hong_Kong",
        label: "Hong Kong (HKT)",
        work_hours: Some((9, 18)),
        keywords: &["hong kong", "hkt"],
    },
    TimeZoneDef {
        id: "Asia/Taipei",
        label: "Taipei (CST)",
        work_hours: Some((9, 18)),
        keywords: &["taipei", "taiwan"],
    },
    TimeZoneDef {
        id: "Asia/Kuala_Lumpur",
        label: "Kuala Lumpur (MYT)",
        work_hours: Some((9, 18)),
        keywords: &["kuala lumpur", "myt", "malaysia"],
    },
    TimeZoneDef {
        id: "Asia/Bangkok",
        label: "Bangkok (ICT)",
        work_hours: Some((9, 18)),
        keywords: &["bangkok", "thailand", "ict"],
    },
    TimeZoneDef {
        id: "Asia/Jakarta",
        label: "Jakarta (WIB)",
        work_hours: Some((9, 18)),
        keywords: &["jakarta", "indonesia", "wib"],
    },
    TimeZoneDef {
        id: "Asia/Manila",
        label: "Manila (PHT)",
        work_hours: Some((9, 18)),
        keywords: &["manila", "philippines", "pht"],
    },
    TimeZoneDef {
        id: "Asia/Dubai",
        label: "Dubai (GST)",
        work_hours: Some((9, 18)),
        keywords: &["dubai", "uae", "gst"],
    },
    TimeZoneDef {
        id: "Asia/Kolkata",
        label: "Kolkata (IST)",
        work_hours: Some((9, 18)),
        keywords: &["india", "kolkata", "ist"],
    },
    TimeZoneDef {
        id: "Europe/Berlin",
        label: "Berlin (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["berlin", "germany"],
    },
    TimeZoneDef {
        id: "Europe/Rome",
        label: "Rome (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["rome", "italy"],
    },
    TimeZoneDef {
        id: "Europe/Madrid",
        label: "Madrid (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["madrid", "spain"],
    },
    TimeZoneDef {
        id: "Europe/Moscow",
        label: "Moscow (MSK)",
        work_hours: Some((9, 18)),
        keywords: &["moscow", "russia", "msk"],
    },
    TimeZoneDef {
        id: "Europe/Istanbul",
        label: "Istanbul (TRT)",
        work_hours: Some((9, 18)),
        keywords: &["istanbul", "turkey", "trt"],
    },
    TimeZoneDef {
        id: "Europe/Warsaw",
        label: "Warsaw (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["warsaw", "poland"],
    },
    TimeZoneDef {
        id: "Europe/Athens",
        label: "Athens (EET/EEST)",
        work_hours: Some((9, 18)),
        keywords: &["athens", "greece"],
    },
    TimeZoneDef {
        id: "Europe/Stockholm",
        label: "Stockholm (CET/CEST)",
        work_hours: Some((9, 18)),
        keywords: &["stockholm", "sweden"],
    },
    TimeZoneDef {
        id: "America/Toronto",
        label: "Toronto (EST/EDT)",
        work_hours: Some((9, 18)),
        keywords: &["toronto", "canada"],
    },
    TimeZoneDef {
        id: "America/Chicago",
        label: "Chicago (CST/CDT)",
        work_hours: Some((9, 18)),
        keywords: &["chicago", "cdt"],
    },
    TimeZoneDef {
        id: "America/Denver",
        label: "Denver (MST/MDT)",
        work_hours: Some((9, 18)),
        keywords: &["denver", "mdt"],
    },
    TimeZoneDef {
        id: "America/Phoenix",
        label: "Phoenix (MST)",
        work_hours: Some((9, 18)),
        keywords: &["phoenix", "arizona", "mst"],
    },
    TimeZoneDef {
        id: "America/Vancouver",
        label: "Vancouver (PST/PDT)",
        work_hours: Some((9, 18)),
        keywords: &["vancouver"],
    },
    TimeZoneDef {
        id: "America/Mexico_City",
        label: "Mexico City (CST/CDT)",
        work_hours: Some((9, 18)),
        keywords: &["mexico city", "mexico"],
    },
    TimeZoneDef {
        id: "America/Bogota",
        label: "Bogota (COT)",
        work_hours: Some((9, 18)),
        keywords: &["bogota", "colombia", "cot"],
    },
    TimeZoneDef {
        id: "America/Lima",
        label: "Lima (PET)",
        work_hours: Some((9, 18)),
        keywords: &["lima", "peru", "pet"],
    },
    TimeZoneDef {
        id: "America/Santiago",
        label: "Santiago (CLT/CLST)",
        work_hours: Some((9, 18)),
        keywords: &["santiago", "chile", "clt"],
    },
    TimeZoneDef {
        id: "America/Sao_Paulo",
        label: "Sao Paulo (BRT)",
        work_hours: Some((9, 18)),
        keywords: &["sao paulo", "brazil", "brt"],
    },
    TimeZoneDef {
        id: "America/Argentina/Buenos_Aires",
        label: "Buenos Aires (ART)",
        work_hours: Some((9, 18)),
        keywords: &["buenos aires", "argentina", "art"],
    },
    TimeZoneDef {
        id: "Africa/Cairo",
        label: "Cairo (EET)",
        work_hours: Some((9, 18)),
        keywords: &["cairo", "egypt"],
    },
    TimeZoneDef {
        id: "Africa/Johannesburg",
        label: "Johannesburg (SAST)",
        work_hours: Some((9, 18)),
        keywords: &["johannesburg", "south africa", "sast"],
    },
    TimeZoneDef {
        id: "Africa/Nairobi",
        label: "Nairobi (EAT)",
        work_hours: Some((9, 18)),
        keywords: &["nairobi", "kenya", "eat"],
    },
    TimeZoneDef {
        id: "Pacific/Auckland",
        label: "Auckland (NZST/NZDT)",
        work_hours: Some((9, 18)),
        keywords: &["auckland", "new zealand", "nzst", "nzdt"],
    },
    TimeZoneDef {
        id: "Pacific/Honolulu",
        label: "Honolulu (HST)",
        work_hours: Some((9, 18)),
        keywords: &["honolulu", "hawaii", "hst"],
    },
    TimeZoneDef {
        id: "Pacific/Fiji",
        label: "Fiji (FJT/FJST)",
        work_hours: Some((9, 18)),
        keywords: &["fiji", "fjt"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, tz) in zone_table().iter().enumerate() {
            assert!(
                zone_table().iter().skip(i + 1).all(|o| o.id != tz.id),
                "duplicate zone id {}",
                tz.id
            );
        }
    }

    #[test]
    fn suggestion_matches_keyword_substring() {
        // "ny office" contains the keyword "ny"
        let ids = suggest_zones("ny office");
        assert_eq!(ids.iter().filter(|id| **id == "America/New_York").count(), 1);
    }

    #[test]
    fn suggestion_is_case_insensitive() {
        assert_eq!(suggest_zones("NY Office"), suggest_zones("ny office"));
    }

    #[test]
    fn suggestion_without_match_is_empty() {
        assert!(suggest_zones("qqq zzz").is_empty());
    }

    #[test]
    fn defaults_resolve_in_table() {
        assert!(find_zone(DEFAULT_BASE_ZONE).is_some());
        for id in DEFAULT_TARGET_ZONES {
            assert!(find_zone(id).is_some(), "missing default target {id}");
        }
    }

    #[test]
    fn work_hours_default_applies() {
        let utc = find_zone("Etc/UTC").unwrap();
        assert_eq!(utc.work_hours_or_default(), (9, 18));
    }
}
