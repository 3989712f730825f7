//! Element ids, class names, and data attributes shared between the
//! server-rendered page and the wasm controller. Both sides use these
//! constants so the partial-update contract cannot drift.

pub const TIME_FORM: &str = "timeForm";
pub const DATE_INPUT: &str = "dateInput";
pub const START_TIME_INPUT: &str = "startTimeInput";
pub const END_TIME_INPUT: &str = "endTimeInput";
pub const BASE_ZONE_SELECT: &str = "baseZoneSelect";

pub const SLIDER_CONTAINER: &str = "rangeSliderContainer";
pub const START_THUMB: &str = "startThumb";
pub const END_THUMB: &str = "endThumb";
pub const RANGE_HIGHLIGHT: &str = "rangeHighlight";
pub const TRACK_MASK: &str = "trackMask";

pub const BASE_RESULT_SLIDER_CONTAINER: &str = "baseResultSliderContainer";
pub const BASE_RESULT_START_THUMB: &str = "baseResultStartThumb";
pub const BASE_RESULT_END_THUMB: &str = "baseResultEndThumb";
pub const BASE_RESULT_RANGE_HIGHLIGHT: &str = "baseResultRangeHighlight";
pub const BASE_RESULT_MASK: &str = "baseResultMask";

pub const ZONE_CHECKBOXES: &str = "timezoneCheckboxes";
pub const ADDITIONAL_ZONE_SELECT: &str = "additionalTimezoneSelect";
pub const RESULTS_CONTAINER: &str = "resultsContainer";

pub const ZONE_CHECKBOX_CLASS: &str = "timezone-checkbox";
pub const RESULT_MASK_CLASS: &str = "result-mask";
pub const ROW_START_TIME_CLASS: &str = "row-start-time";
pub const ROW_END_TIME_CLASS: &str = "row-end-time";
pub const ROW_DATE_CLASS: &str = "row-date";
pub const ROW_DAY_DIFF_CLASS: &str = "row-day-diff";

pub const DATA_ROW_ID: &str = "data-row-id";
pub const DATA_START_MINUTES: &str = "data-start-minutes";
pub const DATA_END_MINUTES: &str = "data-end-minutes";
pub const DATA_DAY_DIFF: &str = "data-day-diff";
pub const DATA_LOCAL_DATE: &str = "data-local-date";

/// Marks a request issued by the controller's partial-update path.
pub const FETCH_HEADER: (&str, &str) = ("X-Requested-With", "fetch");

/// sessionStorage key for restoring the scroll offset after a commit.
pub const SCROLL_STORAGE_KEY: &str = "scrollPosition";
