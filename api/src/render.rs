//! Server-side page rendering.
//!
//! The markup is deliberately minimal: the contract surface is the set of
//! element ids, classes, and `data-` attributes in [`payloads::dom`], which
//! the wasm controller targets for drag handling and partial updates. The
//! same full document is served to plain and partial-fetch requests; the
//! controller extracts the fragments it needs.

use payloads::zones::{TimeZoneDef, zone_table};
use payloads::{TimeRow, day_diff_label, dom, range};

use crate::engine::{ConversionRequest, format_hhmm};

pub fn page(request: &ConversionRequest, rows: &[TimeRow]) -> String {
    let date = request.base_date.to_string();
    let start_time = format_hhmm(request.base_start_time);
    let end_time = format_hhmm(request.base_end_time);
    let start_minutes =
        range::parse_hhmm(&start_time).unwrap_or(0);
    let end_minutes = range::parse_hhmm(&end_time).unwrap_or(0);
    let start_pct = percent(start_minutes);
    let end_pct = percent(end_minutes);

    let mut html = String::with_capacity(16 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Time Zone Range Converter</title>\n",
    );
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<main>\n");

    render_form(
        &mut html, request, &date, &start_time, &end_time, start_pct, end_pct,
    );
    render_zone_picker(&mut html, request);
    render_results(&mut html, rows, start_pct, end_pct);

    html.push_str(
        "</main>\n<script type=\"module\" src=\"/assets/ui.js\"></script>\n\
         </body>\n</html>\n",
    );
    html
}

fn render_form(
    html: &mut String,
    request: &ConversionRequest,
    date: &str,
    start_time: &str,
    end_time: &str,
    start_pct: f64,
    end_pct: f64,
) {
    html.push_str(&format!(
        "<section>\n<h2>Base date and time</h2>\n\
         <form id=\"{form}\" method=\"get\">\n\
         <label>Base timezone\n<select id=\"{select}\" name=\"baseZone\">\n",
        form = dom::TIME_FORM,
        select = dom::BASE_ZONE_SELECT,
    ));
    for tz in zone_table() {
        let selected = if tz.id == request.base_zone_id {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            esc(tz.id),
            esc(tz.label),
        ));
    }
    html.push_str(&format!(
        "</select>\n</label>\n\
         <label>Date\n<input type=\"date\" id=\"{date_input}\" name=\"date\" \
         value=\"{date}\">\n</label>\n\
         <label>Start\n<input type=\"time\" step=\"60\" id=\"{start_input}\" \
         name=\"time\" value=\"{start_time}\">\n</label>\n\
         <label>End\n<input type=\"time\" step=\"60\" id=\"{end_input}\" \
         name=\"endTime\" value=\"{end_time}\">\n</label>\n",
        date_input = dom::DATE_INPUT,
        start_input = dom::START_TIME_INPUT,
        end_input = dom::END_TIME_INPUT,
    ));
    render_slider(
        html,
        SliderIds {
            container: dom::SLIDER_CONTAINER,
            highlight: dom::RANGE_HIGHLIGHT,
            start_thumb: dom::START_THUMB,
            end_thumb: dom::END_THUMB,
            mask_id: Some(dom::TRACK_MASK),
        },
        start_pct,
        end_pct,
    );
    html.push_str("</form>\n</section>\n");
}

fn render_zone_picker(html: &mut String, request: &ConversionRequest) {
    html.push_str(&format!(
        "<section>\n<h2>Timezones to compare</h2>\n<div id=\"{}\">\n",
        dom::ZONE_CHECKBOXES
    ));
    for tz in selected_zones(request) {
        let is_base = tz.id == request.base_zone_id;
        let disabled = if is_base { " disabled" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" class=\"{class}\" \
             name=\"zones\" value=\"{id}\" checked{disabled}> {label}{base}\
             </label>\n",
            class = dom::ZONE_CHECKBOX_CLASS,
            id = esc(tz.id),
            label = esc(tz.label),
            base = if is_base { " (base)" } else { "" },
        ));
    }
    html.push_str(&format!(
        "</div>\n<select id=\"{}\">\n<option value=\"\">Add a timezone\
         </option>\n",
        dom::ADDITIONAL_ZONE_SELECT
    ));
    for tz in available_zones(request) {
        html.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            esc(tz.id),
            esc(tz.label),
        ));
    }
    html.push_str("</select>\n</section>\n");
}

fn render_results(
    html: &mut String,
    rows: &[TimeRow],
    start_pct: f64,
    end_pct: f64,
) {
    html.push_str(&format!(
        "<section>\n<h2>Converted times</h2>\n<div id=\"{}\">\n",
        dom::RESULTS_CONTAINER
    ));
    for row in rows {
        render_row(html, row, start_pct, end_pct);
    }
    html.push_str("</div>\n</section>\n");
}

fn render_row(
    html: &mut String,
    row: &TimeRow,
    start_pct: f64,
    end_pct: f64,
) {
    let row_start =
        range::parse_hhmm(&row.local_start_time).unwrap_or(0);
    let row_end = range::parse_hhmm(&row.local_end_time).unwrap_or(0);
    html.push_str(&format!(
        "<div class=\"result-row\" {row_id}=\"{id}\" {start}=\"{row_start}\" \
         {end}=\"{row_end}\" {diff}=\"{day_diff}\" {date}=\"{local_date}\">\n",
        row_id = dom::DATA_ROW_ID,
        id = esc(&row.zone_id),
        start = dom::DATA_START_MINUTES,
        end = dom::DATA_END_MINUTES,
        diff = dom::DATA_DAY_DIFF,
        day_diff = row.day_diff,
        date = dom::DATA_LOCAL_DATE,
        local_date = esc(&row.local_date),
    ));
    html.push_str(&format!(
        "<div class=\"row-header\">\n\
         <span class=\"row-label\">{label}</span>\n\
         <span class=\"row-zone-id\">{id}</span>\n{base_badge}{working}\
         <span class=\"{start_class}\">{start_time}</span>\n\
         <span class=\"{end_class}\">{end_time}</span>\n\
         <span class=\"{date_class}\">{local_date}</span>\n\
         <span class=\"{diff_class}\">{diff_label}</span>\n\
         </div>\n",
        label = esc(&row.label),
        id = esc(&row.zone_id),
        base_badge = if row.is_base {
            "<span class=\"row-base-badge\">base</span>\n"
        } else {
            ""
        },
        working = if row.is_working_hours {
            "<span class=\"row-working-hours\">working hours</span>\n"
        } else {
            ""
        },
        start_class = dom::ROW_START_TIME_CLASS,
        start_time = row.local_start_time,
        end_class = dom::ROW_END_TIME_CLASS,
        end_time = row.local_end_time,
        date_class = dom::ROW_DATE_CLASS,
        local_date = esc(&row.local_date),
        diff_class = dom::ROW_DAY_DIFF_CLASS,
        diff_label = day_diff_label(row.day_diff),
    ));
    if row.is_base {
        render_slider(
            html,
            SliderIds {
                container: dom::BASE_RESULT_SLIDER_CONTAINER,
                highlight: dom::BASE_RESULT_RANGE_HIGHLIGHT,
                start_thumb: dom::BASE_RESULT_START_THUMB,
                end_thumb: dom::BASE_RESULT_END_THUMB,
                mask_id: Some(dom::BASE_RESULT_MASK),
            },
            start_pct,
            end_pct,
        );
    } else {
        html.push_str(&format!(
            "<div class=\"track\"><div class=\"gradient\"></div>\
             <div class=\"mask {}\"></div></div>\n",
            dom::RESULT_MASK_CLASS
        ));
    }
    html.push_str("</div>\n");
}

struct SliderIds {
    container: &'static str,
    highlight: &'static str,
    start_thumb: &'static str,
    end_thumb: &'static str,
    mask_id: Option<&'static str>,
}

fn render_slider(
    html: &mut String,
    ids: SliderIds,
    start_pct: f64,
    end_pct: f64,
) {
    let mask = match ids.mask_id {
        Some(id) => format!(
            "<div id=\"{id}\" class=\"mask {}\"></div>",
            dom::RESULT_MASK_CLASS
        ),
        None => String::new(),
    };
    html.push_str(&format!(
        "<div id=\"{container}\" class=\"slider\">\n\
         <div class=\"track\"><div class=\"gradient\"></div>{mask}</div>\n\
         <div id=\"{highlight}\" class=\"highlight\" \
         style=\"left:{start_pct:.4}%;width:{width:.4}%\"></div>\n\
         <div id=\"{start_thumb}\" class=\"thumb\" \
         style=\"left:{start_pct:.4}%\"></div>\n\
         <div id=\"{end_thumb}\" class=\"thumb\" \
         style=\"left:{end_pct:.4}%\"></div>\n\
         </div>\n",
        container = ids.container,
        highlight = ids.highlight,
        start_thumb = ids.start_thumb,
        end_thumb = ids.end_thumb,
        width = (end_pct - start_pct).max(0.0),
    ));
}

fn selected_zones(
    request: &ConversionRequest,
) -> impl Iterator<Item = &'static TimeZoneDef> {
    let base = request.base_zone_id.clone();
    let targets = request.target_zone_ids.clone();
    zone_table()
        .iter()
        .filter(move |tz| tz.id == base || targets.iter().any(|t| t == tz.id))
}

fn available_zones(
    request: &ConversionRequest,
) -> impl Iterator<Item = &'static TimeZoneDef> {
    let base = request.base_zone_id.clone();
    let targets = request.target_zone_ids.clone();
    zone_table().iter().filter(move |tz| {
        tz.id != base && !targets.iter().any(|t| t == tz.id)
    })
}

fn percent(minutes: i32) -> f64 {
    minutes as f64 / range::MINUTES_PER_DAY as f64 * 100.0
}

fn esc(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Positioning only: the thumbs, highlight, and mask must overlay the track
// for the pointer-to-minutes mapping to work. Visual styling is out of
// scope.
const STYLE: &str = "<style>\n\
.slider{position:relative;height:48px;user-select:none}\n\
.track{position:absolute;left:0;right:0;top:8px;height:32px;overflow:hidden;\
border:1px solid #ccc;border-radius:4px}\n\
.result-row .track{position:relative;margin-top:4px}\n\
.gradient{position:absolute;inset:0;background:linear-gradient(to right,\
#3b5998 0%,#5a7db8 25%,#e8f0f8 50%,#d8b090 75%,#3b5998 100%)}\n\
.mask{position:absolute;inset:0;background:#fff;pointer-events:none}\n\
.highlight{position:absolute;top:8px;height:32px;cursor:grab}\n\
.thumb{position:absolute;top:8px;height:32px;width:10px;background:#fff;\
border:1px solid #36c;border-radius:4px;transform:translate(-50%,0)}\n\
</style>\n";
