//! The Interactive Range Controller.
//!
//! Owns the slider's minute range and every per-row offset, and is the only
//! thing that mutates them: pointer handlers, time-field edits, and
//! `commit` are its mutation entry points. Drag frames update the page
//! purely from the in-memory model; the server is consulted once per
//! commit, and its response replaces the results region wholesale before
//! offsets are re-captured.

use std::cell::RefCell;
use std::rc::Rc;

use jiff::civil::Date;
use payloads::range::{
    self, DragMode, RangeState, RevealSegment, RowOffsets, Snap,
};
use payloads::{ApiClient, FormState, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Document, DomParser, Element, Event,
    EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement,
    MouseEvent, SupportedType, TouchEvent, Window,
};

pub struct RangeController {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    window: Window,
    document: Document,
    client: ApiClient,
    snap: Snap,
    range: RangeState,
    /// Slider minutes the current row offsets were captured against.
    reference: RangeState,
    drag: Option<DragMode>,
    active_slider: Option<usize>,
    sliders: Vec<Slider>,
    rows: Vec<Row>,
    date_input: HtmlInputElement,
    start_input: HtmlInputElement,
    end_input: HtmlInputElement,
    base_zone_select: HtmlSelectElement,
    handlers: Option<Handlers>,
}

/// The primary form slider or the base result row's slider. Both mirror
/// the same range; the latter is replaced on every partial update.
struct Slider {
    primary: bool,
    container: Element,
    start_thumb: HtmlElement,
    end_thumb: HtmlElement,
    highlight: HtmlElement,
    mask: Option<HtmlElement>,
}

struct Row {
    offsets: RowOffsets,
    mask: Option<HtmlElement>,
    start_time: Option<Element>,
    end_time: Option<Element>,
    date: Option<Element>,
    day_diff: Option<Element>,
}

#[derive(Clone, Copy)]
enum Endpoint {
    Start,
    End,
}

/// Handlers that get re-attached whenever a server refresh replaces their
/// elements. Created once; re-adding the same function to an element is a
/// no-op, so rebinding everything after a refresh is safe.
struct Handlers {
    thumb_mouse_down: Closure<dyn FnMut(MouseEvent)>,
    thumb_touch_start: Closure<dyn FnMut(TouchEvent)>,
    highlight_mouse_down: Closure<dyn FnMut(MouseEvent)>,
    highlight_touch_start: Closure<dyn FnMut(TouchEvent)>,
    zone_control_change: Closure<dyn FnMut(Event)>,
    additional_select_change: Closure<dyn FnMut(Event)>,
}

impl RangeController {
    /// Attach to the server-rendered page. Returns `Ok(None)` when the
    /// essential elements are missing, in which case the page stays a
    /// plain form.
    pub fn mount(snap: Snap) -> Result<Option<Self>, JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let (
            Some(date_input),
            Some(start_input),
            Some(end_input),
            Some(base_zone_select),
        ) = (
            input_by_id(&document, dom::DATE_INPUT),
            input_by_id(&document, dom::START_TIME_INPUT),
            input_by_id(&document, dom::END_TIME_INPUT),
            select_by_id(&document, dom::BASE_ZONE_SELECT),
        )
        else {
            return Ok(None);
        };
        let Some(primary) = capture_slider(
            &document,
            true,
            dom::SLIDER_CONTAINER,
            dom::START_THUMB,
            dom::END_THUMB,
            dom::RANGE_HIGHLIGHT,
            dom::TRACK_MASK,
        ) else {
            return Ok(None);
        };

        restore_scroll(&window);

        let initial = RangeState::new(
            range::parse_hhmm(&start_input.value()).unwrap_or(0),
            range::parse_hhmm(&end_input.value()).unwrap_or(0),
        );
        let address = window.location().origin().unwrap_or_default();

        let inner = Rc::new(RefCell::new(Inner {
            window,
            document,
            client: ApiClient::new(address),
            snap,
            range: initial,
            reference: initial,
            drag: None,
            active_slider: None,
            sliders: vec![primary],
            rows: Vec::new(),
            date_input,
            start_input,
            end_input,
            base_zone_select,
            handlers: None,
        }));

        install_handlers(&inner);
        attach_document_listeners(&inner);
        attach_field_listeners(&inner);

        refresh_base_slider(&inner);
        bind_sliders(&inner);
        bind_zone_controls(&inner);
        {
            let mut borrow = inner.borrow_mut();
            capture_rows(&mut borrow);
        }
        // initial render only aligns the page with the model; no commit
        update_display(&inner);

        Ok(Some(Self { inner }))
    }

    /// Keep the controller (and its page-lifetime listeners) alive.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

// --- drag lifecycle -------------------------------------------------------

fn begin_thumb_drag(
    rc: &Rc<RefCell<Inner>>,
    target: Option<EventTarget>,
) -> bool {
    let Some(target) = target else { return false };
    let target: JsValue = target.into();
    let mut inner = rc.borrow_mut();
    let mut hit = None;
    for (i, slider) in inner.sliders.iter().enumerate() {
        if js_eq(&slider.start_thumb, &target) {
            hit = Some((i, DragMode::Start));
        } else if js_eq(&slider.end_thumb, &target) {
            hit = Some((i, DragMode::End));
        }
    }
    match hit {
        Some((i, mode)) => {
            inner.drag = Some(mode);
            inner.active_slider = Some(i);
            true
        }
        None => false,
    }
}

fn begin_range_drag(
    rc: &Rc<RefCell<Inner>>,
    target: Option<EventTarget>,
    client_x: f64,
) -> bool {
    let Some(target) = target else { return false };
    let target: JsValue = target.into();
    let mut inner = rc.borrow_mut();
    let hit = inner
        .sliders
        .iter()
        .position(|slider| js_eq(&slider.highlight, &target));
    match hit {
        Some(i) => {
            inner.drag = Some(DragMode::Range {
                origin_x: client_x,
                origin: inner.range,
            });
            inner.active_slider = Some(i);
            true
        }
        None => false,
    }
}

fn pointer_move(rc: &Rc<RefCell<Inner>>, client_x: f64) -> bool {
    let (drag, rect, snap) = {
        let inner = rc.borrow();
        let (Some(drag), Some(index)) = (inner.drag, inner.active_slider)
        else {
            return false;
        };
        let Some(slider) = inner.sliders.get(index) else {
            return false;
        };
        (drag, slider.container.get_bounding_client_rect(), inner.snap)
    };
    if rect.width() <= 0.0 {
        return false;
    }

    {
        let mut inner = rc.borrow_mut();
        match drag {
            DragMode::Start => {
                let fraction = (client_x - rect.left()) / rect.width();
                inner.range.start_minutes =
                    range::minutes_at_fraction(fraction, snap);
            }
            DragMode::End => {
                let fraction = (client_x - rect.left()) / rect.width();
                inner.range.end_minutes =
                    range::minutes_at_fraction(fraction, snap);
            }
            DragMode::Range { origin_x, origin } => {
                let delta = range::delta_at_displacement(
                    client_x - origin_x,
                    rect.width(),
                    snap,
                );
                inner.range = RangeState::shifted(origin, delta);
            }
        }
    }
    update_display(rc);
    true
}

fn pointer_up(rc: &Rc<RefCell<Inner>>) {
    {
        let mut inner = rc.borrow_mut();
        if inner.drag.is_none() {
            return;
        }
        inner.drag = None;
        inner.active_slider = None;
    }
    // releasing a drag always commits
    commit(rc);
}

// --- field edits and zone controls ----------------------------------------

fn field_change(rc: &Rc<RefCell<Inner>>, endpoint: Endpoint) {
    let parsed = {
        let inner = rc.borrow();
        let input = match endpoint {
            Endpoint::Start => &inner.start_input,
            Endpoint::End => &inner.end_input,
        };
        range::parse_hhmm(&input.value())
    };
    match parsed {
        Some(minutes) => {
            {
                let mut inner = rc.borrow_mut();
                match endpoint {
                    Endpoint::Start => inner.range.start_minutes = minutes,
                    Endpoint::End => inner.range.end_minutes = minutes,
                }
            }
            update_display(rc);
            commit(rc);
        }
        None => {
            // invalid edit: revert the field to the current state
            let inner = rc.borrow();
            let (input, minutes) = match endpoint {
                Endpoint::Start => {
                    (&inner.start_input, inner.range.start_minutes)
                }
                Endpoint::End => (&inner.end_input, inner.range.end_minutes),
            };
            input.set_value(&range::minutes_to_hhmm(minutes));
        }
    }
}

fn base_zone_changed(rc: &Rc<RefCell<Inner>>) {
    let (document, zone) = {
        let inner = rc.borrow();
        (inner.document.clone(), inner.base_zone_select.value())
    };
    // the new base zone must stay in the compared set
    if let Some(checkbox) = find_zone_checkbox(&document, &zone) {
        checkbox.set_checked(true);
    }
    commit(rc);
}

fn additional_zone_selected(
    rc: &Rc<RefCell<Inner>>,
    target: Option<EventTarget>,
) {
    let Some(select) = target
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    let zone = select.value();
    if zone.is_empty() {
        return;
    }
    let label = select
        .query_selector(&format!("option[value=\"{zone}\"]"))
        .ok()
        .flatten()
        .and_then(|option| option.text_content())
        .unwrap_or_else(|| zone.clone());
    if let Err(e) = ensure_zone_checkbox(rc, &zone, &label) {
        tracing::error!("failed to add zone checkbox: {e:?}");
    }
    select.set_value("");
    commit(rc);
}

fn ensure_zone_checkbox(
    rc: &Rc<RefCell<Inner>>,
    zone: &str,
    label_text: &str,
) -> Result<(), JsValue> {
    let document = rc.borrow().document.clone();
    if let Some(existing) = find_zone_checkbox(&document, zone) {
        existing.set_checked(true);
        return Ok(());
    }
    let Some(container) = document.get_element_by_id(dom::ZONE_CHECKBOXES)
    else {
        return Ok(());
    };

    let label = document.create_element("label")?;
    let input: HtmlInputElement =
        document.create_element("input")?.unchecked_into();
    input.set_type("checkbox");
    input.set_class_name(dom::ZONE_CHECKBOX_CLASS);
    input.set_name("zones");
    input.set_value(zone);
    input.set_checked(true);
    let text = document.create_element("span")?;
    text.set_text_content(Some(&format!(" {label_text}")));
    label.append_child(&input)?;
    label.append_child(&text)?;
    container.append_child(&label)?;

    if let Some(handlers) = &rc.borrow().handlers {
        listen(&input, "change", func(&handlers.zone_control_change));
    }
    Ok(())
}

fn find_zone_checkbox(
    document: &Document,
    zone: &str,
) -> Option<HtmlInputElement> {
    document
        .query_selector(&format!(
            ".{}[value=\"{zone}\"]",
            dom::ZONE_CHECKBOX_CLASS
        ))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

// --- display --------------------------------------------------------------

fn update_display(rc: &Rc<RefCell<Inner>>) {
    let mut inner = rc.borrow_mut();
    inner.range = inner.range.normalized();
    let range = inner.range;

    for slider in &inner.sliders {
        set_percent(&slider.start_thumb, "left", range.start_percent());
        set_percent(&slider.end_thumb, "left", range.end_percent());
        set_percent(&slider.highlight, "left", range.start_percent());
        set_percent(
            &slider.highlight,
            "width",
            range.end_percent() - range.start_percent(),
        );
        if let Some(mask) = &slider.mask {
            set_mask(mask, range.start_percent(), range.end_percent());
        }
    }

    inner
        .start_input
        .set_value(&range::minutes_to_hhmm(range.start_minutes));
    inner
        .end_input
        .set_value(&range::minutes_to_hhmm(range.end_minutes));

    for row in &inner.rows {
        let display = row.offsets.display(range);
        if let Some(mask) = &row.mask {
            set_mask(mask, display.start_percent(), display.end_percent());
        }
        if let Some(el) = &row.start_time {
            el.set_text_content(Some(&range::minutes_to_hhmm(
                display.start_minutes,
            )));
        }
        if let Some(el) = &row.end_time {
            el.set_text_content(Some(&range::minutes_to_hhmm(
                display.end_minutes,
            )));
        }
        if let (Some(el), Some(date)) = (&row.date, display.local_date) {
            el.set_text_content(Some(&date.to_string()));
        }
        if let Some(el) = &row.day_diff {
            el.set_text_content(Some(&payloads::day_diff_label(
                display.day_diff,
            )));
        }
    }
}

fn set_percent(element: &HtmlElement, property: &str, percent: f64) {
    let _ = element
        .style()
        .set_property(property, &format!("{percent:.4}%"));
}

fn set_mask(mask: &HtmlElement, start_percent: f64, end_percent: f64) {
    let css =
        mask_image_css(&range::reveal_segments(start_percent, end_percent));
    let style = mask.style();
    let _ = style.set_property("-webkit-mask-image", &css);
    let _ = style.set_property("mask-image", &css);
}

/// Build the mask-image that punches reveal holes into the white cover:
/// black keeps the cover, transparent shows the gradient underneath.
fn mask_image_css(segments: &[RevealSegment]) -> String {
    let mut stops = String::from("black 0%");
    for segment in segments {
        stops.push_str(&format!(
            ", black {from:.4}%, transparent {from:.4}%, \
             transparent {to:.4}%, black {to:.4}%",
            from = segment.from_percent,
            to = segment.to_percent,
        ));
    }
    stops.push_str(", black 100%");
    format!("linear-gradient(to right, {stops})")
}

// --- commit and partial update --------------------------------------------

fn commit(rc: &Rc<RefCell<Inner>>) {
    let (query, current, window, client) = {
        let inner = rc.borrow();
        let form = read_form_state(&inner);
        let query = form.to_query_string();
        let current = inner
            .window
            .location()
            .search()
            .unwrap_or_default()
            .trim_start_matches('?')
            .to_string();
        (query, current, inner.window.clone(), inner.client.clone())
    };
    if query == current {
        return;
    }
    save_scroll(&window);

    let rc = rc.clone();
    spawn_local(async move {
        match client.fetch_page(&query).await {
            Ok(html) => {
                if let Err(e) = apply_update(&rc, &html, &query) {
                    tracing::error!("failed to apply partial update: {e:?}");
                    navigate(&window, &query);
                }
            }
            Err(e) => {
                // non-graceful recovery: reload with the same query
                tracing::error!("partial update fetch failed: {e}");
                navigate(&window, &query);
            }
        }
    });
}

fn read_form_state(inner: &Inner) -> FormState {
    let mut zones = Vec::new();
    if let Ok(nodes) = inner
        .document
        .query_selector_all(&format!(".{}", dom::ZONE_CHECKBOX_CLASS))
    {
        for i in 0..nodes.length() {
            let Some(checkbox) = nodes
                .get(i)
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            if checkbox.checked() && !zones.contains(&checkbox.value()) {
                zones.push(checkbox.value());
            }
        }
    }
    FormState {
        date: inner.date_input.value(),
        time: range::minutes_to_hhmm(inner.range.start_minutes),
        end_time: range::minutes_to_hhmm(inner.range.end_minutes),
        base_zone: inner.base_zone_select.value(),
        zones,
    }
}

fn apply_update(
    rc: &Rc<RefCell<Inner>>,
    html: &str,
    query: &str,
) -> Result<(), JsValue> {
    let (window, document) = {
        let inner = rc.borrow();
        (inner.window.clone(), inner.document.clone())
    };
    let fresh = DomParser::new()?
        .parse_from_string(html, SupportedType::TextHtml)?;

    replace_by_id(&document, &fresh, dom::RESULTS_CONTAINER)?;
    replace_by_id(&document, &fresh, dom::ZONE_CHECKBOXES)?;
    replace_by_id(&document, &fresh, dom::ADDITIONAL_ZONE_SELECT)?;

    refresh_base_slider(rc);
    bind_sliders(rc);
    bind_zone_controls(rc);
    {
        let mut inner = rc.borrow_mut();
        // fresh rows were rendered against the committed minutes
        inner.reference = inner.range;
        capture_rows(&mut inner);
    }
    update_display(rc);

    // only rewrite history once the refresh succeeded
    window.history()?.replace_state_with_url(
        &JsValue::NULL,
        "",
        Some(&format!("?{query}")),
    )?;
    Ok(())
}

fn replace_by_id(
    document: &Document,
    fresh: &Document,
    id: &str,
) -> Result<(), JsValue> {
    let (Some(new_el), Some(old_el)) =
        (fresh.get_element_by_id(id), document.get_element_by_id(id))
    else {
        return Ok(());
    };
    let Some(parent) = old_el.parent_node() else {
        return Ok(());
    };
    parent.replace_child(&new_el, &old_el)?;
    Ok(())
}

fn navigate(window: &Window, query: &str) {
    let _ = window.location().set_search(query);
}

// --- element capture ------------------------------------------------------

fn capture_slider(
    document: &Document,
    primary: bool,
    container_id: &str,
    start_thumb_id: &str,
    end_thumb_id: &str,
    highlight_id: &str,
    mask_id: &str,
) -> Option<Slider> {
    Some(Slider {
        primary,
        container: document.get_element_by_id(container_id)?,
        start_thumb: html_by_id(document, start_thumb_id)?,
        end_thumb: html_by_id(document, end_thumb_id)?,
        highlight: html_by_id(document, highlight_id)?,
        mask: html_by_id(document, mask_id),
    })
}

/// Drop the base result slider and recapture it from the refreshed
/// results region. Any in-flight drag index is stale afterwards.
fn refresh_base_slider(rc: &Rc<RefCell<Inner>>) {
    let mut inner = rc.borrow_mut();
    inner.sliders.retain(|slider| slider.primary);
    if let Some(slider) = capture_slider(
        &inner.document,
        false,
        dom::BASE_RESULT_SLIDER_CONTAINER,
        dom::BASE_RESULT_START_THUMB,
        dom::BASE_RESULT_END_THUMB,
        dom::BASE_RESULT_RANGE_HIGHLIGHT,
        dom::BASE_RESULT_MASK,
    ) {
        inner.sliders.push(slider);
    }
    inner.active_slider = None;
}

fn capture_rows(inner: &mut Inner) {
    inner.rows.clear();
    let Ok(nodes) = inner
        .document
        .query_selector_all(&format!("[{}]", dom::DATA_ROW_ID))
    else {
        return;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes
            .get(i)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let offsets = RowOffsets::capture(
            attr_i32(&el, dom::DATA_START_MINUTES),
            attr_i32(&el, dom::DATA_END_MINUTES),
            attr_i32(&el, dom::DATA_DAY_DIFF),
            el.get_attribute(dom::DATA_LOCAL_DATE)
                .and_then(|value| value.parse::<Date>().ok()),
            inner.reference,
        );
        let select = |selector: String| {
            el.query_selector(&selector).ok().flatten()
        };
        inner.rows.push(Row {
            offsets,
            mask: select(format!(".{}", dom::RESULT_MASK_CLASS))
                .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
            start_time: select(format!(".{}", dom::ROW_START_TIME_CLASS)),
            end_time: select(format!(".{}", dom::ROW_END_TIME_CLASS)),
            date: select(format!(".{}", dom::ROW_DATE_CLASS)),
            day_diff: select(format!(".{}", dom::ROW_DAY_DIFF_CLASS)),
        });
    }
}

fn attr_i32(element: &Element, name: &str) -> i32 {
    element
        .get_attribute(name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

// --- event wiring ---------------------------------------------------------

fn install_handlers(rc: &Rc<RefCell<Inner>>) {
    let thumb_mouse_down = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if begin_thumb_drag(&rc, event.current_target()) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let thumb_touch_start = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: TouchEvent| {
            if begin_thumb_drag(&rc, event.current_target()) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    let highlight_mouse_down = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if begin_range_drag(
                &rc,
                event.current_target(),
                event.client_x() as f64,
            ) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let highlight_touch_start = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else { return };
            if begin_range_drag(
                &rc,
                event.current_target(),
                touch.client_x() as f64,
            ) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    let zone_control_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            commit(&rc);
        }) as Box<dyn FnMut(Event)>)
    };
    let additional_select_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: Event| {
            additional_zone_selected(&rc, event.target());
        }) as Box<dyn FnMut(Event)>)
    };

    rc.borrow_mut().handlers = Some(Handlers {
        thumb_mouse_down,
        thumb_touch_start,
        highlight_mouse_down,
        highlight_touch_start,
        zone_control_change,
        additional_select_change,
    });
}

/// Document-level move/up listeners so drags keep tracking outside the
/// slider. Attached once for the page lifetime.
fn attach_document_listeners(rc: &Rc<RefCell<Inner>>) {
    let document = rc.borrow().document.clone();

    let mouse_move = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if pointer_move(&rc, event.client_x() as f64) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    listen(&document, "mousemove", func(&mouse_move));
    mouse_move.forget();

    let touch_move = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else { return };
            if pointer_move(&rc, touch.client_x() as f64) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    listen_active(&document, "touchmove", func(&touch_move));
    touch_move.forget();

    let mouse_up = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: MouseEvent| {
            pointer_up(&rc);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    listen(&document, "mouseup", func(&mouse_up));
    mouse_up.forget();

    let touch_end = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: TouchEvent| {
            pointer_up(&rc);
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    listen(&document, "touchend", func(&touch_end));
    touch_end.forget();
}

/// The form inputs survive partial updates, so these attach once.
fn attach_field_listeners(rc: &Rc<RefCell<Inner>>) {
    let (date_input, start_input, end_input, base_zone_select) = {
        let inner = rc.borrow();
        (
            inner.date_input.clone(),
            inner.start_input.clone(),
            inner.end_input.clone(),
            inner.base_zone_select.clone(),
        )
    };

    let start_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            field_change(&rc, Endpoint::Start);
        }) as Box<dyn FnMut(Event)>)
    };
    listen(&start_input, "change", func(&start_change));
    start_change.forget();

    let end_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            field_change(&rc, Endpoint::End);
        }) as Box<dyn FnMut(Event)>)
    };
    listen(&end_input, "change", func(&end_change));
    end_change.forget();

    let date_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            commit(&rc);
        }) as Box<dyn FnMut(Event)>)
    };
    listen(&date_input, "change", func(&date_change));
    date_change.forget();

    let base_zone_change = {
        let rc = rc.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            base_zone_changed(&rc);
        }) as Box<dyn FnMut(Event)>)
    };
    listen(&base_zone_select, "change", func(&base_zone_change));
    base_zone_change.forget();
}

fn bind_sliders(rc: &Rc<RefCell<Inner>>) {
    let inner = rc.borrow();
    let Some(handlers) = &inner.handlers else { return };
    for slider in &inner.sliders {
        listen(
            &slider.start_thumb,
            "mousedown",
            func(&handlers.thumb_mouse_down),
        );
        listen(
            &slider.end_thumb,
            "mousedown",
            func(&handlers.thumb_mouse_down),
        );
        listen_active(
            &slider.start_thumb,
            "touchstart",
            func(&handlers.thumb_touch_start),
        );
        listen_active(
            &slider.end_thumb,
            "touchstart",
            func(&handlers.thumb_touch_start),
        );
        listen(
            &slider.highlight,
            "mousedown",
            func(&handlers.highlight_mouse_down),
        );
        listen_active(
            &slider.highlight,
            "touchstart",
            func(&handlers.highlight_touch_start),
        );
    }
}

fn bind_zone_controls(rc: &Rc<RefCell<Inner>>) {
    let inner = rc.borrow();
    let Some(handlers) = &inner.handlers else { return };
    if let Ok(nodes) = inner
        .document
        .query_selector_all(&format!(".{}", dom::ZONE_CHECKBOX_CLASS))
    {
        for i in 0..nodes.length() {
            let Some(node) = nodes.get(i) else { continue };
            let Some(el) = node.dyn_ref::<Element>() else { continue };
            listen(el, "change", func(&handlers.zone_control_change));
        }
    }
    if let Some(select) = inner
        .document
        .get_element_by_id(dom::ADDITIONAL_ZONE_SELECT)
    {
        listen(
            &select,
            "change",
            func(&handlers.additional_select_change),
        );
    }
}

fn listen(target: &EventTarget, event: &str, function: &js_sys::Function) {
    let _ = target.add_event_listener_with_callback(event, function);
}

/// Non-passive registration so the handler may prevent scrolling during
/// touch drags.
fn listen_active(
    target: &EventTarget,
    event: &str,
    function: &js_sys::Function,
) {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event, function, &options,
        );
}

fn func<T: ?Sized>(closure: &Closure<T>) -> &js_sys::Function {
    closure.as_ref().unchecked_ref()
}

fn js_eq(element: &HtmlElement, value: &JsValue) -> bool {
    AsRef::<JsValue>::as_ref(element) == value
}

// --- scroll persistence ---------------------------------------------------

fn restore_scroll(window: &Window) {
    let Some(storage) = window.session_storage().ok().flatten() else {
        return;
    };
    let Ok(Some(saved)) = storage.get_item(dom::SCROLL_STORAGE_KEY) else {
        return;
    };
    let _ = storage.remove_item(dom::SCROLL_STORAGE_KEY);
    if let Ok(y) = saved.parse::<f64>() {
        window.scroll_to_with_x_and_y(0.0, y);
    }
}

fn save_scroll(window: &Window) {
    let Some(storage) = window.session_storage().ok().flatten() else {
        return;
    };
    let y = window.scroll_y().unwrap_or(0.0);
    let _ = storage.set_item(dom::SCROLL_STORAGE_KEY, &y.to_string());
}
