//! Browser tests for the DOM binding
//!
//! Run with `wasm-pack test --headless --firefox crates/folio_web`.

#![cfg(target_arch = "wasm32")]

use folio_core::{EffectsConfig, Query, ViewBinding};
use folio_effects::EffectsController;
use folio_web::DomView;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn element(view: &DomView, tag: &str, id: &str, class: &str) -> Element {
    let el = view.document().create_element(tag).unwrap();
    el.set_id(id);
    el.set_class_name(class);
    view.document().body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn test_class_flags() {
    let mut view = DomView::new().unwrap();
    let header = element(&view, "header", "flags-header", "header");

    view.add_class(&header, "scrolled");
    assert!(view.has_class(&header, "scrolled"));
    assert!(!view.toggle_class(&header, "scrolled"));
    assert!(!view.has_class(&header, "scrolled"));
}

#[wasm_bindgen_test]
fn test_queries_and_text() {
    let mut view = DomView::new().unwrap();
    let stats = element(&view, "div", "query-stats", "stats");
    let value = view.document().create_element("span").unwrap();
    value.set_class_name("stat-value");
    value.set_attribute("data-count", "42").unwrap();
    stats.append_child(&value).unwrap();

    assert_eq!(view.query_within(&stats, &Query::class("stat-value")), vec![value.clone()]);
    assert_eq!(view.attribute(&value, "data-count").as_deref(), Some("42"));
    assert_eq!(view.element_by_id("query-stats"), Some(stats));

    view.set_text(&value, "7");
    assert_eq!(value.text_content().as_deref(), Some("7"));
}

#[wasm_bindgen_test]
fn test_controller_binds_live_page() {
    let view = DomView::new().unwrap();
    let toggle = element(&view, "button", "nav-toggle", "");
    let menu = element(&view, "ul", "nav-menu", "");

    let mut controller = EffectsController::new(view, EffectsConfig::default()).unwrap();
    controller.start();

    assert!(controller.click_targets().contains(&toggle));
    controller.on_click(&toggle);
    assert!(menu.class_list().contains("active"));
    assert!(controller.is_menu_open());
}

#[wasm_bindgen_test]
fn test_console_logging_installs_once() {
    folio_web::logging::init(tracing::Level::DEBUG);
    folio_web::logging::init(tracing::Level::INFO);
    tracing::warn!("console logging ready");
}

#[wasm_bindgen_test]
fn test_session_attaches_and_stops() {
    let view = DomView::new().unwrap();
    element(&view, "span", "typing-text", "");

    let session = folio_web::Session::attach().unwrap();
    session.stop();
    session.start();
    session.stop();
}
