//! Page-level scenarios for the effects controller
//!
//! Every test drives an [`EffectsController`] over a [`MemoryDocument`] laid
//! out like the portfolio page, forwarding scrolls, clicks, and time the way
//! a browser host would.

use std::time::Duration;

use folio_core::memory::{ElementSpec, MemoryDocument, NodeId, ScrollRequest};
use folio_core::{EffectsConfig, ScrollBehavior, ViewBinding, BACKGROUND_POSITION_Y};

use crate::{ClickOutcome, EffectsController};

const VIEWPORT: f64 = 800.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Handles of the interesting elements of the test page
struct Page {
    header: NodeId,
    toggle: NodeId,
    menu: NodeId,
    about_link: NodeId,
    projects_link: NodeId,
    headline: NodeId,
    hero: NodeId,
    tabs: Vec<NodeId>,
    about: NodeId,
    stats: NodeId,
    counters: Vec<NodeId>,
    broken_anchor: NodeId,
}

fn portfolio_page() -> (MemoryDocument, Page) {
    let mut doc = MemoryDocument::new(VIEWPORT);

    let header = doc.append(ElementSpec::new("header").id("header").bounds(0.0, 80.0));
    let toggle = doc.append_child(header, ElementSpec::new("button").id("nav-toggle"));
    let menu = doc.append_child(header, ElementSpec::new("ul").id("nav-menu"));
    let mut nav_link = |href: &str| {
        doc.append_child(
            menu,
            ElementSpec::new("a").class("nav__link").attr("href", href),
        )
    };
    let _home_link = nav_link("#home");
    let about_link = nav_link("#about");
    let projects_link = nav_link("#projects");

    let hero = doc.append(
        ElementSpec::new("section")
            .id("home")
            .class("hero")
            .bounds(0.0, 800.0),
    );
    let headline = doc.append_child(hero, ElementSpec::new("span").id("typing-text"));

    let floating = doc.append(ElementSpec::new("nav").class("floating-nav"));
    let tabs = ["home", "projects", "about"]
        .iter()
        .map(|tab| {
            doc.append_child(
                floating,
                ElementSpec::new("button")
                    .class("floating-nav__btn")
                    .attr("data-tab", *tab),
            )
        })
        .collect();

    let about = doc.append(
        ElementSpec::new("section")
            .id("about")
            .class("section")
            .bounds(800.0, 900.0),
    );
    doc.append_child(about, ElementSpec::new("div").class("about-card").bounds(900.0, 200.0));
    doc.append_child(about, ElementSpec::new("div").class("about-card").bounds(1150.0, 200.0));

    let stats = doc.append(ElementSpec::new("div").class("stats").bounds(1700.0, 300.0));
    let counters = ["100", "25"]
        .iter()
        .map(|count| {
            doc.append_child(
                stats,
                ElementSpec::new("span")
                    .class("stat-value")
                    .attr("data-count", *count)
                    .text("0"),
            )
        })
        .collect();

    let projects = doc.append(
        ElementSpec::new("section")
            .id("projects")
            .class("section")
            .bounds(2000.0, 1200.0),
    );
    doc.append_child(projects, ElementSpec::new("div").class("project-card").bounds(2100.0, 400.0));
    let broken_anchor = doc.append_child(projects, ElementSpec::new("a").attr("href", "#missing"));

    doc.append(
        ElementSpec::new("section")
            .id("contact")
            .class("section")
            .bounds(3200.0, 600.0),
    );

    let page = Page {
        header,
        toggle,
        menu,
        about_link,
        projects_link,
        headline,
        hero,
        tabs,
        about,
        stats,
        counters,
        broken_anchor,
    };
    (doc, page)
}

fn started() -> (EffectsController<MemoryDocument>, Page) {
    init_tracing();
    let (doc, page) = portfolio_page();
    let mut controller = EffectsController::new(doc, EffectsConfig::default()).unwrap();
    controller.start();
    (controller, page)
}

fn scroll_to(controller: &mut EffectsController<MemoryDocument>, y: f64) {
    controller.view_mut().set_scroll_y(y);
    controller.on_scroll();
    controller.sample_intersections();
}

#[test]
fn test_header_tracks_threshold() {
    let (mut controller, page) = started();

    for y in [0.0, 10.0, 49.9, 50.0, 50.1, 51.0, 400.0, 50.0, 0.0] {
        scroll_to(&mut controller, y);
        assert_eq!(
            controller.view().has_class(&page.header, "scrolled"),
            y > 50.0,
            "scroll offset {y}"
        );
        assert_eq!(controller.is_header_scrolled(), y > 50.0);
    }
}

#[test]
fn test_mobile_nav_parity() {
    let (mut controller, page) = started();

    for clicks in 1..=5 {
        let outcome = controller.on_click(&page.toggle);
        assert_eq!(outcome, ClickOutcome::handled());
        let open = clicks % 2 == 1;
        assert_eq!(controller.view().has_class(&page.toggle, "active"), open);
        assert_eq!(controller.view().has_class(&page.menu, "active"), open);
    }
    assert!(controller.is_menu_open());
}

#[test]
fn test_nav_link_closes_menu_and_scrolls() {
    let (mut controller, page) = started();
    controller.on_click(&page.toggle);
    assert!(controller.is_menu_open());

    let outcome = controller.on_click(&page.about_link);
    assert_eq!(outcome, ClickOutcome::prevented());
    assert!(!controller.is_menu_open());
    assert!(!controller.view().has_class(&page.toggle, "active"));
    assert_eq!(
        controller.view().scroll_requests(),
        &[ScrollRequest {
            top: 720.0,
            behavior: ScrollBehavior::Smooth,
        }]
    );
}

#[test]
fn test_anchor_offset_accounts_for_current_scroll() {
    let (mut controller, page) = started();
    controller.view_mut().set_scroll_y(1000.0);

    controller.on_click(&page.projects_link);
    let last = controller.view().scroll_requests().last().copied().unwrap();
    assert_eq!(last.top, 2000.0 - 80.0);
    assert_eq!(controller.view().scroll_y(), 1920.0);
}

#[test]
fn test_missing_anchor_target_is_silent() {
    let (mut controller, page) = started();
    controller.view_mut().set_scroll_y(2100.0);

    let outcome = controller.on_click(&page.broken_anchor);
    assert!(outcome.prevent_default);
    assert!(controller.view().scroll_requests().is_empty());
    assert_eq!(controller.view().scroll_y(), 2100.0);
}

#[test]
fn test_floating_nav_selection_is_cosmetic() {
    let (mut controller, page) = started();

    controller.on_click(&page.tabs[1]);
    assert_eq!(controller.selected_tab(), Some("projects"));
    controller.on_click(&page.tabs[2]);
    assert_eq!(controller.selected_tab(), Some("about"));

    let active: Vec<_> = page
        .tabs
        .iter()
        .map(|t| controller.view().has_class(t, "active"))
        .collect();
    assert_eq!(active, vec![false, false, true]);
    assert_eq!(controller.view().scroll_y(), 0.0);
    assert!(controller.view().scroll_requests().is_empty());
}

#[test]
fn test_typing_headline_timeline() {
    let (mut controller, page) = started();

    controller.advance_to(ms(999));
    assert_eq!(controller.view().text(page.headline), "");

    controller.advance_to(ms(1000));
    assert_eq!(controller.view().text(page.headline), "K");
    controller.advance_to(ms(1300));
    assert_eq!(controller.view().text(page.headline), "KMH");

    // Full phrase holds for 2s
    controller.advance_to(ms(3299));
    assert_eq!(controller.view().text(page.headline), "KMH");
    controller.advance_to(ms(3300));
    assert_eq!(controller.view().text(page.headline), "KM");

    controller.advance_to(ms(3460));
    assert_eq!(controller.view().text(page.headline), "");
    assert_eq!(controller.typing().phrase_index(), 1);

    // Empty pause, then the next phrase
    controller.advance_to(ms(3959));
    assert_eq!(controller.view().text(page.headline), "");
    controller.advance_to(ms(3960));
    assert_eq!(controller.view().text(page.headline), "G");
}

#[test]
fn test_typing_cycles_through_all_phrases() {
    let (mut controller, _) = started();
    let mut seen = Vec::new();

    // Long enough for more than one pass over the four phrases
    for _ in 0..2000 {
        let index = controller.typing().phrase_index();
        if seen.last() != Some(&index) {
            seen.push(index);
        }
        controller.advance_by(ms(100));
    }

    assert_eq!(&seen[..6], &[0, 1, 2, 3, 0, 1]);
    assert!(controller.is_typing_scheduled());
}

#[test]
fn test_typing_needs_headline_element() {
    init_tracing();
    let mut doc = MemoryDocument::new(VIEWPORT);
    doc.append(ElementSpec::new("header").id("header"));
    let mut controller = EffectsController::new(doc, EffectsConfig::default()).unwrap();
    controller.start();

    assert!(!controller.is_typing_scheduled());
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn test_sections_fade_in_once() {
    let (mut controller, page) = started();
    assert!(controller.view().has_class(&page.about, "fade-in"));
    assert!(controller.observed().contains(&page.about));

    scroll_to(&mut controller, 0.0);
    assert!(!controller.view().has_class(&page.about, "visible"));

    scroll_to(&mut controller, 300.0);
    assert!(controller.view().has_class(&page.about, "visible"));
    assert!(!controller.observed().contains(&page.about));

    // Re-entering never re-processes the element
    controller.view_mut().remove_class(&page.about, "visible");
    for y in [0.0, 900.0, 0.0, 400.0] {
        scroll_to(&mut controller, y);
    }
    assert!(!controller.view().has_class(&page.about, "visible"));
}

#[test]
fn test_counters_count_up_when_stats_appear() {
    let (mut controller, page) = started();

    scroll_to(&mut controller, 1300.0);
    assert!(controller.view().has_class(&page.stats, "visible"));
    assert_eq!(controller.running_counters(), 2);

    let mut hundred = Vec::new();
    let mut twenty_five = Vec::new();
    for _ in 0..50 {
        controller.advance_by(ms(40));
        hundred.push(controller.view().text(page.counters[0]).parse::<i64>().unwrap());
        twenty_five.push(controller.view().text(page.counters[1]).parse::<i64>().unwrap());
    }

    assert_eq!(hundred[0], 2);
    assert_eq!(hundred.last(), Some(&100));
    assert!(hundred.iter().all(|&v| v <= 100));
    assert!(hundred.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(twenty_five.last(), Some(&25));
    assert!(twenty_five.iter().all(|&v| v <= 25));
    assert_eq!(controller.running_counters(), 0);

    // Scrolling away and back does not restart the counters
    scroll_to(&mut controller, 0.0);
    scroll_to(&mut controller, 1300.0);
    assert_eq!(controller.running_counters(), 0);
    controller.advance_by(ms(40));
    assert_eq!(controller.view().text(page.counters[0]), "100");
}

#[test]
fn test_scroll_updates_active_link_and_parallax() {
    let (mut controller, page) = started();

    scroll_to(&mut controller, 1100.0);
    assert!(controller.view().has_class(&page.about_link, "active"));
    assert!(!controller.view().has_class(&page.projects_link, "active"));
    assert_eq!(
        controller.view().style(page.hero, BACKGROUND_POSITION_Y),
        Some("550px")
    );

    scroll_to(&mut controller, 1950.0);
    assert!(!controller.view().has_class(&page.about_link, "active"));
    assert!(controller.view().has_class(&page.projects_link, "active"));
}

#[test]
fn test_stop_halts_everything() {
    let (mut controller, page) = started();
    controller.advance_to(ms(1150));
    assert_eq!(controller.view().text(page.headline), "KM");

    scroll_to(&mut controller, 1300.0);
    assert_eq!(controller.running_counters(), 2);

    controller.stop();
    assert!(!controller.is_running());
    assert_eq!(controller.next_deadline(), None);
    assert_eq!(controller.running_counters(), 0);
    assert!(controller.observed().is_empty());

    controller.advance_by(ms(10_000));
    assert_eq!(controller.view().text(page.headline), "KM");

    // Events are ignored while stopped
    assert_eq!(controller.on_click(&page.toggle), ClickOutcome::IGNORED);
    controller.view_mut().set_scroll_y(0.0);
    controller.on_scroll();
    assert!(controller.view().has_class(&page.header, "scrolled"));
}

#[test]
fn test_restart_resumes_typing() {
    let (mut controller, page) = started();
    controller.advance_to(ms(1150));
    controller.stop();

    controller.start();
    assert!(controller.is_typing_scheduled());
    let resume_at = controller.now() + ms(1000);
    controller.advance_to(resume_at);
    assert_eq!(controller.view().text(page.headline), "KMH");
}

#[test]
fn test_restart_keeps_revealed_elements_done() {
    let (mut controller, page) = started();

    scroll_to(&mut controller, 1300.0);
    for _ in 0..60 {
        controller.advance_by(ms(40));
    }
    assert_eq!(controller.view().text(page.counters[0]), "100");

    controller.stop();
    controller.start();
    assert!(!controller.observed().contains(&page.stats));
    assert!(!controller.observed().contains(&page.about));

    controller.sample_intersections();
    assert_eq!(controller.running_counters(), 0);
    controller.advance_by(ms(40));
    assert_eq!(controller.view().text(page.counters[0]), "100");

    // Sections still below the fold are observed again
    let contact = controller.view().element_by_id("contact").unwrap();
    assert!(controller.observed().contains(&contact));
}

#[test]
fn test_start_is_idempotent() {
    let (mut controller, page) = started();
    controller.start();
    controller.advance_to(ms(1000));
    // A second start would have scheduled a second typing chain
    controller.advance_to(ms(1149));
    assert_eq!(controller.view().text(page.headline), "K");
}

#[test]
fn test_invalid_config_is_rejected() {
    let (doc, _) = portfolio_page();
    let mut config = EffectsConfig::default();
    config.typing.phrases.clear();
    assert!(EffectsController::new(doc, config).is_err());
}

#[test]
fn test_click_targets_are_unique() {
    let (controller, page) = started();
    let targets = controller.click_targets();

    assert!(targets.contains(&page.toggle));
    assert!(targets.contains(&page.about_link));
    assert!(targets.contains(&page.tabs[0]));
    assert!(targets.contains(&page.broken_anchor));
    // Nav links are also anchors but appear once
    assert_eq!(targets.iter().filter(|t| **t == page.about_link).count(), 1);
    assert_eq!(targets.len(), 1 + 3 + 3 + 1);
}
