#![allow(clippy::float_cmp)]

use super::*;
use crate::error::AppError;
use crate::geom::Size;

fn loaded(pages: u32) -> PageController {
    let mut view = PageController::default();
    view.load_document(pages).unwrap();
    view
}

fn letter() -> Size {
    Size::new(612.0, 792.0)
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn starts_on_page_one_of_one_at_unit_scale() {
    let view = PageController::default();
    assert_eq!(view.state(), ViewState { current_page: 1, total_pages: 1, scale: 1.0 });
    assert!(!view.is_document_loaded());
    assert!(view.page_size().is_none());
    assert_eq!(view.latest_seq(), 0);
}

#[test]
fn navigation_disabled_without_document() {
    let view = PageController::default();
    assert!(!view.can_go_prev());
    assert!(!view.can_go_next());
}

// =============================================================
// load_document
// =============================================================

#[test]
fn load_requests_first_page() {
    let mut view = PageController::default();
    let req = view.load_document(3).unwrap();
    assert_eq!(req, RenderRequest { seq: 1, page: 1, scale: 1.0 });
    assert_eq!(view.total_pages(), 3);
    assert!(view.is_document_loaded());
}

#[test]
fn load_resets_page_but_keeps_zoom() {
    let mut view = loaded(4);
    view.go_to_page(3);
    view.zoom_in();
    let req = view.load_document(2).unwrap();
    assert_eq!(req.page, 1);
    assert_eq!(view.current_page(), 1);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(req.scale, 1.1);
}

#[test]
fn load_empty_document_fails_without_mutation() {
    let mut view = loaded(5);
    view.go_to_page(4);
    let before = view.state();
    let err = view.load_document(0).unwrap_err();
    assert!(matches!(err, AppError::DocumentLoadFailure { .. }));
    assert_eq!(view.state(), before);
    assert!(view.is_document_loaded());
}

// =============================================================
// go_to_page
// =============================================================

#[test]
fn go_to_valid_page_requests_render() {
    let mut view = loaded(3);
    let req = view.go_to_page(3).unwrap();
    assert_eq!(req.page, 3);
    assert_eq!(view.current_page(), 3);
}

#[test]
fn go_to_out_of_range_is_noop() {
    let mut view = loaded(3);
    view.go_to_page(2);
    let seq = view.latest_seq();
    for n in [0, 4, 100, u32::MAX] {
        assert!(view.go_to_page(n).is_none());
        assert_eq!(view.current_page(), 2);
    }
    assert_eq!(view.latest_seq(), seq);
}

#[test]
fn go_to_page_without_document_does_not_render() {
    let mut view = PageController::default();
    assert!(view.go_to_page(1).is_none());
    assert!(view.go_to_page(2).is_none());
    assert_eq!(view.current_page(), 1);
}

#[test]
fn next_and_prev_stop_at_bounds() {
    let mut view = loaded(2);
    assert!(view.prev_page().is_none());
    assert_eq!(view.next_page().unwrap().page, 2);
    assert!(view.next_page().is_none());
    assert_eq!(view.current_page(), 2);
    assert!(view.can_go_prev());
    assert!(!view.can_go_next());
    assert_eq!(view.prev_page().unwrap().page, 1);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn five_zoom_steps_reach_one_and_a_half() {
    let mut view = loaded(1);
    for _ in 0..5 {
        view.set_zoom(0.1);
    }
    assert_eq!(view.scale(), 1.5);
}

#[test]
fn zoom_never_leaves_bounds() {
    let mut view = loaded(1);
    for delta in [0.1, 0.7, 3.0, -0.1, -5.0, 0.3, 10.0, -0.25, -0.1, 1e6, -1e6] {
        view.set_zoom(delta);
        assert!((0.5..=2.0).contains(&view.scale()), "delta {delta} -> {}", view.scale());
    }
    for _ in 0..50 {
        view.zoom_in();
    }
    assert_eq!(view.scale(), 2.0);
    for _ in 0..50 {
        view.zoom_out();
    }
    assert_eq!(view.scale(), 0.5);
}

#[test]
fn zoom_at_limit_is_noop() {
    let mut view = loaded(1);
    while view.zoom_in().is_some() {}
    let seq = view.latest_seq();
    assert!(view.zoom_in().is_none());
    assert_eq!(view.latest_seq(), seq);
}

#[test]
fn zoom_without_document_updates_scale_only() {
    let mut view = PageController::default();
    assert!(view.zoom_in().is_none());
    assert_eq!(view.scale(), 1.1);
    assert_eq!(view.render_scale(), 1.0);
    assert_eq!(view.latest_seq(), 0);
}

#[test]
fn non_finite_zoom_delta_ignored() {
    let mut view = loaded(1);
    assert!(view.set_zoom(f64::NAN).is_none());
    assert!(view.set_zoom(f64::INFINITY).is_none());
    assert_eq!(view.scale(), 1.0);
}

#[test]
fn zoom_request_carries_new_scale() {
    let mut view = loaded(2);
    view.go_to_page(2);
    let req = view.zoom_out().unwrap();
    assert_eq!(req.page, 2);
    assert_eq!(req.scale, 0.9);
}

// =============================================================
// Render sequencing
// =============================================================

#[test]
fn sequence_numbers_increase() {
    let mut view = loaded(3);
    let a = view.go_to_page(2).unwrap();
    let b = view.zoom_in().unwrap();
    let c = view.request_render().unwrap();
    assert!(a.seq < b.seq && b.seq < c.seq);
}

#[test]
fn latest_render_completes() {
    let mut view = PageController::default();
    let req = view.load_document(1).unwrap();
    assert!(view.complete_render(req.seq, letter()));
    assert_eq!(view.page_size(), Some(letter()));
}

#[test]
fn stale_render_is_discarded() {
    let mut view = loaded(3);
    let first = view.go_to_page(2).unwrap();
    let second = view.go_to_page(3).unwrap();
    // The first render finishes last; it must not win.
    assert!(view.complete_render(second.seq, letter()));
    assert!(!view.complete_render(first.seq, Size::new(1.0, 1.0)));
    assert_eq!(view.page_size(), Some(letter()));
}

#[test]
fn out_of_order_completion_only_accepts_latest() {
    let mut view = loaded(3);
    let first = view.zoom_in().unwrap();
    let second = view.zoom_in().unwrap();
    assert!(!view.complete_render(first.seq, letter()));
    assert!(view.page_size().is_none());
    assert!(view.complete_render(second.seq, letter()));
}

#[test]
fn latest_painted_tracks_the_newest_request() {
    let mut view = loaded(3);
    assert!(!view.latest_painted());
    let first = view.zoom_in().unwrap();
    let second = view.zoom_in().unwrap();
    assert!(view.complete_render(second.seq, letter()));
    assert!(view.latest_painted());
    assert!(!view.complete_render(first.seq, letter()));
    assert!(view.latest_painted());
    view.request_render();
    assert!(!view.latest_painted());
}

#[test]
fn page_change_forgets_page_size() {
    let mut view = loaded(3);
    let req = view.request_render().unwrap();
    view.complete_render(req.seq, letter());
    view.go_to_page(1);
    assert_eq!(view.page_size(), Some(letter()));
    view.go_to_page(2);
    assert!(view.page_size().is_none());
}

#[test]
fn completion_without_document_rejected() {
    let mut view = PageController::default();
    assert!(!view.complete_render(0, letter()));
    assert!(view.page_size().is_none());
}

// =============================================================
// Labels
// =============================================================

#[test]
fn page_and_zoom_labels() {
    let mut view = loaded(5);
    view.go_to_page(2);
    for _ in 0..5 {
        view.zoom_in();
    }
    assert_eq!(view.page_label(), "Page 2 of 5");
    assert_eq!(view.zoom_label(), "150%");
}

#[test]
fn zoom_label_rounds() {
    let mut view = PageController::default();
    view.zoom_out();
    assert_eq!(view.zoom_label(), "90%");
}
