//! Page/zoom controller: current page, page count, zoom, and render sequencing.
//!
//! Every change that needs the host to rasterize a page produces a
//! [`RenderRequest`] tagged with a monotonically increasing sequence number.
//! Page rendering is asynchronous on the host side, so several requests can
//! be in flight at once; [`PageController::complete_render`] only accepts the
//! most recently issued sequence. A superseded render that finishes after the
//! latest one has already painted leaves old pixels on the surface, so
//! [`PageController::latest_painted`] tells the caller to render again.
//! Together these give last-request-wins whatever order the renders finish in.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::config::ZoomLimits;
use crate::error::AppError;
use crate::geom::Size;

/// The navigable view over the loaded document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// 1-based index of the page on screen.
    pub current_page: u32,
    /// Number of pages in the loaded document (1 with no document).
    pub total_pages: u32,
    /// Page render scale.
    pub scale: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { current_page: 1, total_pages: 1, scale: 1.0 }
    }
}

/// A page rasterization the host must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub seq: u64,
    /// 1-based page number.
    pub page: u32,
    pub scale: f64,
}

/// State machine over [`ViewState`] plus render sequencing.
#[derive(Debug, Clone)]
pub struct PageController {
    state: ViewState,
    limits: ZoomLimits,
    document_loaded: bool,
    /// Unscaled size of the current page, known once a render completes.
    page_size: Option<Size>,
    last_issued: u64,
    last_completed: u64,
}

impl PageController {
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            state: ViewState::default(),
            limits,
            document_loaded: false,
            page_size: None,
            last_issued: 0,
            last_completed: 0,
        }
    }

    // --- Transitions ---

    /// Adopt a freshly decoded document of `page_count` pages and request
    /// page 1 at the current scale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DocumentLoadFailure`] for an empty document; the
    /// controller is left untouched.
    pub fn load_document(&mut self, page_count: u32) -> Result<RenderRequest, AppError> {
        if page_count == 0 {
            return Err(AppError::DocumentLoadFailure { reason: "document has no pages".to_owned() });
        }
        self.state = ViewState { current_page: 1, total_pages: page_count, scale: self.state.scale };
        self.document_loaded = true;
        self.page_size = None;
        Ok(self.issue())
    }

    /// Jump to page `n`. Out-of-range requests are ignored.
    ///
    /// Returns a render request when a document is loaded and `n` is valid.
    /// The page size is unknown again until the new page has rendered.
    pub fn go_to_page(&mut self, n: u32) -> Option<RenderRequest> {
        if !(1..=self.state.total_pages).contains(&n) {
            return None;
        }
        if n != self.state.current_page {
            self.page_size = None;
        }
        self.state.current_page = n;
        self.request_render()
    }

    /// Advance one page if not already on the last page.
    pub fn next_page(&mut self) -> Option<RenderRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to_page(self.state.current_page + 1)
    }

    /// Go back one page if not already on the first page.
    pub fn prev_page(&mut self) -> Option<RenderRequest> {
        if !self.can_go_prev() {
            return None;
        }
        self.go_to_page(self.state.current_page - 1)
    }

    /// Add `delta` to the scale, snapped to the zoom step and clamped to the
    /// limits. Without a document the scale still changes but nothing renders.
    pub fn set_zoom(&mut self, delta: f64) -> Option<RenderRequest> {
        if !delta.is_finite() {
            return None;
        }
        let next = self.limits.quantize(self.state.scale + delta);
        if (next - self.state.scale).abs() < f64::EPSILON {
            return None;
        }
        self.state.scale = next;
        self.request_render()
    }

    pub fn zoom_in(&mut self) -> Option<RenderRequest> {
        self.set_zoom(self.limits.step)
    }

    pub fn zoom_out(&mut self) -> Option<RenderRequest> {
        self.set_zoom(-self.limits.step)
    }

    /// Re-issue a render of the current page (e.g. after the overlay changed).
    pub fn request_render(&mut self) -> Option<RenderRequest> {
        if self.document_loaded { Some(self.issue()) } else { None }
    }

    /// Record that the host finished rendering request `seq`.
    ///
    /// Returns `true` when `seq` is the latest request, meaning the surface
    /// shows the current state and the overlay should be drawn. Completions
    /// of superseded requests return `false` and are otherwise ignored.
    pub fn complete_render(&mut self, seq: u64, page_size: Size) -> bool {
        if !self.document_loaded || seq != self.last_issued {
            return false;
        }
        self.page_size = Some(page_size);
        self.last_completed = seq;
        true
    }

    /// Whether the latest request has already completed. A superseded
    /// completion arriving now has drawn over it.
    #[must_use]
    pub fn latest_painted(&self) -> bool {
        self.last_issued > 0 && self.last_completed == self.last_issued
    }

    fn issue(&mut self) -> RenderRequest {
        self.last_issued += 1;
        RenderRequest { seq: self.last_issued, page: self.state.current_page, scale: self.state.scale }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.state.total_pages
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    #[must_use]
    pub fn is_document_loaded(&self) -> bool {
        self.document_loaded
    }

    /// Unscaled size of the current page, once it has rendered.
    #[must_use]
    pub fn page_size(&self) -> Option<Size> {
        self.page_size
    }

    /// Scale that maps document units to surface pixels right now. The blank
    /// canvas is never re-rendered, so it stays at 1.
    #[must_use]
    pub fn render_scale(&self) -> f64 {
        if self.document_loaded { self.state.scale } else { 1.0 }
    }

    /// Sequence number of the newest request, 0 before any was issued.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.last_issued
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.state.current_page > 1
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.state.current_page < self.state.total_pages
    }

    /// Page indicator text, e.g. `"Page 2 of 5"`.
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.state.current_page, self.state.total_pages)
    }

    /// Zoom percentage text, e.g. `"150%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{:.0}%", self.state.scale * 100.0)
    }
}

impl Default for PageController {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}
