use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::browser::{AnchorDownloader, CanvasSnapshot, JsPdfWriter};
use crate::config::SessionConfig;
use crate::error::AppError;
use crate::export::{self, DocumentExportPlan, DocumentWriter, Snapshot};
use crate::geom::{self, Point, Size, SurfaceRect};
use crate::input::{self, MarkerForm};
use crate::marker::{Marker, MarkerSpec, MarkerStore};
use crate::render::{self, DrawCommand};
use crate::view::{PageController, RenderRequest, ViewState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from session operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rasterize `request.page` at `request.scale`, then report back through
    /// [`EngineCore::render_finished`] with the same `seq`. Several requests
    /// may be in flight; when a superseded one lands on the surface after the
    /// latest, `render_finished` answers with a fresh `RenderPage`.
    RenderPage(RenderRequest),
    /// The surface holds the current page (or the blank canvas): paint the overlay.
    DrawOverlay,
    /// Page indicator, zoom label, navigation state, or marker count changed.
    ControlsChanged,
    /// Show a message to the user.
    Alert(AppError),
}

/// Read-only values for the host's indicator widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// `"Page X of Y"`.
    pub page_label: String,
    /// `"150%"`.
    pub zoom_label: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub marker_count: usize,
}

/// Core session state: everything that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub markers: MarkerStore,
    pub view: PageController,
    pub config: SessionConfig,
    /// Intrinsic pixel size of the drawing surface.
    pub surface_size: Size,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            markers: MarkerStore::new(),
            view: PageController::new(config.zoom),
            config,
            surface_size: Size::new(0.0, 0.0),
        }
    }

    // --- Surface ---

    /// Record the surface's current backing-store size.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_size = Size::new(width, height);
    }

    // --- Document lifecycle ---

    /// Check an upload's declared MIME type before the host starts decoding.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidFileType`] for anything but a PDF.
    pub fn accept_upload(&self, mime: &str) -> Result<(), AppError> {
        if input::is_document_mime(mime) {
            return Ok(());
        }
        log::warn!("rejected upload with MIME type {mime:?}");
        Err(AppError::InvalidFileType { mime: mime.to_owned() })
    }

    /// The host decoded a document with `page_count` pages.
    pub fn document_loaded(&mut self, page_count: u32) -> Vec<Action> {
        match self.view.load_document(page_count) {
            Ok(request) => {
                log::info!("loaded document with {page_count} page(s)");
                vec![Action::ControlsChanged, Action::RenderPage(request)]
            }
            Err(e) => {
                log::error!("document load failed: {e}");
                vec![Action::Alert(e)]
            }
        }
    }

    /// The host failed to decode the uploaded document. Nothing changes.
    pub fn document_load_failed(&self, reason: &str) -> Vec<Action> {
        log::error!("document load failed: {reason} (keeping {} page(s))", self.view.total_pages());
        vec![Action::Alert(AppError::DocumentLoadFailure { reason: reason.to_owned() })]
    }

    /// The host finished rasterizing request `seq`; `page_size` is the page's
    /// unscaled size.
    ///
    /// A stale completion produces no actions while the latest request is
    /// still pending, since that render will paint over it. If the latest has
    /// already painted, the stale pixels now cover it and the current page is
    /// requested again.
    pub fn render_finished(&mut self, seq: u64, page_size: Size) -> Vec<Action> {
        if !self.view.complete_render(seq, page_size) {
            let latest = self.view.latest_seq();
            if seq < latest && self.view.latest_painted() {
                log::debug!("stale render {seq} painted over {latest}, rendering again");
                return self.view.request_render().map(Action::RenderPage).into_iter().collect();
            }
            log::debug!("discarding stale render {seq} (latest {latest})");
            return Vec::new();
        }
        let scale = self.view.scale();
        self.surface_size = Size::new(page_size.width * scale, page_size.height * scale);
        vec![Action::DrawOverlay]
    }

    // --- Markers ---

    /// Place a marker where the user clicked.
    ///
    /// `client` is the pointer position in viewport coordinates and `rect` the
    /// surface's displayed bounding box.
    pub fn place_at_pointer(&mut self, client: Point, rect: SurfaceRect, spec: &MarkerSpec) -> Vec<Action> {
        let surface_pt =
            geom::map_event_to_document_space(client, rect, self.surface_size.width, self.surface_size.height);
        self.place_at(surface_pt.unscale(self.view.render_scale()), spec)
    }

    /// Place a marker at a document-space position.
    ///
    /// Non-finite positions and positions outside the current page are ignored.
    pub fn place_at(&mut self, position: Point, spec: &MarkerSpec) -> Vec<Action> {
        if !position.is_finite() {
            log::warn!("ignoring placement at non-finite position {position:?}");
            return Vec::new();
        }
        if let Some(bounds) = self.document_bounds() {
            if !bounds.contains(position) {
                log::warn!("ignoring placement at {position:?} outside {bounds:?}");
                return Vec::new();
            }
        }
        let marker = spec.build(position, self.markers.next_ordinal(), self.config.default_radius);
        log::debug!("placed {:?} {:?} at ({:.1}, {:.1})", marker.kind, marker.label, position.x, position.y);
        self.markers.place(marker);
        self.changed()
    }

    /// Remove the most recently placed marker.
    pub fn undo(&mut self) -> Vec<Action> {
        match self.markers.remove_last() {
            Some(marker) => {
                log::debug!("removed {:?}", marker.label);
                self.changed()
            }
            None => Vec::new(),
        }
    }

    /// Remove every marker. Whether to confirm first is up to the host.
    pub fn clear(&mut self) -> Vec<Action> {
        let removed = self.markers.clear();
        if removed == 0 {
            return Vec::new();
        }
        log::debug!("cleared {removed} marker(s)");
        self.changed()
    }

    // --- Navigation / zoom ---

    pub fn go_to_page(&mut self, n: u32) -> Vec<Action> {
        let before = self.view.state();
        let request = self.view.go_to_page(n);
        self.navigated(before, request)
    }

    pub fn next_page(&mut self) -> Vec<Action> {
        let before = self.view.state();
        let request = self.view.next_page();
        self.navigated(before, request)
    }

    pub fn prev_page(&mut self) -> Vec<Action> {
        let before = self.view.state();
        let request = self.view.prev_page();
        self.navigated(before, request)
    }

    pub fn set_zoom(&mut self, delta: f64) -> Vec<Action> {
        let before = self.view.state();
        let request = self.view.set_zoom(delta);
        self.navigated(before, request)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.set_zoom(self.config.zoom.step)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.set_zoom(-self.config.zoom.step)
    }

    // --- Export ---

    /// Lay out the PDF export of a `surface`-sized snapshot of the current page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportPrecondition`] when no document is loaded or
    /// its page has not finished rendering.
    pub fn export_plan(&self, surface: Size) -> Result<DocumentExportPlan, AppError> {
        if !self.view.is_document_loaded() {
            log::warn!("PDF export requested with no document loaded");
            return Err(AppError::ExportPrecondition);
        }
        DocumentExportPlan::new(self.view.page_size(), surface)
    }

    /// Export `surface` as a one-page PDF. `open_writer` is only called once
    /// the plan is settled, so a refused export never starts a document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportPrecondition`] with no rendered document, or
    /// whatever the snapshot or writer reports.
    pub fn export_document<W, F>(&self, surface: &impl Snapshot, open_writer: F) -> Result<(), AppError>
    where
        W: DocumentWriter,
        F: FnOnce(&DocumentExportPlan) -> Result<W, AppError>,
    {
        let plan = self.export_plan(surface.pixel_size())?;
        let mut writer = open_writer(&plan)?;
        export::export_as_document(&plan, surface, &mut writer)
    }

    // --- Queries ---

    /// Draw commands for the current marker sequence.
    #[must_use]
    pub fn overlay(&self) -> Vec<DrawCommand<'_>> {
        render::overlay_commands(self.markers.all(), &self.config.style)
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.markers.all()
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        Controls {
            page_label: self.view.page_label(),
            zoom_label: self.view.zoom_label(),
            prev_enabled: self.view.can_go_prev(),
            next_enabled: self.view.can_go_next(),
            marker_count: self.markers.count(),
        }
    }

    /// Document-space area a new marker must land in, when known. While a
    /// page change is still rendering the bounds are unknown.
    #[must_use]
    pub fn document_bounds(&self) -> Option<Size> {
        if self.view.is_document_loaded() {
            return self.view.page_size();
        }
        let surface = self.surface_size;
        if surface.width <= 0.0 || surface.height <= 0.0 {
            return None;
        }
        let scale = self.view.render_scale();
        Some(Size::new(surface.width / scale, surface.height / scale))
    }

    // --- Helpers ---

    /// Marker set changed: redraw the page underneath (document) or just the
    /// overlay (blank canvas).
    fn changed(&mut self) -> Vec<Action> {
        let redraw = match self.view.request_render() {
            Some(request) => Action::RenderPage(request),
            None => Action::DrawOverlay,
        };
        vec![Action::ControlsChanged, redraw]
    }

    fn navigated(&self, before: ViewState, request: Option<RenderRequest>) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.view.state() != before {
            log::debug!("view {before:?} -> {:?}", self.view.state());
            actions.push(Action::ControlsChanged);
        }
        if let Some(request) = request {
            actions.push(Action::RenderPage(request));
        }
        actions
    }
}

/// The full overlay engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        Self::with_config(canvas, SessionConfig::default())
    }

    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the canvas has no 2D context.
    pub fn with_config(canvas: HtmlCanvasElement, config: SessionConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut core = EngineCore::new(config);
        core.set_surface_size(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, ctx, core })
    }

    /// The canvas element pages and overlay are drawn into.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn sync_surface_size(&mut self) {
        self.core
            .set_surface_size(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    // --- Input events ---

    /// Canvas click: place a marker from the form values under the pointer.
    pub fn on_click(&mut self, client_x: f64, client_y: f64, form: &MarkerForm) -> Vec<Action> {
        self.sync_surface_size();
        let bounds = self.canvas.get_bounding_client_rect();
        let rect = SurfaceRect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height());
        self.core.place_at_pointer(Point::new(client_x, client_y), rect, &form.to_spec())
    }

    /// Resize the blank canvas (no document loaded) to the host's layout.
    pub fn resize_blank(&mut self, width: u32, height: u32) -> Vec<Action> {
        if self.core.view.is_document_loaded() {
            return Vec::new();
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.sync_surface_size();
        vec![Action::DrawOverlay]
    }

    // --- Render ---

    /// Paint the overlay. With no document the surface is cleared first;
    /// with a document the freshly rendered page is drawn over.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render_overlay(&mut self) -> Result<(), JsValue> {
        self.sync_surface_size();
        if !self.core.view.is_document_loaded() {
            self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
            self.ctx
                .clear_rect(0.0, 0.0, self.core.surface_size.width, self.core.surface_size.height);
        }
        render::draw(&self.ctx, &self.core.overlay(), self.core.view.render_scale())
    }

    // --- Export ---

    /// Download the composited surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when encoding or download fails.
    pub fn export_png(&self) -> Result<(), AppError> {
        export::export_as_image(&CanvasSnapshot::new(&self.canvas), &AnchorDownloader)
    }

    /// Save the composited surface as a one-page PDF via a jsPDF constructor.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportPrecondition`] with no document loaded, or
    /// [`AppError::ExportFailed`] when jsPDF fails.
    pub fn export_pdf(&self, jspdf: &js_sys::Function) -> Result<(), AppError> {
        self.core
            .export_document(&CanvasSnapshot::new(&self.canvas), |plan| JsPdfWriter::create(jspdf, plan))
    }
}
