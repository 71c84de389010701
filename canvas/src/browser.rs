//! Browser collaborators: canvas snapshots, anchor downloads, jsPDF, logging.
//!
//! Everything here talks to the DOM or to JS objects and is exercised only in
//! the browser; the traits it implements are tested with fakes in
//! `export_test.rs`.

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlCanvasElement};

use crate::error::AppError;
use crate::export::{DocumentExportPlan, DocumentWriter, Downloader, Snapshot};
use crate::geom::Size;

/// Install the console logger and panic hook. Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

fn export_failed(err: JsValue) -> AppError {
    let reason = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    AppError::ExportFailed { reason }
}

/// [`Snapshot`] over a canvas element.
pub struct CanvasSnapshot<'a> {
    canvas: &'a HtmlCanvasElement,
}

impl<'a> CanvasSnapshot<'a> {
    #[must_use]
    pub fn new(canvas: &'a HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Snapshot for CanvasSnapshot<'_> {
    fn png_data_url(&self) -> Result<String, AppError> {
        self.canvas.to_data_url_with_type("image/png").map_err(export_failed)
    }

    fn pixel_size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }
}

/// [`Downloader`] that clicks a temporary `<a download>` element.
pub struct AnchorDownloader;

impl Downloader for AnchorDownloader {
    fn download(&self, filename: &str, data_url: &str) -> Result<(), AppError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::ExportFailed { reason: "no document".to_owned() })?;
        let anchor = document
            .create_element("a")
            .map_err(export_failed)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| AppError::ExportFailed { reason: "not an anchor element".to_owned() })?;
        anchor.set_download(filename);
        anchor.set_href(data_url);
        anchor.click();
        Ok(())
    }
}

/// [`DocumentWriter`] over a jsPDF instance.
pub struct JsPdfWriter {
    doc: JsValue,
}

impl JsPdfWriter {
    /// Construct `new jsPDF(orientation, "mm", "a4")` for `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExportFailed`] when the constructor throws.
    pub fn create(ctor: &Function, plan: &DocumentExportPlan) -> Result<Self, AppError> {
        let args = Array::of3(&plan.orientation.code().into(), &"mm".into(), &"a4".into());
        let doc = Reflect::construct(ctor, &args).map_err(export_failed)?;
        Ok(Self { doc })
    }

    fn call(&self, method: &str, args: &Array) -> Result<(), AppError> {
        let function = Reflect::get(&self.doc, &method.into())
            .map_err(export_failed)?
            .dyn_into::<Function>()
            .map_err(|_| AppError::ExportFailed { reason: format!("jsPDF has no {method}()") })?;
        function.apply(&self.doc, args).map_err(export_failed)?;
        Ok(())
    }
}

impl DocumentWriter for JsPdfWriter {
    fn add_image(&mut self, data: &str, format: &str, x: f64, y: f64, width: f64, height: f64) -> Result<(), AppError> {
        let args = Array::new();
        args.push(&data.into());
        args.push(&format.into());
        for value in [x, y, width, height] {
            args.push(&value.into());
        }
        self.call("addImage", &args)
    }

    fn save(&mut self, filename: &str) -> Result<(), AppError> {
        self.call("save", &Array::of1(&filename.into()))
    }
}
