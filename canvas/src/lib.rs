//! Camera placement overlay for floor-plan documents.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! marker overlay: the ordered list of placed cameras in document space, the
//! page/zoom state that decides how the document is rasterized, and the
//! deterministic redraw of every marker after each change. The host layer is
//! responsible for the DOM controls, for rasterizing PDF pages when the
//! engine emits [`engine::Action::RenderPage`], and for reporting back when a
//! render completes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`marker`] | Marker types and the ordered marker store |
//! | [`geom`] | Points, sizes, and pointer-to-surface mapping |
//! | [`view`] | Page/zoom controller with sequenced render requests |
//! | [`render`] | Overlay draw commands and the `Canvas2D` painter |
//! | [`export`] | PNG / PDF export layout and collaborator traits |
//! | [`browser`] | DOM and jsPDF implementations of the export traits |
//! | [`input`] | Form value parsing and upload checks |
//! | [`config`] | Session configuration (style, zoom limits, defaults) |
//! | [`error`] | User-facing error kinds |
//! | [`consts`] | Shared numeric constants and fixed names |

pub mod browser;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod geom;
pub mod input;
pub mod marker;
pub mod render;
pub mod view;
