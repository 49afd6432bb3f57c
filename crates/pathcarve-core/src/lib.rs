//! Pathcarve Core Library
//!
//! Headless editing engine for SVG path documents: document model, linear
//! undo/redo history, interactive viewBox cropping, coordinate transforms,
//! zoom control, and textual SVG parsing/serialization. Presentation
//! layers call the [`editor::Editor`] operation surface and render
//! whatever state it exposes.

pub mod camera;
pub mod crop;
pub mod document;
pub mod editor;
pub mod history;
pub mod parser;
pub mod zoom;

pub use camera::Camera;
pub use crop::{CropHandle, CropRect, CropSession, DragState, HANDLE_HIT_TOLERANCE, MIN_CROP_SIZE};
pub use document::{CanvasPatch, PathElement, PathPatch, SvgDocument, ViewBox};
pub use editor::Editor;
pub use history::History;
pub use zoom::{Zoom, MAX_ZOOM, MIN_ZOOM, ZOOM_LEVELS};
