//! Editor core: owns the history-managed document, selection, zoom, and
//! crop interaction, and exposes the operation surface the presentation
//! layer calls into.

use crate::crop::{self, CropRect, CropSession, Handle, HANDLE_HIT_TOLERANCE};
use crate::document::{CanvasPatch, PathElement, PathPatch, SvgDocument, ViewBox};
use crate::history::History;
use crate::parser;
use crate::zoom::Zoom;
use kurbo::Point;

/// One editing session over one document.
///
/// All mutation goes through named operations on this type; every
/// document-changing operation commits a history frame, including no-op
/// updates and deletes of unknown ids. Selection, zoom, and crop state
/// live outside the history and are not restored by undo.
#[derive(Debug, Clone)]
pub struct Editor {
    history: History<SvgDocument>,
    /// The viewBox at session start; used to decide whether the document
    /// has already been cropped.
    original_view_box: ViewBox,
    selected_path: Option<String>,
    zoom: Zoom,
    is_crop_mode: bool,
    crop: CropSession,
}

impl Editor {
    /// Start a session from SVG text.
    ///
    /// Unparsable text falls back to the default document.
    pub fn new(initial_svg: &str) -> Self {
        Self::from_document(parser::parse(initial_svg))
    }

    /// Start a session from an already-built document.
    pub fn from_document(document: SvgDocument) -> Self {
        let original_view_box = document.view_box;
        Self {
            history: History::new(document),
            original_view_box,
            selected_path: None,
            zoom: Zoom::new(),
            is_crop_mode: false,
            crop: CropSession::new(),
        }
    }

    // --- Read accessors ---

    /// The current document.
    pub fn document(&self) -> &SvgDocument {
        self.history.present()
    }

    /// The session's original viewBox.
    pub fn original_view_box(&self) -> ViewBox {
        self.original_view_box
    }

    /// The selected path id, if any.
    pub fn selected_path_id(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    /// The selected path element, if any.
    pub fn selected_path(&self) -> Option<&PathElement> {
        self.selected_path
            .as_deref()
            .and_then(|id| self.document().path(id))
    }

    /// The current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom.level()
    }

    /// The current zoom as a rounded percentage.
    pub fn zoom_percent(&self) -> u32 {
        self.zoom.percent()
    }

    /// Whether crop mode is active.
    pub fn is_crop_mode(&self) -> bool {
        self.is_crop_mode
    }

    /// The current crop rectangle, if one exists.
    pub fn crop_rect(&self) -> Option<CropRect> {
        self.crop.rect
    }

    /// Whether resize operations preserve the aspect ratio.
    pub fn lock_aspect_ratio(&self) -> bool {
        self.crop.lock_aspect_ratio
    }

    /// The crop rectangle's grips, for rendering.
    pub fn crop_handles(&self) -> Vec<Handle> {
        self.crop
            .rect
            .as_ref()
            .map(crop::handles)
            .unwrap_or_default()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Serialize the current document to SVG text.
    pub fn to_svg(&self) -> String {
        parser::serialize(self.document())
    }

    // --- Selection ---

    /// Set or clear the selected path.
    pub fn select_path(&mut self, id: Option<&str>) {
        self.selected_path = id.map(String::from);
    }

    // --- Document mutations ---

    /// Merge a patch onto the path with the given id.
    ///
    /// Unknown ids leave the paths untouched but still commit a frame.
    pub fn update_path(&mut self, id: &str, patch: &PathPatch) {
        let mut next = self.document().clone();
        match next.path_mut(id) {
            Some(path) => patch.apply_to(path),
            None => log::debug!("update_path: no path with id {id}"),
        }
        self.commit(next);
    }

    /// Remove the path with the given id, clearing the selection if it was
    /// selected. Unknown ids still commit a frame.
    pub fn delete_path(&mut self, id: &str) {
        let mut next = self.document().clone();
        next.paths.retain(|p| p.id != id);
        self.commit(next);

        if self.selected_path.as_deref() == Some(id) {
            self.selected_path = None;
        }
    }

    /// Merge a patch onto the document's canvas fields.
    pub fn update_canvas(&mut self, patch: &CanvasPatch) {
        let mut next = self.document().clone();
        patch.apply_to(&mut next);
        self.commit(next);
    }

    fn commit(&mut self, next: SvgDocument) {
        log::debug!("committing history frame ({} paths)", next.len());
        self.history.push(next);
    }

    // --- History ---

    /// Step back one frame. No-op when nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Step forward one frame. No-op when nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    // --- Zoom ---

    /// Step up to the next zoom preset.
    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    /// Step down to the previous zoom preset.
    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    /// Set the zoom level directly, clamped to the allowed range.
    pub fn zoom_to(&mut self, level: f64) {
        self.zoom.zoom_to(level);
    }

    /// Apply one wheel/pinch zoom step.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, sensitivity: f64) {
        self.zoom.zoom_by_wheel(delta_y, sensitivity);
    }

    /// Reset the zoom to 100%.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    /// Fit the document in the viewport.
    pub fn zoom_to_fit(&mut self) {
        self.zoom.zoom_to_fit();
    }

    // --- Crop ---

    /// Enter or leave crop mode.
    ///
    /// Entering clears the selection and the aspect lock, and seeds the
    /// rectangle from the current viewBox only when the document was
    /// already cropped (its viewBox differs from the session's original);
    /// otherwise the user drags a rectangle into existence. Leaving
    /// discards the rectangle unconditionally.
    pub fn toggle_crop_mode(&mut self) {
        self.is_crop_mode = !self.is_crop_mode;
        log::info!(
            "crop mode {}",
            if self.is_crop_mode { "on" } else { "off" }
        );

        if self.is_crop_mode {
            self.selected_path = None;
            let view_box = self.document().view_box;
            let seed = (view_box != self.original_view_box)
                .then(|| CropRect::from_view_box(view_box));
            self.crop = match seed {
                Some(rect) => CropSession::with_rect(rect),
                None => CropSession::new(),
            };
        } else {
            self.crop = CropSession::new();
        }
    }

    /// Replace or clear the crop rectangle directly (numeric entry).
    pub fn set_crop_rect(&mut self, rect: Option<CropRect>) {
        self.crop.rect = rect;
    }

    /// Toggle the aspect-ratio lock.
    pub fn set_lock_aspect_ratio(&mut self, lock: bool) {
        self.crop.lock_aspect_ratio = lock;
    }

    /// Commit the crop rectangle as the new viewBox and leave crop mode.
    ///
    /// No-op when no rectangle exists.
    pub fn apply_crop(&mut self) {
        let Some(rect) = self.crop.rect else {
            return;
        };
        let view_box = rect.to_view_box();
        log::info!("applying crop to viewBox {view_box}");
        self.update_canvas(&CanvasPatch {
            view_box: Some(view_box),
            ..Default::default()
        });
        self.is_crop_mode = false;
        self.crop = CropSession::new();
    }

    /// Square the crop rectangle on its shorter side and engage the lock.
    pub fn make_square(&mut self) {
        self.crop.make_square();
    }

    // --- Crop drag (points in document user space) ---

    /// Begin a crop drag at a pointer-down position.
    pub fn begin_crop_drag(&mut self, point: Point) {
        if self.is_crop_mode {
            self.crop.begin(point, HANDLE_HIT_TOLERANCE / self.zoom.level());
        }
    }

    /// Update the active crop drag with the current pointer position.
    pub fn update_crop_drag(&mut self, point: Point) {
        self.crop.update(point);
    }

    /// End the active crop drag, keeping the rectangle.
    pub fn end_crop_drag(&mut self) {
        self.crop.end();
    }

    /// Abort the active crop drag, restoring the pre-drag rectangle.
    pub fn cancel_crop_drag(&mut self) {
        self.crop.cancel();
    }
}
