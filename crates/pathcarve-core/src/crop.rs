//! Crop rectangle geometry and the interactive drag state machine.

use crate::document::ViewBox;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed crop rectangle edge, in document user units.
pub const MIN_CROP_SIZE: f64 = 10.0;

/// Handle hit tolerance in user units at zoom 1.
/// Callers divide by the current zoom so the grab area stays constant on
/// screen.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// The user-manipulated crop rectangle, in document user-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Create a crop rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a viewBox window.
    pub fn from_view_box(view_box: ViewBox) -> Self {
        Self::new(view_box.x, view_box.y, view_box.width, view_box.height)
    }

    /// The viewBox this rectangle would crop to.
    pub fn to_view_box(&self) -> ViewBox {
        ViewBox::new(self.x, self.y, self.width, self.height)
    }

    /// Axis-aligned bounding box of a drag anchor and the current point.
    pub fn from_drag(anchor: Point, current: Point) -> Self {
        Self::new(
            anchor.x.min(current.x),
            anchor.y.min(current.y),
            (current.x - anchor.x).abs(),
            (current.y - anchor.y).abs(),
        )
    }

    /// This rectangle translated by a delta, size unchanged.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Right edge coordinate.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge coordinate.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Check if a point lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// One of the eight resize grips on the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl CropHandle {
    /// All eight handles, clockwise from the top-left corner.
    pub const ALL: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::Top,
        CropHandle::TopRight,
        CropHandle::Right,
        CropHandle::BottomRight,
        CropHandle::Bottom,
        CropHandle::BottomLeft,
        CropHandle::Left,
    ];

    /// Whether dragging this handle moves the left edge.
    pub fn owns_left_edge(&self) -> bool {
        matches!(
            self,
            CropHandle::TopLeft | CropHandle::Left | CropHandle::BottomLeft
        )
    }

    /// Whether dragging this handle moves the top edge.
    pub fn owns_top_edge(&self) -> bool {
        matches!(
            self,
            CropHandle::TopLeft | CropHandle::Top | CropHandle::TopRight
        )
    }

    /// Whether this is a corner grip.
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            CropHandle::TopLeft
                | CropHandle::TopRight
                | CropHandle::BottomRight
                | CropHandle::BottomLeft
        )
    }

    /// Position of this handle on a rectangle (corners and edge midpoints).
    pub fn position(&self, rect: &CropRect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        match self {
            CropHandle::TopLeft => Point::new(rect.x, rect.y),
            CropHandle::Top => Point::new(cx, rect.y),
            CropHandle::TopRight => Point::new(rect.right(), rect.y),
            CropHandle::Right => Point::new(rect.right(), cy),
            CropHandle::BottomRight => Point::new(rect.right(), rect.bottom()),
            CropHandle::Bottom => Point::new(cx, rect.bottom()),
            CropHandle::BottomLeft => Point::new(rect.x, rect.bottom()),
            CropHandle::Left => Point::new(rect.x, cy),
        }
    }
}

/// A handle with its current position, for rendering and hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Handle type.
    pub kind: CropHandle,
    /// Position in user coordinates.
    pub position: Point,
}

impl Handle {
    /// Check if a point hits this handle within a tolerance.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The eight handles of a crop rectangle.
pub fn handles(rect: &CropRect) -> Vec<Handle> {
    CropHandle::ALL
        .iter()
        .map(|&kind| Handle {
            kind,
            position: kind.position(rect),
        })
        .collect()
}

/// What a pointer-down over the crop layer lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTarget {
    /// A resize grip.
    Handle(CropHandle),
    /// The rectangle interior.
    Inside,
    /// Neither the rectangle nor a grip.
    Outside,
}

/// Find what a point hits: handles take priority over the interior.
pub fn hit_test(rect: &CropRect, point: Point, tolerance: f64) -> CropTarget {
    for handle in handles(rect) {
        if handle.hit_test(point, tolerance) {
            return CropTarget::Handle(handle.kind);
        }
    }
    if rect.contains(point) {
        CropTarget::Inside
    } else {
        CropTarget::Outside
    }
}

/// Resize a rectangle by a drag delta from one of its handles.
///
/// Each handle updates only the edges it owns; the opposite edge stays
/// fixed. With the aspect lock on, corner handles scale both dimensions by
/// an averaged scalar delta and edge handles derive the cross dimension
/// from the snapshot ratio. The minimum-size clamp runs afterwards in
/// every case.
pub fn resize(origin: &CropRect, handle: CropHandle, delta: Vec2, lock_aspect: bool) -> CropRect {
    let resized = if lock_aspect {
        resize_locked(origin, handle, delta)
    } else {
        resize_free(origin, handle, delta)
    };
    clamp_min_size(resized, handle, lock_aspect, origin.aspect_ratio())
}

/// Unlocked resize: independent per-edge deltas.
fn resize_free(snap: &CropRect, handle: CropHandle, delta: Vec2) -> CropRect {
    let (dx, dy) = (delta.x, delta.y);
    match handle {
        CropHandle::TopLeft => CropRect::new(
            snap.x + dx,
            snap.y + dy,
            snap.width - dx,
            snap.height - dy,
        ),
        CropHandle::Top => CropRect::new(snap.x, snap.y + dy, snap.width, snap.height - dy),
        CropHandle::TopRight => CropRect::new(
            snap.x,
            snap.y + dy,
            snap.width + dx,
            snap.height - dy,
        ),
        CropHandle::Right => CropRect::new(snap.x, snap.y, snap.width + dx, snap.height),
        CropHandle::BottomRight => {
            CropRect::new(snap.x, snap.y, snap.width + dx, snap.height + dy)
        }
        CropHandle::Bottom => CropRect::new(snap.x, snap.y, snap.width, snap.height + dy),
        CropHandle::BottomLeft => CropRect::new(
            snap.x + dx,
            snap.y,
            snap.width - dx,
            snap.height + dy,
        ),
        CropHandle::Left => CropRect::new(snap.x + dx, snap.y, snap.width - dx, snap.height),
    }
}

/// Locked resize: the snapshot aspect ratio is preserved.
///
/// Corners average the two axis deltas with a per-corner sign so dragging
/// outward always grows the rectangle; the opposite corner stays fixed.
/// Edge handles resize their owned dimension and derive the other from the
/// ratio.
fn resize_locked(snap: &CropRect, handle: CropHandle, delta: Vec2) -> CropRect {
    let (dx, dy) = (delta.x, delta.y);
    let aspect = snap.aspect_ratio();

    let (width, height) = match handle {
        CropHandle::TopLeft => grow(snap, -(dx + dy) / 2.0, aspect),
        CropHandle::TopRight => grow(snap, (dx - dy) / 2.0, aspect),
        CropHandle::BottomRight => grow(snap, (dx + dy) / 2.0, aspect),
        CropHandle::BottomLeft => grow(snap, (-dx + dy) / 2.0, aspect),
        CropHandle::Right => {
            let width = snap.width + dx;
            (width, width / aspect)
        }
        CropHandle::Left => {
            let width = snap.width - dx;
            (width, width / aspect)
        }
        CropHandle::Bottom => {
            let height = snap.height + dy;
            (height * aspect, height)
        }
        CropHandle::Top => {
            let height = snap.height - dy;
            (height * aspect, height)
        }
    };

    // Reposition the owned edges so the opposite corner/edge stays fixed.
    let x = if handle.owns_left_edge() {
        snap.right() - width
    } else {
        snap.x
    };
    let y = if handle.owns_top_edge() {
        snap.bottom() - height
    } else {
        snap.y
    };
    CropRect::new(x, y, width, height)
}

/// Apply a scalar growth delta to the width, deriving the height.
fn grow(snap: &CropRect, delta: f64, aspect: f64) -> (f64, f64) {
    let width = snap.width + delta;
    (width, width / aspect)
}

/// Clamp a resized rectangle to the minimum size.
///
/// When a dimension collapses below the minimum, the edge opposite the
/// active handle stays where the resize computation put it, so resizing
/// from a fixed edge never teleports that edge.
fn clamp_min_size(
    mut rect: CropRect,
    handle: CropHandle,
    lock_aspect: bool,
    aspect: f64,
) -> CropRect {
    if rect.width < MIN_CROP_SIZE {
        let right = rect.right();
        rect.width = MIN_CROP_SIZE;
        if lock_aspect {
            let bottom = rect.bottom();
            rect.height = MIN_CROP_SIZE / aspect;
            if handle.owns_top_edge() {
                rect.y = bottom - rect.height;
            }
        }
        if handle.owns_left_edge() {
            rect.x = right - rect.width;
        }
    }
    if rect.height < MIN_CROP_SIZE {
        let bottom = rect.bottom();
        rect.height = MIN_CROP_SIZE;
        if lock_aspect {
            let right = rect.right();
            rect.width = MIN_CROP_SIZE * aspect;
            if handle.owns_left_edge() {
                rect.x = right - rect.width;
            }
        }
        if handle.owns_top_edge() {
            rect.y = bottom - rect.height;
        }
    }
    rect
}

/// Shrink a rectangle to a square on its shorter side, anchored at its
/// existing origin.
pub fn make_square(rect: &CropRect) -> CropRect {
    let size = rect.width.min(rect.height);
    CropRect::new(rect.x, rect.y, size, size)
}

/// State of an in-progress crop drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging out a brand-new rectangle.
    Creating {
        /// Pointer-down position.
        anchor: Point,
    },
    /// Dragging an existing rectangle by its interior.
    Moving {
        anchor: Point,
        /// Rectangle at drag start.
        origin: CropRect,
    },
    /// Dragging one of the eight grips.
    Resizing {
        anchor: Point,
        origin: CropRect,
        handle: CropHandle,
    },
}

/// Crop-mode interaction state: the rectangle, the aspect lock, and the
/// transient drag.
///
/// The drag states are mutually exclusive; pointer-up discards only the
/// transient tracking fields while the rectangle itself persists.
#[derive(Debug, Clone, Default)]
pub struct CropSession {
    /// The current crop rectangle, if one exists.
    pub rect: Option<CropRect>,
    /// Whether resizes preserve the aspect ratio.
    pub lock_aspect_ratio: bool,
    drag: DragState,
}

impl CropSession {
    /// Create an idle session with no rectangle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with an existing rectangle.
    pub fn with_rect(rect: CropRect) -> Self {
        Self {
            rect: Some(rect),
            ..Self::default()
        }
    }

    /// Begin a drag at a user-space point.
    ///
    /// A grip starts a resize, the interior starts a move, anywhere else
    /// clears any prior rectangle and starts creating a new one.
    pub fn begin(&mut self, point: Point, tolerance: f64) {
        self.drag = match self.rect {
            Some(rect) => match hit_test(&rect, point, tolerance) {
                CropTarget::Handle(handle) => DragState::Resizing {
                    anchor: point,
                    origin: rect,
                    handle,
                },
                CropTarget::Inside => DragState::Moving {
                    anchor: point,
                    origin: rect,
                },
                CropTarget::Outside => {
                    self.rect = None;
                    DragState::Creating { anchor: point }
                }
            },
            None => DragState::Creating { anchor: point },
        };
    }

    /// Update the drag with the current pointer position.
    pub fn update(&mut self, point: Point) {
        match self.drag {
            DragState::Idle => {}
            DragState::Creating { anchor } => {
                self.rect = Some(CropRect::from_drag(anchor, point));
            }
            DragState::Moving { anchor, origin } => {
                self.rect = Some(origin.translated(point - anchor));
            }
            DragState::Resizing {
                anchor,
                origin,
                handle,
            } => {
                self.rect = Some(resize(
                    &origin,
                    handle,
                    point - anchor,
                    self.lock_aspect_ratio,
                ));
            }
        }
    }

    /// End the drag, keeping the rectangle.
    pub fn end(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Abort the drag, restoring the rectangle from before it started.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => {}
            DragState::Creating { .. } => {
                // There was no prior rectangle to restore.
                self.rect = None;
            }
            DragState::Moving { origin, .. } | DragState::Resizing { origin, .. } => {
                self.rect = Some(origin);
            }
        }
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// The current drag state.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Square the rectangle on its shorter side and engage the aspect lock.
    pub fn make_square(&mut self) {
        if let Some(rect) = self.rect {
            self.rect = Some(make_square(&rect));
            self.lock_aspect_ratio = true;
        }
    }
}
