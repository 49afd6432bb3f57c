//! Document model: canvas dimensions, viewBox, and the ordered path list.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default canvas edge length when the source document gives none.
pub const DEFAULT_CANVAS_SIZE: f64 = 200.0;

/// The visible coordinate window of a document.
///
/// Parsed once at the document boundary; the canonical textual form is
/// `"x y width height"` with four finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Create a viewBox from its four components.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse the `"x y width height"` form.
    ///
    /// Accepts whitespace or comma separators. Returns `None` unless exactly
    /// four finite numbers are present.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        if parts.len() != 4 || parts.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }

    /// The viewBox as a kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// A single path element.
///
/// The geometry description `d` is opaque to the engine; it is carried
/// through parse, edit, and serialize untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    /// Unique within the document; assigned positionally by the parser.
    pub id: String,
    /// Path geometry description.
    pub d: String,
    /// Fill paint.
    pub fill: String,
    /// Stroke paint (`"none"` when absent).
    pub stroke: String,
    /// Stroke width, never negative.
    pub stroke_width: f64,
}

/// An editable SVG document.
///
/// Path order is z-order, first element at the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgDocument {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Visible coordinate window.
    pub view_box: ViewBox,
    /// Paths in z-order (back to front).
    pub paths: Vec<PathElement>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            view_box: ViewBox::new(0.0, 0.0, DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE),
            paths: Vec::new(),
        }
    }
}

impl SvgDocument {
    /// Get a path by id.
    pub fn path(&self, id: &str) -> Option<&PathElement> {
        self.paths.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a path by id.
    pub fn path_mut(&mut self, id: &str) -> Option<&mut PathElement> {
        self.paths.iter_mut().find(|p| p.id == id)
    }

    /// Check if the document has no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A partial update to one path.
///
/// `Some` fields replace the target attribute; `None` fields leave it
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPatch {
    pub d: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl PathPatch {
    /// Merge this patch onto a path.
    pub fn apply_to(&self, path: &mut PathElement) {
        if let Some(d) = &self.d {
            path.d = d.clone();
        }
        if let Some(fill) = &self.fill {
            path.fill = fill.clone();
        }
        if let Some(stroke) = &self.stroke {
            path.stroke = stroke.clone();
        }
        if let Some(stroke_width) = self.stroke_width {
            path.stroke_width = stroke_width;
        }
    }
}

/// A partial update to the document's top-level canvas fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub view_box: Option<ViewBox>,
}

impl CanvasPatch {
    /// Merge this patch onto a document's canvas fields.
    pub fn apply_to(&self, document: &mut SvgDocument) {
        if let Some(width) = self.width {
            document.width = width;
        }
        if let Some(height) = self.height {
            document.height = height;
        }
        if let Some(view_box) = self.view_box {
            document.view_box = view_box;
        }
    }
}
