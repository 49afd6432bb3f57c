//! Textual SVG parsing and serialization.
//!
//! The parser handles the markup subset this engine edits: one `<svg>` root
//! carrying `width`/`height`/`viewBox`, and `<path>` children carrying
//! `d`/`fill`/`stroke`/`stroke-width`. Attribute extraction scans the tag
//! text directly; the subset does not warrant a full XML document model.

use crate::document::{PathElement, SvgDocument, ViewBox, DEFAULT_CANVAS_SIZE};
use thiserror::Error;

/// Errors from the strict parsing layer.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("no <svg> root element")]
    MissingRoot,
}

/// Parse SVG text into a document.
///
/// Never fails: empty or unparsable input yields the default 200×200
/// document with no paths.
pub fn parse(text: &str) -> SvgDocument {
    parse_strict(text).unwrap_or_default()
}

/// Parse SVG text, reporting why it could not be read.
pub fn parse_strict(text: &str) -> Result<SvgDocument, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let root = find_tag(text, "svg").ok_or(ParseError::MissingRoot)?;

    let width = attr(root, "width")
        .and_then(parse_number)
        .unwrap_or(DEFAULT_CANVAS_SIZE);
    let height = attr(root, "height")
        .and_then(parse_number)
        .unwrap_or(DEFAULT_CANVAS_SIZE);
    let view_box = attr(root, "viewBox")
        .and_then(ViewBox::parse)
        .unwrap_or_else(|| ViewBox::new(0.0, 0.0, width, height));

    let paths = tags(text, "path")
        .enumerate()
        .map(|(index, tag)| PathElement {
            id: format!("path-{index}"),
            d: attr(tag, "d").unwrap_or_default().to_string(),
            fill: non_empty(attr(tag, "fill"))
                .unwrap_or("#000000")
                .to_string(),
            stroke: non_empty(attr(tag, "stroke")).unwrap_or("none").to_string(),
            stroke_width: attr(tag, "stroke-width")
                .and_then(parse_number)
                .unwrap_or(0.0)
                .max(0.0),
        })
        .collect();

    Ok(SvgDocument {
        width,
        height,
        view_box,
        paths,
    })
}

/// Serialize a document back to SVG text.
///
/// Path attributes are emitted in `d`, `fill`, `stroke`, `stroke-width`
/// order. Serializing a parsed document normalizes defaults and attribute
/// order; parsing a serialized document restores it exactly.
pub fn serialize(document: &SvgDocument) -> String {
    let paths = document
        .paths
        .iter()
        .map(|path| {
            format!(
                "  <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                path.d, path.fill, path.stroke, path.stroke_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<svg width=\"{}\" height=\"{}\" viewBox=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n{}\n</svg>",
        document.width, document.height, document.view_box, paths
    )
}

/// Find the first `<name …>` tag and return its text up to the closing `>`.
fn find_tag<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let mut search = 0;
    let open = format!("<{name}");
    while let Some(found) = text[search..].find(&open) {
        let start = search + found;
        let rest = &text[start + open.len()..];
        // Reject longer tag names sharing the prefix, e.g. <svgfoo>.
        let boundary = rest
            .chars()
            .next()
            .map(|c| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(false);
        if boundary {
            let end = rest.find('>')?;
            return Some(&text[start..start + open.len() + end + 1]);
        }
        search = start + open.len();
    }
    None
}

/// Iterate over every `<name …>` tag in document order.
fn tags<'a>(text: &'a str, name: &'a str) -> impl Iterator<Item = &'a str> {
    let open = format!("<{name}");
    let mut search = 0;
    std::iter::from_fn(move || {
        while let Some(found) = text[search..].find(&open) {
            let start = search + found;
            let rest = &text[start + open.len()..];
            let boundary = rest
                .chars()
                .next()
                .map(|c| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(false);
            search = start + open.len();
            if boundary {
                if let Some(end) = rest.find('>') {
                    let tag = &text[start..start + open.len() + end + 1];
                    search = start + open.len() + end + 1;
                    return Some(tag);
                }
            }
        }
        None
    })
}

/// Extract a double-quoted attribute value from a tag's text.
///
/// The attribute name must be preceded by whitespace, so `d` does not
/// match inside `id` and `width` does not match inside `stroke-width`.
fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!("{name}=\"");
    let mut search = 0;
    while let Some(found) = tag[search..].find(&pattern) {
        let start = search + found;
        let value_start = start + pattern.len();
        let preceded = tag[..start]
            .chars()
            .next_back()
            .map(|c| c.is_whitespace())
            .unwrap_or(false);
        if preceded {
            let rest = &tag[value_start..];
            let end = rest.find('"')?;
            return Some(&rest[..end]);
        }
        search = value_start;
    }
    None
}

/// Parse a finite number, tolerating surrounding whitespace.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Treat an empty attribute value as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
