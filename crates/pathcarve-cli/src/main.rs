//! Headless command-line driver for the pathcarve engine.
//!
//! Plays the "save collaborator" role the engine expects around it: read
//! SVG text, apply scripted operations through the editor surface, write
//! the serialized result.

use clap::Parser;
use pathcarve_core::{CanvasPatch, CropRect, Editor, PathPatch, ViewBox};
use std::io::Read;

#[derive(Parser)]
#[command(name = "pathcarve", about = "Edit SVG path documents from the command line", version)]
struct Cli {
    /// Input SVG file. Reads stdin when omitted.
    input: Option<String>,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Resize the canvas, e.g. "320x240".
    #[arg(long, value_name = "WxH")]
    canvas: Option<String>,

    /// Set a path's fill, e.g. "path-0=#ff0000". Repeatable.
    #[arg(long, value_name = "ID=COLOR")]
    fill: Vec<String>,

    /// Delete a path by id. Repeatable.
    #[arg(long, value_name = "ID")]
    delete_path: Vec<String>,

    /// Crop the viewBox to "X Y W H".
    #[arg(long, value_name = "X Y W H")]
    crop: Option<String>,

    /// List the document's paths instead of writing SVG.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut editor = Editor::new(&text);
    log::info!(
        "loaded document: {} paths, viewBox {}",
        editor.document().len(),
        editor.document().view_box
    );

    if cli.list {
        for path in &editor.document().paths {
            println!(
                "{:<12} fill={:<10} stroke={:<10} stroke-width={}",
                path.id, path.fill, path.stroke, path.stroke_width
            );
        }
        return Ok(());
    }

    if let Some(spec) = &cli.canvas {
        let (width, height) = parse_canvas(spec)?;
        editor.update_canvas(&CanvasPatch {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        });
    }

    for spec in &cli.fill {
        let (id, color) = spec
            .split_once('=')
            .ok_or_else(|| format!("invalid --fill {spec:?}, expected ID=COLOR"))?;
        editor.update_path(
            id,
            &PathPatch {
                fill: Some(color.to_string()),
                ..Default::default()
            },
        );
    }

    for id in &cli.delete_path {
        editor.delete_path(id);
    }

    if let Some(spec) = &cli.crop {
        let view_box = ViewBox::parse(spec)
            .ok_or_else(|| format!("invalid --crop {spec:?}, expected \"X Y W H\""))?;
        editor.toggle_crop_mode();
        editor.set_crop_rect(Some(CropRect::from_view_box(view_box)));
        editor.apply_crop();
    }

    let svg = editor.to_svg();
    match &cli.output {
        Some(path) => std::fs::write(path, svg + "\n")?,
        None => println!("{svg}"),
    }
    Ok(())
}

/// Parse a "WxH" canvas size.
fn parse_canvas(spec: &str) -> Result<(f64, f64), String> {
    let invalid = || format!("invalid --canvas {spec:?}, expected WxH");
    let (w, h) = spec.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f64 = w.trim().parse().map_err(|_| invalid())?;
    let height: f64 = h.trim().parse().map_err(|_| invalid())?;
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(invalid());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canvas() {
        assert_eq!(parse_canvas("320x240").unwrap(), (320.0, 240.0));
        assert_eq!(parse_canvas("100.5X64").unwrap(), (100.5, 64.0));
        assert!(parse_canvas("320").is_err());
        assert!(parse_canvas("0x240").is_err());
        assert!(parse_canvas("axb").is_err());
    }
}
