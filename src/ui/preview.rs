//! Card preview images — decoding and half-block rendering.
//!
//! Only local files are decoded; remote references (`http://`, `https://`)
//! get a text placeholder on the card instead.

use std::collections::HashMap;
use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
};

use super::theme::Theme;
use crate::core::card::CardCollection;

/// Largest edge kept in memory; cards never get wider than a terminal.
const MAX_EDGE: u32 = 320;

/// A preview resized for one card area.
#[derive(Debug)]
struct Fitted {
    cells: (u16, u16),
    image: RgbaImage,
}

/// Decoded previews keyed by image reference, plus the last fit of each.
///
/// Cards keep their size between frames once they have settled, so only
/// the latest fit per reference is kept.
#[derive(Debug, Default)]
pub struct PreviewCache {
    sources: HashMap<String, RgbaImage>,
    fitted: HashMap<String, Fitted>,
    refits: u64,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<String>, image: RgbaImage) {
        let reference = reference.into();
        self.fitted.remove(&reference);
        self.sources.insert(reference, image);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// The preview for `reference` fitted to `width` x `height` cells,
    /// resized only when that size differs from the previous call.
    pub fn fitted(&mut self, reference: &str, width: u16, height: u16) -> Option<&RgbaImage> {
        if width == 0 || height == 0 {
            return None;
        }
        let source = self.sources.get(reference)?;
        let stale = self
            .fitted
            .get(reference)
            .map_or(true, |f| f.cells != (width, height));
        if stale {
            let image = fit(source, width, height)?;
            self.refits += 1;
            tracing::trace!(reference, width, height, refits = self.refits, "preview refit");
            self.fitted.insert(
                reference.to_string(),
                Fitted {
                    cells: (width, height),
                    image,
                },
            );
        }
        self.fitted.get(reference).map(|f| &f.image)
    }
}

pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Decode every local preview referenced by `cards`.  Unreadable files are
/// logged and skipped.
pub fn load_previews(cards: &CardCollection) -> PreviewCache {
    let mut cache = PreviewCache::new();
    for card in cards {
        let reference = &card.preview_image_ref;
        if reference.is_empty() || is_remote(reference) || cache.sources.contains_key(reference) {
            continue;
        }
        let path = Path::new(reference);
        if !path.is_file() {
            continue;
        }
        match image::open(path) {
            Ok(img) => cache.insert(reference.clone(), img.thumbnail(MAX_EDGE, MAX_EDGE).to_rgba8()),
            Err(e) => tracing::warn!(path = %path.display(), "preview decode failed: {e}"),
        }
    }
    cache
}

/// Scale `thumb` to fit `width` x `height` cells at two pixels per cell
/// vertically, keeping its aspect ratio.
fn fit(thumb: &RgbaImage, width: u16, height: u16) -> Option<RgbaImage> {
    if thumb.width() == 0 || thumb.height() == 0 {
        return None;
    }
    let max_px_w = width as f64;
    let max_px_h = (height as f64) * 2.0;
    let src_w = thumb.width() as f64;
    let src_h = thumb.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;
    Some(image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle))
}

/// Draw an already fitted image into `area` with `▀` cells (two pixels per
/// cell), centred horizontally and faded toward the backdrop by `opacity`.
pub fn render_halfblocks(rgba: &RgbaImage, area: Rect, opacity: f64, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let (iw, ih) = (rgba.width(), rgba.height());
    let col_offset = (area.width.saturating_sub(iw.min(u16::MAX as u32) as u16)) / 2;

    let pixel = |x: u32, y: u32| -> Color {
        let p = rgba.get_pixel(x, y);
        Theme::fade((p[0], p[1], p[2]), opacity)
    };

    for row in 0..area.height {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(area.width as u32) {
            let fg = pixel(col, yt);
            let bg = if yb < ih { pixel(col, yb) } else { Color::Reset };
            if let Some(cell) =
                buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row))
            {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}
