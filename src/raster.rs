// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

use crate::config::{Color, SpeedometerConfig};
use crate::error::{GaugeError, Result};
use crate::geometry::Position;
use crate::scene::{TextAlign, TextBaseline, TextStyle, Typeface};
use log::{info, warn};
use rusttype::{point, Font, PositionedGlyph, Scale, ScaledGlyph};
use std::fmt;
use std::f64::consts::TAU;
use std::ops::Range;
use std::path::Path;

/// Tried in order when no display font is configured.
const DISPLAY_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Tried in order when no serif font is configured.
const SERIF_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

// ============================================================================
// FONTS
// ============================================================================

/// Faces available to text commands. Either face stands in for the other when
/// only one is present; with neither, text is skipped.
#[derive(Default)]
pub struct Fonts {
    display: Option<Font<'static>>,
    serif: Option<Font<'static>>,
}

impl fmt::Debug for Fonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fonts")
            .field("display", &self.display.is_some())
            .field("serif", &self.serif.is_some())
            .finish()
    }
}

impl Fonts {
    pub fn new(display: Option<Font<'static>>, serif: Option<Font<'static>>) -> Self {
        Self { display, serif }
    }

    /// Loads configured faces, searching system locations for missing ones.
    /// A configured path that cannot be used is an error.
    pub fn load(config: &SpeedometerConfig) -> Result<Self> {
        let display = match &config.font_path {
            Some(path) => Some(load_font(path)?),
            None => discover(DISPLAY_FONT_CANDIDATES),
        };
        let serif = match &config.serif_font_path {
            Some(path) => Some(load_font(path)?),
            None => discover(SERIF_FONT_CANDIDATES),
        };

        let fonts = Self::new(display, serif);
        if fonts.is_empty() {
            warn!("no usable font found; labels will not be drawn (pass --font to set one)");
        }
        Ok(fonts)
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_none() && self.serif.is_none()
    }

    pub fn get(&self, typeface: Typeface) -> Option<&Font<'static>> {
        match typeface {
            Typeface::Display => self.display.as_ref().or(self.serif.as_ref()),
            Typeface::Serif => self.serif.as_ref().or(self.display.as_ref()),
        }
    }
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path).map_err(|source| GaugeError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font = Font::try_from_vec(data).ok_or_else(|| GaugeError::FontParse {
        path: path.to_path_buf(),
    })?;
    info!("loaded font {}", path.display());
    Ok(font)
}

fn discover(candidates: &[&str]) -> Option<Font<'static>> {
    candidates
        .iter()
        .map(Path::new)
        .filter(|path| path.is_file())
        .find_map(|path| load_font(path).ok())
}

// ============================================================================
// TEXT LAYOUT
// ============================================================================

/// Glyphs of `text` with their caret offsets, plus the total advance.
/// Each glyph advances by its width, pair kerning, then `letter_spacing`
/// (trailing spacing included, as canvas text does).
fn advance_glyphs<'f>(
    font: &Font<'f>,
    text: &str,
    style: &TextStyle,
) -> (Vec<(f32, ScaledGlyph<'f>)>, f32) {
    let scale = Scale::uniform(style.size);
    let mut caret = 0.0f32;
    let mut previous = None;
    let mut glyphs = Vec::with_capacity(text.len());
    for c in text.chars() {
        let glyph = font.glyph(c).scaled(scale);
        if let Some(prev) = previous {
            caret += font.pair_kerning(scale, prev, glyph.id());
        }
        previous = Some(glyph.id());
        let advance = glyph.h_metrics().advance_width;
        glyphs.push((caret, glyph));
        caret += advance + style.letter_spacing;
    }
    (glyphs, caret)
}

/// Horizontal advance of `text` in `style`; what `Center` alignment centers.
pub fn text_advance(font: &Font, text: &str, style: &TextStyle) -> f32 {
    advance_glyphs(font, text, style).1
}

/// Lays `text` out against `position`, resolving alignment and baseline.
pub fn layout_text<'f>(
    font: &Font<'f>,
    position: Position,
    text: &str,
    style: &TextStyle,
) -> Vec<PositionedGlyph<'f>> {
    let v_metrics = font.v_metrics(Scale::uniform(style.size));
    let (glyphs, caret) = advance_glyphs(font, text, style);

    let origin_x = match style.align {
        TextAlign::Left => position.x as f32,
        TextAlign::Center => position.x as f32 - caret / 2.0,
    };
    let baseline = match style.baseline {
        TextBaseline::Top => position.y as f32 + v_metrics.ascent,
        TextBaseline::Middle => position.y as f32 + (v_metrics.ascent + v_metrics.descent) / 2.0,
    };

    glyphs
        .into_iter()
        .map(|(offset, glyph)| glyph.positioned(point(origin_x + offset, baseline)))
        .collect()
}

// ============================================================================
// CANVAS
// ============================================================================

/// RGBA8 framebuffer view, `width * height * 4` bytes, row major.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        // Rows beyond the buffer are never touched.
        let height = height.min(frame.len() / (width * 4).max(1));
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Source-over blend of `color` at `alpha` coverage. Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let dst = [
            self.frame[idx] as f32,
            self.frame[idx + 1] as f32,
            self.frame[idx + 2] as f32,
        ];
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    pub fn fill_rect(&mut self, origin: Position, width: f64, height: f64, color: Color) {
        let (x0, x1) = ordered(origin.x, origin.x + width);
        let (y0, y1) = ordered(origin.y, origin.y + height);
        for y in clip(y0, y1, self.height) {
            let cov_y = overlap(y as f64, y0, y1);
            for x in clip(x0, x1, self.width) {
                let coverage = overlap(x as f64, x0, x1) * cov_y;
                if coverage > 0.0 {
                    self.set_pixel(x as i64, y as i64, color, coverage as f32);
                }
            }
        }
    }

    /// Anti-aliased straight stroke with butt caps.
    pub fn stroke_line(&mut self, from: Position, to: Position, line_width: f64, color: Color) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let length = dx.hypot(dy);
        if length <= f64::EPSILON || line_width <= 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);
        let half = line_width / 2.0;
        let pad = half + 1.0;

        let xs = clip(from.x.min(to.x) - pad, from.x.max(to.x) + pad, self.width);
        let ys = clip(from.y.min(to.y) - pad, from.y.max(to.y) + pad, self.height);
        for y in ys {
            for x in xs.clone() {
                let px = x as f64 + 0.5 - from.x;
                let py = y as f64 + 0.5 - from.y;
                let along = px * ux + py * uy;
                let across = (px * uy - py * ux).abs();
                let cov_across = (half + 0.5 - across).clamp(0.0, 1.0).min(line_width);
                let cov_along = (along + 0.5)
                    .clamp(0.0, 1.0)
                    .min((length - along + 0.5).clamp(0.0, 1.0));
                let coverage = cov_across * cov_along;
                if coverage > 0.01 {
                    self.set_pixel(x as i64, y as i64, color, coverage as f32);
                }
            }
        }
    }

    /// Anti-aliased arc stroke centered on `radius`, swept clockwise (screen
    /// space) from `start_angle` to `end_angle`.
    pub fn stroke_arc(
        &mut self,
        center: Position,
        radius: f64,
        line_width: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
    ) {
        let sweep = end_angle - start_angle;
        if sweep <= 0.0 || line_width <= 0.0 || radius <= 0.0 {
            return;
        }
        let full_circle = sweep >= TAU;
        let half = line_width / 2.0;
        let reach = radius + half + 1.0;

        let xs = clip(center.x - reach, center.x + reach, self.width);
        let ys = clip(center.y - reach, center.y + reach, self.height);
        for y in ys {
            for x in xs.clone() {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist = dx.hypot(dy);
                let cov_radial = (half + 0.5 - (dist - radius).abs())
                    .clamp(0.0, 1.0)
                    .min(line_width);
                if cov_radial <= 0.0 {
                    continue;
                }
                let cov_angular = if full_circle {
                    1.0
                } else {
                    let rel = (dy.atan2(dx) - start_angle).rem_euclid(TAU);
                    // Signed angular distance to the nearest end, positive inside.
                    let inside = if rel <= sweep {
                        rel.min(sweep - rel)
                    } else {
                        -(rel - sweep).min(TAU - rel)
                    };
                    (inside * dist + 0.5).clamp(0.0, 1.0)
                };
                let coverage = cov_radial * cov_angular;
                if coverage > 0.01 {
                    self.set_pixel(x as i64, y as i64, color, coverage as f32);
                }
            }
        }
    }

    pub fn fill_text(&mut self, font: &Font, position: Position, text: &str, style: &TextStyle) {
        let color = style.color;
        for glyph in layout_text(font, position, text, style) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x as i64 + gx as i64;
                    let py = bb.min.y as i64 + gy as i64;
                    self.set_pixel(px, py, color, v);
                });
            }
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pixel indices touched by the span `lo..hi`, clipped to `0..max`.
fn clip(lo: f64, hi: f64, max: usize) -> Range<usize> {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(max);
    start.min(end)..end
}

/// Fraction of the unit pixel `[p, p + 1]` covered by `lo..hi`.
fn overlap(p: f64, lo: f64, hi: f64) -> f64 {
    ((p + 1.0).min(hi) - p.max(lo)).clamp(0.0, 1.0)
}
