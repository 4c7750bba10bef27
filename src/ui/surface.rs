/// The drawing surface the game paints on, in pixel coordinates.
///
/// Mirrors a 2D canvas: filled rectangles, filled text with alignment,
/// filled circles and a global alpha applied to every subsequent fill.

use crate::domain::palette::Rgb;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    Start,
    Center,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextStyle {
    /// Font size in pixels. The terminal canvas draws every size one row
    /// high and shows large sizes bold.
    pub size_px: f32,
    pub align: Align,
    pub color: Rgb,
    /// Overall opacity of the text, multiplied with the global alpha.
    pub alpha: f32,
}

impl TextStyle {
    pub fn new(size_px: f32, align: Align, color: Rgb) -> Self {
        TextStyle { size_px, align, color, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (f32, f32);
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    /// `(x, y)` is the anchor: left edge for `Start`, centre for `Center`.
    /// Vertically the text is centred on `y`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb);
}
