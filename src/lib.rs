//! Gradient color fields and color picker models.
//!
//! - [`GradientField`]: a square raster of colors built from four
//!   corners, from two linear axes or from multi-stop [`ColorBlend`]s,
//!   sampled at a normalized [`Position`].
//! - [`ColorPanel`] and [`ColorSlider`]: the 2D and 1D picker states
//!   on top of such gradients, notifying observers when the picked
//!   position or color changes.
//! - [`ColorPicker`]: the model of a full color picker dialog.
//!
//! Colors are the types of the [`rgb`] crate; any of them can be used
//! through the [`RGBColor`] trait.  HSV conversions live in [`Hsv`].

use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod hsv;
mod blend;
mod field;
mod panel;
mod slider;
mod picker;
mod hex;

pub use hsv::{Hsv, rgb_from_hsv, hsv_from_rgb};
pub use blend::ColorBlend;
pub use field::{GradientField, Position, DEFAULT_ACCURACY};
pub use panel::{ColorPanel, DEFAULT_PICKER_SIZE};
pub use slider::ColorSlider;
pub use picker::{ColorPicker, PrimaryAttribute, CHANNEL_ACCURACY};
pub use hex::{to_argb_hex, parse_argb_hex, ParseHexError};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding `n` uniformly spaced parameters in
    /// \[0, 1\] (both bounds included when `n ≥ 2`) together with
    /// their colors.  This is what a host needs to paint a strip.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_panel::{RGBColor, ColorRange};
    /// let ts: Vec<f64> = RGB8::HUE.samples(5).map(|(t, _)| t).collect();
    /// assert_eq!(ts, [0., 0.25, 0.5, 0.75, 1.]);
    /// ```
    fn samples(&self, n: usize) -> Samples<'_, Self, Color>
    where Self: Sized {
        // `i > j` encodes the empty iterator.
        if n == 0 { Samples { range: self, color: PhantomData,
                              last: 0, i: 1, j: 0 } }
        else { Samples { range: self, color: PhantomData,
                         last: n - 1, i: 0, j: n - 1 } }
    }
}

/// An iterator yielding parameters in \[0, 1\] together with colors.
///
/// Created by [`ColorRange::samples`].
pub struct Samples<'a, R, Color> {
    range: &'a R,
    color: PhantomData<Color>,
    last: usize,
    i: usize, // first position to be consumed
    j: usize, // last position to be consumed
}

impl<R, Color> Samples<'_, R, Color> where R: ColorRange<Color> {
    fn item(&self, k: usize) -> (f64, Color) {
        let t = if self.last == 0 { 0. }
                else { k as f64 / self.last as f64 };
        (t, self.range.rgb(t))
    }
}

impl<R, Color> Iterator for Samples<'_, R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i > self.j { return None }
        let item = self.item(self.i);
        self.i += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.j + 1).saturating_sub(self.i);
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Samples<'_, R, Color>
where R: ColorRange<Color> {}

impl<R, Color> DoubleEndedIterator for Samples<'_, R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i > self.j { return None }
        let item = self.item(self.j);
        if self.j == 0 { self.i = 1 } else { self.j -= 1 }
        Some(item)
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    /// Integer encodings round and saturate.
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Fully saturated, fully bright hue range: `Self::HUE.rgb(h)` is
    /// the color of hue `h` ∈ \[0., 1.\].
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_panel::{RGBColor, ColorRange};
    /// assert_eq!(RGB8::HUE.rgb(1. / 3.), RGB8::new(0, 255, 0));
    /// ```
    const HUE: Hue<Self> = Hue { s: 1., v: 1., color: PhantomData };

    /// Return a linear gradient from color `self` to color `c1`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_panel::{RGBColor, ColorRange};
    /// let black = RGB8::new(0, 0, 0);
    /// let white = RGB8::new(255, 255, 255);
    /// assert_eq!(black.gradient(&white).rgb(0.5), RGB8::new(128, 128, 128));
    /// ```
    fn gradient(&self, c1: &Self) -> ColorBlend<Self> {
        ColorBlend::new([(0., self), (1., c1)])
    }

    /// Return the hue, saturation, value and alpha of the color.
    fn to_hsv(&self) -> Hsv { Hsv::from_rgba(self.to_rgba()) }

    /// Create a color from its HSV components.
    fn from_hsv(hsv: Hsv) -> Self { Self::from_rgba(hsv.to_rgba()) }

    /// Perceived brightness in \[0, 1\] (Rec. 601 weights, alpha
    /// ignored).
    fn luminance(&self) -> f64 {
        let RGBA{ r, g, b, .. } = self.to_rgba();
        ((0.299 * r + 0.587 * g + 0.114 * b) / 255.).clamp(0., 1.)
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let a = self.to_rgba().a;
        let x = 255. * self.luminance();
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }

    /// Paint `self` over `below` (straight alpha "over" operator).
    /// An opaque `self` hides `below`, a fully transparent one leaves
    /// it unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use color_panel::RGBColor;
    /// let red = RGBA8::new(255, 0, 0, 255);
    /// let veil = RGBA8::new(0, 0, 0, 128);
    /// assert_eq!(veil.over(&red), RGBA8::new(127, 0, 0, 255));
    /// ```
    fn over(&self, below: &Self) -> Self {
        let top = self.to_rgba();
        let bot = below.to_rgba();
        let ta = (top.a / 255.).clamp(0., 1.);
        let ba = (bot.a / 255.).clamp(0., 1.);
        let a = ta + ba * (1. - ta);
        if a <= 0. { return Self::from_rgba(RGBA{ r: 0., g: 0., b: 0., a: 0. }) }
        let mix = |t: f64, b: f64| (t * ta + b * ba * (1. - ta)) / a;
        Self::from_rgba(RGBA{ r: mix(top.r, bot.r), g: mix(top.g, bot.g),
                              b: mix(top.b, bot.b), a: 255. * a })
    }
}

/// Round and saturate a channel in \[0, 255\] to `max`.
#[inline]
fn quantize(x: f64, max: f64) -> f64 {
    if x.is_nan() { 0. } else { x.round().clamp(0., max) }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: quantize(c.r, 255.) as u8,  g: quantize(c.g, 255.) as u8,
               b: quantize(c.b, 255.) as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: quantize(c.r, 65535.) as u16,
                g: quantize(c.g, 65535.) as u16,
                b: quantize(c.b, 65535.) as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: quantize(c.r, 255.) as u8,  g: quantize(c.g, 255.) as u8,
                b: quantize(c.b, 255.) as u8,  a: quantize(c.a, 255.) as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: quantize(c.r, 65535.) as u16,
                 g: quantize(c.g, 65535.) as u16,
                 b: quantize(c.b, 65535.) as u16,
                 a: quantize(c.a, 65535.) as u16 }
    }
}

/// Hue range at a fixed saturation and value.
///
/// [`RGBColor::HUE`] is the fully saturated one; see also
/// [`Hue::new`].
#[derive(Clone, Copy)]
pub struct Hue<Color> {
    s: f64,
    v: f64,
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Hue<Color> {
    /// Hue range with saturation `s` and value `v` (both clamped to
    /// \[0, 1\]).
    pub fn new(s: f64, v: f64) -> Self {
        Hue { s: s.clamp(0., 1.), v: v.clamp(0., 1.), color: PhantomData }
    }
}

impl<Color: RGBColor> ColorRange<Color> for Hue<Color> {
    /// Hues wrap: `t` and `t + 1.` give the same color.
    fn rgb(&self, t: f64) -> Color {
        Color::from_rgba(rgb_from_hsv(t, self.s, self.v))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_samples() {
        for (i, (t, c)) in RGB8::HUE.samples(11).enumerate() {
            assert!((t - 0.1 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", t, 0.1 * i as f64);
            assert_eq!(RGB8::HUE.rgb(t), c);
        }
    }

    #[test]
    fn samples_len_and_reverse() {
        let s = RGB8::HUE.samples(4);
        assert_eq!(s.len(), 4);
        let ts: Vec<f64> = RGB8::HUE.samples(4).rev().map(|(t, _)| t)
            .collect();
        assert_eq!(ts, [1., 2. / 3., 1. / 3., 0.]);
        assert_eq!(RGB8::HUE.samples(0).count(), 0);
        assert_eq!(RGB8::HUE.samples(1).collect::<Vec<_>>(),
                   [(0., RGB8::new(255, 0, 0))]);
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(RGB8::HUE.rgb(0.), RGB8::HUE.rgb(1.));
        assert_eq!(RGB8::HUE.rgb(-0.5), RGB8::HUE.rgb(0.5));
    }

    #[test]
    fn integer_encodings_round_and_saturate() {
        let c = RGBA8::from_rgba(RGBA{ r: 127.6, g: -4., b: 300., a: 0.4 });
        assert_eq!(c, RGBA8::new(128, 0, 255, 0));
        let c = RGB16::from_rgba(RGBA{ r: 1e9, g: f64::NAN, b: 2.5, a: 0. });
        assert_eq!(c, RGB16::new(65535, 0, 3));
    }

    #[test]
    fn over_extremes() {
        let below = RGBA8::new(10, 20, 30, 255);
        let clear = RGBA8::new(200, 200, 200, 0);
        let solid = RGBA8::new(1, 2, 3, 255);
        assert_eq!(clear.over(&below), below);
        assert_eq!(solid.over(&below), solid);
        assert_eq!(clear.over(&clear), RGBA8::new(0, 0, 0, 0));
    }

    #[test]
    fn luminance_bounds() {
        assert_eq!(RGB8::new(0, 0, 0).luminance(), 0.);
        assert!((RGB8::new(255, 255, 255).luminance() - 1.).abs() < 1e-12);
        assert_eq!(RGBA8::new(255, 255, 255, 7).to_gray(),
                   RGBA8::new(255, 255, 255, 7));
    }
}
