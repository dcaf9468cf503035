use std::marker::PhantomData;
use lazy_static::lazy_static;
use rgb::RGBA;
use crate::{ColorRange, RGBColor, rgb_from_hsv};

lazy_static! {
    /// Fully saturated, fully bright hue wheel.
    static ref HUE_WHEEL: Vec<(f64, RGBA<f64>)> = hue_stops(1., 1.);
}

/// Positions of the hue wheel stops: every sixth of a turn.
const HUE_STOPS: usize = 7;

fn hue_stops(s: f64, v: f64) -> Vec<(f64, RGBA<f64>)> {
    let last = (HUE_STOPS - 1) as f64;
    (0 .. HUE_STOPS).map(|i| {
        let t = i as f64 / last;
        (t, rgb_from_hsv(t, s, v))
    }).collect()
}

/// Multi-stop linear interpolation between colors.
///
/// A blend is a list of `(position, color)` stops.  The positions are
/// expected to be sorted in increasing order, the first one being
/// `0.` and the last one `1.`; this is not checked and sampling a
/// blend violating it gives unspecified (but memory safe) colors.
/// Every channel, alpha included, is interpolated linearly.
///
/// # Example
///
/// ```
/// use rgb::RGBA8;
/// use color_panel::{ColorBlend, ColorRange};
/// let blend = ColorBlend::new([(0., &RGBA8::new(0, 0, 0, 0)),
///                              (0.5, &RGBA8::new(255, 0, 0, 255)),
///                              (1., &RGBA8::new(255, 255, 255, 255))]);
/// assert_eq!(blend.rgb(0.25), RGBA8::new(128, 0, 0, 128));
/// assert_eq!(blend.rgb(2.), RGBA8::new(255, 255, 255, 255));
/// ```
#[derive(Debug)]
pub struct ColorBlend<Color> {
    stops: Vec<(f64, RGBA<f64>)>,
    color: PhantomData<Color>,
}

impl<Color> Clone for ColorBlend<Color> {
    fn clone(&self) -> Self {
        ColorBlend { stops: self.stops.clone(), color: PhantomData }
    }
}

impl<Color> PartialEq for ColorBlend<Color> {
    fn eq(&self, other: &Self) -> bool { self.stops == other.stops }
}

impl<Color: RGBColor> ColorBlend<Color> {
    /// Create a blend from its stops.
    pub fn new<'a, I>(stops: I) -> Self
    where I: IntoIterator<Item = (f64, &'a Color)>, Color: 'a {
        let stops = stops.into_iter().map(|(t, c)| (t, c.to_rgba()))
            .collect();
        ColorBlend { stops, color: PhantomData }
    }

    /// The seven stops hue wheel (red, yellow, green, cyan, blue,
    /// magenta and red again) at saturation `s` and value `v`.
    pub fn hue_wheel(s: f64, v: f64) -> Self {
        if s == 1. && v == 1. { return Self::hue() }
        ColorBlend { stops: hue_stops(s, v), color: PhantomData }
    }

    /// The fully saturated hue wheel.
    pub fn hue() -> Self {
        ColorBlend { stops: HUE_WHEEL.clone(), color: PhantomData }
    }

    /// Add a stop at the end of the blend.
    pub fn push(&mut self, t: f64, c: &Color) {
        self.stops.push((t, c.to_rgba()));
    }

    /// Add a stop at the end of the blend.
    pub fn with_stop(mut self, t: f64, c: &Color) -> Self {
        self.push(t, c);
        self
    }

    /// Number of stops.
    pub fn len(&self) -> usize { self.stops.len() }

    /// Whether the blend has no stop (sampling it gives a transparent
    /// black).
    pub fn is_empty(&self) -> bool { self.stops.is_empty() }

    /// Return the stops of the blend.
    pub fn stops(&self) -> impl Iterator<Item = (f64, Color)> + '_ {
        self.stops.iter().map(|&(t, c)| (t, Color::from_rgba(c)))
    }

    /// Change the color encoding of the blend.
    pub fn cast<C: RGBColor>(&self) -> ColorBlend<C> {
        ColorBlend { stops: self.stops.clone(), color: PhantomData }
    }
}

impl<Color> ColorBlend<Color> {
    /// Interpolated components (in \[0, 255\]) at `t`, clamping `t`
    /// to the positions of the first and last stops.
    pub(crate) fn rgba(&self, t: f64) -> RGBA<f64> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return RGBA { r: 0., g: 0., b: 0., a: 0. },
        };
        if t.is_nan() || t <= first.0 { return first.1 }
        if t >= last.0 { return last.1 }
        // first.0 < t < last.0, so 1 ≤ j < len.
        let j = self.stops.partition_point(|&(p, _)| p <= t);
        let (p0, c0) = self.stops[j - 1];
        let (p1, c1) = self.stops[j];
        if p1 <= p0 { return c0 }
        let f = (t - p0) / (p1 - p0);
        let lerp = |a: f64, b: f64| a + f * (b - a);
        RGBA { r: lerp(c0.r, c1.r), g: lerp(c0.g, c1.g),
               b: lerp(c0.b, c1.b), a: lerp(c0.a, c1.a) }
    }
}

impl<Color: RGBColor> ColorRange<Color> for ColorBlend<Color> {
    /// Returns the interpolated color at `t`.  Values of `t` before
    /// the first stop (resp. after the last) give the first (resp.
    /// last) color.
    fn rgb(&self, t: f64) -> Color { Color::from_rgba(self.rgba(t)) }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::{RGB8, RGBA8};

    fn rgb_blend() -> ColorBlend<RGB8> {
        ColorBlend::new([(0., &RGB8::new(255, 0, 0)),
                         (0.25, &RGB8::new(0, 255, 0)),
                         (1., &RGB8::new(0, 0, 255))])
    }

    #[test]
    fn clamps_outside_stops() {
        let b = rgb_blend();
        assert_eq!(b.rgb(-0.5), b.rgb(0.));
        assert_eq!(b.rgb(1.5), b.rgb(1.));
        assert_eq!(b.rgb(f64::NAN), RGB8::new(255, 0, 0));
    }

    #[test]
    fn interpolates_between_brackets() {
        let b = rgb_blend();
        assert_eq!(b.rgb(0.125), RGB8::new(128, 128, 0));
        assert_eq!(b.rgb(0.25), RGB8::new(0, 255, 0));
        assert_eq!(b.rgb(0.625), RGB8::new(0, 128, 128));
    }

    #[test]
    fn coincident_stops() {
        let b = ColorBlend::new([(0., &RGB8::new(0, 0, 0)),
                                 (0.5, &RGB8::new(10, 10, 10)),
                                 (0.5, &RGB8::new(200, 200, 200)),
                                 (1., &RGB8::new(255, 255, 255))]);
        assert_eq!(b.rgb(0.5), RGB8::new(200, 200, 200));
        assert_eq!(b.rgb(0.25), RGB8::new(5, 5, 5));
        assert_eq!(b.rgb(0.75), RGB8::new(228, 228, 228));
    }

    #[test]
    fn alpha_is_interpolated() {
        let b = RGBA8::new(0, 0, 0, 255).gradient(&RGBA8::new(0, 0, 0, 0));
        assert_eq!(b.rgb(0.5), RGBA8::new(0, 0, 0, 128));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn single_and_empty() {
        let one = ColorBlend::new([(0.3, &RGB8::new(1, 2, 3))]);
        assert_eq!(one.rgb(0.), RGB8::new(1, 2, 3));
        assert_eq!(one.rgb(1.), RGB8::new(1, 2, 3));
        let none = ColorBlend::<RGBA8>::new(Vec::new());
        assert!(none.is_empty());
        assert_eq!(none.rgb(0.5), RGBA8::new(0, 0, 0, 0));
    }

    #[test]
    fn hue_wheel_stops() {
        let wheel = ColorBlend::<RGB8>::hue();
        let colors: Vec<RGB8> = wheel.stops().map(|(_, c)| c).collect();
        assert_eq!(colors, [RGB8::new(255, 0, 0), RGB8::new(255, 255, 0),
                            RGB8::new(0, 255, 0), RGB8::new(0, 255, 255),
                            RGB8::new(0, 0, 255), RGB8::new(255, 0, 255),
                            RGB8::new(255, 0, 0)]);
        assert_eq!(wheel, ColorBlend::hue_wheel(1., 1.));
        let dim = ColorBlend::<RGB8>::hue_wheel(1., 0.5);
        assert_eq!(dim.rgb(0.), RGB8::new(128, 0, 0));
    }

    #[test]
    fn builder_and_cast() {
        let b = ColorBlend::new([(0., &RGB8::new(0, 0, 0))])
            .with_stop(1., &RGB8::new(255, 255, 255));
        let b: ColorBlend<RGBA8> = b.cast();
        assert_eq!(b.rgb(1.), RGBA8::new(255, 255, 255, 255));
    }
}
