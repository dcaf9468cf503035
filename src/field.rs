use log::debug;
use rgb::{RGBA, RGBA8};
use crate::{ColorBlend, RGBColor, hsv::unit};

/// Default side length of a [`GradientField`].
pub const DEFAULT_ACCURACY: usize = 256;

/// A point of the unit square, `(0, 0)` being the bottom left corner
/// and `(1, 1)` the top right one.  Both coordinates are clamped to
/// \[0, 1\] on construction (NaN becomes 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Default for Position {
    fn default() -> Self { Position { x: 0.5, y: 0.5 } }
}

impl Position {
    /// The point `(x, y)`, clamped to the unit square.
    pub fn new(x: f64, y: f64) -> Self { Position { x: unit(x), y: unit(y) } }

    /// Horizontal coordinate, 0 on the left.
    #[inline]
    pub fn x(&self) -> f64 { self.x }

    /// Vertical coordinate, 0 at the bottom.
    #[inline]
    pub fn y(&self) -> f64 { self.y }

    /// Position of the device pixel `(px, py)` of an area of size
    /// `width × height` whose origin is its top left corner.
    ///
    /// # Example
    ///
    /// ```
    /// use color_panel::Position;
    /// let p = Position::from_area(25, 0, 100, 50);
    /// assert_eq!((p.x(), p.y()), (0.25, 1.));
    /// ```
    pub fn from_area(px: i64, py: i64, width: u32, height: u32) -> Self {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        Position::new(px as f64 / w, 1. - py as f64 / h)
    }

    /// Device pixel of an area of size `width × height` (origin at
    /// the top left) corresponding to this position.
    pub fn to_area(&self, width: u32, height: u32) -> (u32, u32) {
        ((self.x * width as f64).round() as u32,
         ((1. - self.y) * height as f64).round() as u32)
    }
}

/// Parameter along an axis of `n` cells for the cell `i`: the first
/// cell is at 0, the last at 1.
fn axis(i: usize, n: usize) -> f64 {
    if n <= 1 { 0. } else { i as f64 / (n - 1) as f64 }
}

fn lerp(c0: RGBA<f64>, c1: RGBA<f64>, t: f64) -> RGBA<f64> {
    let l = |a: f64, b: f64| a + t * (b - a);
    RGBA { r: l(c0.r, c1.r), g: l(c0.g, c1.g), b: l(c0.b, c1.b),
           a: l(c0.a, c1.a) }
}

/// An immutable square raster of colors backing a color panel.
///
/// Rows are stored top to bottom.  A field is never modified once
/// built: changing the gradient means building a new field.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    size: usize,
    pixels: Vec<RGBA8>, // Invariant: length = size²
}

impl GradientField {
    /// Build a field of side `accuracy` (at least 1) where the cell at
    /// column `i` and row `j` (from the top) gets the color
    /// `f(i / (size-1), j / (size-1))`.
    fn from_fn(accuracy: usize, mut f: impl FnMut(f64, f64) -> RGBA<f64>)
               -> Self {
        let size = accuracy.max(1);
        let mut pixels = Vec::with_capacity(size * size);
        for j in 0 .. size {
            let v = axis(j, size);
            for i in 0 .. size {
                pixels.push(RGBA8::from_rgba(f(axis(i, size), v)));
            }
        }
        GradientField { size, pixels }
    }

    /// Bilinear gradient between four corner colors.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_panel::{GradientField, Position};
    /// let f = GradientField::corners(
    ///     &RGB8::new(255, 0, 0), &RGB8::new(0, 255, 0),
    ///     &RGB8::new(0, 0, 255), &RGB8::new(0, 0, 0), 16);
    /// assert_eq!(f.sample(Position::new(0., 0.)).b, 255);
    /// ```
    pub fn corners<C: RGBColor>(top_left: &C, top_right: &C,
                                bottom_left: &C, bottom_right: &C,
                                accuracy: usize) -> Self {
        debug!("building corner gradient field, accuracy {accuracy}");
        let (tl, tr) = (top_left.to_rgba(), top_right.to_rgba());
        let (bl, br) = (bottom_left.to_rgba(), bottom_right.to_rgba());
        Self::from_fn(accuracy, |u, v| {
            lerp(lerp(tl, tr, u), lerp(bl, br, u), v)
        })
    }

    /// Linear gradient from `left` to `right`, with a linear gradient
    /// from `bottom` to `top` painted over it.  Where the vertical
    /// gradient is opaque it hides the horizontal one, where it is
    /// transparent the horizontal one shows through.
    pub fn axis<C: RGBColor>(left: &C, right: &C, bottom: &C, top: &C,
                             accuracy: usize) -> Self {
        debug!("building axis gradient field, accuracy {accuracy}");
        let (l, r) = (left.to_rgba(), right.to_rgba());
        let (b, t) = (bottom.to_rgba(), top.to_rgba());
        Self::from_fn(accuracy, |u, v| {
            lerp(b, t, 1. - v).over(&lerp(l, r, u))
        })
    }

    /// Same as [`GradientField::axis`] with each axis driven by a
    /// [`ColorBlend`]: `blend_x` from left to right and `blend_y`
    /// from bottom to top, painted over the former.
    pub fn axis_blend<C, D>(blend_x: &ColorBlend<C>, blend_y: &ColorBlend<D>,
                            accuracy: usize) -> Self
    where C: RGBColor, D: RGBColor {
        debug!("building blend gradient field ({} × {} stops), accuracy {}",
               blend_x.len(), blend_y.len(), accuracy);
        Self::from_fn(accuracy, |u, v| {
            blend_y.rgba(1. - v).over(&blend_x.rgba(u))
        })
    }

    /// Hue wheel (at the given `saturation`) from left to right,
    /// darkening from top to bottom: the top row is at full
    /// brightness and the bottom row is black.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use color_panel::{GradientField, Position};
    /// let f = GradientField::hue_brightness(1., 64);
    /// assert_eq!(f.sample(Position::new(0., 1.)), RGBA8::new(255, 0, 0, 255));
    /// assert_eq!(f.sample(Position::new(0.7, 0.)), RGBA8::new(0, 0, 0, 255));
    /// ```
    pub fn hue_brightness(saturation: f64, accuracy: usize) -> Self {
        let black = RGBA { r: 0., g: 0., b: 0., a: 255. };
        Self::axis_blend(&ColorBlend::<RGBA<f64>>::hue_wheel(saturation, 1.),
                         &fade_out(black), accuracy)
    }

    /// Hue wheel (at the given `brightness`) from left to right,
    /// washing out from top to bottom: the top row is fully
    /// saturated and the bottom row is the gray of that brightness.
    pub fn hue_saturation(brightness: f64, accuracy: usize) -> Self {
        let x = (255. * brightness.clamp(0., 1.)).round();
        let gray = RGBA { r: x, g: x, b: x, a: 255. };
        Self::axis_blend(&ColorBlend::<RGBA<f64>>::hue_wheel(1., brightness),
                         &fade_out(gray), accuracy)
    }

    /// Side length of the field.
    #[inline]
    pub fn accuracy(&self) -> usize { self.size }

    #[inline]
    pub fn width(&self) -> usize { self.size }

    #[inline]
    pub fn height(&self) -> usize { self.size }

    /// Color of the cell at column `x` and row `y` (row 0 being the
    /// top one), if any.
    pub fn get(&self, x: usize, y: usize) -> Option<RGBA8> {
        if x < self.size && y < self.size {
            Some(self.pixels[y * self.size + x])
        } else {
            None
        }
    }

    /// Color of the cell nearest to `pos`.  The row index is
    /// inverted: `pos.y() == 1.` addresses the top row.
    pub fn sample(&self, pos: Position) -> RGBA8 {
        let last = (self.size - 1) as f64;
        let i = (last * pos.x).round() as usize;
        let j = (last * (1. - pos.y)).round() as usize;
        self.pixels[j.min(self.size - 1) * self.size + i.min(self.size - 1)]
    }

    /// Cells, row by row from the top.
    pub fn pixels(&self) -> &[RGBA8] { &self.pixels }

    /// Iterator over the rows, from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[RGBA8]> + '_ {
        self.pixels.chunks(self.size)
    }

    /// Color of the top left cell.
    pub fn top_left(&self) -> RGBA8 { self.pixels[0] }

    /// Color of the top right cell.
    pub fn top_right(&self) -> RGBA8 { self.pixels[self.size - 1] }

    /// Color of the bottom left cell.
    pub fn bottom_left(&self) -> RGBA8 {
        self.pixels[(self.size - 1) * self.size]
    }

    /// Color of the bottom right cell.
    pub fn bottom_right(&self) -> RGBA8 { self.pixels[self.size * self.size - 1] }

    /// Whether some corner is not fully opaque (a host typically
    /// paints a checkerboard below such fields).
    pub fn has_transparency(&self) -> bool {
        [self.top_left(), self.top_right(), self.bottom_left(),
         self.bottom_right()].iter().any(|c| c.a < 255)
    }
}

impl Default for GradientField {
    fn default() -> Self { Self::hue_brightness(1., DEFAULT_ACCURACY) }
}

/// Vertical blend from `c` (bottom) to the same color fully
/// transparent (top).
fn fade_out(c: RGBA<f64>) -> ColorBlend<RGBA<f64>> {
    ColorBlend::new([(0., &c), (1., &RGBA { a: 0., ..c })])
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;
    use crate::rgb_from_hsv;

    const TL: RGBA8 = RGBA8 { r: 255, g: 0, b: 0, a: 255 };
    const TR: RGBA8 = RGBA8 { r: 0, g: 255, b: 0, a: 255 };
    const BL: RGBA8 = RGBA8 { r: 0, g: 0, b: 255, a: 255 };
    const BR: RGBA8 = RGBA8 { r: 10, g: 20, b: 30, a: 40 };

    #[test]
    fn corners_land_on_corners() {
        for n in [2, 3, 17, 256] {
            let f = GradientField::corners(&TL, &TR, &BL, &BR, n);
            assert_eq!(f.sample(Position::new(0., 0.)), BL);
            assert_eq!(f.sample(Position::new(1., 1.)), TR);
            assert_eq!(f.sample(Position::new(0., 1.)), TL);
            assert_eq!(f.sample(Position::new(1., 0.)), BR);
            assert_eq!((f.top_left(), f.top_right()), (TL, TR));
            assert_eq!((f.bottom_left(), f.bottom_right()), (BL, BR));
            assert!(f.has_transparency());
        }
    }

    #[test]
    fn corners_center_is_mean() {
        let f = GradientField::corners(&TL, &TR, &BL, &BL, 3);
        assert_eq!(f.get(1, 1), Some(RGBA8::new(64, 64, 128, 255)));
        assert_eq!(f.get(3, 0), None);
        assert_eq!(f.pixels().len(), 9);
        assert_eq!(f.rows().count(), 3);
    }

    #[test]
    fn accuracy_one() {
        let f = GradientField::corners(&TL, &TR, &BL, &BR, 0);
        assert_eq!(f.accuracy(), 1);
        for p in [(0., 0.), (0.3, 0.9), (1., 1.), (-3., 7.)] {
            assert_eq!(f.sample(Position::new(p.0, p.1)), TL);
        }
        let f = GradientField::hue_saturation(0.5, 1);
        assert_eq!(f.top_left(), f.bottom_right());
    }

    #[test]
    fn y_axis_is_inverted() {
        let black = RGB8::new(0, 0, 0);
        let white = RGB8::new(255, 255, 255);
        let f = GradientField::corners(&white, &white, &black, &black, 5);
        assert_eq!(f.get(0, 0), Some(RGBA8::new(255, 255, 255, 255)));
        assert_eq!(f.sample(Position::new(0.5, 0.75)),
                   RGBA8::new(191, 191, 191, 255));
        assert_eq!(f.sample(Position::new(0.5, 0.25)),
                   RGBA8::new(64, 64, 64, 255));
    }

    #[test]
    fn axis_transparent_top_shows_x() {
        let left = RGBA8::new(255, 255, 255, 255);
        let right = RGBA8::new(255, 0, 0, 255);
        let bottom = RGBA8::new(0, 0, 0, 255);
        let top = RGBA8::new(0, 0, 0, 0);
        let f = GradientField::axis(&left, &right, &bottom, &top, 11);
        assert_eq!(f.top_left(), left);
        assert_eq!(f.top_right(), right);
        assert_eq!(f.bottom_left(), bottom);
        assert_eq!(f.bottom_right(), bottom);
        // Half way up: red at half brightness.
        assert_eq!(f.sample(Position::new(1., 0.5)), RGBA8::new(128, 0, 0, 255));
        assert!(!f.has_transparency());
    }

    #[test]
    fn axis_opaque_y_replaces_x() {
        let x0 = RGB8::new(1, 2, 3);
        let y0 = RGB8::new(200, 100, 50);
        let f = GradientField::axis(&x0, &x0, &y0, &y0, 4);
        assert!(f.pixels().iter().all(|&c| c == RGBA8::new(200, 100, 50, 255)));
    }

    #[test]
    fn hue_brightness_preset() {
        let f = GradientField::hue_brightness(1., DEFAULT_ACCURACY);
        let red = RGBA8::from_rgba(rgb_from_hsv(0., 1., 1.));
        assert_eq!(f.sample(Position::new(0., 1.)), red);
        assert_eq!(f.sample(Position::new(1., 1.)), red);
        assert_eq!(f.sample(Position::new(0.5, 1.)).b, 255);
        assert!(f.rows().last().into_iter().flatten()
                .all(|&c| c == RGBA8::new(0, 0, 0, 255)));
        assert_eq!(GradientField::default(), f);
    }

    #[test]
    fn hue_saturation_preset() {
        let f = GradientField::hue_saturation(0.6, 32);
        assert_eq!(f.top_left(), RGBA8::from_rgba(rgb_from_hsv(0., 1., 0.6)));
        assert_eq!(f.bottom_left(), RGBA8::new(153, 153, 153, 255));
        assert_eq!(f.bottom_right(), RGBA8::new(153, 153, 153, 255));
    }

    #[test]
    fn axis_blend_matches_axis() {
        let (l, r) = (RGB8::new(0, 0, 0), RGB8::new(255, 255, 255));
        let (b, t) = (RGBA8::new(0, 0, 255, 255), RGBA8::new(0, 0, 255, 0));
        let f = GradientField::axis(&l.to_rgba(), &r.to_rgba(),
                                    &b.to_rgba(), &t.to_rgba(), 9);
        let g = GradientField::axis_blend(&l.gradient(&r), &b.gradient(&t), 9);
        assert_eq!(f, g);
    }

    #[test]
    fn positions_clamp() {
        let p = Position::new(-1., 2.);
        assert_eq!((p.x(), p.y()), (0., 1.));
        assert_eq!(Position::new(f64::NAN, 0.5).x(), 0.);
        assert_eq!(Position::default(), Position::new(0.5, 0.5));
        assert_eq!(Position::new(0.5, 0.25).to_area(100, 40), (50, 30));
        assert_eq!(Position::from_area(150, 80, 100, 40), Position::new(1., 0.));
    }
}
