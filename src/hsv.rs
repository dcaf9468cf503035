use rgb::RGBA;

/// A color in the hue, saturation, value model with an alpha
/// component.  All components are in \[0, 1\]; the hue is cyclic.
///
/// Keeping a color in this form (rather than converting back and
/// forth to RGB) preserves the hue of grays and of black.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in \[0, 1), 0 being red.
    pub h: f64,
    /// Saturation in \[0, 1\].
    pub s: f64,
    /// Value (brightness) in \[0, 1\].
    pub v: f64,
    /// Alpha (opacity) in \[0, 1\].
    pub a: f64,
}

impl Hsv {
    /// Create an HSV color, wrapping `h` and clamping the other
    /// components to \[0, 1\].
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Hsv { h: wrap_hue(h), s: unit(s), v: unit(v), a: unit(a) }
    }

    /// Convert RGBA components in \[0, 255\].
    pub fn from_rgba(c: RGBA<f64>) -> Self {
        let (h, s, v) = hsv_from_rgb(c);
        Hsv { h, s, v, a: unit(c.a / 255.) }
    }

    /// Return the RGBA components in \[0, 255\].
    pub fn to_rgba(&self) -> RGBA<f64> {
        RGBA { a: 255. * unit(self.a), ..rgb_from_hsv(self.h, self.s, self.v) }
    }
}

/// `x` clamped to \[0, 1\], NaN giving 0.
pub(crate) fn unit(x: f64) -> f64 {
    if x.is_nan() { 0. } else { x.clamp(0., 1.) }
}

fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() { return 0. }
    let h = h.rem_euclid(1.);
    // `rem_euclid` may round tiny negative numbers up to 1.
    if h >= 1. { 0. } else { h }
}

/// Return the opaque color (components in \[0, 255\]) with hue `h`,
/// saturation `s` and value `v`.  The hue wraps around (`h` and
/// `h + 1.` are the same hue), `s` and `v` are clamped to \[0, 1\].
///
/// # Example
///
/// ```
/// use rgb::RGBA;
/// use color_panel::rgb_from_hsv;
/// assert_eq!(rgb_from_hsv(0.5, 1., 1.), RGBA::new(0., 255., 255., 255.));
/// assert_eq!(rgb_from_hsv(0.3, 0., 0.2), RGBA::new(51., 51., 51., 255.));
/// ```
pub fn rgb_from_hsv(h: f64, s: f64, v: f64) -> RGBA<f64> {
    let (h, s, v) = (wrap_hue(h), unit(s), unit(v));
    let rgb = |r: f64, g: f64, b: f64| {
        RGBA { r: 255. * r, g: 255. * g, b: 255. * b, a: 255. } };
    if v == 0. { return rgb(0., 0., 0.) }
    if s == 0. { return rgb(v, v, v) }
    let h6 = 6. * h;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1. - s);
    let q = v * (1. - s * f);
    let t = v * (1. - s * (1. - f));
    match sector as usize % 6 {
        0 => rgb(v, t, p),
        1 => rgb(q, v, p),
        2 => rgb(p, v, t),
        3 => rgb(p, q, v),
        4 => rgb(t, p, v),
        _ => rgb(v, p, q),
    }
}

/// Return the hue, saturation and value (in \[0, 1\]) of a color
/// given by its components in \[0, 255\].  Alpha is ignored.  Grays
/// have hue 0 and black has hue and saturation 0.
pub fn hsv_from_rgb(c: RGBA<f64>) -> (f64, f64, f64) {
    let r = unit(c.r / 255.);
    let g = unit(c.g / 255.);
    let b = unit(c.b / 255.);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if max == 0. { return (0., 0., 0.) }
    let s = delta / max;
    if delta == 0. { return (0., s, max) }
    let h6 = if max == r { ((g - b) / delta).rem_euclid(6.) }
             else if max == g { (b - r) / delta + 2. }
             else { (r - g) / delta + 4. };
    (wrap_hue(h6 / 6.), s, max)
}
