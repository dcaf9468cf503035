use log::{debug, trace};
use rgb::{RGBA, RGBA8};
use crate::{ColorBlend, ColorRange, RGBColor, hsv::unit};

/// The state of a 1D color picking strip: a [`ColorBlend`], the picked
/// parameter `t` ∈ \[0, 1\] along it and the color found there.
///
/// Notifications follow the same rules as for a
/// [`ColorPanel`](crate::ColorPanel): position first, then value if
/// the color changed.
pub struct ColorSlider {
    blend: ColorBlend<RGBA8>,
    position: f64,
    value: RGBA8,
    position_changed: Vec<Box<dyn FnMut(f64)>>,
    value_changed: Vec<Box<dyn FnMut(RGBA8)>>,
}

impl Default for ColorSlider {
    fn default() -> Self { Self::new() }
}

impl ColorSlider {
    /// A slider over the hue wheel, at its start.
    pub fn new() -> Self {
        let blend = ColorBlend::hue();
        let value = blend.rgb(0.);
        ColorSlider { blend, position: 0., value,
                      position_changed: vec![], value_changed: vec![] }
    }

    /// Call `f` with the new parameter each time it changes.
    pub fn on_position_changed(&mut self, f: impl FnMut(f64) + 'static) {
        self.position_changed.push(Box::new(f));
    }

    /// Call `f` with the new color each time it changes.
    pub fn on_value_changed(&mut self, f: impl FnMut(RGBA8) + 'static) {
        self.value_changed.push(Box::new(f));
    }

    /// The blend currently shown.
    pub fn blend(&self) -> &ColorBlend<RGBA8> { &self.blend }

    /// Show `blend` and pick the color at the current position in it.
    pub fn set_blend<C: RGBColor>(&mut self, blend: &ColorBlend<C>) {
        debug!("slider shows a {} stops blend", blend.len());
        self.blend = blend.cast();
        self.update_value();
    }

    /// Show a linear gradient from `c0` to `c1`.
    pub fn set_gradient<C: RGBColor>(&mut self, c0: &C, c1: &C) {
        self.set_blend(&c0.gradient(c1));
    }

    /// Show the fully saturated hue wheel.
    pub fn set_hue_gradient(&mut self) {
        self.set_blend(&ColorBlend::<RGBA<f64>>::hue());
    }

    /// The picked parameter.
    pub fn position(&self) -> f64 { self.position }

    /// Move the picked parameter to `t` (clamped to \[0, 1\], NaN
    /// meaning 0) and notify the observers.
    pub fn set_position(&mut self, t: f64) {
        let t = unit(t);
        if t == self.position { return }
        self.position = t;
        trace!("slider position changed to {t}");
        for f in &mut self.position_changed { f(t) }
        self.update_value();
    }

    /// The color at the picked parameter.
    pub fn value(&self) -> RGBA8 { self.value }

    fn update_value(&mut self) {
        let value = self.blend.rgb(self.position);
        if value == self.value { return }
        self.value = value;
        trace!("slider value changed to {value:?}");
        for f in &mut self.value_changed { f(value) }
    }
}
