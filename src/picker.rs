use log::debug;
use rgb::{RGBA, RGBA8};
use crate::{ColorPanel, ColorSlider, Hsv, RGBColor, ParseHexError,
            DEFAULT_ACCURACY, parse_argb_hex, rgb_from_hsv, to_argb_hex};

/// Side length of the panel fields showing two RGB channels.
pub const CHANNEL_ACCURACY: usize = 32;

/// The color attribute driven by the slider of a [`ColorPicker`]; the
/// panel drives the other two attributes of the same model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrimaryAttribute {
    /// Slider: hue.  Panel: saturation (x) and brightness (y).
    #[default]
    Hue,
    /// Slider: saturation.  Panel: hue (x) and brightness (y).
    Saturation,
    /// Slider: brightness.  Panel: hue (x) and saturation (y).
    Brightness,
    /// Slider: red.  Panel: blue (x) and green (y).
    Red,
    /// Slider: green.  Panel: blue (x) and red (y).
    Green,
    /// Slider: blue.  Panel: green (x) and red (y).
    Blue,
}

fn opaque(r: u8, g: u8, b: u8) -> RGBA8 { RGBA8 { r, g, b, a: 255 } }

fn channel(t: f64) -> u8 { (255. * t).round().clamp(0., 255.) as u8 }

/// The model of a color picker dialog: a selected color edited
/// through a [`ColorPanel`], a color [`ColorSlider`], an alpha
/// slider and numeric fields, next to the color it started from.
///
/// The selected color is kept in HSV form so that its hue survives
/// edits making it gray.
///
/// # Example
///
/// ```
/// use rgb::RGBA8;
/// use color_panel::{ColorPicker, PrimaryAttribute};
/// let mut picker = ColorPicker::new(RGBA8::new(255, 0, 0, 255))
///     .with_primary(PrimaryAttribute::Hue);
/// picker.pick_slider(1. / 3.);     // green hue
/// picker.pick_panel(1., 0.5);      // full saturation, half brightness
/// assert_eq!(picker.selected_color(), RGBA8::new(0, 128, 0, 255));
/// picker.cancel();
/// assert_eq!(picker.selected_color(), RGBA8::new(255, 0, 0, 255));
/// ```
pub struct ColorPicker {
    primary: PrimaryAttribute,
    selected: Hsv,
    old: Hsv,
    alpha_enabled: bool,
    panel: ColorPanel,
    slider: ColorSlider,
    alpha_slider: ColorSlider,
    color_edited: Vec<Box<dyn FnMut(RGBA8)>>,
}

impl Default for ColorPicker {
    fn default() -> Self { Self::new(opaque(255, 0, 0)) }
}

impl ColorPicker {
    /// A picker whose old and selected colors are `c`.
    pub fn new<C: RGBColor>(c: C) -> Self {
        let hsv = c.to_hsv();
        let mut picker = ColorPicker {
            primary: PrimaryAttribute::default(),
            selected: hsv, old: hsv, alpha_enabled: true,
            panel: ColorPanel::new(), slider: ColorSlider::new(),
            alpha_slider: ColorSlider::new(), color_edited: vec![] };
        picker.update_controls();
        picker
    }

    /// Set the attribute driven by the slider.
    pub fn with_primary(mut self, primary: PrimaryAttribute) -> Self {
        self.set_primary(primary);
        self
    }

    /// Allow or not to edit transparency.
    pub fn with_alpha_enabled(mut self, enabled: bool) -> Self {
        self.set_alpha_enabled(enabled);
        self
    }

    /// Call `f` with the selected color each time it is edited through
    /// the panel or the sliders.
    pub fn on_color_edited(&mut self, f: impl FnMut(RGBA8) + 'static) {
        self.color_edited.push(Box::new(f));
    }

    /// The attribute driven by the slider.
    pub fn primary(&self) -> PrimaryAttribute { self.primary }

    /// Change the attribute driven by the slider and rebuild the controls.
    pub fn set_primary(&mut self, primary: PrimaryAttribute) {
        debug!("picker primary attribute: {primary:?}");
        self.primary = primary;
        self.update_controls();
    }

    /// Whether transparency can be edited.
    pub fn alpha_enabled(&self) -> bool { self.alpha_enabled }

    /// See [`ColorPicker::with_alpha_enabled`].
    pub fn set_alpha_enabled(&mut self, enabled: bool) {
        self.alpha_enabled = enabled;
    }

    pub fn panel(&self) -> &ColorPanel { &self.panel }

    pub fn slider(&self) -> &ColorSlider { &self.slider }

    pub fn alpha_slider(&self) -> &ColorSlider { &self.alpha_slider }

    /// The selected color, in HSV form.
    pub fn selected(&self) -> Hsv { self.selected }

    /// The selected color.
    pub fn selected_color(&self) -> RGBA8 { RGBA8::from_hsv(self.selected) }

    /// Select `c` and move the controls to it.
    pub fn set_selected_color<C: RGBColor>(&mut self, c: C) {
        self.selected = c.to_hsv();
        self.update_controls();
    }

    /// The color the edition started from.
    pub fn old_color(&self) -> RGBA8 { RGBA8::from_hsv(self.old) }

    /// Replace the color the edition started from.
    pub fn set_old_color<C: RGBColor>(&mut self, c: C) {
        self.old = c.to_hsv();
    }

    /// The old and the selected colors, as a host shows them side by
    /// side.  They are opaque when alpha editing is disabled.
    pub fn preview(&self) -> (RGBA8, RGBA8) {
        let show = |c: RGBA8| {
            if self.alpha_enabled { c } else { RGBA8 { a: 255, ..c } } };
        (show(self.old_color()), show(self.selected_color()))
    }

    /// Go back to the old color.
    pub fn revert(&mut self) {
        self.selected = self.old;
        self.update_controls();
    }

    /// Make the selected color the old one (dialog confirmed).
    pub fn accept(&mut self) { self.old = self.selected }

    /// Drop the edits (dialog dismissed).
    pub fn cancel(&mut self) { self.revert() }

    // Numeric fields.

    /// Hue in degrees, in \[0, 360).
    pub fn hue(&self) -> f64 { 360. * self.selected.h }

    /// Saturation in percent.
    pub fn saturation(&self) -> f64 { 100. * self.selected.s }

    /// Brightness in percent.
    pub fn brightness(&self) -> f64 { 100. * self.selected.v }

    pub fn set_hue(&mut self, degrees: f64) {
        self.selected = Hsv { h: degrees / 360., ..self.selected };
        self.normalize_and_update();
    }

    pub fn set_saturation(&mut self, percent: f64) {
        self.selected = Hsv { s: percent / 100., ..self.selected };
        self.normalize_and_update();
    }

    pub fn set_brightness(&mut self, percent: f64) {
        self.selected = Hsv { v: percent / 100., ..self.selected };
        self.normalize_and_update();
    }

    pub fn set_red(&mut self, r: u8) {
        let c = self.selected_color();
        self.set_selected_color(RGBA8 { r, ..c });
    }

    pub fn set_green(&mut self, g: u8) {
        let c = self.selected_color();
        self.set_selected_color(RGBA8 { g, ..c });
    }

    pub fn set_blue(&mut self, b: u8) {
        let c = self.selected_color();
        self.set_selected_color(RGBA8 { b, ..c });
    }

    pub fn set_alpha(&mut self, a: u8) {
        let c = self.selected_color();
        self.set_selected_color(RGBA8 { a, ..c });
    }

    /// The selected color as an `AARRGGBB` code.
    pub fn hex(&self) -> String { to_argb_hex(&self.selected_color()) }

    /// Select the color of an `AARRGGBB` code (see
    /// [`parse_argb_hex`]).  The selection is unchanged on error.
    pub fn set_hex(&mut self, code: &str) -> Result<(), ParseHexError> {
        let c = parse_argb_hex(code)?;
        self.set_selected_color(c);
        Ok(())
    }

    fn normalize_and_update(&mut self) {
        self.normalize_selected();
        self.update_controls();
    }

    // User edits of the graphical controls.

    /// Pick the point `(x, y)` of the panel and update the selected
    /// color from it.
    /// Does nothing if the panel position does not change.
    pub fn pick_panel(&mut self, x: f64, y: f64) {
        let previous = self.panel.position();
        self.panel.set_position(x, y);
        let p = self.panel.position();
        if p == previous { return }
        let (x, y) = (p.x(), p.y());
        let c = self.selected_color();
        use PrimaryAttribute::*;
        match self.primary {
            Hue => { self.selected.s = x;  self.selected.v = y }
            Saturation => { self.selected.h = x;  self.selected.v = y }
            Brightness => { self.selected.h = x;  self.selected.s = y }
            Red => self.selected =
                RGBA8 { g: channel(y), b: channel(x), ..c }.to_hsv(),
            Green => self.selected =
                RGBA8 { r: channel(y), b: channel(x), ..c }.to_hsv(),
            Blue => self.selected =
                RGBA8 { r: channel(y), g: channel(x), ..c }.to_hsv(),
        }
        self.normalize_selected();
        self.update_slider_gradient();
        self.update_alpha_gradient();
        self.edited();
    }

    /// Pick the parameter `t` of the color slider and update the
    /// selected color from it, unless the slider does not move.
    pub fn pick_slider(&mut self, t: f64) {
        let previous = self.slider.position();
        self.slider.set_position(t);
        let t = self.slider.position();
        if t == previous { return }
        let c = self.selected_color();
        use PrimaryAttribute::*;
        match self.primary {
            Hue => self.selected.h = t,
            Saturation => self.selected.s = t,
            Brightness => self.selected.v = t,
            Red => self.selected = RGBA8 { r: channel(t), ..c }.to_hsv(),
            Green => self.selected = RGBA8 { g: channel(t), ..c }.to_hsv(),
            Blue => self.selected = RGBA8 { b: channel(t), ..c }.to_hsv(),
        }
        self.normalize_selected();
        self.update_panel_gradient();
        self.update_alpha_gradient();
        self.edited();
    }

    /// Pick the parameter `t` of the alpha slider.  Ignored when
    /// alpha editing is disabled or the slider does not move.
    pub fn pick_alpha(&mut self, t: f64) {
        if !self.alpha_enabled { return }
        let previous = self.alpha_slider.position();
        self.alpha_slider.set_position(t);
        let a = self.alpha_slider.position();
        if a == previous { return }
        self.selected.a = a;
        self.update_slider_gradient();
        self.update_panel_gradient();
        self.edited();
    }

    fn normalize_selected(&mut self) {
        let Hsv { h, s, v, a } = self.selected;
        self.selected = Hsv::new(h, s, v, a);
    }

    fn edited(&mut self) {
        let c = self.selected_color();
        for f in &mut self.color_edited { f(c) }
    }

    // Keeping the controls in sync with the selected color.

    fn update_controls(&mut self) {
        self.update_panel_gradient();
        self.update_slider_gradient();
        self.update_alpha_gradient();
        self.update_panel_position();
        self.update_slider_position();
        self.alpha_slider.set_position(self.selected.a);
    }

    fn update_panel_gradient(&mut self) {
        let Hsv { h, s, v, .. } = self.selected;
        let RGBA8 { r, g, b, .. } = self.selected_color();
        let panel = &mut self.panel;
        match self.primary {
            PrimaryAttribute::Hue => panel.setup_axis_gradient(
                &RGBA { r: 255., g: 255., b: 255., a: 255. },
                &rgb_from_hsv(h, 1., 1.),
                &RGBA { r: 0., g: 0., b: 0., a: 255. },
                &RGBA { r: 0., g: 0., b: 0., a: 0. },
                DEFAULT_ACCURACY),
            PrimaryAttribute::Saturation => panel.setup_hue_brightness_gradient(
                s, DEFAULT_ACCURACY),
            PrimaryAttribute::Brightness => panel.setup_hue_saturation_gradient(
                v, DEFAULT_ACCURACY),
            PrimaryAttribute::Red => panel.setup_gradient(
                &opaque(r, 255, 0), &opaque(r, 255, 255),
                &opaque(r, 0, 0), &opaque(r, 0, 255), CHANNEL_ACCURACY),
            PrimaryAttribute::Green => panel.setup_gradient(
                &opaque(255, g, 0), &opaque(255, g, 255),
                &opaque(0, g, 0), &opaque(0, g, 255), CHANNEL_ACCURACY),
            PrimaryAttribute::Blue => panel.setup_gradient(
                &opaque(255, 0, b), &opaque(255, 255, b),
                &opaque(0, 0, b), &opaque(0, 255, b), CHANNEL_ACCURACY),
        }
    }

    fn update_panel_position(&mut self) {
        let Hsv { h, s, v, .. } = self.selected;
        let RGBA8 { r, g, b, .. } = self.selected_color();
        let u = |c: u8| c as f64 / 255.;
        let (x, y) = match self.primary {
            PrimaryAttribute::Hue => (s, v),
            PrimaryAttribute::Saturation => (h, v),
            PrimaryAttribute::Brightness => (h, s),
            PrimaryAttribute::Red => (u(b), u(g)),
            PrimaryAttribute::Green => (u(b), u(r)),
            PrimaryAttribute::Blue => (u(g), u(r)),
        };
        self.panel.set_position(x, y);
    }

    fn update_slider_gradient(&mut self) {
        let Hsv { h, s, v, .. } = self.selected;
        let RGBA8 { r, g, b, .. } = self.selected_color();
        let slider = &mut self.slider;
        let hsv = |h, s, v| Hsv::new(h, s, v, 1.).to_rgba();
        match self.primary {
            PrimaryAttribute::Hue => slider.set_hue_gradient(),
            PrimaryAttribute::Saturation =>
                slider.set_gradient(&hsv(h, 0., v), &hsv(h, 1., v)),
            PrimaryAttribute::Brightness =>
                slider.set_gradient(&hsv(h, s, 0.), &hsv(h, s, 1.)),
            PrimaryAttribute::Red =>
                slider.set_gradient(&opaque(0, g, b), &opaque(255, g, b)),
            PrimaryAttribute::Green =>
                slider.set_gradient(&opaque(r, 0, b), &opaque(r, 255, b)),
            PrimaryAttribute::Blue =>
                slider.set_gradient(&opaque(r, g, 0), &opaque(r, g, 255)),
        }
    }

    fn update_slider_position(&mut self) {
        let Hsv { h, s, v, .. } = self.selected;
        let RGBA8 { r, g, b, .. } = self.selected_color();
        let t = match self.primary {
            PrimaryAttribute::Hue => h,
            PrimaryAttribute::Saturation => s,
            PrimaryAttribute::Brightness => v,
            PrimaryAttribute::Red => r as f64 / 255.,
            PrimaryAttribute::Green => g as f64 / 255.,
            PrimaryAttribute::Blue => b as f64 / 255.,
        };
        self.slider.set_position(t);
    }

    fn update_alpha_gradient(&mut self) {
        let c = self.selected_color();
        self.alpha_slider.set_gradient(&RGBA8 { a: 0, ..c },
                                       &RGBA8 { a: 255, ..c });
    }
}
