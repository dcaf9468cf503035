use log::trace;
use rgb::{RGBA8, RGB8};
use crate::{ColorBlend, GradientField, Position, RGBColor, DEFAULT_ACCURACY};

/// Default diameter, in device pixels, of the position indicator.
pub const DEFAULT_PICKER_SIZE: u32 = 8;

/// The state of a 2D color picking area: a [`GradientField`], the
/// picked [`Position`] in it and the color found there.
///
/// Observers registered with [`ColorPanel::on_position_changed`] and
/// [`ColorPanel::on_value_changed`] are called, in that order, when
/// the position changes, and the latter only if the picked color
/// changed too.
///
/// # Example
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
/// use rgb::RGBA8;
/// use color_panel::ColorPanel;
/// let mut panel = ColorPanel::new();
/// let picked = Rc::new(RefCell::new(vec![]));
/// let p = picked.clone();
/// panel.on_value_changed(move |c| p.borrow_mut().push(c));
/// panel.set_position(0., 1.);
/// panel.set_position(0., 1.);
/// assert_eq!(*picked.borrow(), [RGBA8::new(255, 0, 0, 255)]);
/// ```
pub struct ColorPanel {
    field: GradientField,
    position: Position,
    value: RGBA8,
    picker_size: u32,
    position_changed: Vec<Box<dyn FnMut(Position)>>,
    value_changed: Vec<Box<dyn FnMut(RGBA8)>>,
}

impl Default for ColorPanel {
    fn default() -> Self { Self::new() }
}

impl ColorPanel {
    /// A panel showing the hue × brightness gradient, picking its
    /// center.
    pub fn new() -> Self { Self::with_field(GradientField::default()) }

    /// A panel showing `field`, picking its center.
    pub fn with_field(field: GradientField) -> Self {
        let position = Position::default();
        let value = field.sample(position);
        ColorPanel { field, position, value,
                     picker_size: DEFAULT_PICKER_SIZE,
                     position_changed: vec![], value_changed: vec![] }
    }

    /// Call `f` with the new position each time it changes.
    pub fn on_position_changed(&mut self, f: impl FnMut(Position) + 'static) {
        self.position_changed.push(Box::new(f));
    }

    /// Call `f` with the new color each time the picked color changes.
    pub fn on_value_changed(&mut self, f: impl FnMut(RGBA8) + 'static) {
        self.value_changed.push(Box::new(f));
    }

    /// The field currently shown.
    pub fn field(&self) -> &GradientField { &self.field }

    /// Replace the field and pick the color at the current position
    /// in the new one.
    pub fn set_field(&mut self, field: GradientField) {
        self.field = field;
        self.update_value();
    }

    /// See [`GradientField::corners`].
    pub fn setup_gradient<C: RGBColor>(&mut self, top_left: &C, top_right: &C,
                                       bottom_left: &C, bottom_right: &C,
                                       accuracy: usize) {
        self.set_field(GradientField::corners(top_left, top_right,
                                              bottom_left, bottom_right,
                                              accuracy));
    }

    /// See [`GradientField::axis`].
    pub fn setup_axis_gradient<C: RGBColor>(&mut self, left: &C, right: &C,
                                            bottom: &C, top: &C,
                                            accuracy: usize) {
        self.set_field(GradientField::axis(left, right, bottom, top, accuracy));
    }

    /// See [`GradientField::axis_blend`].
    pub fn setup_axis_blend_gradient<C, D>(&mut self, blend_x: &ColorBlend<C>,
                                           blend_y: &ColorBlend<D>,
                                           accuracy: usize)
    where C: RGBColor, D: RGBColor {
        self.set_field(GradientField::axis_blend(blend_x, blend_y, accuracy));
    }

    /// See [`GradientField::hue_brightness`].
    pub fn setup_hue_brightness_gradient(&mut self, saturation: f64,
                                         accuracy: usize) {
        self.set_field(GradientField::hue_brightness(saturation, accuracy));
    }

    /// See [`GradientField::hue_saturation`].
    pub fn setup_hue_saturation_gradient(&mut self, brightness: f64,
                                         accuracy: usize) {
        self.set_field(GradientField::hue_saturation(brightness, accuracy));
    }

    /// Color of the top left corner of the current field.
    pub fn top_left_color(&self) -> RGBA8 { self.field.top_left() }

    /// Color of the top right corner of the current field.
    pub fn top_right_color(&self) -> RGBA8 { self.field.top_right() }

    /// Color of the bottom left corner of the current field.
    pub fn bottom_left_color(&self) -> RGBA8 { self.field.bottom_left() }

    /// Color of the bottom right corner of the current field.
    pub fn bottom_right_color(&self) -> RGBA8 { self.field.bottom_right() }

    /// Show a corner gradient whose top left color is `c`, keeping the
    /// current colors of the other corners.  Does nothing if `c`
    /// already is the top left color.
    pub fn set_top_left_color(&mut self, c: RGBA8) {
        let [_, tr, bl, br] = self.corners();
        self.set_corners([c, tr, bl, br]);
    }

    /// See [`ColorPanel::set_top_left_color`].
    pub fn set_top_right_color(&mut self, c: RGBA8) {
        let [tl, _, bl, br] = self.corners();
        self.set_corners([tl, c, bl, br]);
    }

    /// See [`ColorPanel::set_top_left_color`].
    pub fn set_bottom_left_color(&mut self, c: RGBA8) {
        let [tl, tr, _, br] = self.corners();
        self.set_corners([tl, tr, c, br]);
    }

    /// See [`ColorPanel::set_top_left_color`].
    pub fn set_bottom_right_color(&mut self, c: RGBA8) {
        let [tl, tr, bl, _] = self.corners();
        self.set_corners([tl, tr, bl, c]);
    }

    fn corners(&self) -> [RGBA8; 4] {
        [self.top_left_color(), self.top_right_color(),
         self.bottom_left_color(), self.bottom_right_color()]
    }

    fn set_corners(&mut self, c: [RGBA8; 4]) {
        if c == self.corners() { return }
        self.setup_gradient(&c[0], &c[1], &c[2], &c[3], DEFAULT_ACCURACY);
    }

    /// The picked position.
    pub fn position(&self) -> Position { self.position }

    /// Move the picked position to `(x, y)` (clamped to the unit
    /// square) and notify the observers.
    pub fn set_position(&mut self, x: f64, y: f64) {
        let position = Position::new(x, y);
        if position == self.position { return }
        self.position = position;
        trace!("panel position changed to ({}, {})", position.x(), position.y());
        for f in &mut self.position_changed { f(position) }
        self.update_value();
    }

    /// The color at the picked position.
    pub fn value(&self) -> RGBA8 { self.value }

    fn update_value(&mut self) {
        let value = self.field.sample(self.position);
        if value == self.value { return }
        self.value = value;
        trace!("panel value changed to {value:?}");
        for f in &mut self.value_changed { f(value) }
    }

    /// Diameter of the position indicator.
    pub fn picker_size(&self) -> u32 { self.picker_size }

    /// Set the diameter of the position indicator.
    pub fn set_picker_size(&mut self, size: u32) { self.picker_size = size }

    /// Color in which to draw the position indicator so that it
    /// contrasts with the picked color.
    pub fn indicator_color(&self) -> RGB8 {
        if self.value.luminance() > 0.5 { RGB8::new(0, 0, 0) }
        else { RGB8::new(255, 255, 255) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, PartialEq)]
    enum Event { Moved(Position), Picked(RGBA8) }

    fn recorded(panel: &mut ColorPanel) -> Rc<RefCell<Vec<Event>>> {
        let log = Rc::new(RefCell::new(vec![]));
        let l = log.clone();
        panel.on_position_changed(move |p| l.borrow_mut().push(Event::Moved(p)));
        let l = log.clone();
        panel.on_value_changed(move |c| l.borrow_mut().push(Event::Picked(c)));
        log
    }

    fn gray_panel() -> ColorPanel {
        let black = RGBA8::new(0, 0, 0, 255);
        let white = RGBA8::new(255, 255, 255, 255);
        ColorPanel::with_field(GradientField::corners(&white, &white,
                                                      &black, &black, 3))
    }

    #[test]
    fn position_before_value() {
        let mut panel = gray_panel();
        let log = recorded(&mut panel);
        panel.set_position(0.2, 1.);
        assert_eq!(*log.borrow(),
                   [Event::Moved(Position::new(0.2, 1.)),
                    Event::Picked(RGBA8::new(255, 255, 255, 255))]);
    }

    #[test]
    fn same_position_is_silent() {
        let mut panel = gray_panel();
        panel.set_position(0.3, 0.4);
        let log = recorded(&mut panel);
        panel.set_position(0.3, 0.4);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn same_color_only_moves() {
        let mut panel = gray_panel();
        let log = recorded(&mut panel);
        // Same row (all cells of a row share the color).
        panel.set_position(0.9, 0.5);
        assert_eq!(*log.borrow(), [Event::Moved(Position::new(0.9, 0.5))]);
    }

    #[test]
    fn clamped_position() {
        let mut panel = gray_panel();
        panel.set_position(1., 1.);
        let log = recorded(&mut panel);
        panel.set_position(4., 2.);
        assert!(log.borrow().is_empty());
        assert_eq!(panel.position(), Position::new(1., 1.));
    }

    #[test]
    fn new_field_resamples() {
        let mut panel = gray_panel();
        panel.set_position(0.5, 1.);
        let log = recorded(&mut panel);
        panel.setup_hue_saturation_gradient(1., 7);
        assert_eq!(*log.borrow(),
                   [Event::Picked(RGBA8::new(0, 255, 255, 255))]);
        assert_eq!(panel.value(), RGBA8::new(0, 255, 255, 255));
    }

    #[test]
    fn hue_brightness_top_left() {
        let mut panel = ColorPanel::new();
        panel.setup_hue_brightness_gradient(1., DEFAULT_ACCURACY);
        panel.set_position(0., 1.);
        assert_eq!(panel.value(), RGBA8::new(255, 0, 0, 255));
        assert_eq!(panel.indicator_color(), RGB8::new(255, 255, 255));
        panel.set_position(0.5, 0.);
        assert_eq!(panel.value(), RGBA8::new(0, 0, 0, 255));
    }

    #[test]
    fn corner_setters() {
        let mut panel = gray_panel();
        let red = RGBA8::new(255, 0, 0, 255);
        panel.set_position(0., 0.);
        let log = recorded(&mut panel);
        panel.set_bottom_left_color(red);
        assert_eq!(panel.bottom_left_color(), red);
        assert_eq!(panel.top_left_color(), RGBA8::new(255, 255, 255, 255));
        assert_eq!(panel.field().accuracy(), DEFAULT_ACCURACY);
        assert_eq!(*log.borrow(), [Event::Picked(red)]);
        let field = panel.field().clone();
        panel.set_bottom_left_color(red);
        assert_eq!(*panel.field(), field);
    }

    #[test]
    fn indicator_contrasts() {
        let white = RGBA8::new(255, 255, 255, 255);
        let panel = ColorPanel::with_field(
            GradientField::corners(&white, &white, &white, &white, 1));
        assert_eq!(panel.indicator_color(), RGB8::new(0, 0, 0));
        assert_eq!(panel.picker_size(), DEFAULT_PICKER_SIZE);
    }
}
