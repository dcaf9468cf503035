use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::{RGB8, RGBA8};
use color_panel::{ColorBlend, ColorPicker, ColorRange, GradientField,
                  PrimaryAttribute, RGBColor};

type Err = Box<dyn Error>;

fn css_string(c: RGBA8) -> String {
    format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.)
}

fn field(fh: &mut impl Write, f: &GradientField, cell: u32,
         comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px; \
                  display: inline-table; margin-right: 10px\">\n\
                  <caption style=\"caption-side: bottom\">{comment}\
                  </caption>")?;
    for row in f.rows() {
        write!(fh, "<tr>")?;
        for &c in row {
            write!(fh, "<td style=\"width: {cell}px; height: {cell}px; \
                        padding: 0px; background-color: {}\"></td>",
                   css_string(c))?;
        }
        writeln!(fh, "</tr>")?;
    }
    writeln!(fh, "</table>")?;
    Ok(())
}

fn strip(fh: &mut impl Write, range: &impl ColorRange<RGBA8>, n: usize,
         width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for (_, c) in range.samples(n) {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>", css_string(c))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for (_, c) in range.samples(n) {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>", css_string(c.to_gray()))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("panel.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Color_panel: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Presets</h3>")?;
    field(&mut fh, &GradientField::hue_brightness(1., 32), 6,
          "hue × brightness")?;
    field(&mut fh, &GradientField::hue_brightness(0.4, 32), 6,
          "hue × brightness (s = 0.4)")?;
    field(&mut fh, &GradientField::hue_saturation(1., 32), 6,
          "hue × saturation")?;
    field(&mut fh, &GradientField::hue_saturation(0.5, 32), 6,
          "hue × saturation (v = 0.5)")?;

    writeln!(fh, "<h3>Corners and axes</h3>")?;
    field(&mut fh, &GradientField::corners(
        &RGB8::new(255, 0, 0), &RGB8::new(0, 255, 0),
        &RGB8::new(0, 0, 255), &RGB8::new(255, 255, 255), 32), 6,
          "four corners")?;
    field(&mut fh, &GradientField::corners(
        &RGBA8::new(255, 0, 0, 255), &RGBA8::new(255, 0, 0, 0),
        &RGBA8::new(0, 0, 255, 0), &RGBA8::new(0, 0, 255, 255), 32), 6,
          "four corners with alpha")?;
    field(&mut fh, &GradientField::axis(
        &RGBA8::new(255, 255, 255, 255), &RGBA8::new(0, 128, 255, 255),
        &RGBA8::new(0, 0, 0, 255), &RGBA8::new(0, 0, 0, 0), 32), 6,
          "saturation × brightness")?;

    writeln!(fh, "<h3>Picker panels</h3>")?;
    let mut picker = ColorPicker::new(RGB8::new(230, 120, 30));
    for primary in [PrimaryAttribute::Hue, PrimaryAttribute::Saturation,
                    PrimaryAttribute::Brightness, PrimaryAttribute::Red,
                    PrimaryAttribute::Green, PrimaryAttribute::Blue] {
        picker.set_primary(primary);
        field(&mut fh, picker.panel().field(), 6,
              &format!("{primary:?} ({})", picker.hex()))?;
    }

    writeln!(fh, "<h3>Sliders</h3>")?;
    strip(&mut fh, &ColorBlend::<RGBA8>::hue(), 150, 2, "hue")?;
    strip(&mut fh, &ColorBlend::<RGBA8>::hue_wheel(0.5, 0.8), 150, 2,
          "hue (s = 0.5, v = 0.8)")?;
    strip(&mut fh, &RGBA8::new(255, 0, 0, 0)
          .gradient(&RGBA8::new(255, 0, 0, 255)), 150, 2, "alpha")?;
    let blend = ColorBlend::new([(0., &RGB8::new(0, 0, 0)),
                                 (0.2, &RGB8::new(128, 0, 128)),
                                 (0.7, &RGB8::new(255, 128, 0)),
                                 (1., &RGB8::new(255, 255, 200))]);
    strip(&mut fh, &blend.cast::<RGBA8>(), 150, 2, "four stops")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
