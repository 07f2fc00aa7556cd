use super::model::{Background, Drawable, Frame, Stopper, WheelSprite, cairo_radians};
use super::{
    FONT_FAMILY, HUB_GAP, HUB_RADIUS, INNER_SLICE_RADIUS, PIN_RADIUS, SLICE_BAND,
    STOPPER_LAYER_GAP, TASK_FONT_SIZE,
};
use crate::gui::theme::{self, GRAY_RAMP, SLICE_COLORS, ThemeColors};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use spindle::geometry::Point;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn paint_pixbuf(
    cr: &Context,
    pixbuf: &Pixbuf,
    origin: Point,
    scale: (f64, f64),
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(origin.x, origin.y);
    cr.scale(scale.0, scale.1);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

impl Drawable for Background {
    fn update(&mut self, frame: &Frame) {
        self.resize(frame);
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        match &self.image {
            Some(image) => {
                // stretch to the window like the window-sized source image
                let scale = (
                    self.width / f64::from(image.width()),
                    self.height / f64::from(image.height()),
                );
                paint_pixbuf(cr, image, Point::default(), scale)
            }
            None => {
                set_color(cr, colors.background);
                cr.paint()
            }
        }
    }
}

impl WheelSprite {
    fn draw_slices(&self, cr: &Context, radius: f64) -> Result<(), cairo::Error> {
        for (index, color) in SLICE_COLORS.iter().enumerate() {
            let (start, end) = self.slice_span(index);
            set_color(cr, theme::opaque(*color));
            cr.move_to(self.center.x, self.center.y);
            cr.arc(
                self.center.x,
                self.center.y,
                radius,
                cairo_radians(start),
                cairo_radians(end),
            );
            cr.close_path();
            cr.fill()?;
        }
        Ok(())
    }

    fn draw_labels(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, theme::opaque(theme::TASK_TEXT));
        cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(TASK_FONT_SIZE);

        for (index, label) in self.labels.iter().enumerate() {
            let Some(label) = label else { continue };
            let anchor = self.label_anchor(index);
            let Ok(ext) = cr.text_extents(label) else {
                continue;
            };

            cr.save()?;
            cr.translate(anchor.x, anchor.y);
            // read along the radius, outward
            cr.rotate(cairo_radians(self.slice_center(index)));
            cr.move_to(-ext.width() / 2.0, ext.height() / 2.0);
            cr.show_text(label)?;
            cr.restore()?;
        }
        Ok(())
    }

    fn draw_logo(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(logo) = &self.logo else {
            return Ok(());
        };
        let (w, h) = (f64::from(logo.width()), f64::from(logo.height()));
        cr.save()?;
        cr.translate(self.center.x, self.center.y);
        cr.rotate(-self.angle.to_radians());
        paint_pixbuf(cr, logo, Point::new(-w / 2.0, -h / 2.0), (1.0, 1.0))?;
        cr.restore()
    }
}

impl Drawable for WheelSprite {
    fn update(&mut self, frame: &Frame) {
        self.follow(frame);
    }

    fn draw(&self, cr: &Context, _colors: &ThemeColors) -> Result<(), cairo::Error> {
        fill_circle(cr, self.center, self.radius, theme::opaque(theme::RIM))?;
        self.draw_slices(cr, self.radius - SLICE_BAND)?;

        fill_circle(cr, self.center, HUB_RADIUS - HUB_GAP, theme::opaque(theme::RIM))?;
        fill_circle(cr, self.center, HUB_RADIUS - 2.0 * HUB_GAP, theme::opaque(theme::HUB))?;
        self.draw_slices(cr, INNER_SLICE_RADIUS)?;
        self.draw_logo(cr)?;

        for pin in self.pin_positions() {
            fill_circle(cr, pin, PIN_RADIUS, theme::opaque(theme::PIN))?;
        }
        self.draw_labels(cr)
    }
}

impl Drawable for Stopper {
    fn update(&mut self, frame: &Frame) {
        self.follow(frame);
    }

    fn draw(&self, cr: &Context, _colors: &ThemeColors) -> Result<(), cairo::Error> {
        // light outline fading into a dark core
        for (layer, color) in GRAY_RAMP.iter().enumerate() {
            let [a, b, c] = self.triangle(layer as f64 * STOPPER_LAYER_GAP);
            set_color(cr, theme::opaque(*color));
            cr.move_to(a.x, a.y);
            cr.line_to(b.x, b.y);
            cr.line_to(c.x, c.y);
            cr.close_path();
            cr.fill()?;
        }
        Ok(())
    }
}
