use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba};
use spindle::geometry::SLICE_COUNT;

const fn rgb(r: u8, g: u8, b: u8) -> Srgb<u8> {
    Srgb::new(r, g, b)
}

pub const SLICE_COLORS: [Srgb<u8>; SLICE_COUNT] = [
    rgb(126, 192, 238), // sky blue
    rgb(0, 238, 118),   // spring green
    rgb(139, 131, 134), // lavender blush
    rgb(255, 215, 0),   // gold
    rgb(255, 165, 79),  // tan
    rgb(220, 20, 60),   // crimson
    rgb(209, 95, 238),  // medium orchid
    rgb(131, 111, 255), // slate blue
];

pub const GRAY_RAMP: [Srgb<u8>; 6] = [
    rgb(234, 234, 234),
    rgb(193, 193, 193),
    rgb(142, 142, 142),
    rgb(91, 91, 91),
    rgb(40, 40, 40),
    rgb(0, 0, 0),
];

pub const RIM: Srgb<u8> = rgb(234, 234, 234);
pub const HUB: Srgb<u8> = rgb(255, 255, 255);
pub const PIN: Srgb<u8> = rgb(160, 82, 45);
pub const TASK_TEXT: Srgb<u8> = rgb(255, 255, 255);

pub fn opaque(color: Srgb<u8>) -> Srgba<f64> {
    Srgba::from(color.into_format::<f64>())
}

/// Colors the scene takes from the GTK theme. The result label is styled by [`load_css`].
pub struct ThemeColors {
    pub background: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.funwheel-result {
    font-size: 20px;
    font-weight: bold;
    padding: 8px 16px;
    border-radius: 8px;
    background-color: rgba(0, 0, 0, 0.6);
    color: white;
}

.funwheel-error {
    color: #dc143c;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
