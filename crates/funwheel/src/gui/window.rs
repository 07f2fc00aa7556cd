use gtk::prelude::*;
use gtk4 as gtk;
use spindle::config::Config;

pub const APP_ID: &str = "org.wheeloffun.funwheel";

pub fn configure(window: &gtk::ApplicationWindow, config: &Config) {
    window.set_default_size(config.window_width, config.window_height);
    window.set_icon_name(Some(APP_ID));
}
