pub mod model;
pub mod view;

pub use model::{Background, Drawable, Entity, Frame, Scene, Stopper, WheelSprite};

pub const WHEEL_MARGIN: f64 = 50.0;
pub const SLICE_BAND: f64 = 14.0; // rim width outside the slices
pub const HUB_RADIUS: f64 = 80.0;
pub const HUB_GAP: f64 = 5.0;
pub const INNER_SLICE_RADIUS: f64 = 66.0;
pub const PIN_RADIUS: f64 = 5.0;
pub const PIN_INSET: f64 = 8.0;
pub const TASK_RADIUS_FACTOR: f64 = 0.6;
pub const TASK_FONT_SIZE: f64 = 12.0;
pub const FONT_FAMILY: &str = "Comic Sans MS";
pub const STOPPER_WIDTH: f64 = 150.0;
pub const STOPPER_HEIGHT: f64 = 300.0;
pub const STOPPER_LAYER_GAP: f64 = 3.0;
