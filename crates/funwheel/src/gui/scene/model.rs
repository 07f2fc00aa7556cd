use super::{
    HUB_RADIUS, PIN_INSET, STOPPER_HEIGHT, STOPPER_WIDTH, TASK_RADIUS_FACTOR, WHEEL_MARGIN,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use spindle::config::Config;
use spindle::geometry::{self, Point, SLICE_COUNT, SLICE_WIDTH};
use spindle::{SpinSnapshot, TaskList};
use std::path::Path;

/// What the entities see of the world on a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub snapshot: SpinSnapshot,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(snapshot: SpinSnapshot, width: f64, height: f64) -> Self {
        Self {
            snapshot,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

pub trait Drawable {
    fn update(&mut self, frame: &Frame);
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error>;
}

/// Point at `radius` from `center`, `screen_angle` degrees clockwise from north.
pub fn on_circle(center: Point, radius: f64, screen_angle: f64) -> Point {
    let rad = screen_angle.to_radians();
    Point::new(center.x + radius * rad.sin(), center.y - radius * rad.cos())
}

/// Cairo measures from east, we measure from north.
pub fn cairo_radians(screen_angle: f64) -> f64 {
    (screen_angle - 90.0).to_radians()
}

fn load_pixbuf(path: &Path, width: i32, height: i32, keep_aspect: bool) -> Option<Pixbuf> {
    Pixbuf::from_file_at_scale(path, width, height, keep_aspect)
        .map_err(|e| log::warn!("Failed to load image {}: {}", path.display(), e))
        .ok()
}

pub struct Background {
    pub image: Option<Pixbuf>,
    pub width: f64,
    pub height: f64,
}

impl Background {
    pub fn new(config: &Config) -> Self {
        let image = config.display_background_image.then(|| {
            load_pixbuf(
                &config.assets.background,
                config.window_width,
                config.window_height,
                false,
            )
        });
        Self {
            image: image.flatten(),
            width: f64::from(config.window_width),
            height: f64::from(config.window_height),
        }
    }

    pub fn resize(&mut self, frame: &Frame) {
        self.width = frame.width;
        self.height = frame.height;
    }
}

pub struct WheelSprite {
    pub center: Point,
    pub radius: f64,
    pub angle: f64,
    pub labels: [Option<String>; SLICE_COUNT],
    pub logo: Option<Pixbuf>,
}

impl WheelSprite {
    pub fn new(config: &Config, tasks: &TaskList) -> Self {
        let size = config.window_width.min(config.window_height);
        let mut sprite = Self {
            center: Point::new(
                f64::from(config.window_width) / 2.0,
                f64::from(config.window_height) / 2.0,
            ),
            radius: Self::radius_for(
                f64::from(config.window_width),
                f64::from(config.window_height),
            ),
            angle: 0.0,
            labels: Default::default(),
            logo: load_pixbuf(&config.assets.wheel_logo, size / 4, size / 4, true),
        };
        sprite.set_tasks(tasks, config.task_max_length);
        sprite
    }

    fn radius_for(width: f64, height: f64) -> f64 {
        (width.min(height) / 2.0 - WHEEL_MARGIN).max(HUB_RADIUS)
    }

    pub fn set_tasks(&mut self, tasks: &TaskList, max_len: usize) {
        for (index, label) in self.labels.iter_mut().enumerate() {
            *label = tasks.slice(index).map(|task| task.ellipsize(max_len));
        }
    }

    pub fn follow(&mut self, frame: &Frame) {
        self.center = frame.center();
        self.radius = Self::radius_for(frame.width, frame.height);
        self.angle = frame.snapshot.angle;
    }

    /// Screen angle of the middle of slice `index`.
    pub fn slice_center(&self, index: usize) -> f64 {
        geometry::slice_center_on_screen(index, self.angle)
    }

    /// Screen angles where slice `index` starts and ends, clockwise.
    pub fn slice_span(&self, index: usize) -> (f64, f64) {
        let middle = self.slice_center(index);
        (middle - SLICE_WIDTH / 2.0, middle + SLICE_WIDTH / 2.0)
    }

    /// Pins pass the stopper marker exactly when a stopper sound plays.
    pub fn pin_positions(&self) -> [Point; SLICE_COUNT] {
        std::array::from_fn(|index| {
            on_circle(self.center, self.radius - PIN_INSET, self.slice_center(index))
        })
    }

    pub fn label_anchor(&self, index: usize) -> Point {
        on_circle(
            self.center,
            self.radius * TASK_RADIUS_FACTOR,
            self.slice_center(index),
        )
    }
}

/// The fixed marker above the wheel.
pub struct Stopper {
    pub tip: Point,
}

impl Stopper {
    pub fn new(config: &Config) -> Self {
        Self {
            tip: Point::new(f64::from(config.window_width) / 2.0, STOPPER_HEIGHT / 2.0),
        }
    }

    pub fn follow(&mut self, frame: &Frame) {
        self.tip = Point::new(frame.width / 2.0, STOPPER_HEIGHT / 2.0);
    }

    /// Triangle corners, shrunk by `inset` on every side.
    pub fn triangle(&self, inset: f64) -> [Point; 3] {
        let top = self.tip.y - STOPPER_HEIGHT;
        let half = STOPPER_WIDTH / 2.0 - inset;
        [
            Point::new(self.tip.x - half, top),
            Point::new(self.tip.x + half, top),
            Point::new(self.tip.x, self.tip.y - inset),
        ]
    }
}

/// The closed set of things on screen.
pub enum Entity {
    Background(Background),
    Wheel(WheelSprite),
    Stopper(Stopper),
}

impl Drawable for Entity {
    fn update(&mut self, frame: &Frame) {
        match self {
            Entity::Background(e) => e.update(frame),
            Entity::Wheel(e) => e.update(frame),
            Entity::Stopper(e) => e.update(frame),
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        match self {
            Entity::Background(e) => e.draw(cr, colors),
            Entity::Wheel(e) => e.draw(cr, colors),
            Entity::Stopper(e) => e.draw(cr, colors),
        }
    }
}

/// Entities in draw order: background, wheel, stopper.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new(config: &Config, tasks: &TaskList) -> Self {
        log::debug!("Building scene for {} tasks", tasks.len());
        Self {
            entities: vec![
                Entity::Background(Background::new(config)),
                Entity::Wheel(WheelSprite::new(config, tasks)),
                Entity::Stopper(Stopper::new(config)),
            ],
        }
    }

    pub fn set_tasks(&mut self, tasks: &TaskList, max_len: usize) {
        for entity in &mut self.entities {
            if let Entity::Wheel(wheel) = entity {
                wheel.set_tasks(tasks, max_len);
            }
        }
    }

    pub fn update(&mut self, frame: &Frame) {
        self.entities.iter_mut().for_each(|e| e.update(frame));
    }

    pub fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.entities.iter().try_for_each(|e| e.draw(cr, colors))
    }
}
