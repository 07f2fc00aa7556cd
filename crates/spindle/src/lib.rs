pub mod macros;

pub mod boundary;
pub mod config;
pub mod direction;
pub mod geometry;
pub mod i18n;
pub mod input;
pub mod rest;
pub mod state;
pub mod tasks;
pub mod velocity;
pub mod wheel;

pub use config::{Config, PhysicsConfig};
pub use direction::SpinningDirection;
pub use geometry::Point;
pub use input::InputError;
pub use state::{SpinSnapshot, SpinState};
pub use tasks::{Task, TaskList};
pub use wheel::{AudioSink, Clip, TickResult, Wheel};
