pub mod app;
pub mod editor;
pub mod scene;
pub mod theme;
pub mod window;
