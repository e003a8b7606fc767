//! UI layer: app shell, LED strip widget, and operator notifications.

pub mod app;
pub mod led_strip;
pub mod notify;

pub use app::PingPongApp;
