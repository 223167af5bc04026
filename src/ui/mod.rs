pub const LABEL_TEXT_SIZE: u16 = 18;
pub const STATUS_TEXT_SIZE: u16 = 22;
pub const OUTPUT_TEXT_SIZE: u16 = 14;

pub mod widget;
pub use widget::{button, modal, pick_list};

pub mod style;

pub mod app;
pub use app::{App, APP_NAME};

pub mod keys;
pub mod midi;
pub mod tray;
