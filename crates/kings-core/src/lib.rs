#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;
pub mod shuffle;
pub mod timeline;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "kings"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
