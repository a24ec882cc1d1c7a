pub mod constants;
pub mod content;
pub mod cursor;
pub mod easing;
pub mod error;
pub mod ingredients;
pub mod loading;
pub mod panel;
pub mod particles;
pub mod progress;
pub mod scope;
pub mod scroll;
pub mod sections;
pub mod sfx;
pub mod soundscape;
pub mod split;
pub mod theme;
pub mod timeline;
pub mod tween;

pub use error::{SiteError, SiteResult};

// Site content bundled as a JSON string constant
pub static SITE_JSON: &str = include_str!("../../content/site.json");
