// The main crate is wasm-only, so host tests include the pure-Rust core
// modules directly, mirroring the `core` module tree for their `super::` paths.

pub mod core {
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod content {
        include!("../../src/core/content.rs");
    }
    pub mod cursor {
        include!("../../src/core/cursor.rs");
    }
    pub mod easing {
        include!("../../src/core/easing.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod ingredients {
        include!("../../src/core/ingredients.rs");
    }
    pub mod loading {
        include!("../../src/core/loading.rs");
    }
    pub mod panel {
        include!("../../src/core/panel.rs");
    }
    pub mod particles {
        include!("../../src/core/particles.rs");
    }
    pub mod progress {
        include!("../../src/core/progress.rs");
    }
    pub mod scope {
        include!("../../src/core/scope.rs");
    }
    pub mod scroll {
        include!("../../src/core/scroll.rs");
    }
    pub mod sections {
        include!("../../src/core/sections.rs");
    }
    pub mod sfx {
        include!("../../src/core/sfx.rs");
    }
    pub mod soundscape {
        include!("../../src/core/soundscape.rs");
    }
    pub mod split {
        include!("../../src/core/split.rs");
    }
    pub mod theme {
        include!("../../src/core/theme.rs");
    }
    pub mod timeline {
        include!("../../src/core/timeline.rs");
    }
    pub mod tween {
        include!("../../src/core/tween.rs");
    }
}

pub const SITE_JSON: &str = include_str!("../../content/site.json");
