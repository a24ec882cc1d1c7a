// Shared motion/audio tuning constants used by the core models and the web frontend.

// Cursor
pub const CURSOR_FOLLOW_SPEED: f32 = 0.15; // fraction of remaining distance closed per frame
pub const CURSOR_RING_HALF: f32 = 20.0; // ring is 40px wide
pub const CURSOR_DOT_HALF: f32 = 4.0; // dot is 8px wide
pub const CURSOR_HOVER_SCALE: f32 = 1.5;
pub const CURSOR_HOVER_SECS: f64 = 0.3;

// Particles
pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_ATTRACT_RADIUS: f32 = 150.0;
pub const PARTICLE_ATTRACT_JITTER: f32 = 100.0; // full width of the +-50px landing jitter
pub const PARTICLE_ATTRACT_SECS: f64 = 0.5;
pub const PARTICLE_ATTRACT_SCALE: f32 = 1.5;
pub const PARTICLE_DRIFT_Y: f32 = -100.0;

// Loading screen
pub const LOADING_TICK_MS: i32 = 200;
pub const LOADING_STEP_MIN: f64 = 5.0;
pub const LOADING_STEP_SPAN: f64 = 15.0;
pub const LOADING_HOLD_SECS: f64 = 0.5;
pub const LOADING_FILL_SECS: f64 = 0.5;
pub const LOADING_TEXT_SECS: f64 = 0.3;
pub const LOADING_LOGO_SECS: f64 = 1.0;
pub const LOADING_LOGO_RISE: f32 = 50.0;

// Panels
pub const SOUND_TOGGLE_SECS: f64 = 0.4;
pub const DRAWER_ENTER_SECS: f64 = 0.6;
pub const DRAWER_EXIT_SECS: f64 = 0.4;
pub const MODAL_ENTER_SECS: f64 = 0.4;
pub const MODAL_EXIT_SECS: f64 = 0.3;
pub const THEME_FADE_SECS: f64 = 0.8;
pub const THEME_PULSE_SECS: f64 = 0.4;

// Audio levels
pub const SFX_LEVEL: f32 = 0.3;
pub const SOUNDSCAPE_DEFAULT_VOLUME: f32 = 0.2;
pub const SOUNDSCAPE_MAX_VOLUME: f32 = 0.5;
pub const SOUNDSCAPE_VOLUME_STEP: f32 = 0.05;
pub const BUBBLE_PERIOD_MS: i32 = 3000;
pub const BUBBLE_CHANCE: f64 = 0.1;

// Scroll progress indicator
pub const PROGRESS_REVEAL_THRESHOLD: f64 = 0.05;
pub const PROGRESS_FADE_SECS: f64 = 0.3;
pub const SCROLL_TO_TOP_SECS: f64 = 1.5;

// Text reveal
pub const FONT_FALLBACK_DELAY_MS: i32 = 100;
pub const LINE_TOP_TOLERANCE_PX: f64 = 1.0;
