// DOM contract: the ids, classes and selectors the site markup provides.
// A missing element disables only the feature that needs it.

// Loading screen
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_LOGO_ID: &str = "loading-logo";
pub const LOADING_LIQUID_ID: &str = "loading-liquid";
pub const LOADING_PERCENT_ID: &str = "loading-percentage";
pub const LOADING_BAR_ID: &str = "loading-bar";
pub const MAIN_CONTENT_SELECTOR: &str = "main";

// Cursor
pub const CURSOR_RING_CLASS: &str = "custom-cursor";
pub const CURSOR_DOT_CLASS: &str = "cursor-dot";
pub const HOVERABLE_SELECTOR: &str = "a, button, .cursor-pointer";
pub const HIDE_NATIVE_CURSOR_CSS: &str = "*, *::before, *::after { cursor: none !important; }";

// Particles
pub const PARTICLE_FIELD_CLASS: &str = "particle-field";
pub const PARTICLE_CLASS: &str = "particle";

// Sound control
pub const SOUND_TOGGLE_ID: &str = "sound-toggle";
pub const SOUND_TARGETS_SELECTOR: &str = "button, a";

// Ambient soundscape
pub const SOUNDSCAPE_PANEL_ID: &str = "soundscape-panel";
pub const SOUNDSCAPE_OPEN_ID: &str = "soundscape-open";
pub const SOUNDSCAPE_CLOSE_ID: &str = "soundscape-close";
pub const SOUNDSCAPE_PLAY_ID: &str = "soundscape-play";
pub const SOUNDSCAPE_VOLUME_ID: &str = "soundscape-volume";
pub const SOUNDSCAPE_NAME_ID: &str = "soundscape-name";
pub const SOUNDSCAPE_DESCRIPTION_ID: &str = "soundscape-description";
pub const SOUNDSCAPE_NOW_PLAYING_ID: &str = "soundscape-now-playing";
pub const SOUNDSCAPE_CHOICE_ATTR: &str = "data-soundscape";

// Ingredients
pub const INGREDIENTS_TOGGLE_ID: &str = "ingredients-toggle";
pub const INGREDIENTS_DRAWER_ID: &str = "ingredients-drawer";
pub const INGREDIENTS_GRID_ID: &str = "ingredients-grid";
pub const INGREDIENT_CARD_CLASS: &str = "ingredient-card";
pub const INGREDIENT_MODAL_ID: &str = "ingredient-modal";
pub const INGREDIENT_MODAL_CARD_ID: &str = "ingredient-modal-card";
pub const INGREDIENT_MODAL_CLOSE_ID: &str = "ingredient-modal-close";
pub const INGREDIENT_NAME_ID: &str = "ingredient-name";
pub const INGREDIENT_DESCRIPTION_ID: &str = "ingredient-description";
pub const INGREDIENT_ICON_ID: &str = "ingredient-icon";
pub const INGREDIENT_BENEFITS_ID: &str = "ingredient-benefits";

// Theme switch
pub const THEME_SWITCHER_ID: &str = "theme-switcher";
pub const THEME_CHOICE_ATTR: &str = "data-theme";

// Scroll progress
pub const PROGRESS_ID: &str = "scroll-progress";
pub const PROGRESS_BAR_ID: &str = "scroll-progress-bar";
pub const PROGRESS_RING_ID: &str = "scroll-progress-ring";
pub const PROGRESS_FILL_ID: &str = "scroll-progress-fill";
pub const SCROLL_TO_TOP_ID: &str = "scroll-to-top";

// Section choreography
pub const HERO_SELECTOR: &str = "#hero";
pub const HERO_LEFT_LEAF: &str = "#hero .left-leaf";
pub const HERO_RIGHT_LEAF: &str = "#hero .right-leaf";
pub const ABOUT_SELECTOR: &str = "#about";
pub const ABOUT_TITLE: &str = "#about h2";
pub const ABOUT_TILES: &str = "#about .top-grid > div, #about .bottom-grid > div";
pub const TILE_IMAGE: &str = "img";
pub const TILE_OVERLAY: &str = ".noisy";
pub const CONTACT_SELECTOR: &str = "#contact";
pub const CONTACT_TITLE: &str = "#contact h2";
pub const CONTACT_CARDS: &str = "#contact .contact-card";
pub const CONTACT_FOOTER_LINE: &str = "#contact .content > div:last-child";
pub const CONTACT_LEFT_LEAF: &str = "#f-left-leaf";
pub const CONTACT_RIGHT_LEAF: &str = "#f-right-leaf";

// Text splitting
pub const SPLIT_UNIT_CLASS: &str = "split-unit";
pub const SPLIT_LINE_CLASS: &str = "split-line";

// Contact details rendered from site content
pub const OPENING_HOURS_ID: &str = "opening-hours";
pub const SOCIALS_ID: &str = "socials";
