use std::f64::consts::PI;

// Starfield
pub const STAR_DENSITY: f64 = 3000.0; // px² per star
pub const MIN_STAR_DENSITY: f64 = 1.0;
pub const STAR_MAX_RADIUS: f64 = 2.0;
pub const STAR_GLOW_MIN_RADIUS: f64 = 1.5;
pub const STAR_GLOW_SCALE: f64 = 3.0;
pub const STAR_GLOW_ALPHA: f64 = 0.3;
pub const DRIFT_SPEED_MIN: f64 = 0.1;
pub const DRIFT_SPEED_RANGE: f64 = 0.5;
pub const TWINKLE_SPEED_MIN: f64 = 0.005; // rad/frame
pub const TWINKLE_SPEED_RANGE: f64 = 0.02;

// Shooting stars
pub const SHOOTING_STAR_CHANCE: f64 = 0.002; // per frame
pub const SHOOTING_STAR_FADE: f64 = 0.02; // opacity per frame
pub const SHOOTING_STAR_ANGLE: f64 = PI / 4.0;
pub const SHOOTING_STAR_ANGLE_SPREAD: f64 = 0.5;
pub const SHOOTING_STAR_LENGTH_MIN: f64 = 40.0;
pub const SHOOTING_STAR_LENGTH_RANGE: f64 = 80.0;
pub const SHOOTING_STAR_SPEED_MIN: f64 = 15.0; // px/frame
pub const SHOOTING_STAR_SPEED_RANGE: f64 = 10.0;
pub const SHOOTING_STAR_WIDTH: f64 = 2.0;

pub const STARFIELD_CONTAINER_ID: &str = "starfield";

// Navigation
pub const MOBILE_BREAKPOINT: f64 = 768.0; // px
pub const NAV_SCROLLED_OFFSET: f64 = 50.0;
pub const SECTION_ACTIVE_MARGIN: f64 = 100.0;
pub const NAV_RESIZE_DEBOUNCE_MS: u32 = 250;

// Scroll reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_CLASS: &str = "aos-animate";

// Parallax
pub const HERO_PARALLAX_FACTOR: f64 = 0.3;
pub const HERO_FADE_DISTANCE: f64 = 800.0;
pub const PLANET_MAX_ROTATION: f64 = 30.0; // deg

// Embellishments
pub const TYPING_STEP_MS: u32 = 30;
pub const TYPING_THRESHOLD: f64 = 0.5;
pub const BINARY_STREAM_INTERVAL_MS: u32 = 5000;
pub const BINARY_STREAM_FADE_MS: u32 = 500;
pub const BINARY_STREAM_OPACITY: &str = "0.6";
pub const PAGE_REVEAL_DELAY_MS: u32 = 100;

pub const BINARY_SEQUENCES: [&str; 4] = [
    "1 0.5 0.11 0.5 1 0.5 0.18 0.5 10 0.5 0.9",
    "10 0.5 0.13 0.5 11 0.5 0.18 0.5 110 0.5 0.9",
    "0.2 0.5 0.21 0.5 1 0.5 0.22 0.5 1 0.5 0.23 0.5 0 0.5 0.9",
    "0.303 0.5 0.15 0.5 0.33 0.5 0.13 0.5 0.32 0.5 0.13 0.5 0.301 0.5 0.9",
];

pub const HOVER_CARDS: &str =
    ".principle-card, .symbol-card, .constant-card, .philosophy-card, .stat";
pub const GLOW_RESTING: &str =
    "radial-gradient(circle, rgba(0, 217, 255, 0.1) 0%, transparent 70%)";
