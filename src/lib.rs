//! Flappy Royale - flap-and-dodge minigame for a daily tournament
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `tuning`: Data-driven world geometry and difficulty balance
//! - `submit`: Score submission collaborator boundary
//! - `tournament`: Daily tournament period and keep-if-higher bookkeeping
//! - `renderer`: Snapshot projection into drawable quads

pub mod renderer;
pub mod sim;
pub mod submit;
pub mod tournament;
pub mod tuning;

pub use submit::{LogSink, ScoreSink, ScoreSubmission};
pub use tuning::Tuning;

/// Game configuration constants (deployed balance)
pub mod consts {
    /// Largest simulation step a single frame may advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 384.0;
    pub const WORLD_HEIGHT: f32 = 512.0;
    /// Height of the scrolling floor strip at the bottom of the world
    pub const FLOOR_HEIGHT: f32 = 112.0;

    /// Body defaults
    pub const BODY_X: f32 = 60.0;
    pub const BODY_WIDTH: f32 = 34.0;
    pub const BODY_HEIGHT: f32 = 24.0;
    /// Rest position sits this far above the vertical center
    pub const BODY_REST_LIFT: f32 = 50.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -370.0;

    /// Obstacle scroll speed (pixels/s)
    pub const INITIAL_SPEED: f32 = 120.0;
    pub const MAX_SPEED: f32 = 150.0;
    pub const SPEED_INCREMENT: f32 = 8.0;

    /// Obstacle gap height (pixels)
    pub const INITIAL_GAP: f32 = 105.0;
    pub const MIN_GAP: f32 = 90.0;
    pub const GAP_DECREMENT: f32 = 8.0;

    /// Horizontal distance between consecutive obstacles
    pub const SPAWN_INTERVAL: f32 = 200.0;
    /// Score multiple at which difficulty steps up
    pub const DIFFICULTY_INTERVAL: u32 = 5;

    /// Minimum clearance between the gap and the ceiling / floor
    pub const GAP_MARGIN_TOP: f32 = 100.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 100.0;

    pub const OBSTACLE_WIDTH: f32 = 52.0;
    /// Drawn height of each obstacle segment (render only)
    pub const OBSTACLE_SEGMENT_HEIGHT: f32 = 320.0;

    /// Display rotation clamp (radians)
    pub const MIN_ROTATION: f32 = -0.5;
    pub const MAX_ROTATION: f32 = std::f32::consts::FRAC_PI_6;
    /// Velocity that maps to one radian of tilt
    pub const ROTATION_VELOCITY_SCALE: f32 = 500.0;

    /// Idle bob: amplitude (pixels) and period divisor (milliseconds)
    pub const IDLE_BOB_AMPLITUDE: f32 = 5.0;
    pub const IDLE_BOB_PERIOD_MS: f32 = 200.0;
}
