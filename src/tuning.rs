//! Data-driven game balance
//!
//! Every number the simulation reads comes from a [`Tuning`]. The default is
//! the deployed balance; native builds may load an override from JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World geometry, physics and difficulty curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub floor_height: f32,

    // === Body ===
    pub body_x: f32,
    pub body_width: f32,
    pub body_height: f32,
    /// Rest position sits this far above the vertical center
    pub rest_lift: f32,
    pub gravity: f32,
    pub flap_impulse: f32,

    // === Display ===
    pub min_rotation: f32,
    pub max_rotation: f32,
    pub rotation_velocity_scale: f32,
    pub idle_bob_amplitude: f32,
    pub idle_bob_period_ms: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Drawn height of each segment (render only)
    pub obstacle_segment_height: f32,
    pub spawn_interval: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    pub initial_gap: f32,
    pub min_gap: f32,
    pub gap_decrement: f32,
    pub difficulty_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            floor_height: FLOOR_HEIGHT,

            body_x: BODY_X,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            rest_lift: BODY_REST_LIFT,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            min_rotation: MIN_ROTATION,
            max_rotation: MAX_ROTATION,
            rotation_velocity_scale: ROTATION_VELOCITY_SCALE,
            idle_bob_amplitude: IDLE_BOB_AMPLITUDE,
            idle_bob_period_ms: IDLE_BOB_PERIOD_MS,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_segment_height: OBSTACLE_SEGMENT_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,

            initial_speed: INITIAL_SPEED,
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            initial_gap: INITIAL_GAP,
            min_gap: MIN_GAP,
            gap_decrement: GAP_DECREMENT,
            difficulty_interval: DIFFICULTY_INTERVAL,
        }
    }
}

impl Tuning {
    /// Playable height between ceiling and floor
    #[inline]
    pub fn sky_height(&self) -> f32 {
        self.world_height - self.floor_height
    }

    /// Vertical resting position of the body (ready state, run start)
    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.world_height / 2.0 - self.rest_lift
    }

    /// Width of the band a gap's top edge may be placed in, for a given gap.
    ///
    /// Negative means the gap cannot fit between the margins.
    pub fn gap_placement_span(&self, gap: f32) -> f32 {
        self.sky_height() - gap - self.gap_margin_top - self.gap_margin_bottom
    }

    /// Reject balances the simulation cannot place obstacles for.
    ///
    /// The widest gap seen during a run is `initial_gap`, so that is the
    /// one that must still fit between the margins.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world must have positive size, got {}x{}",
            self.world_width,
            self.world_height
        );
        ensure!(
            self.floor_height >= 0.0 && self.floor_height < self.world_height,
            "floor height {} does not fit in world height {}",
            self.floor_height,
            self.world_height
        );
        ensure!(
            self.gap_margin_top > 0.0 && self.gap_margin_bottom > 0.0,
            "gap margins must be strictly positive (top {}, bottom {})",
            self.gap_margin_top,
            self.gap_margin_bottom
        );
        ensure!(self.difficulty_interval > 0, "difficulty interval must be at least 1");
        ensure!(self.spawn_interval > 0.0, "spawn interval must be positive");
        ensure!(
            self.initial_speed > 0.0 && self.max_speed >= self.initial_speed,
            "speed range {}..={} is invalid",
            self.initial_speed,
            self.max_speed
        );
        ensure!(
            self.min_gap > 0.0 && self.min_gap <= self.initial_gap,
            "gap range {}..={} is invalid",
            self.min_gap,
            self.initial_gap
        );
        ensure!(
            self.speed_increment >= 0.0 && self.gap_decrement >= 0.0,
            "difficulty steps must not be negative"
        );
        ensure!(
            self.gap_placement_span(self.initial_gap) >= 0.0,
            "gap of {} leaves no room between margins in a sky of {}",
            self.initial_gap,
            self.sky_height()
        );
        ensure!(
            self.min_rotation <= self.max_rotation && self.rotation_velocity_scale > 0.0,
            "rotation clamp {}..={} over scale {} is invalid",
            self.min_rotation,
            self.max_rotation,
            self.rotation_velocity_scale
        );
        ensure!(
            self.idle_bob_period_ms > 0.0,
            "idle bob period must be positive"
        );
        ensure!(
            self.body_height < self.min_gap,
            "body height {} cannot pass through the narrowest gap {}",
            self.body_height,
            self.min_gap
        );
        Ok(())
    }

    /// Load and validate a tuning file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning from {}", path.display()))?;
        let tuning: Tuning = serde_json::from_str(&json)
            .with_context(|| format!("parsing tuning in {}", path.display()))?;
        tuning
            .validate()
            .with_context(|| format!("invalid tuning in {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}
