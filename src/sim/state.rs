//! Run state and core simulation types
//!
//! Everything the stepping function reads or writes lives in [`Run`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Body bobs in place, waiting for the first flap
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; terminal
    Over,
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Horizontal position (constant for the whole run)
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
    /// Display tilt derived from velocity (radians)
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.body_x,
            y: tuning.rest_y(),
            velocity: 0.0,
            rotation: 0.0,
            width: tuning.body_width,
            height: tuning.body_height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }
}

/// A barrier pair with a passable gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge (decreases as the world scrolls)
    pub x: f32,
    /// Top of the gap
    pub gap_top: f32,
    /// Gap height, fixed at spawn time
    pub gap: f32,
    pub width: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }
}

/// Read-only view handed to the rendering collaborator once per frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub body: Body,
    pub obstacles: Vec<Obstacle>,
}

/// One play session, from reset to game over
#[derive(Debug, Clone)]
pub struct Run {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) phase: Phase,
    pub body: Body,
    /// Live obstacles in spawn order (= left-to-right order)
    pub obstacles: Vec<Obstacle>,
    pub(crate) score: u32,
    /// Current scroll speed (pixels/s)
    pub(crate) speed: f32,
    /// Gap height given to newly spawned obstacles
    pub(crate) gap: f32,
    /// Seconds spent in the ready state (drives the idle bob)
    pub idle_time: f32,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Score frozen at the terminal transition; `Some` exactly when over
    pub(crate) final_score: Option<u32>,
    next_id: u32,
}

impl Run {
    /// Create a fresh run in the ready state
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Ready,
            body: Body::new(&tuning),
            obstacles: Vec::new(),
            score: 0,
            speed: tuning.initial_speed,
            gap: tuning.initial_gap,
            idle_time: 0.0,
            time_ticks: 0,
            final_score: None,
            next_id: 1,
            tuning,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Score submitted at game over (None while the run is live)
    #[inline]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Allocate a new obstacle ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Control input. Starts the run from ready; no-op once over.
    ///
    /// Only writes the phase and the body's velocity, so it is safe to call
    /// from an input handler between frames.
    pub fn flap(&mut self) -> bool {
        match self.phase {
            Phase::Ready => {
                self.phase = Phase::Playing;
                self.body.velocity = self.tuning.flap_impulse;
                log::info!("Run {} started", self.seed);
                true
            }
            Phase::Playing => {
                self.body.velocity = self.tuning.flap_impulse;
                true
            }
            Phase::Over => false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            body: self.body.clone(),
            obstacles: self.obstacles.clone(),
        }
    }
}
