//! Collision and boundary detection
//!
//! Everything is axis-aligned: the body is a box, each obstacle is two solid
//! boxes above and below its gap.

use glam::Vec2;

use super::state::{Body, Obstacle};
use crate::tuning::Tuning;

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clear,
    Floor,
    Ceiling,
    Obstacle { id: u32 },
}

impl Verdict {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Clear)
    }
}

/// Open-interval overlap of two boxes given by min/max corners
#[inline]
pub fn boxes_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Floor / ceiling breach
pub fn boundary_verdict(body: &Body, tuning: &Tuning) -> Verdict {
    if body.bottom() > tuning.sky_height() {
        Verdict::Floor
    } else if body.y < 0.0 {
        Verdict::Ceiling
    } else {
        Verdict::Clear
    }
}

/// True if the body touches either solid segment of the obstacle.
///
/// A body fully inside `[gap_top, gap_bottom]` never hits, whatever its
/// horizontal overlap.
pub fn hits_obstacle(body: &Body, obstacle: &Obstacle) -> bool {
    let min = body.min();
    let max = body.max();
    // Segments extend past the world vertically; only the gap edges matter.
    let upper_min = Vec2::new(obstacle.x, f32::NEG_INFINITY);
    let upper_max = Vec2::new(obstacle.right(), obstacle.gap_top);
    let lower_min = Vec2::new(obstacle.x, obstacle.gap_bottom());
    let lower_max = Vec2::new(obstacle.right(), f32::INFINITY);

    boxes_overlap(min, max, upper_min, upper_max) || boxes_overlap(min, max, lower_min, lower_max)
}

/// Full per-step check. Boundaries first, then obstacles in spawn order;
/// the first breach found is reported.
pub fn detect(body: &Body, obstacles: &[Obstacle], tuning: &Tuning) -> Verdict {
    let boundary = boundary_verdict(body, tuning);
    if boundary.is_terminal() {
        return boundary;
    }
    obstacles
        .iter()
        .find(|o| hits_obstacle(body, o))
        .map(|o| Verdict::Obstacle { id: o.id })
        .unwrap_or(Verdict::Clear)
}
