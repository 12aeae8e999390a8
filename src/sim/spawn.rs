//! Obstacle generation
//!
//! Obstacles spawn on a fixed horizontal cadence rather than a timer, so
//! raising the scroll speed also shortens the real time between them.

use rand::Rng;

use super::state::{Obstacle, Run};
use crate::tuning::Tuning;

/// Whether a new obstacle is due, given the newest obstacle's left edge
#[inline]
pub fn spawn_due(tuning: &Tuning, last_x: Option<f32>) -> bool {
    match last_x {
        None => true,
        Some(x) => x < tuning.world_width - tuning.spawn_interval,
    }
}

/// Pick the top of a gap of height `gap`.
///
/// Drawn from `[margin_top, sky - gap - margin_bottom]`, floored to whole
/// pixels. A negative span is a tuning error caught by `Tuning::validate`;
/// here it collapses to the top margin.
pub fn place_gap<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, gap: f32) -> f32 {
    let span = tuning.gap_placement_span(gap).max(0.0);
    let u: f32 = rng.random();
    (u * span).floor() + tuning.gap_margin_top
}

/// Spawn an obstacle just off the right edge if the cadence allows.
///
/// Returns the new obstacle's ID.
pub fn maybe_spawn(run: &mut Run) -> Option<u32> {
    let last_x = run.obstacles.last().map(|o| o.x);
    if !spawn_due(&run.tuning, last_x) {
        return None;
    }

    let gap = run.gap;
    let gap_top = place_gap(&mut run.rng, &run.tuning, gap);
    let id = run.next_entity_id();
    run.obstacles.push(Obstacle {
        id,
        x: run.tuning.world_width,
        gap_top,
        gap,
        width: run.tuning.obstacle_width,
        scored: false,
    });
    log::debug!("Spawned obstacle {} gap {}..{}", id, gap_top, gap_top + gap);
    Some(id)
}

/// Move every obstacle left by `distance`
pub fn scroll(obstacles: &mut [Obstacle], distance: f32) {
    for obstacle in obstacles {
        obstacle.x -= distance;
    }
}

/// Drop obstacles whose right edge has left the screen
pub fn prune(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|o| o.right() > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        assert!(spawn_due(&tuning, None));
        // 384 - 200 = 184
        assert!(!spawn_due(&tuning, Some(184.0)));
        assert!(spawn_due(&tuning, Some(183.9)));
    }

    #[test]
    fn test_gap_respects_margins() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for gap in [tuning.initial_gap, tuning.min_gap] {
            for _ in 0..2_000 {
                let top = place_gap(&mut rng, &tuning, gap);
                assert!(top >= tuning.gap_margin_top);
                assert!(top + gap <= tuning.sky_height() - tuning.gap_margin_bottom);
                assert_eq!(top, top.floor());
            }
        }
    }

    #[test]
    fn test_degenerate_span_pins_to_top_margin() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(place_gap(&mut rng, &tuning, 500.0), tuning.gap_margin_top);
    }

    #[test]
    fn test_maybe_spawn_places_offscreen_right() {
        let mut run = Run::new(11, Tuning::default());
        let id = maybe_spawn(&mut run).unwrap();
        assert_eq!(run.obstacles.len(), 1);
        let o = &run.obstacles[0];
        assert_eq!(o.id, id);
        assert_eq!(o.x, run.tuning.world_width);
        assert_eq!(o.gap, run.tuning.initial_gap);
        assert!(!o.scored);

        // Too close to the first one
        assert!(maybe_spawn(&mut run).is_none());
        scroll(&mut run.obstacles, 201.0);
        assert!(maybe_spawn(&mut run).is_some());
        assert_eq!(run.obstacles.len(), 2);
    }

    #[test]
    fn test_prune_keeps_partially_visible() {
        let mut run = Run::new(11, Tuning::default());
        maybe_spawn(&mut run);
        let width = run.tuning.obstacle_width;
        run.obstacles[0].x = -width + 0.5;
        prune(&mut run.obstacles);
        assert_eq!(run.obstacles.len(), 1);

        run.obstacles[0].x = -width;
        prune(&mut run.obstacles);
        assert!(run.obstacles.is_empty());
    }
}
