//! Scoring and difficulty progression

use super::state::Run;

/// Outcome of a single scoring event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pass {
    pub obstacle_id: u32,
    pub score: u32,
    /// Set when this pass landed on a difficulty threshold and something changed
    pub difficulty: Option<(f32, f32)>,
}

/// Raise speed and tighten the gap one notch, clamped to the caps.
///
/// Returns the new `(speed, gap)` if either moved.
pub fn step_difficulty(run: &mut Run) -> Option<(f32, f32)> {
    let t = &run.tuning;
    let before = (run.speed, run.gap);
    if run.speed < t.max_speed {
        run.speed = (run.speed + t.speed_increment).min(t.max_speed);
    }
    if run.gap > t.min_gap {
        run.gap = (run.gap - t.gap_decrement).max(t.min_gap);
    }
    let after = (run.speed, run.gap);
    (after != before).then_some(after)
}

/// Award one point per obstacle the body has fully passed.
///
/// The threshold check runs once per point, on the post-increment score, so
/// several passes in one step can never double-apply a difficulty notch.
pub fn award_passes(run: &mut Run) -> Vec<Pass> {
    let body_x = run.body.x;
    let interval = run.tuning.difficulty_interval;
    let mut passes = Vec::new();

    for i in 0..run.obstacles.len() {
        let obstacle = &mut run.obstacles[i];
        if obstacle.scored || body_x <= obstacle.right() {
            continue;
        }
        obstacle.scored = true;
        let obstacle_id = obstacle.id;

        run.score += 1;
        let difficulty = if run.score > 0 && run.score % interval == 0 {
            step_difficulty(run)
        } else {
            None
        };
        if let Some((speed, gap)) = difficulty {
            log::debug!("Difficulty up at {}: speed {} gap {}", run.score, speed, gap);
        }

        passes.push(Pass {
            obstacle_id,
            score: run.score,
            difficulty,
        });
    }

    passes
}
