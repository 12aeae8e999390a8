//! Whole-run properties driven through the public API

use flappy_royale::Tuning;
use flappy_royale::sim::{
    GameEvent, Obstacle, Phase, Run, TickInput, Verdict, hits_obstacle, tick,
};
use flappy_royale::tournament::{DailyBest, Recorded};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Keeps the body near the next gap so runs last long enough to score
fn steer(run: &Run) -> bool {
    let body = &run.body;
    let target = run
        .obstacles
        .iter()
        .find(|o| o.right() > body.x)
        .map(|o| o.gap_bottom() - body.height - 10.0)
        .unwrap_or(run.tuning.rest_y() + 40.0);
    body.velocity >= 0.0 && body.y > target
}

#[test]
fn steered_run_scores_and_ramps_difficulty() {
    let mut run = Run::new(2024, Tuning::default());
    let mut submitted = Vec::new();
    let mut sink = |score: u32| submitted.push(score);

    tick(&mut run, &TickInput { flap: true }, DT, &mut sink);
    let mut raises = Vec::new();
    for _ in 0..20_000 {
        let input = TickInput { flap: steer(&run) };
        for event in tick(&mut run, &input, DT, &mut sink) {
            if let GameEvent::DifficultyRaised { speed, gap } = event {
                raises.push((run.score(), speed, gap));
            }
        }
        if run.is_over() || run.score() >= 12 {
            break;
        }
    }

    assert!(run.score() >= 10, "autopilot scored only {}", run.score());
    assert_eq!(raises[0], (5, 128.0, 97.0));
    assert_eq!(raises[1], (10, 136.0, 90.0));
    drop(sink);
    assert!(submitted.len() <= 1);
}

#[test]
fn unattended_run_falls_to_the_floor() {
    let mut run = Run::new(5, Tuning::default());
    let mut submitted = Vec::new();
    let mut sink = |score: u32| submitted.push(score);

    tick(&mut run, &TickInput { flap: true }, DT, &mut sink);
    let mut verdict = None;
    for _ in 0..600 {
        for event in tick(&mut run, &TickInput::default(), DT, &mut sink) {
            if let GameEvent::GameOver { verdict: v, .. } = event {
                verdict = Some(v);
            }
        }
    }
    assert_eq!(verdict, Some(Verdict::Floor));
    assert_eq!(run.phase(), Phase::Over);
    drop(sink);
    assert_eq!(submitted, vec![0]);
}

#[test]
fn submitted_score_lands_on_daily_board() {
    let mut board = DailyBest::new();
    let mut outcomes = Vec::new();

    // Unattended run ends at zero, which never beats the implicit best of 0
    let mut run = Run::new(1, Tuning::default());
    let mut sink = |score: u32| outcomes.push(board.record("2024-03-09", "ana", score));
    tick(&mut run, &TickInput { flap: true }, DT, &mut sink);
    while !run.is_over() {
        tick(&mut run, &TickInput::default(), DT, &mut sink);
    }
    drop(sink);
    assert_eq!(outcomes, vec![Recorded::NotHigher { best: 0 }]);
    assert_eq!(board.best("2024-03-09", "ana"), None);
    assert!(board.leader("2024-03-09").is_none());

    // Steered run scores, then stops flapping and falls
    let mut run = Run::new(2024, Tuning::default());
    let mut sink = |score: u32| outcomes.push(board.record("2024-03-09", "ana", score));
    tick(&mut run, &TickInput { flap: true }, DT, &mut sink);
    while !run.is_over() {
        let input = TickInput {
            flap: run.score() < 2 && steer(&run),
        };
        tick(&mut run, &input, DT, &mut sink);
    }
    drop(sink);
    let final_score = run.final_score().unwrap_or_default();
    assert!(final_score >= 2, "steered run scored only {}", final_score);
    assert_eq!(outcomes[1], Recorded::NewBest);
    assert_eq!(board.best("2024-03-09", "ana"), Some(final_score));
    assert_eq!(
        board.leader("2024-03-09").map(|e| e.score),
        Some(final_score)
    );
}

proptest! {
    #[test]
    fn score_and_difficulty_are_monotonic(
        seed in any::<u64>(),
        flaps in prop::collection::vec(any::<bool>(), 1..1500),
        dt in 0.0f32..0.1,
    ) {
        let mut run = Run::new(seed, Tuning::default());
        let mut submitted = Vec::new();
        let mut sink = |score: u32| submitted.push(score);
        let tuning = run.tuning.clone();

        let (mut score, mut speed, mut gap) = (run.score(), run.speed(), run.gap());
        for (i, &flap) in flaps.iter().enumerate() {
            // Mix random input with steering so some runs get far
            let flap = if i % 3 == 0 { flap } else { steer(&run) };
            tick(&mut run, &TickInput { flap }, dt, &mut sink);

            prop_assert!(run.score() >= score);
            prop_assert!(run.score() - score <= run.obstacles.len() as u32 + 1);
            prop_assert!(run.speed() >= speed && run.speed() <= tuning.max_speed);
            prop_assert!(run.gap() <= gap && run.gap() >= tuning.min_gap);
            if run.speed() != speed || run.gap() != gap {
                prop_assert_eq!(run.score() % tuning.difficulty_interval, 0);
            }
            for o in &run.obstacles {
                prop_assert!(o.gap_top >= tuning.gap_margin_top);
                prop_assert!(o.gap_bottom() <= tuning.sky_height() - tuning.gap_margin_bottom);
            }
            score = run.score();
            speed = run.speed();
            gap = run.gap();
        }

        let over = run.is_over();
        let final_score = run.final_score();
        drop(sink);
        if over {
            prop_assert_eq!(submitted.len(), 1);
            prop_assert_eq!(Some(submitted[0]), final_score);
        } else {
            prop_assert!(submitted.is_empty());
        }
    }

    #[test]
    fn obstacles_score_at_most_once(seed in any::<u64>(), steps in 1usize..3000) {
        let mut run = Run::new(seed, Tuning::default());
        let mut sink = |_score: u32| {};
        let mut scored_ids = Vec::new();

        tick(&mut run, &TickInput { flap: true }, DT, &mut sink);
        for _ in 0..steps {
            let input = TickInput { flap: steer(&run) };
            for event in tick(&mut run, &input, DT, &mut sink) {
                if let GameEvent::Scored { id, .. } = event {
                    prop_assert!(!scored_ids.contains(&id));
                    scored_ids.push(id);
                }
            }
        }
        prop_assert_eq!(scored_ids.len() as u32, run.score());
    }

    #[test]
    fn collision_is_conservative(
        gap_top in 100.0f32..200.0,
        gap in 60.0f32..120.0,
        offset in -60.0f32..60.0,
        x in 10.0f32..90.0,
    ) {
        let tuning = Tuning::default();
        let mut run = Run::new(0, tuning);
        run.body.y = gap_top + offset;
        let obstacle = Obstacle { id: 1, x, gap_top, gap, width: 52.0, scored: false };

        // x range guarantees horizontal overlap with the body at 60..94
        let inside = run.body.y >= gap_top && run.body.bottom() <= gap_top + gap;
        prop_assert_eq!(hits_obstacle(&run.body, &obstacle), !inside);
    }
}
