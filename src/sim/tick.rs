//! Per-frame simulation step
//!
//! Core game loop that advances a run deterministically and owns the single
//! `Playing -> Over` transition.

use super::collision::{Verdict, detect};
use super::physics::{idle_bob, integrate};
use super::scoring::award_passes;
use super::spawn::{maybe_spawn, prune, scroll};
use super::state::{Phase, Run};
use crate::submit::ScoreSink;

/// Input commands for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space) since the previous step
    pub flap: bool,
}

/// Things that happened during a step, in order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// First flap; the run left the ready state
    Started,
    Flapped,
    Spawned { id: u32 },
    Scored { id: u32, score: u32 },
    DifficultyRaised { speed: f32, gap: f32 },
    /// Emitted only after the score has gone to the sink
    GameOver { score: u32, verdict: Verdict },
}

/// Advance the run by `dt` seconds.
///
/// Does nothing once the run is over. While playing the order is: input,
/// integrate, spawn, scroll, prune, collide, score. A terminal collision ends
/// the step before scoring, so a killing frame never also awards a pass.
pub fn tick<S: ScoreSink + ?Sized>(
    run: &mut Run,
    input: &TickInput,
    dt: f32,
    sink: &mut S,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match run.phase {
        Phase::Over => return events,
        Phase::Ready => {
            if !input.flap {
                run.time_ticks += 1;
                run.idle_time += dt;
                idle_bob(&mut run.body, &run.tuning, run.idle_time);
                return events;
            }
            run.flap();
            events.push(GameEvent::Started);
        }
        Phase::Playing => {
            if input.flap {
                run.flap();
                events.push(GameEvent::Flapped);
            }
        }
    }

    run.time_ticks += 1;

    integrate(&mut run.body, &run.tuning, dt);

    if let Some(id) = maybe_spawn(run) {
        events.push(GameEvent::Spawned { id });
    }
    scroll(&mut run.obstacles, run.speed * dt);
    prune(&mut run.obstacles);

    let verdict = detect(&run.body, &run.obstacles, &run.tuning);
    if verdict.is_terminal() {
        if let Some(score) = end_run(run, verdict, sink) {
            events.push(GameEvent::GameOver { score, verdict });
        }
        return events;
    }

    for pass in award_passes(run) {
        events.push(GameEvent::Scored {
            id: pass.obstacle_id,
            score: pass.score,
        });
        if let Some((speed, gap)) = pass.difficulty {
            events.push(GameEvent::DifficultyRaised { speed, gap });
        }
    }

    events
}

/// Guarded terminal transition.
///
/// Freezes the score, flips the phase and calls the sink, all under the
/// run's own one-shot flag. Returns `None` if the run had already ended.
pub fn end_run<S: ScoreSink + ?Sized>(
    run: &mut Run,
    verdict: Verdict,
    sink: &mut S,
) -> Option<u32> {
    if run.final_score.is_some() {
        return None;
    }
    let score = run.score;
    run.final_score = Some(score);
    run.phase = Phase::Over;

    log::info!("Run {} over ({:?}) with score {}", run.seed, verdict, score);
    sink.submit(score);
    Some(score)
}
