//! Quad generation for the world's primitives

use glam::Vec2;

use crate::sim::{Body, Obstacle, Phase, Snapshot};
use crate::tuning::Tuning;

/// An axis-aligned rectangle, optionally rotated about its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Top-left corner (before rotation)
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
    /// Radians, about the center
    pub rotation: f32,
}

impl Quad {
    pub const fn new(pos: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            pos,
            size,
            color,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const FLOOR: [f32; 4] = [0.87, 0.84, 0.58, 1.0];
    pub const FLOOR_EDGE: [f32; 4] = [0.33, 0.66, 0.22, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const OBSTACLE_LIP: [f32; 4] = [0.29, 0.48, 0.1, 1.0];
    pub const BODY: [f32; 4] = [0.96, 0.78, 0.26, 1.0];
    pub const BODY_DEAD: [f32; 4] = [0.7, 0.55, 0.2, 1.0];
}

/// CSS `rgba()` string for a canvas fill style
pub fn css_color(c: [f32; 4]) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

/// Height of the darker lip drawn at each gap edge
const LIP_HEIGHT: f32 = 6.0;

/// Upper and lower segment, each with a lip at the gap edge
pub fn obstacle(o: &Obstacle, segment_height: f32) -> [Quad; 4] {
    let width = o.width;
    let upper_top = o.gap_top - segment_height;
    [
        Quad::new(
            Vec2::new(o.x, upper_top),
            Vec2::new(width, segment_height),
            colors::OBSTACLE,
        ),
        Quad::new(
            Vec2::new(o.x, o.gap_top - LIP_HEIGHT),
            Vec2::new(width, LIP_HEIGHT),
            colors::OBSTACLE_LIP,
        ),
        Quad::new(
            Vec2::new(o.x, o.gap_bottom()),
            Vec2::new(width, segment_height),
            colors::OBSTACLE,
        ),
        Quad::new(
            Vec2::new(o.x, o.gap_bottom()),
            Vec2::new(width, LIP_HEIGHT),
            colors::OBSTACLE_LIP,
        ),
    ]
}

pub fn body(b: &Body, phase: Phase) -> Quad {
    let color = if phase == Phase::Over {
        colors::BODY_DEAD
    } else {
        colors::BODY
    };
    Quad {
        rotation: b.rotation,
        ..Quad::new(b.min(), Vec2::new(b.width, b.height), color)
    }
}

/// Whole frame, back to front: sky, obstacles, floor, body
pub fn project(snapshot: &Snapshot, tuning: &Tuning) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(4 + snapshot.obstacles.len() * 4);
    let sky = tuning.sky_height();

    quads.push(Quad::new(
        Vec2::ZERO,
        Vec2::new(tuning.world_width, sky),
        colors::SKY,
    ));
    for o in &snapshot.obstacles {
        quads.extend(obstacle(o, tuning.obstacle_segment_height));
    }
    quads.push(Quad::new(
        Vec2::new(0.0, sky),
        Vec2::new(tuning.world_width, tuning.floor_height),
        colors::FLOOR,
    ));
    quads.push(Quad::new(
        Vec2::new(0.0, sky),
        Vec2::new(tuning.world_width, 4.0),
        colors::FLOOR_EDGE,
    ));
    quads.push(body(&snapshot.body, snapshot.phase));

    quads
}
