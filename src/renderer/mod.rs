//! Rendering projection
//!
//! Turns a run snapshot into flat colored quads. The web entry paints them on
//! a 2D canvas; nothing here touches the simulation.

pub mod shapes;

pub use shapes::{Quad, colors, css_color, project};
