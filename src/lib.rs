//! Silverball - a 2D pinball table simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, game state)
//!
//! The crate is purely in-memory and display-agnostic. A host samples input
//! once per frame, calls [`sim::tick`] with the elapsed time, and reads the
//! state back out for rendering. World coordinates follow the canvas
//! convention: +Y points down the table, so gravity is +Y and the plunger
//! launches toward -Y.

pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in world units
    pub const TABLE_WIDTH: f32 = 420.0;
    pub const TABLE_HEIGHT: f32 = 640.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Maximum ball speed (units/s)
    pub const BALL_MAX_SPEED: f32 = 1100.0;
    /// Post-launch window (seconds) during which the plunger spring-hold
    /// will not re-capture the ball
    pub const LAUNCH_GRACE: f32 = 0.75;

    /// Gravity down the table (units/s², shallow-slope equivalent)
    pub const GRAVITY: f32 = 650.0;
    /// Fraction of velocity shed per second (rolling/air losses)
    pub const LINEAR_DAMPING: f32 = 0.12;

    /// Upper clamp on an external frame dt before sub-stepping
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Sub-step cap at high ball speed
    pub const MAX_SUBSTEPS: u32 = 4;
    /// One extra sub-step per this much ball speed
    pub const SUBSTEP_SPEED_STEP: f32 = 280.0;

    /// Extra capsule radius walls carry on top of the ball's
    pub const WALL_EXTRA_RADIUS: f32 = 3.0;
    pub const WALL_RESTITUTION: f32 = 0.72;

    /// Flipper defaults
    pub const FLIPPER_LENGTH: f32 = 64.0;
    pub const FLIPPER_EXTRA_RADIUS: f32 = 9.0;
    pub const FLIPPER_ANGULAR_SPEED: f32 = 14.0; // radians/s
    pub const FLIPPER_RESTITUTION: f32 = 0.45;
    /// Fixed kick applied whenever an upswinging flipper touches the ball
    pub const FLIPPER_BAT_IMPULSE: f32 = 420.0;

    /// Bumper / target response
    pub const BUMPER_RESTITUTION: f32 = 0.95;
    pub const TARGET_RESTITUTION: f32 = 0.55;
    /// Target hit-flash duration (seconds); doubles as the re-score cooldown
    pub const TARGET_FLASH: f32 = 0.35;

    /// Plunger tuning
    pub const PLUNGER_CHARGE_RATE: f32 = 0.9; // full charge in ~1.1s
    pub const PLUNGER_IMPULSE_MIN: f32 = 260.0;
    pub const PLUNGER_IMPULSE_MAX: f32 = 980.0;
    /// Releases are floored here so a tap still produces a real launch
    pub const PLUNGER_LAUNCH_FLOOR: f32 = 430.0;
    pub const PLUNGER_MAX_PULL: f32 = 46.0;
    /// Gap kept between ball and tube floor while held or on release;
    /// larger than `WALL_EXTRA_RADIUS` so the hold never touches the floor
    pub const PLUNGER_FLOOR_INSET: f32 = 4.0;

    /// Plunger lane geometry
    pub const LANE_WALL_X: f32 = 388.0;
    pub const LANE_TOP_Y: f32 = 140.0;
    pub const TUBE_FLOOR_Y: f32 = 632.0;
    pub const PLUNGER_REST_Y: f32 = 574.0;

    /// Ball-loss threshold below the playfield bottom
    pub const DRAIN_Y: f32 = TABLE_HEIGHT + 12.0;

    /// Balls per game
    pub const STARTING_BALLS: u8 = 3;
}

/// Linear interpolation between a and b by t in [0,1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Perpendicular of a unit direction, picked to point up the table (-Y)
#[inline]
pub fn upward_perpendicular(dir: Vec2) -> Vec2 {
    let perp = Vec2::new(-dir.y, dir.x);
    if perp.y <= 0.0 { perp } else { -perp }
}
