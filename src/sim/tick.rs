//! Per-frame simulation step
//!
//! [`tick`] advances the whole table by one external frame, split into
//! speed-dependent sub-steps so a fast ball cannot tunnel through thin
//! geometry. Within a sub-step the order is fixed: actuators, forces,
//! integration, then resolution against walls, flippers, bumpers and
//! targets.

use super::collision::{circle_circle_contact, circle_segment_contact, resolve_contact};
use super::state::{GamePhase, GameState};
use super::table::{LEFT_FLIPPER, RIGHT_FLIPPER};
use crate::consts::*;
use crate::upward_perpendicular;

/// Held input flags for a single tick, sampled once by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left_flipper: bool,
    pub right_flipper: bool,
    pub plunger: bool,
}

/// Pick a sub-step count from ball speed: one step when slow, one more per
/// `SUBSTEP_SPEED_STEP` of speed, capped at `MAX_SUBSTEPS`.
pub fn substep_count(speed: f32) -> u32 {
    (1 + (speed / SUBSTEP_SPEED_STEP) as u32).min(MAX_SUBSTEPS)
}

/// Advance the simulation by one frame of `dt` seconds. The host clamps dt
/// before calling; it is clamped again here as a backstop against stalls.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver || !state.ball.in_play {
        return;
    }
    state.time_ticks += 1;

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let substeps = substep_count(state.ball.vel.length());
    let h = dt / substeps as f32;

    for _ in 0..substeps {
        if !step(state, input, h) {
            break;
        }
    }
}

/// One sub-step of size `h`. Returns false when the tick must end early
/// (ball lost or game over).
fn step(state: &mut GameState, input: &TickInput, h: f32) -> bool {
    // Actuators first, so collision shapes and the spring-hold are current
    state
        .table
        .plunger
        .advance(&mut state.ball, input.plunger, h);
    state.table.flippers[LEFT_FLIPPER].advance(input.left_flipper, h);
    state.table.flippers[RIGHT_FLIPPER].advance(input.right_flipper, h);

    // Timers
    for target in &mut state.table.targets {
        target.cool(h);
    }
    state.ball.grace = (state.ball.grace - h).max(0.0);

    // Forces, clamp, integrate
    let ball = &mut state.ball;
    ball.vel.y += GRAVITY * h;
    ball.vel *= 1.0 - (LINEAR_DAMPING * h).min(1.0);
    ball.clamp_speed();
    ball.pos += ball.vel * h;

    // Walls and flippers twice: the second pass catches the deep
    // penetrations the first pass can leave in wedge corners
    resolve_walls_and_flippers(state);
    resolve_walls_and_flippers(state);
    resolve_bumpers(state);
    resolve_targets(state);

    // Resolution impulses (kick, bat) must not carry past the speed bound
    state.ball.clamp_speed();

    // Drain check: bottom edge past the threshold loses the ball
    if state.ball.pos.y + state.ball.radius > DRAIN_Y {
        state.on_ball_drained();
        return false;
    }
    true
}

/// Resolve wall contacts in declaration order, then both flippers
fn resolve_walls_and_flippers(state: &mut GameState) {
    let ball = &mut state.ball;

    for wall in &state.table.walls {
        if let Some(contact) =
            circle_segment_contact(ball.pos, ball.radius, wall.a, wall.b, wall.extra)
        {
            resolve_contact(&mut ball.pos, &mut ball.vel, &contact, wall.restitution);
        }
    }

    for flipper in &state.table.flippers {
        let tip = flipper.tip();
        if let Some(contact) = circle_segment_contact(
            ball.pos,
            ball.radius,
            flipper.pivot,
            tip,
            FLIPPER_EXTRA_RADIUS,
        ) {
            resolve_contact(&mut ball.pos, &mut ball.vel, &contact, FLIPPER_RESTITUTION);
            if flipper.swinging_up {
                // Guaranteed "bat" kick along the arm's upward perpendicular,
                // independent of how glancing the geometric contact was
                ball.vel += upward_perpendicular(flipper.arm_dir()) * flipper.bat_impulse;
            }
        }
    }
}

fn resolve_bumpers(state: &mut GameState) {
    let ball = &mut state.ball;
    for bumper in &state.table.bumpers {
        if let Some(contact) =
            circle_circle_contact(ball.pos, ball.radius, bumper.pos, bumper.radius)
        {
            resolve_contact(&mut ball.pos, &mut ball.vel, &contact, BUMPER_RESTITUTION);
            // Kicker: fixed outward impulse and points on every contact
            ball.vel += contact.normal * bumper.kick;
            state.score += bumper.score;
        }
    }
}

fn resolve_targets(state: &mut GameState) {
    let ball = &mut state.ball;
    for target in &mut state.table.targets {
        if let Some(contact) =
            circle_circle_contact(ball.pos, ball.radius, target.pos, target.radius)
        {
            resolve_contact(&mut ball.pos, &mut ball.vel, &contact, TARGET_RESTITUTION);
            // Only an armed target pays out; the flash window rate-limits
            // sustained overlap to one award per decay
            if target.armed() {
                state.score += target.score;
                target.flash = TARGET_FLASH;
            }
        }
    }
}
