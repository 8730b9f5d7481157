//! Game state and core simulation types
//!
//! Every physics entity is a plain value aggregate mutated in place and
//! stored flat on the [`Table`](super::table::Table). Anything that defines
//! the simulation is serializable for state snapshots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::table::Table;
use crate::consts::*;
use crate::lerp;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active play, including the ball waiting in the plunger lane
    Playing,
    /// Out of balls; no physics runs until an explicit restart
    GameOver,
}

/// The single moving body on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub in_play: bool,
    /// Seconds left of the post-launch window (see `Plunger::advance`)
    pub grace: f32,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            in_play: true,
            grace: 0.0,
        }
    }

    /// Cap speed at `BALL_MAX_SPEED`, preserving direction
    pub fn clamp_speed(&mut self) {
        let speed_sq = self.vel.length_squared();
        if speed_sq > BALL_MAX_SPEED * BALL_MAX_SPEED {
            self.vel = self.vel / speed_sq.sqrt() * BALL_MAX_SPEED;
        }
    }
}

/// A static wall segment, collided as a capsule of radius
/// `extra + ball.radius`. Endpoints never move once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
    /// Extra capsule radius on top of the ball's
    pub extra: f32,
    pub restitution: f32,
}

impl Wall {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            extra: WALL_EXTRA_RADIUS,
            restitution: WALL_RESTITUTION,
        }
    }
}

/// A round kicker: every contact ejects the ball and scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
    /// Velocity added along the contact normal on every hit
    pub kick: f32,
    pub score: u64,
}

/// A round standup target. Scores only when its flash cooldown has fully
/// decayed, which rate-limits sustained overlap to one award per window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    pub score: u64,
    /// Remaining hit-flash time (seconds); 0 means armed
    pub flash: f32,
}

impl Target {
    pub fn new(pos: Vec2, radius: f32, score: u64) -> Self {
        Self {
            pos,
            radius,
            score,
            flash: 0.0,
        }
    }

    /// Decay the flash timer; monotonic, floored at zero
    pub fn cool(&mut self, dt: f32) {
        self.flash = (self.flash - dt).max(0.0);
    }

    pub fn armed(&self) -> bool {
        self.flash == 0.0
    }

    /// Flash brightness in [0,1] for the renderer
    pub fn flash_intensity(&self) -> f32 {
        self.flash / TARGET_FLASH
    }
}

/// An angular-kinematic flipper. The collision shape each tick is the
/// capsule from `pivot` to `tip()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub pivot: Vec2,
    pub length: f32,
    pub rest_angle: f32,
    pub up_angle: f32,
    pub angle: f32,
    pub angular_speed: f32,
    pub bat_impulse: f32,
    /// True only while held input is actually driving the angle toward up
    pub swinging_up: bool,
}

impl Flipper {
    pub fn new(pivot: Vec2, rest_angle: f32, up_angle: f32) -> Self {
        Self {
            pivot,
            length: FLIPPER_LENGTH,
            rest_angle,
            up_angle,
            angle: rest_angle,
            angular_speed: FLIPPER_ANGULAR_SPEED,
            bat_impulse: FLIPPER_BAT_IMPULSE,
            swinging_up: false,
        }
    }

    /// Unit vector along the arm, pivot to tip
    pub fn arm_dir(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Current tip point derived from the angle
    pub fn tip(&self) -> Vec2 {
        self.pivot + self.arm_dir() * self.length
    }

    /// Move the angle linearly toward `up_angle` while held, `rest_angle`
    /// otherwise, never overshooting the drive target.
    pub fn advance(&mut self, held: bool, dt: f32) {
        let target = if held { self.up_angle } else { self.rest_angle };
        let delta = target - self.angle;
        let max_delta = self.angular_speed * dt;
        if delta.abs() <= max_delta {
            self.swinging_up = held && delta != 0.0;
            self.angle = target;
        } else {
            self.swinging_up = held;
            self.angle += delta.signum() * max_delta;
        }

        let lo = self.rest_angle.min(self.up_angle);
        let hi = self.rest_angle.max(self.up_angle);
        self.angle = self.angle.clamp(lo, hi);
    }
}

/// Axis-aligned plunger lane bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaneRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl LaneRect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) * 0.5
    }
}

/// The launch mechanism: a charge/release state machine that physically
/// drags the ball down the tube while charging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plunger {
    pub lane: LaneRect,
    /// Ball resting Y when the plunger is relaxed
    pub rest_y: f32,
    /// Bottom of the launch tube
    pub tube_floor: f32,
    pub charge: f32,
    pub charge_rate: f32,
    pub impulse_min: f32,
    pub impulse_max: f32,
    pub max_pull: f32,
    /// Previous held state, for release edge detection
    held: bool,
}

impl Plunger {
    pub fn new(lane: LaneRect, rest_y: f32, tube_floor: f32) -> Self {
        Self {
            lane,
            rest_y,
            tube_floor,
            charge: 0.0,
            charge_rate: PLUNGER_CHARGE_RATE,
            impulse_min: PLUNGER_IMPULSE_MIN,
            impulse_max: PLUNGER_IMPULSE_MAX,
            max_pull: PLUNGER_MAX_PULL,
            held: false,
        }
    }

    /// Ball spawn point at the top of the relaxed plunger
    pub fn rest_pos(&self) -> Vec2 {
        Vec2::new(self.lane.center_x(), self.rest_y)
    }

    /// Where the spring-hold places the ball for the current charge, kept
    /// off the tube floor
    fn hold_y(&self, radius: f32) -> f32 {
        (self.rest_y + self.max_pull * self.charge)
            .min(self.tube_floor - radius - PLUNGER_FLOOR_INSET)
    }

    /// Advance one sub-step: charge while held, launch on the release edge.
    pub fn advance(&mut self, ball: &mut Ball, held: bool, dt: f32) {
        if held {
            self.charge = (self.charge + self.charge_rate * dt).min(1.0);
            // Spring-hold: the ball rides the spring down the tube instead
            // of free-falling. A freshly launched ball is exempt until its
            // grace window expires, so holding through the release cannot
            // immediately re-capture it.
            if ball.in_play && ball.grace == 0.0 && self.lane.contains(ball.pos) {
                ball.pos.y = self.hold_y(ball.radius);
                ball.vel = Vec2::ZERO;
            }
        } else if self.held {
            self.release(ball);
        }
        self.held = held;
    }

    /// Fire the ball up the tube. Ignored (apart from relaxing the spring)
    /// when the ball is not in the lane.
    pub fn release(&mut self, ball: &mut Ball) {
        let charge = self.charge;
        self.charge = 0.0;

        if !ball.in_play || !self.lane.contains(ball.pos) {
            return;
        }

        let impulse = lerp(self.impulse_min, self.impulse_max, charge).max(PLUNGER_LAUNCH_FLOOR);
        // Start just above the tube floor so the launch never begins inside it
        ball.pos.y = self.tube_floor - ball.radius - PLUNGER_FLOOR_INSET;
        ball.vel = Vec2::new(0.0, -impulse);
        ball.grace = LAUNCH_GRACE;
    }
}

/// Complete game state: one table, one ball, round-level counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub balls_remaining: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub table: Table,
    pub ball: Ball,
}

impl GameState {
    pub fn new() -> Self {
        let table = Table::build();
        let ball = Ball::new(table.plunger.rest_pos());
        Self {
            score: 0,
            balls_remaining: STARTING_BALLS,
            phase: GamePhase::Playing,
            time_ticks: 0,
            table,
            ball,
        }
    }

    /// Rebuild the table and respawn the ball in the plunger lane
    pub fn reset_table(&mut self) {
        self.table = Table::build();
        self.ball = Ball::new(self.table.plunger.rest_pos());
    }

    /// Start a fresh game: zero score, full ball stock, new table
    pub fn restart(&mut self) {
        self.score = 0;
        self.balls_remaining = STARTING_BALLS;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.reset_table();
        log::info!("Game restarted");
    }

    /// React to the ball crossing the drain: burn a ball, then respawn or
    /// end the game
    pub fn on_ball_drained(&mut self) {
        self.balls_remaining = self.balls_remaining.saturating_sub(1);
        if self.balls_remaining == 0 {
            self.ball.in_play = false;
            self.phase = GamePhase::GameOver;
            log::info!("Game over - final score {}", self.score);
        } else {
            self.ball = Ball::new(self.table.plunger.rest_pos());
            self.table.plunger.charge = 0.0;
            log::info!("Ball drained - {} remaining", self.balls_remaining);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
