//! Silverball entry point
//!
//! Headless demo: drives a short scripted session against the simulation
//! and logs the outcome. Rendering and real input belong to a host
//! application; this binary exists to exercise the table end to end.

use silverball::sim::{GamePhase, GameState, TickInput, tick};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("Silverball table starting");

    let mut state = GameState::new();

    // Charge the plunger for a second and a half, then let it fly
    let hold = TickInput {
        plunger: true,
        ..Default::default()
    };
    for _ in 0..90 {
        tick(&mut state, &hold, FRAME_DT);
    }
    tick(&mut state, &TickInput::default(), FRAME_DT);
    log::info!("Launched at {:.0} units/s", state.ball.vel.length());

    // Play out the round: flap both flippers in bursts, re-charge whenever
    // the ball ends up back in the lane
    let mut frame = 0u32;
    while state.phase == GamePhase::Playing && frame < 60 * 60 {
        let in_lane = state.table.plunger.lane.contains(state.ball.pos);
        let flap = frame % 48 < 10;
        let input = TickInput {
            left_flipper: flap,
            right_flipper: flap,
            plunger: in_lane && frame % 120 < 90,
        };
        tick(&mut state, &input, FRAME_DT);
        frame += 1;
    }

    log::info!(
        "Session over after {} frames: score {}, balls left {}, game over: {}",
        frame,
        state.score,
        state.balls_remaining,
        state.phase == GamePhase::GameOver
    );
}
