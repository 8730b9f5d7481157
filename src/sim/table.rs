//! Table layout
//!
//! The playfield is hand-authored from constants and rebuilt wholesale on
//! every reset. Fixtures live in flat, declaration-ordered collections;
//! wall order is part of the behavior because contacts resolve in it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bumper, Flipper, LaneRect, Plunger, Target, Wall};
use crate::consts::*;

/// Index of the left flipper in [`Table::flippers`]
pub const LEFT_FLIPPER: usize = 0;
/// Index of the right flipper in [`Table::flippers`]
pub const RIGHT_FLIPPER: usize = 1;

/// Per-round aggregate of every fixture plus the two actuators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub walls: Vec<Wall>,
    pub bumpers: Vec<Bumper>,
    pub targets: Vec<Target>,
    /// `[LEFT_FLIPPER, RIGHT_FLIPPER]`
    pub flippers: [Flipper; 2],
    pub plunger: Plunger,
}

impl Table {
    /// Construct the fixed layout. Pure; every coordinate is a constant.
    pub fn build() -> Self {
        let w = TABLE_WIDTH;
        let h = TABLE_HEIGHT;

        let walls = vec![
            // Playfield boundary (the bottom stays open - that is the drain)
            Wall::new(Vec2::new(0.0, 0.0), Vec2::new(w, 0.0)),
            Wall::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, h)),
            Wall::new(Vec2::new(w, 0.0), Vec2::new(w, h)),
            // Deflector: arcs a launched ball out of the lane, leftward
            Wall::new(Vec2::new(326.0, 4.0), Vec2::new(416.0, 86.0)),
            // Plunger lane wall; the lane is open above LANE_TOP_Y
            Wall::new(
                Vec2::new(LANE_WALL_X, LANE_TOP_Y),
                Vec2::new(LANE_WALL_X, TUBE_FLOOR_Y),
            ),
            // Tube floor the ball rests on between launches
            Wall::new(Vec2::new(LANE_WALL_X, TUBE_FLOOR_Y), Vec2::new(w, TUBE_FLOOR_Y)),
            // Inlane guides funnel everything toward the flippers
            Wall::new(Vec2::new(4.0, 478.0), Vec2::new(126.0, 562.0)),
            Wall::new(Vec2::new(LANE_WALL_X, 478.0), Vec2::new(294.0, 562.0)),
        ];

        let bumpers = vec![
            Bumper {
                pos: Vec2::new(140.0, 170.0),
                radius: 24.0,
                kick: 350.0,
                score: 150,
            },
            Bumper {
                pos: Vec2::new(250.0, 130.0),
                radius: 24.0,
                kick: 350.0,
                score: 150,
            },
            Bumper {
                pos: Vec2::new(310.0, 210.0),
                radius: 24.0,
                kick: 350.0,
                score: 150,
            },
        ];

        let targets = vec![
            Target::new(Vec2::new(52.0, 300.0), 13.0, 300),
            Target::new(Vec2::new(336.0, 330.0), 13.0, 300),
            // Top-lane target pays more; it takes a full-power shot to reach
            Target::new(Vec2::new(194.0, 92.0), 13.0, 500),
        ];

        let flippers = [
            Flipper::new(Vec2::new(132.0, 568.0), 0.45, -0.62),
            Flipper::new(
                Vec2::new(288.0, 568.0),
                std::f32::consts::PI - 0.45,
                std::f32::consts::PI + 0.62,
            ),
        ];

        let lane = LaneRect {
            min: Vec2::new(LANE_WALL_X, LANE_TOP_Y),
            max: Vec2::new(w, h),
        };
        let plunger = Plunger::new(lane, PLUNGER_REST_Y, TUBE_FLOOR_Y);

        Self {
            walls,
            bumpers,
            targets,
            flippers,
            plunger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_degenerate_walls() {
        let table = Table::build();
        for wall in &table.walls {
            assert!(wall.a.distance_squared(wall.b) > 1.0);
        }
    }

    #[test]
    fn test_fixtures_inside_playfield() {
        let table = Table::build();
        for bumper in &table.bumpers {
            assert!(bumper.pos.x - bumper.radius > 0.0);
            assert!(bumper.pos.x + bumper.radius < LANE_WALL_X);
            assert!(bumper.pos.y - bumper.radius > 0.0);
        }
        for target in &table.targets {
            assert!(target.pos.x - target.radius > 0.0);
            assert!(target.pos.x + target.radius < LANE_WALL_X);
            assert!(target.pos.y - target.radius > 0.0);
        }
    }

    #[test]
    fn test_flippers_start_at_rest() {
        let table = Table::build();
        for flipper in &table.flippers {
            assert_eq!(flipper.angle, flipper.rest_angle);
            assert!(!flipper.swinging_up);
        }
        // Left arm points right, right arm points left, leaving a drain gap
        let left_tip = table.flippers[LEFT_FLIPPER].tip();
        let right_tip = table.flippers[RIGHT_FLIPPER].tip();
        assert!(left_tip.x > table.flippers[LEFT_FLIPPER].pivot.x);
        assert!(right_tip.x < table.flippers[RIGHT_FLIPPER].pivot.x);
        assert!(right_tip.x - left_tip.x > 2.0 * BALL_RADIUS);
    }

    #[test]
    fn test_ball_spawn_sits_in_lane() {
        let table = Table::build();
        let rest = table.plunger.rest_pos();
        assert!(table.plunger.lane.contains(rest));
        // Clear of the lane walls on both sides
        assert!(rest.x - BALL_RADIUS - WALL_EXTRA_RADIUS > LANE_WALL_X);
        assert!(rest.x + BALL_RADIUS + WALL_EXTRA_RADIUS < TABLE_WIDTH);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = Table::build();
        let b = Table::build();
        assert_eq!(a.walls.len(), b.walls.len());
        for (wa, wb) in a.walls.iter().zip(&b.walls) {
            assert_eq!(wa.a, wb.a);
            assert_eq!(wa.b, wb.b);
        }
        for (ba, bb) in a.bumpers.iter().zip(&b.bumpers) {
            assert_eq!(ba.pos, bb.pos);
        }
    }
}
