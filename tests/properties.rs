//! Property tests for the sandbox simulation

use color_vacuum::Settings;
use color_vacuum::sim::{Color, Rect, SimState, TickInput, mix, random_position, tick};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const EPS: f32 = 1e-3;

fn arb_color() -> impl Strategy<Value = Color> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(r, g, b)| Color::new(r, g, b))
}

/// One scripted frame: cursor, vacuum held, release pressed, flick velocity
fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        -50.0f32..1150.0,
        -50.0f32..770.0,
        any::<bool>(),
        any::<bool>(),
        prop::option::of((-400.0f32..400.0, -400.0f32..400.0)),
    )
        .prop_map(|(x, y, vacuum, release, flick)| TickInput {
            cursor: Vec2::new(x, y),
            vacuum,
            release,
            release_velocity: flick.map(|(vx, vy)| Vec2::new(vx, vy)),
        })
}

fn inside(field: &Rect, pos: Vec2, radius: f32) -> bool {
    pos.x >= field.min.x + radius - EPS
        && pos.x <= field.max.x - radius + EPS
        && pos.y >= field.min.y + radius - EPS
        && pos.y <= field.max.y - radius + EPS
}

proptest! {
    #[test]
    fn test_balls_stay_inside_field(
        seed in any::<u64>(),
        dt in 0.0f32..0.1,
        inputs in prop::collection::vec(arb_input(), 1..60),
    ) {
        let mut state = SimState::populated(seed, &Settings::default());
        for input in &inputs {
            tick(&mut state, input, dt);
            for ball in &state.balls {
                prop_assert!(
                    inside(&state.field, ball.pos, ball.radius),
                    "ball {} escaped to {:?}",
                    ball.id,
                    ball.pos
                );
            }
        }
    }

    #[test]
    fn test_total_ball_count_is_conserved(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..60),
    ) {
        let settings = Settings::default();
        let mut state = SimState::populated(seed, &settings);
        let total = state.total_balls();
        prop_assert_eq!(total, settings.initial_balls);
        for input in &inputs {
            tick(&mut state, input, 1.0 / 60.0);
            prop_assert_eq!(state.total_balls(), total);
        }
    }

    #[test]
    fn test_mix_is_symmetric(a in arb_color(), b in arb_color()) {
        prop_assert_eq!(mix(a, b), mix(b, a));
    }

    #[test]
    fn test_mix_stays_in_gamut(a in arb_color(), b in arb_color()) {
        let c = mix(a, b);
        for channel in [c.r, c.g, c.b] {
            prop_assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[test]
    fn test_respawn_avoids_delete_zone(seed in any::<u64>(), radius in 12.0f32..=24.0) {
        let state = SimState::new(seed, &Settings::default());
        let mut rng = Pcg32::seed_from_u64(seed);
        let p = random_position(&mut rng, &state.field, &state.delete_zone, radius);
        prop_assert!(!state.delete_zone.contains(p));
        prop_assert!(inside(&state.field, p, radius));
    }
}
