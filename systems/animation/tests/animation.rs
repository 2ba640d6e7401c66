use std::time::Duration;

use fogmap_core::{Cell, TokenId};
use fogmap_system_animation::{assign_target, step, Animator, StepOutcome, Token};
use glam::Vec2;

fn token(speed: f32) -> Token {
    Token::new(TokenId::new("player_1"), Cell::new(0, 0), speed)
}

#[test]
fn unit_speed_reaches_target_after_three_steps() {
    let mut token = token(1.0);
    assert!(assign_target(&mut token, Cell::new(3, 0)));

    assert_eq!(step(&mut token), StepOutcome::Advanced);
    assert_eq!(token.position(), Vec2::new(1.0, 0.0));
    assert_eq!(step(&mut token), StepOutcome::Advanced);
    assert_eq!(token.position(), Vec2::new(2.0, 0.0));
    assert_eq!(step(&mut token), StepOutcome::Arrived);
    assert_eq!(token.position(), Vec2::new(3.0, 0.0));
    assert!(!token.is_moving(), "token should be idle after arriving");

    assert_eq!(step(&mut token), StepOutcome::Idle);
    assert_eq!(token.position(), Vec2::new(3.0, 0.0));
}

#[test]
fn never_overshoots_target() {
    for speed in [0.1_f32, 0.3, 0.7, 1.0, 2.5] {
        let mut token = token(speed);
        let target = Cell::new(4, -3);
        let _ = assign_target(&mut token, target);
        let destination = target.as_vec2();

        let mut previous = token.position().distance(destination);
        let mut steps = 0;
        while token.is_moving() {
            let _ = step(&mut token);
            let remaining = token.position().distance(destination);
            assert!(
                remaining <= previous,
                "speed {speed} moved away from the target"
            );
            previous = remaining;
            steps += 1;
            assert!(steps < 1000, "speed {speed} never arrived");
        }

        assert_eq!(token.position(), destination);
        assert_eq!(token.cell(), target);
    }
}

#[test]
fn default_speed_crosses_one_cell_in_ten_steps() {
    let mut token = Token::new(TokenId::new("ally_1"), Cell::new(5, 5), 0.1);
    let _ = assign_target(&mut token, Cell::new(6, 5));

    let mut steps = 0;
    while step(&mut token) != StepOutcome::Arrived {
        steps += 1;
    }
    assert_eq!(steps + 1, 10);
    assert_eq!(token.position(), Vec2::new(6.0, 5.0));
}

#[test]
fn clock_steps_once_per_interval() {
    let interval = Duration::from_millis(16);
    let mut clock = Animator::new(interval, 8);
    let mut token = token(1.0);
    let _ = assign_target(&mut token, Cell::new(3, 0));

    for _ in 0..3 {
        let due = clock.advance(interval);
        assert_eq!(due, 1);
        for _ in 0..due {
            let _ = step(&mut token);
        }
    }

    assert_eq!(token.position(), Vec2::new(3.0, 0.0));
    assert!(!token.is_moving());
}
