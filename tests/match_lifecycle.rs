use glam::IVec2;
use paddle_arena::driver::{IdleInput, ScriptedInput};
use paddle_arena::sim::{
    Body, GameEvent, MatchPhase, PaddleCommand, PaddleSide, Tally, TickInput, tick,
};
use paddle_arena::{Config, Driver, Frame, Game, Presenter};

/// Tick until the reset pause is over
fn wait_out_pause(game: &mut Game) {
    while game.is_paused() {
        let report = tick(game, &TickInput::default());
        assert!(report.frozen);
    }
}

/// Push the ball out through the right wall on the next tick
fn send_ball_right(game: &mut Game) {
    game.arena.ball.pos = IVec2::new(game.config.width - 2, 20);
    game.arena.ball.vel = IVec2::new(5, 3);
}

#[test]
fn test_two_player_match_to_eleven() {
    let mut game = Game::new(Config::two_player(), 77).expect("valid preset");
    let pause = game.config.pause_ticks();

    for point in 1..=10u32 {
        send_ball_right(&mut game);
        let report = tick(&mut game, &TickInput::default());

        assert!(report.events.contains(&GameEvent::PointScored {
            scorer: PaddleSide::Left,
            score: point,
        }));
        assert!(game.is_active());
        assert_eq!(game.arena.ball.center(), IVec2::new(320, 240));
        assert!(game.is_paused());

        let before = game.time_ticks;
        wait_out_pause(&mut game);
        assert_eq!(game.time_ticks - before, pause);
    }

    send_ball_right(&mut game);
    let report = tick(&mut game, &TickInput::default());
    assert_eq!(game.state().phase(), MatchPhase::GameOver);
    assert_eq!(game.state().tally(), Tally::Points { left: 11, right: 0 });
    assert_eq!(game.state().winner(), Some(PaddleSide::Left));
    assert!(report.events.contains(&GameEvent::MatchOver {
        winner: Some(PaddleSide::Left)
    }));
    // No reset on the winning point
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::RoundReset { .. })));
    assert!(game.arena.ball.rect().left() > game.config.width);
}

#[test]
fn test_squash_match_runs_out_of_lives() {
    let mut game = Game::new(Config::squash(), 3).expect("valid preset");

    for remaining in [2u32, 1] {
        game.arena.ball.pos = IVec2::new(20, 479);
        game.arena.ball.vel = IVec2::new(1, 2);
        game.arena.paddles[0].pos.x = 0;

        let report = tick(&mut game, &TickInput::default());
        assert!(report.events.contains(&GameEvent::LifeLost { remaining }));
        assert_eq!(game.state().tally(), Tally::Lives { remaining });
        assert_eq!(game.arena.ball.center(), IVec2::new(240, 240));
        assert_eq!(game.arena.paddles[0].pos, IVec2::new(190, 450));
        wait_out_pause(&mut game);
    }

    game.arena.ball.pos = IVec2::new(20, 479);
    game.arena.ball.vel = IVec2::new(1, 2);
    let report = tick(&mut game, &TickInput::default());
    assert!(report.events.contains(&GameEvent::LifeLost { remaining: 0 }));
    assert!(report
        .events
        .contains(&GameEvent::MatchOver { winner: None }));
    assert!(!game.is_active());
}

#[test]
fn test_paddle_returns_ball_in_squash() {
    let mut game = Game::new(Config::squash(), 8).expect("valid preset");
    // Falling straight onto the paddle center
    game.arena.ball.set_center(IVec2::new(240, 400));
    game.arena.ball.vel = IVec2::new(1, 2);

    let mut hit = false;
    for _ in 0..40 {
        let report = tick(&mut game, &TickInput::default());
        if report.events.contains(&GameEvent::PaddleHit {
            side: PaddleSide::Bottom,
            snapped: true,
        }) {
            hit = true;
            assert_eq!(game.arena.ball.rect().bottom(), 450);
            assert!(game.arena.ball.vel.y < 0);
            break;
        }
    }
    assert!(hit, "ball should land on the paddle");
    assert_eq!(game.state().tally(), Tally::Lives { remaining: 3 });
}

#[test]
fn test_driver_steers_paddle_from_script() {
    let game = Game::new(Config::two_player(), 10).expect("valid preset");
    let input = ScriptedInput::new()
        .at(1, TickInput::default().command(PaddleSide::Left, PaddleCommand::Up))
        .at(11, TickInput::default().command(PaddleSide::Left, PaddleCommand::Stop));

    let mut driver = Driver::new(game, input, Frames::default()).with_tick_limit(20);
    driver.run_unpaced();

    // Ten ticks at 5 px/tick upward
    let paddle = &driver.game.arena.paddles[0];
    assert_eq!(paddle.pos.y, 190 - 50);
    assert_eq!(paddle.vel, IVec2::ZERO);
    assert_eq!(driver.presenter.0.len(), 20);
}

#[test]
fn test_paddle_held_into_wall_stays_clamped() {
    let game = Game::new(Config::two_player(), 10).expect("valid preset");
    let input = ScriptedInput::new()
        .at(1, TickInput::default().command(PaddleSide::Right, PaddleCommand::Down));

    let mut driver = Driver::new(game, input, Frames::default()).with_tick_limit(100);
    driver.run_unpaced();

    for frame in &driver.presenter.0 {
        for paddle in &frame.paddles {
            assert!(paddle.rect.within(frame.width, frame.height));
        }
    }
    assert_eq!(driver.game.arena.paddles[1].rect().bottom(), 480);
}

#[test]
fn test_idle_driver_keeps_invariants() {
    let game = Game::new(Config::squash(), 123).expect("valid preset");
    let mut driver = Driver::new(game, IdleInput, Frames::default()).with_tick_limit(5_000);
    driver.run_unpaced();

    let mut lives = 3;
    for frame in &driver.presenter.0 {
        let Tally::Lives { remaining } = frame.tally else {
            panic!("squash tally expected");
        };
        assert!(remaining <= lives);
        lives = remaining;

        let ball = &frame.ball;
        // Left, right and top walls are closed
        assert!(ball.center.x - ball.radius >= 0);
        assert!(ball.center.x + ball.radius <= frame.width);
        assert!(ball.center.y - ball.radius >= 0);
    }
}

#[derive(Default)]
struct Frames(Vec<Frame>);

impl Presenter for Frames {
    fn present(&mut self, frame: &Frame) {
        self.0.push(frame.clone());
    }
}
