//! Loading one configuration document for every game.

use portfolio_games::core::{ConfigError, GamesConfig};
use portfolio_games::puzzle::SlidingPuzzle;
use portfolio_games::snake::{Cell, Direction, SnakeGame};
use portfolio_games::tictactoe::{GameMode, Mark, TicTacToe};

const DOCUMENT: &str = r#"{
    "puzzle": { "shuffle_min": 20, "shuffle_max": 20, "leaderboard_size": 5 },
    "tictactoe": { "mode": "VsAi", "ai_mark": "X", "alpha_beta": true },
    "snake": {
        "width": 12,
        "height": 10,
        "start": { "x": 3, "y": 4 },
        "heading": "Up",
        "food_score": 5
    }
}"#;

#[test]
fn test_document_configures_every_game() {
    let config = GamesConfig::from_json_str(DOCUMENT).unwrap().with_seed(77);

    let mut puzzle = SlidingPuzzle::new(config.puzzle.clone()).unwrap();
    puzzle.shuffle();
    assert!(puzzle.board().is_solvable());
    assert_eq!(puzzle.config().leaderboard_size, 5);

    let game = TicTacToe::new(config.tictactoe.clone());
    assert_eq!(game.mode(), GameMode::VsAi);
    assert_eq!(game.board().count(Mark::X), 1);

    let snake = SnakeGame::in_memory(config.snake.clone()).unwrap();
    assert_eq!(snake.head(), Cell::new(3, 4));
    assert_eq!(snake.heading(), Direction::Up);
    assert_eq!(snake.config().food_score, 5);
    assert_eq!(snake.config().tick_interval_ms, 150);
}

#[test]
fn test_seeded_config_is_reproducible() {
    let a = GamesConfig::default().with_seed(5);
    let b = GamesConfig::default().with_seed(5);
    assert_eq!(a, b);
    assert_ne!(a.puzzle.seed, a.snake.seed);

    let mut first = SlidingPuzzle::new(a.puzzle).unwrap();
    let mut second = SlidingPuzzle::new(b.puzzle).unwrap();
    first.shuffle();
    second.shuffle();
    assert_eq!(first.cells(), second.cells());
}

#[test]
fn test_round_trip_through_json() {
    let config = GamesConfig::from_json_str(DOCUMENT).unwrap();
    let json = config.to_json_string().unwrap();
    assert_eq!(GamesConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_invalid_documents() {
    let bad_range = r#"{ "puzzle": { "shuffle_min": 50, "shuffle_max": 10 } }"#;
    assert!(matches!(
        GamesConfig::from_json_str(bad_range),
        Err(ConfigError::Invalid(_))
    ));

    let off_grid = r#"{ "snake": { "width": 5, "height": 5, "start": { "x": 7, "y": 1 } } }"#;
    assert!(matches!(
        GamesConfig::from_json_str(off_grid),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        GamesConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}
