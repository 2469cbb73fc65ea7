//! Registry lifecycle and per-game locking.

use std::sync::Arc;
use std::thread;
use ultimate_tictactoe::{
    EngineConfig, FirstMoverPolicy, GameOutcome, Mark, PairKey, Position, RejectionKind,
    ResignRejection, SessionRegistry, StartError,
};

#[test]
fn test_self_challenge_rejected() {
    let registry = SessionRegistry::new();
    assert_eq!(
        registry.start_game("pat", "pat").unwrap_err(),
        StartError::SelfChallenge
    );
    assert!(registry.is_empty());
}

#[test]
fn test_reversed_pair_is_already_playing() {
    let registry = SessionRegistry::new();
    registry.start_game("pat", "quinn").unwrap();
    assert_eq!(
        registry.start_game("quinn", "pat").unwrap_err(),
        StartError::AlreadyPlaying
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_player_may_face_several_opponents() {
    let registry = SessionRegistry::new();
    registry.start_game("pat", "quinn").unwrap();
    registry.start_game("pat", "rey").unwrap();
    assert_eq!(registry.len(), 2);

    assert!(registry.find_game(&"pat").is_some());
    assert!(registry.find_game(&"quinn").is_some());
    assert!(registry.find_game(&"sam").is_none());
    assert!(registry.game_between(&"rey", &"pat").is_some());
    assert!(registry.game_between(&"quinn", &"rey").is_none());

    let mut pairs = registry.active_pairs();
    pairs.sort_by(|a, b| a.players().cmp(&b.players()));
    assert_eq!(
        pairs,
        vec![PairKey::new("pat", "quinn"), PairKey::new("pat", "rey")]
    );
}

#[test]
fn test_resign_lifecycle() {
    let registry = SessionRegistry::new();
    let game = registry.start_game("pat", "quinn").unwrap();
    game.apply_move(&"pat", Position::Center, Position::Center)
        .unwrap();

    assert_eq!(
        game.resign(&"sam").unwrap_err(),
        ResignRejection::NotAParticipant
    );

    let resigned = game.resign(&"pat").unwrap();
    assert_eq!(resigned.forfeited_by, "pat");
    assert_eq!(resigned.winner, "quinn");
    assert_eq!(resigned.outcome, GameOutcome::Forfeited(Mark::X));
    assert_eq!(game.winner(), Some("quinn"));

    assert_eq!(
        game.resign(&"quinn").unwrap_err(),
        ResignRejection::GameAlreadyOver
    );
    assert_eq!(
        game.apply_move(&"quinn", Position::Center, Position::TopLeft),
        Err(RejectionKind::GameAlreadyOver)
    );

    assert!(registry.end_game(game.key()));
    assert!(registry.find_game(&"pat").is_none());
    // The pair may play again once the old game is gone.
    assert!(registry.start_game("quinn", "pat").is_ok());
}

#[test]
fn test_stale_handle_rejected_after_end_game_and_restart() {
    let registry = SessionRegistry::new();
    let old = registry.start_game("pat", "quinn").unwrap();
    let old_clone = old.clone();
    assert!(registry.end_game(old.key()));
    let new = registry.start_game("pat", "quinn").unwrap();

    assert!(old.is_ended());
    assert!(!new.is_ended());
    assert_eq!(
        old.apply_move(&"pat", Position::Center, Position::Center),
        Err(RejectionKind::GameAlreadyOver)
    );
    assert_eq!(
        old_clone.resign(&"quinn").unwrap_err(),
        ResignRejection::GameAlreadyOver
    );
    assert!(old.legal_moves().is_empty());
    assert_eq!(old.render_snapshot().move_count, 0);

    // The replacement game is untouched by the stale handles.
    assert_eq!(new.render_snapshot().move_count, 0);
    assert_eq!(new.outcome(), GameOutcome::Undecided);
    new.apply_move(&"pat", Position::Center, Position::Center)
        .unwrap();
    assert_eq!(new.render_snapshot().move_count, 1);
    assert_eq!(
        registry
            .game_between(&"quinn", &"pat")
            .unwrap()
            .render_snapshot()
            .move_count,
        1
    );
}

#[test]
fn test_snapshot_through_handle() {
    let registry =
        SessionRegistry::with_config(EngineConfig::new(FirstMoverPolicy::Opponent, None));
    let game = registry.start_game("pat", "quinn").unwrap();

    assert_eq!(
        game.apply_move(&"pat", Position::Center, Position::Center),
        Err(RejectionKind::NotYourTurn)
    );
    game.apply_move(&"quinn", Position::TopLeft, Position::BottomRight)
        .unwrap();

    let snap = game.render_snapshot();
    assert_eq!(snap.current_turn, Mark::O);
    assert_eq!(snap.active_sub_board, Some(Position::BottomRight));
    assert_eq!(game.legal_moves().len(), 9);
}

#[test]
fn test_racing_moves_are_serialized() {
    let registry = Arc::new(SessionRegistry::new());
    let game = registry.start_game(1_u32, 2_u32).unwrap();

    let workers: Vec<_> = Position::ALL
        .into_iter()
        .map(|cell| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let game = registry.find_game(&1).expect("live game");
                game.apply_move(&1, Position::Center, cell)
            })
        })
        .collect();

    let results: Vec<_> = workers
        .into_iter()
        .map(|w| w.join().expect("worker panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == RejectionKind::NotYourTurn)
    );
    assert_eq!(game.board().history().len(), 1);
    assert_eq!(game.render_snapshot().current_turn, Mark::O);
}

#[test]
fn test_games_for_different_pairs_progress_independently() {
    let registry = Arc::new(SessionRegistry::new());
    let handles: Vec<_> = (0..4_u32)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let (x, o) = (2 * i, 2 * i + 1);
                let game = registry.start_game(x, o).unwrap();
                game.apply_move(&x, Position::TopLeft, Position::Center)
                    .unwrap();
                game.apply_move(&o, Position::Center, Position::TopLeft)
                    .unwrap();
                game.render_snapshot().move_count
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), 2);
    }
    assert_eq!(registry.len(), 4);
}
