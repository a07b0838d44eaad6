//! Tests for the game state machine.

use kotodama_core::{
    AttackError, ErrorKind, Game, JoinError, Phase, PlayerId, StartError, Winner,
};

fn id(raw: &str) -> PlayerId {
    PlayerId::new(raw)
}

/// Lobby with the given `(id, word)` players, names equal to ids.
fn lobby(players: &[(&str, &str)]) -> Game {
    let mut game = Game::new();
    for (raw, word) in players {
        game.add_player(id(raw), raw.to_string(), word.to_string())
            .expect("Lobby accepts players");
    }
    game
}

fn started(players: &[(&str, &str)]) -> Game {
    let mut game = lobby(players);
    game.start_game().expect("Enough players to start");
    game
}

#[test]
fn test_new_game_is_empty_lobby() {
    let game = Game::new();
    assert_eq!(game.phase(), Phase::Lobby);
    assert_eq!(game.player_count(), 0);
    assert!(game.current_player_id().is_none());
    assert!(game.winner().is_none());
    assert!(game.used_chars().is_empty());
}

#[test]
fn test_add_player_appends_turn_order() {
    let game = lobby(&[("a", "ねこ"), ("b", "いぬ")]);
    assert_eq!(game.turn_order(), &[id("a"), id("b")]);
    assert_eq!(game.current_player_id(), Some(&id("a")));
}

#[test]
fn test_rejoin_replaces_word_in_place() {
    let mut game = lobby(&[("a", "ねこ"), ("b", "いぬ")]);
    game.add_player(id("a"), "Alicia".to_string(), "うま".to_string())
        .expect("Rejoin in lobby");

    assert_eq!(game.player_count(), 2);
    assert_eq!(game.turn_order(), &[id("a"), id("b")]);
    let a = game.player(&id("a")).expect("Player a exists");
    assert_eq!(a.name(), "Alicia");
    assert_eq!(a.board_string(), "うま×××××");
}

#[test]
fn test_join_after_start_is_rejected() {
    let mut game = started(&[("a", "ねこ"), ("b", "いぬ")]);
    let result = game.add_player(id("c"), "c".to_string(), "うま".to_string());
    assert_eq!(result, Err(JoinError::AlreadyStarted));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Precondition);
    assert_eq!(game.player_count(), 2);
}

#[test]
fn test_start_requires_two_players() {
    let mut game = lobby(&[("a", "ねこ")]);
    assert_eq!(
        game.start_game(),
        Err(StartError::NotEnoughPlayers { joined: 1 })
    );
    assert_eq!(game.phase(), Phase::Lobby);
}

#[test]
fn test_start_twice_is_rejected() {
    let mut game = started(&[("a", "ねこ"), ("b", "いぬ")]);
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.start_game(), Err(StartError::AlreadyStarted));
    assert_eq!(game.phase(), Phase::InProgress);
}

#[test]
fn test_attack_guards() {
    let mut game = lobby(&[("a", "ねこ"), ("b", "いぬ")]);
    assert_eq!(game.attack(&id("a"), "ね"), Err(AttackError::NotStarted));

    game.start_game().expect("Start");
    assert_eq!(game.attack(&id("b"), "ね"), Err(AttackError::NotYourTurn));
    assert_eq!(game.attack(&id("a"), ""), Err(AttackError::InvalidChar));
    let err = game.attack(&id("a"), "ねこ").unwrap_err();
    assert_eq!(err, AttackError::InvalidChar);
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(game.used_chars().is_empty(), "Rejected attacks leave no trace");
    assert_eq!(game.current_player_id(), Some(&id("a")));
}

#[test]
fn test_attack_normalizes_guess() {
    let mut game = started(&[("a", "ねこ"), ("b", "かば")]);
    let outcome = game.attack(&id("a"), "ガ").expect("Valid attack");
    assert_eq!(outcome.ch, 'か');
    assert!(outcome.hit);
    assert!(game.player(&id("b")).expect("b").is_opened(0));
}

#[test]
fn test_miss_passes_turn() {
    let mut game = started(&[("a", "ねこ"), ("b", "いぬ")]);
    let outcome = game.attack(&id("a"), "あ").expect("Valid attack");
    assert!(!outcome.hit);
    assert!(!outcome.game_over);
    assert_eq!(game.current_player_id(), Some(&id("b")));
    assert_eq!(game.attack_streak(), 0);
}

#[test]
fn test_streak_grants_one_bonus_turn() {
    let mut game = started(&[("a", "あいうえお"), ("b", "かきくけこ")]);

    assert!(game.attack(&id("a"), "か").expect("First hit").hit);
    assert_eq!(game.current_player_id(), Some(&id("a")));
    assert_eq!(game.attack_streak(), 1);

    assert!(game.attack(&id("a"), "き").expect("Second hit").hit);
    assert_eq!(game.current_player_id(), Some(&id("b")));
    assert_eq!(game.attack_streak(), 0);

    assert_eq!(game.attack(&id("a"), "く"), Err(AttackError::NotYourTurn));
}

#[test]
fn test_miss_after_hit_resets_streak() {
    let mut game = started(&[("a", "あいうえお"), ("b", "かきくけこ")]);
    assert!(game.attack(&id("a"), "か").expect("Hit").hit);
    assert!(!game.attack(&id("a"), "ん").expect("Miss").hit);
    assert_eq!(game.current_player_id(), Some(&id("b")));
    assert_eq!(game.attack_streak(), 0);
}

#[test]
fn test_attacker_can_hit_own_word() {
    let mut game = started(&[("a", "あいうえお"), ("b", "かきくけこ")]);
    let outcome = game.attack(&id("a"), "あ").expect("Self hit");
    assert!(outcome.hit);
    assert!(game.player(&id("a")).expect("a").is_opened(0));
    assert_eq!(game.current_player_id(), Some(&id("a")));
}

#[test]
fn test_used_chars_dedup_in_first_seen_order() {
    let mut game = started(&[("a", "たちつてと"), ("b", "なにぬねの")]);
    game.attack(&id("a"), "あ").expect("Miss, b to play");
    game.attack(&id("b"), "い").expect("Miss, a to play");
    game.attack(&id("a"), "あ").expect("Repeat guess");
    assert_eq!(game.used_chars().as_slice(), &['あ', 'い']);
}

#[test]
fn test_next_turn_skips_eliminated_player() {
    let mut game = started(&[("a", "あいう"), ("b", "か"), ("c", "さしす")]);

    // a eliminates b, then uses the bonus turn on a miss.
    assert!(game.attack(&id("a"), "か").expect("Hit").hit);
    assert!(!*game.player(&id("b")).expect("b").is_alive());
    assert!(!game.attack(&id("a"), "ん").expect("Miss").hit);

    assert_eq!(game.current_player_id(), Some(&id("c")));
}

#[test]
fn test_next_turn_wraps_around() {
    let mut game = started(&[("a", "あいう"), ("b", "かきく"), ("c", "さしす")]);
    game.next_turn();
    game.next_turn();
    assert_eq!(game.current_player_id(), Some(&id("c")));
    game.next_turn();
    assert_eq!(game.current_player_id(), Some(&id("a")));
}

#[test]
fn test_next_turn_stops_when_nobody_is_alive() {
    let mut game = started(&[("a", "ねこ"), ("b", "こね"), ("c", "ねこね")]);
    game.attack(&id("a"), "ね").expect("Hit all three");
    let outcome = game.attack(&id("a"), "こ").expect("Eliminate all three");
    assert!(outcome.game_over);
    assert_eq!(game.winner(), Some(&Winner::Draw));

    game.next_turn();

    assert_eq!(game.current_player_id(), Some(&id("a")));
    assert_eq!(game.attack_streak(), 0);
}

#[test]
fn test_end_to_end_two_players() {
    let mut game = Game::new();
    game.add_player(id("p1"), "Neko".to_string(), "ねこ".to_string())
        .expect("Join p1");
    game.add_player(id("p2"), "Inu".to_string(), "いぬ".to_string())
        .expect("Join p2");
    game.start_game().expect("Start");

    let first = game.attack(&id("p1"), "ね").expect("First attack");
    assert!(first.hit);
    assert!(!first.game_over);
    assert_eq!(game.current_player_id(), Some(&id("p1")));
    assert_eq!(game.attack_streak(), 1);

    let second = game.attack(&id("p1"), "こ").expect("Second attack");
    assert!(second.hit);
    assert!(second.game_over);
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.winner(), Some(&Winner::Player("Inu".to_string())));
    assert_eq!(game.current_player_id(), Some(&id("p1")), "No turn advance");

    assert_eq!(game.attack(&id("p1"), "い"), Err(AttackError::GameOver));
}

#[test]
fn test_simultaneous_elimination_is_a_draw() {
    let mut game = started(&[("a", "ねこ"), ("b", "こね")]);
    assert!(game.attack(&id("a"), "ね").expect("Hit both").hit);
    let outcome = game.attack(&id("a"), "こ").expect("Eliminate both");
    assert!(outcome.game_over);
    assert_eq!(game.winner(), Some(&Winner::Draw));
    assert_eq!(Winner::Draw.to_string(), "Draw");
}

#[test]
fn test_reset_returns_to_empty_lobby() {
    let mut game = started(&[("a", "ねこ"), ("b", "いぬ")]);
    game.attack(&id("a"), "ね").expect("Hit");
    game.reset();

    assert_eq!(game.phase(), Phase::Lobby);
    assert_eq!(game.player_count(), 0);
    assert!(game.turn_order().is_empty());
    assert!(game.used_chars().is_empty());
    assert_eq!(game.attack_streak(), 0);
    assert!(game.winner().is_none());

    game.add_player(id("c"), "c".to_string(), "うま".to_string())
        .expect("Lobby open again");
}
