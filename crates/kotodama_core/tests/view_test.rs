//! Tests for per-viewer masked snapshots.

use kotodama_core::{Game, MASK_CHAR, PlayerId, PlayerView};

fn id(raw: &str) -> PlayerId {
    PlayerId::new(raw)
}

fn game_with(players: &[(&str, &str)]) -> Game {
    let mut game = Game::new();
    for (raw, word) in players {
        game.add_player(id(raw), raw.to_uppercase(), word.to_string())
            .expect("Lobby accepts players");
    }
    game
}

fn board<'a>(view: &'a [PlayerView], uid: &str) -> &'a PlayerView {
    view.iter()
        .find(|p| p.uid.as_str() == uid)
        .expect("Player present in view")
}

#[test]
fn test_viewer_sees_own_word() {
    let game = game_with(&[("a", "ねこ"), ("b", "いぬ")]);
    let view = game.view_for(&id("a"));
    assert_eq!(
        board(&view.players, "a").display_word,
        ['ね', 'こ', '×', '×', '×', '×', '×']
    );
}

#[test]
fn test_other_words_are_masked() {
    let game = game_with(&[("a", "ねこ"), ("b", "いぬ")]);
    let view = game.view_for(&id("a"));
    assert_eq!(board(&view.players, "b").display_word, [MASK_CHAR; 7]);
}

#[test]
fn test_opened_tiles_are_revealed_to_everyone() {
    let mut game = game_with(&[("a", "あいうえお"), ("b", "かきくけこ")]);
    game.start_game().expect("Start");
    game.attack(&id("a"), "き").expect("Hit");

    let view = game.view_for(&id("a"));
    assert_eq!(
        board(&view.players, "b").display_word,
        ['*', 'き', '*', '*', '*', '*', '*']
    );
}

#[test]
fn test_eliminated_player_is_fully_revealed() {
    let mut game = game_with(&[("a", "あいうえお"), ("b", "か"), ("c", "さしすせそ")]);
    game.start_game().expect("Start");
    game.attack(&id("a"), "か").expect("Eliminate b");

    let view = game.view_for(&id("c"));
    let b = board(&view.players, "b");
    assert!(!b.is_alive);
    assert_eq!(b.display_word, ['か', '×', '×', '×', '×', '×', '×']);
}

#[test]
fn test_turn_flags_follow_game_start() {
    let mut game = game_with(&[("a", "ねこ"), ("b", "いぬ")]);

    let lobby = game.view_for(&id("a"));
    assert!(lobby.turn_player_uid.is_none());
    assert!(lobby.players.iter().all(|p| !p.is_turn));
    assert!(!lobby.game_started);

    game.start_game().expect("Start");
    let view = game.view_for(&id("b"));
    assert_eq!(view.turn_player_uid, Some(id("a")));
    assert!(board(&view.players, "a").is_turn);
    assert!(!board(&view.players, "b").is_turn);
}

#[test]
fn test_view_carries_result_and_history() {
    let mut game = game_with(&[("p1", "ねこ"), ("p2", "いぬ")]);
    game.start_game().expect("Start");
    game.attack(&id("p1"), "ね").expect("Hit");
    game.attack(&id("p1"), "こ").expect("Game over");

    let view = game.view_for(&id("p2"));
    assert!(view.game_over);
    assert_eq!(view.winner.as_deref(), Some("P2"));
    assert_eq!(view.used_chars, vec!['ね', 'こ']);
}

#[test]
fn test_spectator_sees_nothing_secret() {
    let game = game_with(&[("a", "ねこ"), ("b", "いぬ")]);
    let view = game.view_for(&id("nobody"));
    assert!(
        view.players
            .iter()
            .all(|p| p.display_word == [MASK_CHAR; 7])
    );
}

#[test]
fn test_view_serializes_for_the_client() {
    let game = game_with(&[("a", "ねこ"), ("b", "いぬ")]);
    let json = serde_json::to_value(game.view_for(&id("a"))).expect("Serialize view");

    assert_eq!(json["players"][0]["uid"], "a");
    assert_eq!(json["players"][0]["display_word"][0], "ね");
    assert_eq!(json["players"][1]["display_word"][0], "*");
    assert_eq!(json["turn_player_uid"], serde_json::Value::Null);
    assert_eq!(json["game_started"], false);
}
