use std::sync::Arc;

use opendere_arena::{
    error::ArenaError, models::config::ArenaConfig, services::arena_service, state::AppState,
    utils::test_setup::setup_test_env,
};
use opendere_engine::{GameConfig, GameError, ManualClock, Phase};

/// 時計を手で進められる2アリーナ構成
fn setup_state(seed: u64) -> (AppState, ManualClock) {
    setup_test_env();
    let clock = ManualClock::starting_now();
    let arena_config = ArenaConfig {
        arenas: vec!["#opendere".to_string(), "#yandere".to_string()],
        tick_ms: 1000,
        show_player_roles: true,
    };
    let state = AppState::with_clock(
        GameConfig::default(),
        arena_config,
        Some(seed),
        Arc::new(clock.clone()),
    );
    (state, clock)
}

/// 指定人数を `!opendere` で参加させる
async fn join_players(state: &AppState, num_players: usize) {
    for i in 0..num_players {
        let result =
            arena_service::public_message(state.clone(), "#opendere", &format!("p{}", i), "!opendere")
                .await;
        assert!(result.is_ok(), "参加に失敗: {:?}", result);
    }
}

#[tokio::test]
async fn test_join_creates_game() {
    println!("Testing join creates a game");
    let (state, _clock) = setup_state(1);

    let messages = arena_service::join(state.clone(), "#OpenDere", "alice", "alice")
        .await
        .expect("参加に失敗");

    // 最初の参加者で開始の告知が出る
    assert!(messages
        .iter()
        .any(|m| m.is_public() && m.text.contains("a game of `opendere` is starting in #opendere")));
    assert!(messages.iter().any(|m| m.is_for("alice")));

    let games = state.games.lock().await;
    assert_eq!(games.len(), 1);
    let game = games.get("#opendere").expect("ゲームが作られていない");
    assert!(game.is_lobby());
    assert_eq!(game.players().len(), 1);
    println!("Game created in #opendere");
}

#[tokio::test]
async fn test_unknown_arena_rejected() {
    println!("Testing unknown arena");
    let (state, _clock) = setup_state(2);

    let result = arena_service::public_message(state.clone(), "#lobby", "alice", "!lobby").await;
    assert!(
        matches!(result, Err(ArenaError::UnknownArena(ref a)) if a == "#lobby"),
        "アリーナ以外は拒否されるべき: {:?}",
        result
    );
    assert!(state.games.lock().await.is_empty());
}

#[tokio::test]
async fn test_chatter_without_game_is_ignored() {
    let (state, _clock) = setup_state(3);

    let messages = arena_service::public_message(state.clone(), "#yandere", "bob", "hello!")
        .await
        .expect("雑談でエラーになった");
    assert!(messages.is_empty());
    assert!(state.games.lock().await.is_empty());
}

#[tokio::test]
async fn test_private_message_routes_to_players_arena() {
    println!("Testing private routing");
    let (state, _clock) = setup_state(4);
    join_players(&state, 1).await;

    // ロビー中の個別メッセージでも締め切りを早められる
    let (arena, messages) = arena_service::private_message(state.clone(), "p0", "hurry")
        .await
        .expect("個別メッセージに失敗");
    assert_eq!(arena, "#opendere");
    assert!(messages
        .iter()
        .any(|m| m.is_public() && m.text.contains("before the game starts")));

    // 参加していない人は拒否
    let result = arena_service::private_message(state.clone(), "stranger", "hurry").await;
    assert!(matches!(result, Err(ArenaError::NotPlaying)), "{:?}", result);
}

#[tokio::test]
async fn test_private_message_prefers_first_configured_arena() {
    println!("Testing private routing across arenas");
    let (state, _clock) = setup_state(10);

    // 後のアリーナから先に参加しても順序は設定に従う
    arena_service::public_message(state.clone(), "#yandere", "p0", "!yandere")
        .await
        .expect("参加に失敗");
    join_players(&state, 1).await;

    for _ in 0..3 {
        let (arena, _) = arena_service::private_message(state.clone(), "p0", "status")
            .await
            .expect("個別メッセージに失敗");
        assert_eq!(arena, "#opendere", "設定順で最初のアリーナに届くべき");
    }
}

#[tokio::test]
async fn test_tick_starts_game() {
    println!("Testing tick starts the game");
    let (state, clock) = setup_state(5);
    join_players(&state, 4).await;

    // 締め切り前は何も起きない
    assert!(arena_service::tick_all(state.clone()).await.is_empty());

    clock.advance_secs(60);
    let outgoing = arena_service::tick_all(state.clone()).await;
    assert_eq!(outgoing.len(), 1);
    let (arena, messages) = &outgoing[0];
    assert_eq!(arena, "#opendere");
    assert!(messages
        .iter()
        .any(|m| m.is_public() && m.text.contains("this game starts on DAY 1")));

    let games = state.games.lock().await;
    let game = games.get("#opendere").expect("ゲームが消えている");
    assert_eq!(game.phase_kind(), Some(Phase::Day));
    println!("Game started on day 1");
}

#[tokio::test]
async fn test_tick_removes_game_without_enough_players() {
    println!("Testing insufficient players");
    let (state, clock) = setup_state(6);
    join_players(&state, 2).await;

    clock.advance_secs(60);
    let outgoing = arena_service::tick_all(state.clone()).await;

    // 人数不足がチャンネルに告知され、ゲームは取り除かれる
    let (_, messages) = &outgoing[0];
    let expected = GameError::InsufficientPlayers { found: 2 }.to_string();
    assert!(messages.iter().any(|m| m.is_public() && m.text == expected));
    assert!(state.games.lock().await.is_empty(), "ゲームが残っている");
}

#[tokio::test]
async fn test_reset_removes_game() {
    println!("Testing reset");
    let (state, _clock) = setup_state(7);
    join_players(&state, 3).await;

    let messages = arena_service::public_message(state.clone(), "#opendere", "p0", "!end")
        .await
        .expect("リセットに失敗");
    assert!(messages
        .iter()
        .any(|m| m.text == "the current game has been ended or reset."));
    assert!(state.games.lock().await.is_empty());

    // 2回目はゲームがない
    let result = arena_service::reset(state.clone(), "#opendere").await;
    assert!(matches!(result, Err(ArenaError::NoGame(_))), "{:?}", result);
}

#[tokio::test]
async fn test_status_and_rename() {
    println!("Testing status json");
    let (state, clock) = setup_state(8);
    join_players(&state, 4).await;
    clock.advance_secs(60);
    arena_service::tick_all(state.clone()).await;

    arena_service::rename(state.clone(), "p0", "alicia").await;

    let json = arena_service::status(state.clone(), "#opendere")
        .await
        .expect("状態の取得に失敗");
    let value: serde_json::Value = serde_json::from_str(&json).expect("JSONではない");
    assert_eq!(value["channel"], "#opendere");
    assert_eq!(value["phase_kind"], "Day");
    assert_eq!(value["players"][0]["nick"], "alicia");
    // show_player_roles が有効なので生存者の役職も見える
    assert!(value["players"][0]["role"].is_string());

    let result = arena_service::status(state.clone(), "#yandere").await;
    assert!(matches!(result, Err(ArenaError::NoGame(_))), "{:?}", result);
    println!("Status: {}", json);
}

#[tokio::test]
async fn test_arenas_are_independent() {
    let (state, _clock) = setup_state(9);
    join_players(&state, 1).await;
    arena_service::public_message(state.clone(), "#yandere", "q0", "!yandere")
        .await
        .expect("参加に失敗");

    let games = state.games.lock().await;
    assert_eq!(games.len(), 2);
    assert_eq!(games["#yandere"].config().name, "yandere");
    assert!(games["#yandere"].player("p0").is_none());
    assert!(games["#opendere"].player("q0").is_none());
}
