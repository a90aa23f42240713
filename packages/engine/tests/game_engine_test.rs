use std::sync::Arc;

use opendere_engine::{
    Game, GameConfig, GameError, ManualClock, Message, Phase, Player, RoleKind,
};

/// 指定人数が参加したロビー。締め切りの直前まで時計を進めてある
fn setup_lobby(num_players: usize, seed: u64) -> (Game, ManualClock) {
    let clock = ManualClock::starting_now();
    let mut game = Game::with_seed(GameConfig::default(), Arc::new(clock.clone()), seed);
    for i in 0..num_players {
        game.join(&i.to_string(), &format!("player{}", i));
    }
    clock.advance_secs(59);
    (game, clock)
}

/// ロビーの締め切りを過ぎさせてゲームを開始する
fn start(num_players: usize, seed: u64) -> (Game, ManualClock, Vec<Message>) {
    let (mut game, clock) = setup_lobby(num_players, seed);
    clock.advance_secs(1);
    let messages = game.tick().expect("ゲーム開始に失敗");
    (game, clock, messages)
}

fn yandere_ids(game: &Game) -> Vec<String> {
    game.players()
        .iter()
        .filter(|p| p.is_yandere())
        .map(|p| p.id.clone())
        .collect()
}

fn town_ids(game: &Game) -> Vec<String> {
    game.players()
        .iter()
        .filter(|p| !p.is_yandere())
        .map(|p| p.id.clone())
        .collect()
}

#[test]
fn test_four_players_start_on_day() {
    println!("Testing 4 player start");
    let (mut game, _clock) = setup_lobby(4, 1);

    // 締め切り前は何も起きない
    assert!(game.tick().unwrap().is_empty());
    assert!(game.is_lobby());

    let (game, _clock, messages) = start(4, 1);
    assert_eq!(game.phase(), Some(0));
    assert_eq!(game.phase_kind(), Some(Phase::Day));
    assert_eq!(game.num_yanderes(), 1);
    assert!(game.players().iter().all(|p| p.role.is_some()));
    assert!(messages
        .iter()
        .any(|m| m.is_public() && m.text.contains("this game starts on DAY 1")));
    println!("4 players started on day");
}

#[test]
fn test_seven_players_start_on_night() {
    println!("Testing 7 player start");
    let (game, _clock, messages) = start(7, 2);
    assert_eq!(game.phase_kind(), Some(Phase::Night));
    assert_eq!(game.num_yanderes(), 2);

    // ヤンデレ同士はお互いを知らされる
    for id in yandere_ids(&game) {
        assert!(
            messages
                .iter()
                .any(|m| m.is_for(&id) && m.text.starts_with("your fellow yanderes are: ")),
            "ヤンデレ {} に仲間の通知がない",
            id
        );
    }
}

#[test]
fn test_insufficient_players_reset_lobby() {
    for n in 1..=3 {
        let (mut game, clock) = setup_lobby(n, 3);
        clock.advance_secs(1);
        let result = game.tick();
        assert!(
            matches!(result, Err(GameError::InsufficientPlayers { found }) if found == n),
            "{}人で開始できてしまった",
            n
        );
        assert!(game.players().is_empty());
        assert!(game.is_lobby());
    }
}

#[test]
fn test_lynch_scenario() {
    println!("Testing lynch scenario");
    let (mut game, _clock, _) = start(4, 4);
    assert_eq!(game.phase_kind(), Some(Phase::Day));

    game.submit_command("0", "!vote player3", true);
    game.submit_command("1", "!vote player3", true);
    game.submit_command("2", "!vote player3", true);
    // 全員が投票するまでは昼のまま
    assert_eq!(game.phase(), Some(0));

    let messages = game.submit_command("3", "!abstain", true);
    assert!(!game.player("3").unwrap().is_alive);
    assert!(game.pending().is_empty());
    assert!(messages
        .iter()
        .any(|m| m.text.starts_with("player3 was lynched, and it turns out they were")));

    // ヤンデレだったなら終了、そうでなければ夜へ
    if game.player("3").unwrap().is_yandere() {
        assert!(game.is_ended());
    } else {
        assert_eq!(game.phase_kind(), Some(Phase::Night));
    }
}

#[test]
fn test_duplicate_vote_is_noop() {
    let (mut game, _clock, _) = start(4, 5);
    game.submit_command("0", "!vote player1", true);
    let messages = game.submit_command("0", "!vote player1", true);

    assert_eq!(messages.len(), 1);
    assert!(messages[0].text.starts_with("player0: you're already voting for player1."));
    assert_eq!(game.pending().len(), 1);
}

#[test]
fn test_night_kill_through_commands() {
    println!("Testing night kill");
    let (mut game, clock, _) = start(7, 6);
    assert_eq!(game.phase_kind(), Some(Phase::Night));

    let victim = town_ids(&game)[0].clone();
    let victim_nick = game.player(&victim).unwrap().nick.clone();
    for id in yandere_ids(&game) {
        let can_vote = game
            .player(&id)
            .and_then(|p| p.role.as_ref())
            .map_or(false, |r| r.can_night_kill());
        let messages = game.submit_command(&id, &format!("vote {}", victim_nick), false);
        if can_vote {
            assert!(messages.iter().all(|m| !m.is_public()), "夜の投票が公開された");
        }
    }

    clock.advance_secs(60);
    let messages = game.tick().unwrap();
    let any_killer = yandere_ids(&game).iter().any(|id| {
        game.player(id)
            .and_then(|p| p.role.as_ref())
            .map_or(false, |r| r.can_night_kill())
    });
    if any_killer {
        assert!(!game.player(&victim).unwrap().is_alive);
        assert!(messages
            .iter()
            .any(|m| m.text.starts_with(&format!("{} was brutally murdered!", victim_nick))));
        assert_eq!(messages[0].text, "morning comes with the stench of death.");
    }
    assert_eq!(game.phase(), Some(1));
    assert_eq!(game.phase_kind(), Some(Phase::Day));
    assert_eq!(game.day_num(), 1);
}

#[test]
fn test_hurry_and_extend_once_per_phase() {
    let (mut game, _clock, _) = start(4, 7);
    assert_eq!(game.seconds_left(), 60);

    let hurried = game.request_hurry("0");
    assert_eq!(hurried[0].text, "tick-tock! players have 45 seconds before the day ends!");
    let again = game.request_extend("0");
    assert_eq!(again, vec![GameError::AlreadyRequestedThisPhase.into_notice("0")]);
    let extended = game.submit_command("1", "!extend", true);
    assert!(extended[0].text.starts_with("players have "));
}

#[test]
fn test_late_join_after_extend() {
    let (mut game, _clock, _) = start(5, 8);
    let rejected = game.join("late", "slowpoke");
    assert_eq!(rejected, vec![GameError::GameInProgress.into_notice("late")]);

    game.request_extend("0");
    let messages = game.join("late", "slowpoke");
    assert_eq!(messages[0].text, "suspicious slow-poke slowpoke joined the game late.");
    assert_eq!(game.players().len(), 6);
    // 途中参加しても昼夜は変わらない
    assert_eq!(game.phase_kind(), Some(Phase::Night));
}

#[test]
fn test_snapshot_hides_living_roles() {
    let (game, _clock, _) = start(4, 9);
    let snapshot = game.snapshot(false);
    assert_eq!(snapshot.players.len(), 4);
    assert!(snapshot.players.iter().all(|p| p.role.is_none()));

    let revealed = game.snapshot(true);
    assert!(revealed.players.iter().all(|p| p.role.is_some()));
    let json = revealed.to_json().unwrap();
    assert!(json.contains("\"phase_kind\": \"Day\""));
}

#[test]
fn test_roles_are_independent_instances() {
    let mut a = Player::new("a", "a");
    let mut b = Player::new("b", "b");
    let mut rng = rand::thread_rng();
    a.role = Some(RoleKind::Warrior.instantiate(&mut rng));
    b.role = Some(RoleKind::Warrior.instantiate(&mut rng));

    if let Some(role) = a.role.as_mut() {
        role.abilities[0].uses.consume();
    }
    assert!(a.role.as_ref().unwrap().abilities[0].uses.is_exhausted());
    assert!(!b.role.as_ref().unwrap().abilities[0].uses.is_exhausted());
}
