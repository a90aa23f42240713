use log::{info, warn};

use opendere_engine::Message;

use crate::{error::ArenaError, state::AppState};

/// 設定にあるアリーナ名の表記に揃える
fn canonical_arena(state: &AppState, arena: &str) -> Result<String, ArenaError> {
    state
        .arena_config
        .arenas
        .iter()
        .find(|a| a.eq_ignore_ascii_case(arena))
        .cloned()
        .ok_or_else(|| ArenaError::UnknownArena(arena.to_string()))
}

/// アリーナへの参加。ゲームがなければ作る
pub async fn join(
    state: AppState,
    arena: &str,
    id: &str,
    nick: &str,
) -> Result<Vec<Message>, ArenaError> {
    let arena = canonical_arena(&state, arena)?;
    let mut games = state.games.lock().await;
    let game = games.entry(arena.clone()).or_insert_with(|| {
        info!("creating a new game in {}", arena);
        state.new_game(&arena)
    });
    Ok(game.join(id, nick))
}

/// チャンネルでの発言。参加コマンドと終了コマンドはここで扱い、それ以外はエンジンに渡す
pub async fn public_message(
    state: AppState,
    arena: &str,
    id: &str,
    text: &str,
) -> Result<Vec<Message>, ArenaError> {
    let arena = canonical_arena(&state, arena)?;
    let prefix = state.game_config.prefix.clone();
    let text = text.trim();

    let join_command = format!("{}{}", prefix, arena.trim_start_matches('#'));
    if text.eq_ignore_ascii_case(&join_command) {
        return join(state, &arena, id, id).await;
    }
    if [format!("{}end", prefix), format!("{}reset", prefix)]
        .iter()
        .any(|command| text.eq_ignore_ascii_case(command))
    {
        return reset(state, &arena).await;
    }

    let mut games = state.games.lock().await;
    let Some(game) = games.get_mut(&arena) else {
        // ゲームのないアリーナでの雑談
        return Ok(Vec::new());
    };
    let messages = game.submit_command(id, text, true);
    if game.is_ended() {
        info!("game in {} is over", arena);
        games.remove(&arena);
    }
    Ok(messages)
}

/// ボットへの個別メッセージ。送り主が参加しているアリーナに渡す。
/// 複数のアリーナに参加していれば設定の並び順で最初のもの
pub async fn private_message(
    state: AppState,
    id: &str,
    text: &str,
) -> Result<(String, Vec<Message>), ArenaError> {
    let mut games = state.games.lock().await;
    let arena = state
        .arena_config
        .arenas
        .iter()
        .find(|arena| games.get(*arena).map_or(false, |game| game.player(id).is_some()))
        .cloned()
        .ok_or(ArenaError::NotPlaying)?;

    let game = games
        .get_mut(&arena)
        .ok_or_else(|| ArenaError::NoGame(arena.clone()))?;
    let messages = game.submit_command(id, text, false);
    if game.is_ended() {
        info!("game in {} is over", arena);
        games.remove(&arena);
    }
    Ok((arena, messages))
}

/// 全アリーナの `tick`。開始できなかったゲームと終わったゲームは取り除く
pub async fn tick_all(state: AppState) -> Vec<(String, Vec<Message>)> {
    let mut games = state.games.lock().await;
    let mut outgoing = Vec::new();
    let mut finished = Vec::new();

    for (arena, game) in games.iter_mut() {
        match game.tick() {
            Ok(messages) => {
                if !messages.is_empty() {
                    outgoing.push((arena.clone(), messages));
                }
            }
            Err(err) => {
                warn!("game in {} could not continue: {}", arena, err);
                outgoing.push((arena.clone(), vec![Message::channel(err.to_string())]));
                if err.is_fatal() {
                    finished.push(arena.clone());
                }
            }
        }
        if game.is_ended() {
            finished.push(arena.clone());
        }
    }

    for arena in finished {
        games.remove(&arena);
    }
    outgoing
}

/// ゲームを終了してアリーナから取り除く
pub async fn reset(state: AppState, arena: &str) -> Result<Vec<Message>, ArenaError> {
    let arena = canonical_arena(&state, arena)?;
    let mut games = state.games.lock().await;
    match games.remove(&arena) {
        Some(mut game) => Ok(game.reset()),
        None => Err(ArenaError::NoGame(arena)),
    }
}

/// 表示名の変更を全アリーナに伝える
pub async fn rename(state: AppState, id: &str, new_nick: &str) {
    let mut games = state.games.lock().await;
    for game in games.values_mut() {
        game.nick_change(id, new_nick);
    }
}

/// ゲームの状態をJSONで返す
pub async fn status(state: AppState, arena: &str) -> Result<String, ArenaError> {
    let arena = canonical_arena(&state, arena)?;
    let games = state.games.lock().await;
    let game = games.get(&arena).ok_or(ArenaError::NoGame(arena.clone()))?;
    Ok(game.snapshot(state.arena_config.show_player_roles).to_json()?)
}
