use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::Action;
use super::config::GameConfig;
use super::phase::Phase;
use super::player::{Player, PlayerId};
use crate::utils::clock::{Clock, SystemClock};

/// アリーナ1つ分のゲーム。
/// 状態の変更は外部のドライバが `tick` と `submit_command` を順に呼ぶことでのみ起こる。
pub struct Game {
    pub(crate) id: Uuid,
    pub(crate) config: GameConfig,
    pub(crate) players: Vec<Player>,
    /// `None` はロビー。一度決まったら単調増加する
    pub(crate) phase: Option<u32>,
    /// ロックイン時の人数。昼夜の判定に使う
    pub(crate) roster_size: usize,
    pub(crate) deadline: Option<DateTime<Utc>>,
    pub(crate) pending: Vec<Action>,
    pub(crate) completed: Vec<Action>,
    pub(crate) hurries: Vec<PlayerId>,
    pub(crate) allow_late: bool,
    pub(crate) ended: bool,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rng: Box<dyn RngCore + Send>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_ports(
            config,
            Arc::new(SystemClock),
            Box::new(StdRng::from_entropy()),
        )
    }

    /// 時計と乱数を差し替えて作る
    pub fn with_ports(
        config: GameConfig,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            allow_late: config.allow_late,
            config,
            players: Vec::new(),
            phase: None,
            roster_size: 0,
            deadline: None,
            pending: Vec::new(),
            completed: Vec::new(),
            hurries: Vec::new(),
            ended: false,
            clock,
            rng,
        }
    }

    pub fn with_seed(config: GameConfig, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self::with_ports(config, clock, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Option<u32> {
        self.phase
    }

    /// 現在のフェーズが昼か夜か。ロビーでは `None`
    pub fn phase_kind(&self) -> Option<Phase> {
        self.phase
            .map(|phase| Phase::from_parity(phase, self.roster_size))
    }

    /// 「n日目」の数字。夜は0日目から始まりうる
    pub fn day_num(&self) -> u32 {
        let phase = self.phase.unwrap_or(0);
        (2 - (self.roster_size % 2) as u32 + phase) / 2
    }

    pub fn is_lobby(&self) -> bool {
        self.phase.is_none() && !self.ended
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// IDか大文字小文字を無視したニックネームで生存者を探す
    pub fn living_player(&self, token: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.is_alive && p.id == token)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|p| p.is_alive && p.nick.eq_ignore_ascii_case(token))
            })
    }

    pub fn is_alive(&self, id: &str) -> bool {
        self.player(id).map_or(false, |p| p.is_alive)
    }

    pub fn nick(&self, id: &str) -> String {
        self.player(id)
            .map_or_else(|| id.to_string(), |p| p.nick.clone())
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn num_players_alive(&self) -> usize {
        self.living().count()
    }

    pub fn num_yanderes(&self) -> usize {
        self.players.iter().filter(|p| p.is_yandere()).count()
    }

    pub fn num_yanderes_alive(&self) -> usize {
        self.living().filter(|p| p.is_yandere()).count()
    }

    pub fn pending(&self) -> &[Action] {
        &self.pending
    }

    pub fn completed(&self) -> &[Action] {
        &self.completed
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// 締め切りまでの秒数 (四捨五入)
    pub fn seconds_left(&self) -> i64 {
        self.deadline.map_or(0, |deadline| {
            let millis = (deadline - self.clock.now()).num_milliseconds();
            (millis as f64 / 1000.0).round() as i64
        })
    }

    /// 表示名の変更。IDの付け替え (チャット側の同一人物判定) は扱わない
    pub fn nick_change(&mut self, id: &str, new_nick: &str) {
        if let Some(player) = self.player_mut(id) {
            player.nick = new_nick.to_string();
        }
    }

    pub fn snapshot(&self, reveal_roles: bool) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id.to_string(),
            name: self.config.name.clone(),
            channel: self.config.channel.clone(),
            phase: self.phase,
            phase_kind: self.phase_kind(),
            day_num: self.phase.map(|_| self.day_num()),
            seconds_left: self.deadline.map(|_| self.seconds_left()),
            ended: self.ended,
            pending_actions: self.pending.len(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id.clone(),
                    nick: p.nick.clone(),
                    is_alive: p.is_alive,
                    role: if reveal_roles || !p.is_alive {
                        p.role.as_ref().map(|r| r.name().to_string())
                    } else {
                        None
                    },
                })
                .collect(),
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("channel", &self.config.channel)
            .field("phase", &self.phase)
            .field("roster_size", &self.roster_size)
            .field("players", &self.players.len())
            .field("pending", &self.pending.len())
            .field("ended", &self.ended)
            .finish()
    }
}

/// 外部に見せるためのゲームの要約
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: String,
    pub name: String,
    pub channel: String,
    pub phase: Option<u32>,
    pub phase_kind: Option<Phase>,
    pub day_num: Option<u32>,
    pub seconds_left: Option<i64>,
    pub ended: bool,
    pub pending_actions: usize,
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub nick: String,
    pub is_alive: bool,
    pub role: Option<String>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
