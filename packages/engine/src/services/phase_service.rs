use chrono::Duration;
use log::{info, warn};
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::error::GameError;
use crate::models::game::Game;
use crate::models::message::{dedup_messages, Message};
use crate::models::phase::Phase;
use crate::services::selection::select_roles;
use crate::utils::format::{is_are, join_names, random_emoji, yanderes};

impl Game {
    /// 定期的に呼ばれ、締め切りを過ぎていればフェーズを進める
    pub fn tick(&mut self) -> Result<Vec<Message>, GameError> {
        if self.ended {
            return Ok(Vec::new());
        }
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => self.change_phase(),
            _ => Ok(Vec::new()),
        }
    }

    /// フェーズを1つ進める。ロビーなら配役して開始する
    pub fn change_phase(&mut self) -> Result<Vec<Message>, GameError> {
        if self.ended {
            return Ok(Vec::new());
        }
        match self.phase {
            None => self.start_game(),
            Some(_) => Ok(self.advance_phase()),
        }
    }

    /// 全てを破棄して空のロビーに戻す
    pub fn reset(&mut self) -> Vec<Message> {
        info!("game {} reset", self.id);
        self.id = Uuid::new_v4();
        self.players.clear();
        self.phase = None;
        self.roster_size = 0;
        self.deadline = None;
        self.pending.clear();
        self.completed.clear();
        self.hurries.clear();
        self.allow_late = self.config.allow_late;
        self.ended = false;
        vec![Message::channel("the current game has been ended or reset.")]
    }

    /// 勝敗判定。決着がついていれば結果を告知してゲームを終える
    pub fn check_game_end(&mut self) -> Vec<Message> {
        if self.ended || self.phase.is_none() {
            return Vec::new();
        }

        let yanderes_alive = self.num_yanderes_alive();
        let others_alive = self.num_players_alive() - yanderes_alive;
        let headline = if yanderes_alive == 0 {
            "congrats! the last yandere has been defeated!".to_string()
        } else if others_alive == 0 {
            format!(
                "game over! the yandere{} won!",
                if self.num_yanderes() > 1 { "s have" } else { " has" }
            )
        } else {
            return Vec::new();
        };

        let roll = |alive: bool| {
            join_names(
                self.players
                    .iter()
                    .filter(|p| p.is_alive == alive)
                    .map(|p| format!("{} ({})", p.nick, p.role_name())),
            )
        };
        let messages = vec![
            Message::channel(headline),
            Message::channel(format!("survivors are: {}", roll(true))),
            Message::channel(format!("deceased are: {}", roll(false))),
        ];

        info!(
            "game {} ended with {} yanderes and {} others alive",
            self.id, yanderes_alive, others_alive
        );
        self.ended = true;
        self.deadline = None;
        self.pending.clear();
        messages
    }

    fn start_game(&mut self) -> Result<Vec<Message>, GameError> {
        let roles = match select_roles(self.players.len(), &mut *self.rng) {
            Ok(roles) => roles,
            Err(err) => {
                warn!("could not start game {}: {}", self.id, err);
                self.reset();
                return Err(err);
            }
        };
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = Some(role);
        }
        self.roster_size = self.players.len();
        self.phase = Some(0);
        info!(
            "game {} started with {} players and {} yanderes",
            self.id,
            self.roster_size,
            self.num_yanderes()
        );

        let mut messages: Vec<Message> = self
            .players
            .iter()
            .filter_map(|p| {
                p.role.as_ref().map(|role| {
                    Message::player(
                        &p.id,
                        format!("you're a {}. {}", role.name(), role.description()),
                    )
                })
            })
            .collect();

        let team: Vec<(String, String)> = self
            .players
            .iter()
            .filter(|p| p.is_yandere())
            .map(|p| (p.id.clone(), p.nick.clone()))
            .collect();
        if team.len() > 1 {
            for (id, _) in &team {
                let fellows = team.iter().filter(|(other, _)| other != id).map(|(_, nick)| nick);
                messages.push(Message::player(
                    id,
                    format!("your fellow yanderes are: {}.", join_names(fellows)),
                ));
            }
        }

        messages.extend(self.begin_phase());
        Ok(messages)
    }

    fn advance_phase(&mut self) -> Vec<Message> {
        let mut messages = dedup_messages(self.resolve_phase());
        messages.shuffle(&mut *self.rng);

        let ending = self.check_game_end();
        if !ending.is_empty() {
            messages.extend(ending);
            return messages;
        }

        self.phase = self.phase.map(|phase| phase + 1);
        if self.phase_kind() == Some(Phase::Day) && messages.iter().any(|m| m.is_public()) {
            messages.insert(0, Message::channel("morning comes with the stench of death."));
        }
        messages.extend(self.begin_phase());
        messages
    }

    /// 新しいフェーズの締め切りを決め、告知と生存者一覧を返す
    fn begin_phase(&mut self) -> Vec<Message> {
        let phase = self.phase.unwrap_or(0);
        let kind = Phase::from_parity(phase, self.roster_size);
        let seconds = match (phase, kind) {
            (0, _) => self.config.opening_phase_seconds,
            (_, Phase::Day) => self.config.day_seconds,
            (_, Phase::Night) => self.config.night_seconds,
        };
        self.deadline = Some(self.clock.now() + Duration::seconds(seconds));
        self.hurries.clear();
        self.pending.clear();
        self.completed.clear();
        info!("game {} entered {} (phase {})", self.id, kind, phase);

        let emoji = random_emoji(&mut *self.rng);
        let count = self.num_yanderes_alive();
        let headcount = format!("there {} {} {}.", is_are(count), count, yanderes(count));
        let narration = match kind {
            Phase::Night => format!(
                "{} NIGHT of day {}. {} please PM/notice {} with any night-time commands you may have, or with 'abstain' to abstain.",
                if phase == 0 {
                    format!("welcome to {}. this game starts on the", self.config.name)
                } else {
                    "dusk sets on the".to_string()
                },
                self.day_num(),
                headcount,
                self.config.bot
            ),
            Phase::Day => format!(
                "{} DAY {}. {} discuss whom to ruthlessly lynch before they kill you {}",
                if phase == 0 {
                    format!("welcome to {}. this game starts on", self.config.name)
                } else {
                    "dawn rises on".to_string()
                },
                self.day_num(),
                headcount,
                emoji
            ),
        };

        let emoji = random_emoji(&mut *self.rng);
        let roster = format!(
            "current players: {}. {} seconds left, before hopefully, one of them dies {}",
            join_names(self.living().map(|p| p.nick.as_str())),
            self.seconds_left(),
            emoji
        );
        vec![Message::channel(narration), Message::channel(roster)]
    }
}
