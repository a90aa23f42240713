use chrono::Duration;
use log::info;

use crate::error::GameError;
use crate::models::game::Game;
use crate::models::message::Message;
use crate::models::player::Player;
use crate::services::selection::select_roles;

/// 途中参加者の役職はこの人数分の配役から1つ引く (ヤンデレになる確率はおよそ1/6)
const LATE_JOIN_POOL: usize = 6;

impl Game {
    /// ゲームへの参加。最初の参加者がロビーの締め切りを決める
    pub fn join(&mut self, id: &str, nick: &str) -> Vec<Message> {
        if self.ended {
            return vec![GameError::GameOver.into_notice(id)];
        }

        let mut messages = Vec::new();
        if self.players.is_empty() && self.phase.is_none() {
            self.deadline = Some(self.clock.now() + Duration::seconds(self.config.lobby_seconds));
            messages.push(Message::channel(format!(
                "a game of `{}` is starting in {} in {} seconds! please type {}{} to join!",
                self.config.name,
                self.config.channel,
                self.seconds_left(),
                self.config.prefix,
                self.config.name
            )));
        }

        if self.player(id).is_some() {
            let notice = match self.phase {
                None => Message::player(
                    id,
                    format!(
                        "you're already in the current game, which is starting in {} seconds.",
                        self.seconds_left()
                    ),
                ),
                Some(_) => GameError::AlreadyJoined.into_notice(id),
            };
            messages.push(notice);
            return messages;
        }

        match self.phase {
            None => {
                self.players.push(Player::new(id, nick));
                info!("{} joined game {} ({} players)", nick, self.id, self.players.len());
                messages.push(Message::player(
                    id,
                    format!(
                        "you've joined the current game, which is starting in {} seconds.",
                        self.seconds_left()
                    ),
                ));
            }
            Some(0) if self.allow_late => messages.extend(self.join_late(id, nick)),
            Some(_) => messages.push(GameError::GameInProgress.into_notice(id)),
        }
        messages
    }

    /// 最初のフェーズ中の途中参加。ロックイン時の人数 (昼夜の判定) は変えない
    fn join_late(&mut self, id: &str, nick: &str) -> Vec<Message> {
        let role = match select_roles(LATE_JOIN_POOL, &mut *self.rng) {
            // 配役は混ぜ済みなので末尾を取れば一様に選んだことになる
            Ok(mut roles) => roles.pop(),
            Err(err) => return vec![err.into_notice(id)],
        };
        let Some(role) = role else {
            return vec![GameError::GameInProgress.into_notice(id)];
        };

        let reveal = format!(
            "you've joined the current game with role {} - {}",
            role.name(),
            role.description()
        );
        info!("{} joined game {} late as {}", nick, self.id, role.name());
        let mut player = Player::new(id, nick);
        player.role = Some(role);
        self.players.push(player);

        vec![
            Message::channel(format!("suspicious slow-poke {} joined the game late.", nick)),
            Message::player(id, reveal),
        ]
    }
}
