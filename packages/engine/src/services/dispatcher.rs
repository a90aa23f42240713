use log::{debug, info};

use crate::error::{ChannelRedirect, GameError};
use crate::models::ability::{Ability, AbilityKind};
use crate::models::action::{find_pending, ActionKind, Cohort};
use crate::models::game::Game;
use crate::models::message::Message;
use crate::models::phase::Phase;
use crate::models::player::PlayerId;

const ABSTAIN: [&str; 2] = ["a", "abstain"];
const UNDECIDED: [&str; 4] = ["u", "unvote", "undecide", "undecided"];

/// コマンドの対象
#[derive(Debug, Clone, PartialEq)]
enum Target {
    Player(PlayerId),
    Abstain,
    Undecided,
    Nobody,
}

impl Game {
    /// プレイヤーのコマンドを解釈して実行する。
    /// 公開チャンネルでは接頭辞のない発言を無視し、拒否したコマンドには本人宛ての通知を1件だけ返す。
    pub fn submit_command(&mut self, actor: &str, raw: &str, is_public: bool) -> Vec<Message> {
        let raw = raw.trim();
        let body = match raw.strip_prefix(self.config.prefix.as_str()) {
            Some(body) => body,
            None if is_public => return Vec::new(),
            None => raw,
        };

        let mut words = body.trim().splitn(2, char::is_whitespace);
        let word = words.next().unwrap_or_default().to_lowercase();
        let rest = words.next().map(str::trim).filter(|r| !r.is_empty());
        if word.is_empty() {
            return vec![GameError::UnknownCommand(raw.to_string()).into_notice(actor)];
        }

        let (word, rest) = match word.as_str() {
            "hurry" => return self.request_hurry(actor),
            "extend" => return self.request_extend(actor),
            "a" | "abstain" => ("vote", Some("abstain")),
            "u" | "unvote" => ("vote", Some("undecided")),
            other => (other, rest),
        };

        match self.dispatch(actor, raw, word, rest, is_public) {
            Ok(messages) => messages,
            Err(err) => {
                debug!("rejected '{}' from {}: {}", raw, actor, err);
                vec![err.into_notice(actor)]
            }
        }
    }

    fn dispatch(
        &mut self,
        actor: &str,
        raw: &str,
        word: &str,
        rest: Option<&str>,
        is_public: bool,
    ) -> Result<Vec<Message>, GameError> {
        let phase = self.check_can_act(actor)?;

        let (index, ability) = self
            .player(actor)
            .and_then(|p| p.role.as_ref())
            .and_then(|role| {
                role.abilities
                    .iter()
                    .enumerate()
                    .find(|(_, a)| a.name().starts_with(word) && a.is_usable_in(phase))
                    .map(|(index, ability)| (index, ability.clone()))
            })
            .ok_or_else(|| GameError::UnknownCommand(word.to_string()))?;

        if is_public && !ability.command_public {
            return Err(GameError::WrongChannel(ChannelRedirect::Private {
                bot: self.config.bot.clone(),
            }));
        }
        if !is_public && ability.command_public {
            return Err(GameError::WrongChannel(ChannelRedirect::Public {
                channel: self.config.channel.clone(),
            }));
        }
        if self
            .completed
            .iter()
            .any(|a| a.is_by(actor) && a.ability_index == Some(index))
        {
            return Err(GameError::AlreadyActed);
        }
        if ability.uses.is_exhausted() && find_pending(&self.pending, actor, index).is_none() {
            return Err(GameError::NoUsesRemaining);
        }

        let target = self.parse_target(actor, raw, &ability, rest)?;

        match (ability.kind, target) {
            (AbilityKind::Vote, target) => self.cast_vote(actor, index, &ability, phase, target),
            (_, Target::Abstain | Target::Undecided) => Ok(self.withdraw(actor, index, &ability)),
            (_, Target::Player(target)) => {
                Ok(self.use_ability(actor, index, &ability, phase, Some(&target)))
            }
            (_, Target::Nobody) => Ok(self.use_ability(actor, index, &ability, phase, None)),
        }
    }

    /// 行動できる状態なら現在のフェーズを返す
    fn check_can_act(&self, actor: &str) -> Result<Phase, GameError> {
        if self.ended {
            return Err(GameError::GameOver);
        }
        let phase = self.phase_kind().ok_or(GameError::GameNotStarted)?;
        match self.player(actor) {
            None => Err(GameError::NotPlaying),
            Some(player) if !player.is_alive => Err(GameError::NotAlive),
            Some(_) => Ok(phase),
        }
    }

    fn parse_target(
        &self,
        actor: &str,
        raw: &str,
        ability: &Ability,
        rest: Option<&str>,
    ) -> Result<Target, GameError> {
        let Some(token) = rest else {
            return if ability.kind.requires_target() {
                Err(GameError::MissingTarget)
            } else {
                Ok(Target::Nobody)
            };
        };

        let lowered = token.to_lowercase();
        if ABSTAIN.contains(&lowered.as_str()) {
            return Ok(Target::Abstain);
        }
        if ability.kind == AbilityKind::Vote && UNDECIDED.contains(&lowered.as_str()) {
            return Ok(Target::Undecided);
        }
        if !ability.kind.requires_target() {
            return Ok(Target::Nobody);
        }

        match self.living_player(token) {
            Some(player) if player.id != actor => Ok(Target::Player(player.id.clone())),
            _ => Err(GameError::InvalidTarget {
                command: raw.to_string(),
                target: token.to_string(),
            }),
        }
    }

    /// 投票。昼は全体に、夜は投票グループ全員に個別で結果を返す
    fn cast_vote(
        &mut self,
        actor: &str,
        index: usize,
        ability: &Ability,
        phase: Phase,
        target: Target,
    ) -> Result<Vec<Message>, GameError> {
        let Some(cohort) = ability.cohort(phase) else {
            return Err(GameError::UnknownCommand(ability.name().to_string()));
        };
        let nick = self.nick(actor);
        let existing = self
            .pending
            .iter()
            .position(|a| a.is_by(actor) && a.kind == ActionKind::VoteToKill(cohort));
        let previous = existing.map(|pos| self.pending[pos].target.clone());
        let label = |game: &Game, target: &Option<PlayerId>| {
            target
                .as_deref()
                .map_or_else(|| "abstain".to_string(), |id| game.nick(id))
        };

        let text = match (target, previous) {
            (Target::Undecided, None) => format!("{}: you're already undecided.", nick),
            (Target::Undecided, Some(previous)) => {
                if let Some(pos) = existing {
                    self.pending.remove(pos);
                }
                format!(
                    "{} has changed their vote from {} to undecided.",
                    nick,
                    label(&*self, &previous)
                )
            }
            (Target::Nobody, _) => return Err(GameError::MissingTarget),
            (target, previous) => {
                let choice = match target {
                    Target::Player(id) => Some(id),
                    _ => None,
                };
                match previous {
                    Some(previous) if previous == choice => match &choice {
                        Some(id) => format!("{}: you're already voting for {}.", nick, self.nick(id)),
                        None => format!("{}: you're already abstaining.", nick),
                    },
                    previous => {
                        if let Some(pos) = existing {
                            self.pending.remove(pos);
                        }
                        let ballot = ability.action(index, actor, choice.as_deref(), phase);
                        self.queue_action(ballot);
                        match (previous, &choice) {
                            (None, Some(id)) => format!("{} has voted for {}.", nick, self.nick(id)),
                            (None, None) => format!("{} has voted to abstain.", nick),
                            (Some(previous), choice) => format!(
                                "{} has changed their vote from {} to {}.",
                                nick,
                                label(&*self, &previous),
                                label(&*self, choice)
                            ),
                        }
                    }
                }
            }
        };

        let text = format!("{} {}", text, self.list_votes(cohort));
        let mut messages = if cohort.public {
            vec![Message::channel(text)]
        } else {
            self.cohort_members(cohort)
                .iter()
                .map(|member| Message::player(member, text.clone()))
                .collect()
        };

        self.end_day_if_everyone_voted(cohort, actor, &mut messages);
        Ok(messages)
    }

    /// 全員の票が揃っていれば昼を終える
    fn end_day_if_everyone_voted(&mut self, cohort: Cohort, actor: &str, messages: &mut Vec<Message>) {
        if self.ended || !self.everyone_voted(cohort) {
            return;
        }
        info!("every day voter has voted in game {}, ending the day", self.id);
        match self.change_phase() {
            Ok(more) => messages.extend(more),
            Err(err) => messages.push(err.into_notice(actor)),
        }
    }

    /// 昼の公開投票で生存者全員が票 (棄権含む) を入れたか
    fn everyone_voted(&self, cohort: Cohort) -> bool {
        if !(cohort.public && cohort.phase == Phase::Day) {
            return false;
        }
        let members = self.cohort_members(cohort);
        !members.is_empty()
            && members.iter().all(|member| {
                self.pending
                    .iter()
                    .any(|a| a.is_by(member) && a.kind == ActionKind::VoteToKill(cohort))
            })
    }

    /// キューに積んだ能力の取り消し
    fn withdraw(&mut self, actor: &str, index: usize, ability: &Ability) -> Vec<Message> {
        match find_pending(&self.pending, actor, index) {
            Some(pos) => {
                self.pending.remove(pos);
                vec![Message::player(
                    actor,
                    format!("you've abstained from using your ability to {}", ability.name()),
                )]
            }
            None => vec![Message::player(
                actor,
                format!("you're not using your ability to {} right now.", ability.name()),
            )],
        }
    }

    /// 投票以外の能力。昼に使える即時型はその場で適用し、それ以外はフェーズ終了まで積む
    fn use_ability(
        &mut self,
        actor: &str,
        index: usize,
        ability: &Ability,
        phase: Phase,
        target: Option<&str>,
    ) -> Vec<Message> {
        let action = ability.action(index, actor, target, phase);

        if phase == Phase::Day && !ability.kind.is_phase_exclusive() {
            let mut messages = self.apply_action(&action);
            self.consume_use(&action);
            self.completed.push(action);
            messages.extend(self.check_game_end());
            // 殺された人が最後の未投票者だった場合
            let lynch = Cohort {
                public: true,
                phase: Phase::Day,
            };
            self.end_day_if_everyone_voted(lynch, actor, &mut messages);
            return messages;
        }

        let name = ability.name();
        let target_nick = target.map(|t| self.nick(t));
        let text = match find_pending(&self.pending, actor, index) {
            Some(pos) if self.pending[pos].target == action.target => match &target_nick {
                Some(t) => format!("you're already going to {} {}.", name, t),
                None => format!("you're already going to {}.", name),
            },
            Some(pos) => {
                let previous = self.pending[pos]
                    .target
                    .as_deref()
                    .map_or_else(|| "nobody".to_string(), |t| self.nick(t));
                self.pending[pos] = action;
                format!(
                    "you've changed your {} target from {} to {}.",
                    name,
                    previous,
                    target_nick.as_deref().unwrap_or("nobody")
                )
            }
            None => {
                self.queue_action(action);
                match &target_nick {
                    Some(t) => format!("you will {} {} when the {} ends.", name, t, phase),
                    None => format!("you will {} when the {} ends.", name, phase),
                }
            }
        };
        vec![Message::player(actor, text)]
    }
}
