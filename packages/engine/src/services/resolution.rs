use log::{debug, info};
use rand::seq::SliceRandom;

use crate::models::action::{actions_by, is_protected, Action, ActionKind, Cohort};
use crate::models::game::Game;
use crate::models::message::Message;
use crate::models::phase::Phase;
use crate::models::player::PlayerId;
use crate::models::role::Upgrades;
use crate::utils::format::{join_names, random_emoji};

impl Game {
    /// アクションを未処理キューに積む
    pub fn queue_action(&mut self, action: Action) {
        debug!("queued {:?}", action);
        self.pending.push(action);
    }

    /// 未処理キューを先頭から順に適用し、生まれたメッセージを返す。
    /// 同じ投票グループの票は最初の一票の位置でまとめて集計する。
    pub fn resolve_phase(&mut self) -> Vec<Message> {
        let mut messages = Vec::new();

        while !self.pending.is_empty() {
            let action = self.pending.remove(0);

            if let ActionKind::VoteToKill(cohort) = action.kind {
                messages.extend(self.tally_votes(cohort, action));
                continue;
            }

            // 尾行は投票と殺害が片付いてから
            if action.kind == ActionKind::Stalk
                && self
                    .pending
                    .iter()
                    .any(|a| a.kind.is_vote() || a.kind.is_kill())
            {
                self.pending.push(action);
                continue;
            }

            if !action.kind.is_kill() {
                if let Some(actor) = action.actor.as_deref() {
                    if !self.is_alive(actor) {
                        debug!("dropped {:?}: actor is dead", action);
                        continue;
                    }
                }
            }

            messages.extend(self.apply_action(&action));
            self.consume_use(&action);
            self.completed.push(action);
        }

        messages
    }

    /// アクションを1つ適用する
    pub(crate) fn apply_action(&mut self, action: &Action) -> Vec<Message> {
        debug!("applying {:?}", action);
        match action.kind {
            ActionKind::Kill | ActionKind::UnstoppableKill => self.apply_kill(action),
            ActionKind::Guard => self.apply_guard(action),
            ActionKind::Hide => action
                .actor
                .as_deref()
                .map(|actor| vec![Message::player(actor, "you hid from the killers.")])
                .unwrap_or_default(),
            // 票は集計でしか扱わない
            ActionKind::VoteToKill(_) => Vec::new(),
            ActionKind::Stalk => self.apply_stalk(action),
            ActionKind::Check => self.apply_check(action),
            ActionKind::Spy => self.apply_spy(action),
            ActionKind::Upgrade => self.apply_upgrade(action),
            ActionKind::Reveal => self.apply_reveal(action),
        }
    }

    /// 能力の残り回数を減らす。役職が変わって能力の並びがずれていたら何もしない
    pub(crate) fn consume_use(&mut self, action: &Action) {
        let (Some(actor), Some(index)) = (action.actor.as_deref(), action.ability_index) else {
            return;
        };
        let expected = action.kind.ability_kind();
        if let Some(ability) = self
            .player_mut(actor)
            .and_then(|p| p.role.as_mut())
            .and_then(|r| r.abilities.get_mut(index))
            .filter(|a| Some(a.kind) == expected)
        {
            ability.uses.consume();
        }
    }

    /// 投票グループの生存メンバー
    pub(crate) fn cohort_members(&self, cohort: Cohort) -> Vec<PlayerId> {
        self.living()
            .filter(|p| {
                p.role.as_ref().map_or(false, |r| {
                    r.abilities
                        .iter()
                        .any(|a| a.cohort(cohort.phase) == Some(cohort) && a.is_usable_in(cohort.phase))
                })
            })
            .map(|p| p.id.clone())
            .collect()
    }

    /// 現在の票の一覧。未処理の票だけを数える
    pub(crate) fn list_votes(&self, cohort: Cohort) -> String {
        let ballots: Vec<&Action> = self
            .pending
            .iter()
            .filter(|a| a.kind == ActionKind::VoteToKill(cohort))
            .collect();
        if ballots.is_empty() {
            return "nobody has voted yet.".to_string();
        }

        let mut buckets: Vec<(Option<&str>, Vec<String>)> = Vec::new();
        for ballot in ballots {
            let voter = ballot.actor.as_deref().map(|a| self.nick(a)).unwrap_or_default();
            match buckets
                .iter_mut()
                .find(|(target, _)| *target == ballot.target.as_deref())
            {
                Some((_, voters)) => voters.push(voter),
                None => buckets.push((ballot.target.as_deref(), vec![voter])),
            }
        }

        let parts: Vec<String> = buckets
            .iter()
            .map(|(target, voters)| {
                format!(
                    "{} ({}): {}",
                    target.map_or_else(|| "abstain".to_string(), |t| self.nick(t)),
                    voters.len(),
                    join_names(voters)
                )
            })
            .collect();
        format!("votes: {}", parts.join("; "))
    }

    fn tally_votes(&mut self, cohort: Cohort, first: Action) -> Vec<Message> {
        let (rest, others): (Vec<Action>, Vec<Action>) = self
            .pending
            .drain(..)
            .partition(|a| a.kind == ActionKind::VoteToKill(cohort));
        self.pending = others;
        let mut ballots = vec![first];
        ballots.extend(rest);

        // 得票を最初に票が入った順に数える
        let mut tally: Vec<(Option<PlayerId>, usize, Option<PlayerId>)> = Vec::new();
        for ballot in &ballots {
            let voter_alive = ballot.actor.as_deref().map_or(false, |a| self.is_alive(a));
            let target_alive = ballot.target.as_deref().map_or(true, |t| self.is_alive(t));
            if !voter_alive || !target_alive {
                debug!("ignored ballot {:?}", ballot);
                continue;
            }
            match tally.iter_mut().find(|(target, _, _)| *target == ballot.target) {
                Some((_, count, _)) => *count += 1,
                None => tally.push((ballot.target.clone(), 1, ballot.actor.clone())),
            }
        }

        let top = tally.iter().map(|(_, count, _)| *count).max().unwrap_or(0);
        let leaders: Vec<&(Option<PlayerId>, usize, Option<PlayerId>)> =
            tally.iter().filter(|(_, count, _)| *count == top).collect();

        let mut messages = Vec::new();
        let decision = match (cohort.phase, leaders.as_slice()) {
            (_, []) => None,
            (_, [only]) => Some(*only),
            (Phase::Day, _) => {
                messages.push(Message::channel(
                    "the vote was tied, so nobody was lynched today.",
                ));
                None
            }
            // 夜の同票は先に票が入った方
            (Phase::Night, [first, ..]) => Some(*first),
        };

        match decision {
            Some((Some(target), count, first_voter)) => {
                info!("vote decided on {} with {} ballots", target, count);
                let actor = match cohort.phase {
                    Phase::Night => first_voter.as_deref(),
                    Phase::Day => None,
                };
                let kill = Action::new(ActionKind::Kill, actor, Some(target.as_str()));
                self.pending.push(kill);
            }
            Some((None, _, _)) | None => {
                if messages.is_empty() {
                    match cohort.phase {
                        Phase::Day => messages.push(Message::channel(
                            "the town decided not to lynch anyone today.",
                        )),
                        Phase::Night => {
                            for member in self.cohort_members(cohort) {
                                messages.push(Message::player(
                                    &member,
                                    "you decided not to kill anyone tonight.",
                                ));
                            }
                        }
                    }
                }
            }
        }

        self.completed.extend(ballots);
        messages
    }

    fn apply_kill(&mut self, action: &Action) -> Vec<Message> {
        let Some(target) = action.target.as_deref() else {
            return Vec::new();
        };
        if !self.is_alive(target) {
            return Vec::new();
        }
        if action.kind == ActionKind::Kill && is_protected(target, &self.pending, &self.completed) {
            info!("kill on {} was prevented", target);
            return vec![Message::player(
                target,
                "someone tried to kill you, but you survived!",
            )];
        }
        self.kill_player(action.actor.as_deref(), target)
    }

    /// 対象を殺し、昼夜と実行者に応じた告知を返す
    pub(crate) fn kill_player(&mut self, actor: Option<&str>, target: &str) -> Vec<Message> {
        let phase = self.phase_kind();
        let actor_nick = actor.map(|a| self.nick(a));
        let emoji = random_emoji(&mut *self.rng);

        let Some(player) = self.player_mut(target) else {
            return Vec::new();
        };
        if !player.is_alive {
            return Vec::new();
        }
        player.is_alive = false;
        let nick = player.nick.clone();
        let were = if player.is_yandere() { " " } else { " NOT " };
        info!("{} ({}) died", nick, player.role_name());

        let text = match (phase, actor_nick) {
            (Some(Phase::Night), _) => {
                format!("{} was brutally murdered! who could've done this {}", nick, emoji)
            }
            (_, Some(actor)) => format!(
                "{} runs {} through with a katana, and it turns out they were{}a yandere!",
                actor, nick, were
            ),
            (_, None) => format!(
                "{} was lynched, and it turns out they were{}a yandere!",
                nick, were
            ),
        };
        vec![Message::channel(text)]
    }

    fn apply_guard(&mut self, action: &Action) -> Vec<Message> {
        let (Some(actor), Some(target)) = (action.actor.as_deref(), action.target.as_deref()) else {
            return Vec::new();
        };
        let safe = self
            .player(target)
            .and_then(|p| p.role.as_ref())
            .map_or(true, |r| r.safe_to_guard());
        let messages = vec![Message::player(
            actor,
            format!("you stood guard over {} tonight.", self.nick(target)),
        )];
        if !safe {
            debug!("{} guarded {} and will not survive", actor, target);
            self.pending
                .push(Action::new(ActionKind::UnstoppableKill, Some(target), Some(actor)));
        }
        messages
    }

    fn apply_stalk(&mut self, action: &Action) -> Vec<Message> {
        let (Some(actor), Some(target)) = (action.actor.as_deref(), action.target.as_deref()) else {
            return Vec::new();
        };

        let mut hid = false;
        let mut visited: Vec<String> = Vec::new();
        for seen in actions_by(target, &self.pending, &self.completed) {
            if seen.kind == ActionKind::Hide {
                hid = true;
                continue;
            }
            if let Some(place) = seen.target.as_deref().filter(|t| *t != target) {
                let nick = self.nick(place);
                if !visited.contains(&nick) {
                    visited.push(nick);
                }
            }
        }

        let target_nick = self.nick(target);
        let text = match (visited.is_empty(), hid) {
            (false, true) => format!(
                "{} hid at home, but not before visiting {}.",
                target_nick,
                join_names(&visited)
            ),
            (false, false) => format!("{} visited {}.", target_nick, join_names(&visited)),
            (true, true) => format!("{} stayed home, hiding.", target_nick),
            (true, false) => format!("{} didn't visit anyone.", target_nick),
        };
        vec![Message::player(actor, text)]
    }

    fn apply_check(&mut self, action: &Action) -> Vec<Message> {
        let (Some(actor), Some(target)) = (action.actor.as_deref(), action.target.as_deref()) else {
            return Vec::new();
        };
        match self.player(target).and_then(|p| p.alignment()) {
            Some(alignment) => vec![Message::player(
                actor,
                format!("{} is {}.", self.nick(target), alignment),
            )],
            None => Vec::new(),
        }
    }

    fn apply_spy(&mut self, action: &Action) -> Vec<Message> {
        let (Some(actor), Some(target)) = (action.actor.as_deref(), action.target.as_deref()) else {
            return Vec::new();
        };
        match self.player(target).and_then(|p| p.role.as_ref()) {
            Some(role) => vec![Message::player(
                actor,
                format!("{} is a {}.", self.nick(target), role.appear_as),
            )],
            None => Vec::new(),
        }
    }

    fn apply_upgrade(&mut self, action: &Action) -> Vec<Message> {
        let (Some(actor), Some(target)) = (action.actor.as_deref(), action.target.as_deref()) else {
            return Vec::new();
        };
        let target_nick = self.nick(target);
        let upgrades = self
            .player(target)
            .and_then(|p| p.role.as_ref())
            .map(|r| r.upgrades.clone());

        match upgrades {
            Some(Upgrades::Roles(kinds)) if !kinds.is_empty() => {
                let Some(kind) = kinds.choose(&mut *self.rng).copied() else {
                    return Vec::new();
                };
                let role = kind.instantiate(&mut *self.rng);
                let text = format!("you've been upgraded! you're now a {}. {}", role.name(), role.description());
                info!("{} upgraded {} to {}", actor, target, role.name());
                if let Some(player) = self.player_mut(target) {
                    player.role = Some(role);
                }
                vec![
                    Message::player(target, text),
                    Message::player(actor, format!("you upgraded {}.", target_nick)),
                ]
            }
            Some(Upgrades::Abilities(abilities)) if !abilities.is_empty() => {
                let gained = abilities
                    .iter()
                    .map(|a| a.description())
                    .collect::<Vec<_>>()
                    .join(", and to ");
                if let Some(role) = self.player_mut(target).and_then(|p| p.role.as_mut()) {
                    role.abilities.extend(abilities);
                    role.upgrades = Upgrades::Terminal;
                }
                info!("{} upgraded {} with new abilities", actor, target);
                vec![
                    Message::player(target, format!("you've been upgraded! you can now also {}.", gained)),
                    Message::player(actor, format!("you upgraded {}.", target_nick)),
                ]
            }
            _ => vec![Message::player(
                actor,
                format!("{} can't be upgraded any further.", target_nick),
            )],
        }
    }

    fn apply_reveal(&mut self, action: &Action) -> Vec<Message> {
        let Some(actor) = action.actor.as_deref() else {
            return Vec::new();
        };
        let Some(player) = self.player(actor) else {
            return Vec::new();
        };
        vec![Message::channel(format!(
            "{} reveals that they are a {}!",
            player.nick,
            player.role_name()
        ))]
    }
}
