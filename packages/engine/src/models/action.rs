use serde::{Deserialize, Serialize};

use super::ability::AbilityKind;
use super::phase::Phase;
use super::player::PlayerId;

/// 投票グループ。(公開コマンドか, フェーズ) が同じ投票はひとつの集計にまとめられる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cohort {
    pub public: bool,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Kill,
    UnstoppableKill,
    Guard,
    Hide,
    VoteToKill(Cohort),
    Stalk,
    Check,
    Spy,
    Upgrade,
    Reveal,
}

impl ActionKind {
    pub fn is_kill(&self) -> bool {
        matches!(self, ActionKind::Kill | ActionKind::UnstoppableKill)
    }

    pub fn is_vote(&self) -> bool {
        matches!(self, ActionKind::VoteToKill(_))
    }

    pub fn cohort(&self) -> Option<Cohort> {
        match self {
            ActionKind::VoteToKill(cohort) => Some(*cohort),
            _ => None,
        }
    }

    /// このアクションを生む能力。システムが作る確定キルには対応する能力がない
    pub fn ability_kind(&self) -> Option<AbilityKind> {
        match self {
            ActionKind::Kill => Some(AbilityKind::Kill),
            ActionKind::UnstoppableKill => None,
            ActionKind::Guard => Some(AbilityKind::Guard),
            ActionKind::Hide => Some(AbilityKind::Hide),
            ActionKind::VoteToKill(_) => Some(AbilityKind::Vote),
            ActionKind::Stalk => Some(AbilityKind::Stalk),
            ActionKind::Check => Some(AbilityKind::Check),
            ActionKind::Spy => Some(AbilityKind::Spy),
            ActionKind::Upgrade => Some(AbilityKind::Upgrade),
            ActionKind::Reveal => Some(AbilityKind::Reveal),
        }
    }
}

/// フェーズ中に生成されるアクション。
/// `actor` が `None` のものは誰の仕業でもない (昼の処刑など)。
/// 投票で `target` が `None` なら棄権を表す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub actor: Option<PlayerId>,
    pub target: Option<PlayerId>,
    pub kind: ActionKind,
    pub ability_index: Option<usize>,
}

impl Action {
    pub fn new(kind: ActionKind, actor: Option<&str>, target: Option<&str>) -> Self {
        Action {
            actor: actor.map(str::to_string),
            target: target.map(str::to_string),
            kind,
            ability_index: None,
        }
    }

    pub fn with_ability(mut self, index: usize) -> Self {
        self.ability_index = Some(index);
        self
    }

    pub fn is_by(&self, id: &str) -> bool {
        self.actor.as_deref() == Some(id)
    }

    pub fn targets(&self, id: &str) -> bool {
        self.target.as_deref() == Some(id)
    }
}

/// `target` が今フェーズ守られているか。
/// 自分自身の `Hide` か、他人による `Guard` が未処理・処理済みのどちらかにあれば守られている。
pub fn is_protected(target: &str, pending: &[Action], completed: &[Action]) -> bool {
    pending.iter().chain(completed).any(|action| match action.kind {
        ActionKind::Hide => action.is_by(target),
        ActionKind::Guard => action.targets(target) && !action.is_by(target),
        _ => false,
    })
}

/// `player` がこのフェーズに行ったアクション (尾行で見えるもの)
pub fn actions_by<'a>(
    player: &'a str,
    pending: &'a [Action],
    completed: &'a [Action],
) -> impl Iterator<Item = &'a Action> + 'a {
    completed
        .iter()
        .chain(pending)
        .filter(move |action| action.is_by(player))
}

/// 同じ能力から出た未処理アクションの位置
pub fn find_pending(pending: &[Action], actor: &str, ability_index: usize) -> Option<usize> {
    pending
        .iter()
        .position(|a| a.is_by(actor) && a.ability_index == Some(ability_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_protects_only_the_hider() {
        let pending = vec![Action::new(ActionKind::Hide, Some("1"), None)];
        assert!(is_protected("1", &pending, &[]));
        assert!(!is_protected("2", &pending, &[]));
    }

    #[test]
    fn test_guard_is_seen_in_either_queue() {
        let completed = vec![Action::new(ActionKind::Guard, Some("2"), Some("1"))];
        assert!(is_protected("1", &[], &completed));
        assert!(is_protected("1", &completed, &[]));
        assert!(!is_protected("2", &[], &completed));
    }

    #[test]
    fn test_kill_does_not_protect() {
        let pending = vec![Action::new(ActionKind::Kill, Some("2"), Some("1"))];
        assert!(!is_protected("1", &pending, &[]));
    }

    #[test]
    fn test_actions_by_scans_completed_first() {
        let completed = vec![Action::new(ActionKind::Check, Some("1"), Some("3"))];
        let pending = vec![
            Action::new(ActionKind::Kill, Some("1"), Some("4")),
            Action::new(ActionKind::Kill, Some("2"), Some("4")),
        ];
        let visited: Vec<_> = actions_by("1", &pending, &completed)
            .filter_map(|a| a.target.clone())
            .collect();
        assert_eq!(visited, vec!["3".to_string(), "4".to_string()]);
    }
}
