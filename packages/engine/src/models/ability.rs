use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKind, Cohort};
use super::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Vote,
    Kill,
    Guard,
    Hide,
    Stalk,
    Check,
    Spy,
    Upgrade,
    Reveal,
}

impl AbilityKind {
    /// コマンド名。プレイヤーはこの前方一致で能力を指定する
    pub fn name(&self) -> &'static str {
        match self {
            AbilityKind::Vote => "vote",
            AbilityKind::Kill => "kill",
            AbilityKind::Guard => "guard",
            AbilityKind::Hide => "hide",
            AbilityKind::Stalk => "stalk",
            AbilityKind::Check => "check",
            AbilityKind::Spy => "spy",
            AbilityKind::Upgrade => "upgrade",
            AbilityKind::Reveal => "reveal",
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            AbilityKind::Hide => "hide",
            AbilityKind::Reveal => "reveal",
            AbilityKind::Vote => "vote <user>",
            AbilityKind::Kill => "kill <user>",
            AbilityKind::Guard => "guard <user>",
            AbilityKind::Stalk => "stalk <user>",
            AbilityKind::Check => "check <user>",
            AbilityKind::Spy => "spy <user>",
            AbilityKind::Upgrade => "upgrade <user>",
        }
    }

    pub fn action_description(&self) -> &'static str {
        match self {
            AbilityKind::Vote => "vote with others to kill",
            AbilityKind::Kill => "single-handedly kill a player of their choosing",
            AbilityKind::Guard => "protect a player from any danger",
            AbilityKind::Hide => "hide from killers",
            AbilityKind::Stalk => "learn where another player goes",
            AbilityKind::Check => "inspect another player's alignment",
            AbilityKind::Spy => {
                "inspect another player's role (be careful of disguised roles which may appear as other roles!)"
            }
            AbilityKind::Upgrade => "upgrade any other player",
            AbilityKind::Reveal => "reveal to all other players",
        }
    }

    pub fn requires_target(&self) -> bool {
        !matches!(self, AbilityKind::Hide | AbilityKind::Reveal)
    }

    /// フェーズ終了時にしか意味を持たない能力。即時適用せず必ずキューに積む
    pub fn is_phase_exclusive(&self) -> bool {
        matches!(
            self,
            AbilityKind::Vote
                | AbilityKind::Guard
                | AbilityKind::Hide
                | AbilityKind::Stalk
                | AbilityKind::Check
        )
    }
}

/// 残り使用回数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uses {
    Unlimited,
    Limited(u32),
}

impl Uses {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Uses::Limited(0))
    }

    pub fn consume(&mut self) {
        if let Uses::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// 役職テーブルに置く能力の雛形
#[derive(Debug, Clone, Copy)]
pub struct AbilitySpec {
    pub kind: AbilityKind,
    pub uses: Uses,
    pub phases: &'static [Phase],
    pub command_public: bool,
}

impl AbilitySpec {
    pub const fn every(kind: AbilityKind, phases: &'static [Phase]) -> Self {
        Self {
            kind,
            uses: Uses::Unlimited,
            phases,
            command_public: false,
        }
    }

    pub const fn once(kind: AbilityKind, phases: &'static [Phase]) -> Self {
        Self {
            kind,
            uses: Uses::Limited(1),
            phases,
            command_public: false,
        }
    }

    pub const fn public(self) -> Self {
        Self {
            command_public: true,
            ..self
        }
    }
}

/// プレイヤーごとの能力インスタンス。使用回数はここで管理する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub uses: Uses,
    pub phases: Vec<Phase>,
    pub command_public: bool,
}

impl From<&AbilitySpec> for Ability {
    fn from(spec: &AbilitySpec) -> Self {
        Ability {
            kind: spec.kind,
            uses: spec.uses,
            phases: spec.phases.to_vec(),
            command_public: spec.command_public,
        }
    }
}

impl Ability {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_usable_in(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn cohort(&self, phase: Phase) -> Option<Cohort> {
        (self.kind == AbilityKind::Vote).then(|| Cohort {
            public: self.command_public,
            phase,
        })
    }

    /// 能力からアクションを組み立てる
    pub fn action(&self, index: usize, actor: &str, target: Option<&str>, phase: Phase) -> Action {
        let kind = match self.kind {
            AbilityKind::Vote => ActionKind::VoteToKill(Cohort {
                public: self.command_public,
                phase,
            }),
            AbilityKind::Kill => ActionKind::Kill,
            AbilityKind::Guard => ActionKind::Guard,
            AbilityKind::Hide => ActionKind::Hide,
            AbilityKind::Stalk => ActionKind::Stalk,
            AbilityKind::Check => ActionKind::Check,
            AbilityKind::Spy => ActionKind::Spy,
            AbilityKind::Upgrade => ActionKind::Upgrade,
            AbilityKind::Reveal => ActionKind::Reveal,
        };
        Action::new(kind, Some(actor), target).with_ability(index)
    }

    pub fn description(&self) -> String {
        let phases = self
            .phases
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(" or ");
        let frequency = match self.uses {
            Uses::Unlimited => format!(
                "once every {}",
                self.phases.first().map_or("phase", |p| p.name())
            ),
            Uses::Limited(1) => "once per game".to_string(),
            Uses::Limited(0) => "no more times this game".to_string(),
            Uses::Limited(n) => format!("{} times per game", n),
        };
        format!(
            "{} during the {}, {}, using the command `{}`",
            self.kind.action_description(),
            phases,
            frequency,
            self.kind.command()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_uses_bottom_out() {
        let mut uses = Uses::Limited(1);
        assert!(!uses.is_exhausted());
        uses.consume();
        assert!(uses.is_exhausted());
        uses.consume();
        assert_eq!(uses, Uses::Limited(0));

        let mut unlimited = Uses::Unlimited;
        unlimited.consume();
        assert!(!unlimited.is_exhausted());
    }

    #[test]
    fn test_description_mentions_phase_and_command() {
        let hide = Ability::from(&AbilitySpec::once(AbilityKind::Hide, &[Phase::Night]));
        assert_eq!(
            hide.description(),
            "hide from killers during the night, once per game, using the command `hide`"
        );
        let spy = Ability::from(&AbilitySpec::every(
            AbilityKind::Spy,
            &[Phase::Day, Phase::Night],
        ));
        assert!(spy.description().contains("during the day or night, once every day"));
    }

    #[test]
    fn test_vote_action_carries_cohort() {
        let vote = Ability::from(&AbilitySpec::every(AbilityKind::Vote, &[Phase::Day]).public());
        let action = vote.action(1, "a", Some("b"), Phase::Day);
        assert_eq!(
            action.kind,
            ActionKind::VoteToKill(Cohort {
                public: true,
                phase: Phase::Day
            })
        );
        assert_eq!(action.ability_index, Some(1));
        assert!(vote.cohort(Phase::Day).is_some());
    }
}
