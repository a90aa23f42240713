use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ability::{Ability, AbilityKind};
use super::catalog::{RoleTemplate, UpgradeSpec, CATALOG};
use super::phase::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
    Neutral,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Good => write!(f, "good"),
            Alignment::Evil => write!(f, "evil"),
            Alignment::Neutral => write!(f, "neutral"),
        }
    }
}

/// 役職の種類。並び順は `CATALOG` と一致していなければならない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleKind {
    // 村人陣営
    Hikikomori,
    Tokokyohi,
    Shogun,
    Warrior,
    Samurai,
    Ronin,
    Shisho,
    Sensei,
    Idol,
    Janitor,
    Spy,
    DaySpy,
    Esper,
    Stalker,
    Witness,
    Detective,
    Snoop,
    Guardian,
    Nurse,
    Civilian,
    Tsundere,
    // 中立
    PsychicIdiot,
    IdiotSavant,
    Myth,
    NullCarrier,
    BakaRanger,
    // ヤンデレ陣営
    YandereSpy,
    YandereSenpai,
    YandereRonin,
    PsychicYandere,
    CloakedPsychicYandere,
    CloakedYandere,
    YandereDoppelganger,
    Yandere,
    Trap,
}

impl RoleKind {
    pub fn template(&self) -> &'static RoleTemplate {
        &CATALOG[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.template().name
    }

    pub fn is_yandere(&self) -> bool {
        self.template().is_yandere
    }

    /// 役職の新しいインスタンスを作る。能力は毎回複製されるので
    /// 同じ役職のプレイヤー同士で使用回数が共有されることはない。
    pub fn instantiate<R: Rng + ?Sized>(&self, rng: &mut R) -> Role {
        let template = self.template();
        let appear_as = template
            .appearances
            .choose(rng)
            .copied()
            .unwrap_or(template.name);
        let upgrades = match template.upgrades {
            UpgradeSpec::Terminal => Upgrades::Terminal,
            UpgradeSpec::Roles(kinds) => Upgrades::Roles(kinds.to_vec()),
            UpgradeSpec::Abilities(specs) => {
                Upgrades::Abilities(specs.iter().map(Ability::from).collect())
            }
        };
        Role {
            kind: *self,
            abilities: template.abilities.iter().map(Ability::from).collect(),
            upgrades,
            appear_as: appear_as.to_string(),
        }
    }
}

/// 昇格先。役職の入れ替えか能力の追加のどちらか一方
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Upgrades {
    Terminal,
    Roles(Vec<RoleKind>),
    Abilities(Vec<Ability>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub kind: RoleKind,
    pub abilities: Vec<Ability>,
    pub upgrades: Upgrades,
    /// スパイに見える役職名
    pub appear_as: String,
}

impl Role {
    pub fn template(&self) -> &'static RoleTemplate {
        self.kind.template()
    }

    pub fn name(&self) -> &'static str {
        self.template().name
    }

    pub fn alignment(&self) -> Alignment {
        self.template().alignment
    }

    pub fn is_yandere(&self) -> bool {
        self.template().is_yandere
    }

    pub fn safe_to_guard(&self) -> bool {
        self.template().safe_to_guard
    }

    /// 夜の投票で殺害に参加できるか (トラップは参加できない)
    pub fn can_night_kill(&self) -> bool {
        self.abilities
            .iter()
            .any(|a| a.kind == AbilityKind::Vote && a.is_usable_in(Phase::Night))
    }

    pub fn description(&self) -> String {
        let abilities = self
            .abilities
            .iter()
            .filter(|a| !a.command_public)
            .map(|a| a.description())
            .collect::<Vec<_>>()
            .join(", and to ");
        let spy_warning = if self.abilities.iter().any(|a| a.kind == AbilityKind::Spy) {
            "be careful of disguised roles which may appear as other roles. "
        } else {
            ""
        };
        let disguise = if self.appear_as != self.name() {
            format!("you appear as a {}.", self.appear_as)
        } else {
            String::new()
        };
        format!(
            "a {} has the ability to {}. {}{}",
            self.name(),
            if abilities.is_empty() {
                "...do nothing special. :( sorry".to_string()
            } else {
                abilities
            },
            spy_warning,
            disguise
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roles_dont_share_ability_objects() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut hik0 = RoleKind::Hikikomori.instantiate(&mut rng);
        let hik1 = RoleKind::Hikikomori.instantiate(&mut rng);
        assert_eq!(hik0.abilities.len(), hik1.abilities.len());

        hik0.abilities[0].uses.consume();
        hik0.abilities.push(hik1.abilities[0].clone());
        assert_ne!(hik0.abilities.len(), hik1.abilities.len());
        assert_eq!(hik1.abilities.len(), 2);
    }

    #[test]
    fn test_disguise_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let trap = RoleKind::Trap.instantiate(&mut rng);
            assert!(trap.template().appearances.contains(&trap.appear_as.as_str()));
            assert_ne!(trap.appear_as, "trap");
        }
        let civilian = RoleKind::Civilian.instantiate(&mut rng);
        assert_eq!(civilian.appear_as, "civilian");
    }

    #[test]
    fn test_description_hides_public_vote() {
        let mut rng = StdRng::seed_from_u64(5);
        let civilian = RoleKind::Civilian.instantiate(&mut rng);
        assert_eq!(
            civilian.description(),
            "a civilian has the ability to ...do nothing special. :( sorry. "
        );
        let yandere = RoleKind::Yandere.instantiate(&mut rng);
        assert!(yandere.description().contains("vote with others to kill during the night"));
        assert!(yandere.can_night_kill());
        assert!(!RoleKind::Trap.instantiate(&mut rng).can_night_kill());
    }
}
