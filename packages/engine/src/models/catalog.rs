//! 役職テーブル。役職はクラス階層ではなく、このテーブルの1行として表現する。

use super::ability::{AbilityKind, AbilitySpec, Uses};
use super::phase::Phase;
use super::role::{Alignment, RoleKind};

const DAY: &[Phase] = &[Phase::Day];
const NIGHT: &[Phase] = &[Phase::Night];
const DAY_AND_NIGHT: &[Phase] = &[Phase::Day, Phase::Night];

/// 全員が持つ昼の公開投票 (処刑)
const LYNCH: AbilitySpec = AbilitySpec::every(AbilityKind::Vote, DAY).public();
/// ヤンデレの夜の投票 (襲撃)
const NIGHT_VOTE: AbilitySpec = AbilitySpec::every(AbilityKind::Vote, NIGHT);

// 配列リテラルの中で昇格できるよう、構造体リテラルに展開する
macro_rules! every {
    ($kind:ident, $phases:expr) => {
        AbilitySpec {
            kind: AbilityKind::$kind,
            uses: Uses::Unlimited,
            phases: $phases,
            command_public: false,
        }
    };
}

macro_rules! once {
    ($kind:ident, $phases:expr) => {
        AbilitySpec {
            kind: AbilityKind::$kind,
            uses: Uses::Limited(1),
            phases: $phases,
            command_public: false,
        }
    };
}

#[derive(Debug, Clone, Copy)]
pub enum UpgradeSpec {
    Terminal,
    Roles(&'static [RoleKind]),
    Abilities(&'static [AbilitySpec]),
}

#[derive(Debug)]
pub struct RoleTemplate {
    pub kind: RoleKind,
    pub name: &'static str,
    pub alignment: Alignment,
    pub is_yandere: bool,
    pub abilities: &'static [AbilitySpec],
    pub upgrades: UpgradeSpec,
    /// 空なら本来の役職名で見える
    pub appearances: &'static [&'static str],
    /// 護衛した騎士が死なずに済むか
    pub safe_to_guard: bool,
    /// 配役時の重み (同じ陣営プール内での相対値)
    pub weight: u32,
}

const fn good(
    kind: RoleKind,
    name: &'static str,
    abilities: &'static [AbilitySpec],
    upgrades: UpgradeSpec,
    weight: u32,
) -> RoleTemplate {
    RoleTemplate {
        kind,
        name,
        alignment: Alignment::Good,
        is_yandere: false,
        abilities,
        upgrades,
        appearances: &[],
        safe_to_guard: true,
        weight,
    }
}

const fn neutral(
    kind: RoleKind,
    name: &'static str,
    abilities: &'static [AbilitySpec],
    upgrades: UpgradeSpec,
) -> RoleTemplate {
    RoleTemplate {
        kind,
        name,
        alignment: Alignment::Neutral,
        is_yandere: false,
        abilities,
        upgrades,
        appearances: &[],
        safe_to_guard: true,
        weight: 1,
    }
}

const fn yandere(
    kind: RoleKind,
    name: &'static str,
    abilities: &'static [AbilitySpec],
    upgrades: UpgradeSpec,
    safe_to_guard: bool,
) -> RoleTemplate {
    RoleTemplate {
        kind,
        name,
        alignment: Alignment::Evil,
        is_yandere: true,
        abilities,
        upgrades,
        appearances: &[],
        safe_to_guard,
        weight: 1,
    }
}

const fn disguised(template: RoleTemplate, appearances: &'static [&'static str]) -> RoleTemplate {
    RoleTemplate {
        appearances,
        ..template
    }
}

use UpgradeSpec::{Abilities, Roles, Terminal};

pub static CATALOG: [RoleTemplate; 35] = [
    good(
        RoleKind::Hikikomori,
        "hikikomori",
        &[every!(Hide, NIGHT), LYNCH],
        Abilities(&[once!(Check, NIGHT)]),
        2,
    ),
    good(
        RoleKind::Tokokyohi,
        "tokokyohi",
        &[once!(Hide, NIGHT), LYNCH],
        Roles(&[RoleKind::Hikikomori]),
        4,
    ),
    good(
        RoleKind::Shogun,
        "shogun",
        &[every!(Kill, NIGHT), LYNCH],
        Abilities(&[once!(Guard, NIGHT)]),
        2,
    ),
    good(
        RoleKind::Warrior,
        "warrior",
        &[once!(Kill, NIGHT), LYNCH],
        Roles(&[RoleKind::Shogun]),
        4,
    ),
    good(
        RoleKind::Samurai,
        "samurai",
        &[every!(Kill, DAY), LYNCH],
        Abilities(&[once!(Hide, NIGHT)]),
        2,
    ),
    good(
        RoleKind::Ronin,
        "ronin",
        &[once!(Kill, DAY), LYNCH],
        Roles(&[RoleKind::Samurai]),
        4,
    ),
    good(
        RoleKind::Shisho,
        "shisho",
        &[every!(Upgrade, DAY), LYNCH],
        Abilities(&[once!(Spy, DAY)]),
        2,
    ),
    good(
        RoleKind::Sensei,
        "sensei",
        &[once!(Upgrade, DAY), LYNCH],
        Roles(&[RoleKind::Shisho]),
        4,
    ),
    good(
        RoleKind::Idol,
        "idol",
        &[every!(Reveal, DAY), LYNCH],
        Roles(&[RoleKind::Sensei, RoleKind::Ronin]),
        2,
    ),
    good(
        RoleKind::Janitor,
        "janitor",
        &[LYNCH],
        Roles(&[RoleKind::Idol]),
        4,
    ),
    good(
        RoleKind::Spy,
        "spy",
        &[every!(Spy, NIGHT), LYNCH],
        Abilities(&[once!(Stalk, NIGHT)]),
        1,
    ),
    good(
        RoleKind::DaySpy,
        "dayspy",
        &[every!(Spy, DAY), LYNCH],
        Abilities(&[once!(Stalk, NIGHT)]),
        1,
    ),
    good(
        RoleKind::Esper,
        "esper",
        &[once!(Spy, DAY_AND_NIGHT), LYNCH],
        Roles(&[RoleKind::Spy, RoleKind::DaySpy]),
        4,
    ),
    good(
        RoleKind::Stalker,
        "stalker",
        &[every!(Stalk, NIGHT), LYNCH],
        Abilities(&[once!(Check, NIGHT)]),
        2,
    ),
    good(
        RoleKind::Witness,
        "witness",
        &[once!(Stalk, NIGHT), LYNCH],
        Roles(&[RoleKind::Stalker]),
        4,
    ),
    disguised(
        good(
            RoleKind::Detective,
            "detective",
            &[every!(Check, NIGHT), LYNCH],
            Abilities(&[once!(Spy, NIGHT)]),
            2,
        ),
        &["yandere", "yandere spy", "yandere doppelganger", "strawberry yandere"],
    ),
    disguised(
        good(
            RoleKind::Snoop,
            "snoop",
            &[once!(Check, NIGHT), LYNCH],
            Roles(&[RoleKind::Detective]),
            4,
        ),
        &[
            "yandere",
            "psychic yandere",
            "yandere doppelganger",
            "vanilla yandere",
            "yandere senpai",
        ],
    ),
    good(
        RoleKind::Guardian,
        "guardian",
        &[every!(Guard, NIGHT), LYNCH],
        Abilities(&[once!(Hide, NIGHT)]),
        2,
    ),
    good(
        RoleKind::Nurse,
        "nurse",
        &[once!(Guard, NIGHT), LYNCH],
        Roles(&[RoleKind::Guardian]),
        4,
    ),
    good(
        RoleKind::Civilian,
        "civilian",
        &[LYNCH],
        Roles(&[
            RoleKind::Tokokyohi,
            RoleKind::Warrior,
            RoleKind::Janitor,
            RoleKind::Esper,
            RoleKind::Witness,
            RoleKind::Snoop,
            RoleKind::Nurse,
        ]),
        6,
    ),
    disguised(
        good(
            RoleKind::Tsundere,
            "tsundere",
            &[LYNCH],
            Roles(&[RoleKind::Hikikomori]),
            6,
        ),
        &[
            "yandere",
            "psychic yandere",
            "yandere ronin",
            "yandere senpai",
            "yandere doppelganger",
            "chocolate yandere",
        ],
    ),
    neutral(
        RoleKind::PsychicIdiot,
        "psychic idiot",
        &[every!(Spy, DAY_AND_NIGHT), LYNCH],
        Terminal,
    ),
    neutral(
        RoleKind::IdiotSavant,
        "idiot savant",
        &[every!(Upgrade, DAY), LYNCH],
        Terminal,
    ),
    neutral(RoleKind::Myth, "myth", &[every!(Kill, DAY), LYNCH], Terminal),
    neutral(
        RoleKind::NullCarrier,
        "null carrier",
        &[every!(Hide, NIGHT), LYNCH],
        Terminal,
    ),
    neutral(
        RoleKind::BakaRanger,
        "baka ranger",
        &[LYNCH],
        Roles(&[
            RoleKind::PsychicIdiot,
            RoleKind::IdiotSavant,
            RoleKind::Myth,
            RoleKind::NullCarrier,
        ]),
    ),
    yandere(
        RoleKind::YandereSpy,
        "yandere spy",
        &[every!(Spy, DAY), NIGHT_VOTE, LYNCH],
        Terminal,
        false,
    ),
    yandere(
        RoleKind::YandereSenpai,
        "yandere senpai",
        &[once!(Upgrade, DAY), NIGHT_VOTE, LYNCH],
        Terminal,
        false,
    ),
    yandere(
        RoleKind::YandereRonin,
        "yandere ronin",
        &[once!(Kill, DAY), NIGHT_VOTE, LYNCH],
        Terminal,
        false,
    ),
    yandere(
        RoleKind::PsychicYandere,
        "psychic yandere",
        &[once!(Spy, DAY), NIGHT_VOTE, LYNCH],
        Roles(&[RoleKind::YandereSpy]),
        false,
    ),
    disguised(
        yandere(
            RoleKind::CloakedPsychicYandere,
            "cloaked psychic yandere",
            &[once!(Spy, DAY), NIGHT_VOTE, LYNCH],
            Terminal,
            true,
        ),
        &[
            "civilian",
            "dayspy",
            "tokokyohi",
            "hikikomori",
            "nurse",
            "guardian",
            "warrior",
            "esper",
            "spy",
            "shogun",
        ],
    ),
    disguised(
        yandere(
            RoleKind::CloakedYandere,
            "cloaked yandere",
            &[NIGHT_VOTE, LYNCH],
            Roles(&[RoleKind::CloakedPsychicYandere]),
            true,
        ),
        &[
            "civilian",
            "tokokyohi",
            "hikikomori",
            "nurse",
            "guardian",
            "warrior",
            "witness",
            "stalker",
            "shogun",
        ],
    ),
    yandere(
        RoleKind::YandereDoppelganger,
        "yandere doppelganger",
        &[NIGHT_VOTE, LYNCH],
        Roles(&[RoleKind::CloakedYandere]),
        false,
    ),
    yandere(
        RoleKind::Yandere,
        "yandere",
        &[NIGHT_VOTE, LYNCH],
        Roles(&[
            RoleKind::YandereDoppelganger,
            RoleKind::CloakedYandere,
            RoleKind::PsychicYandere,
            RoleKind::YandereSpy,
            RoleKind::YandereRonin,
            RoleKind::YandereSenpai,
        ]),
        false,
    ),
    disguised(
        yandere(
            RoleKind::Trap,
            "trap",
            &[LYNCH],
            Roles(&[RoleKind::CloakedYandere, RoleKind::BakaRanger]),
            true,
        ),
        &[
            "civilian",
            "tokokyohi",
            "hikikomori",
            "nurse",
            "guardian",
            "warrior",
            "witness",
            "snoop",
            "detective",
        ],
    ),
];

/// ヤンデレの配役プール (全て同じ重み)
pub fn yandere_pool() -> Vec<RoleKind> {
    CATALOG
        .iter()
        .filter(|t| t.is_yandere)
        .map(|t| t.kind)
        .collect()
}

/// 村人・中立の配役プールと重み
pub fn town_pool() -> Vec<(RoleKind, u32)> {
    CATALOG
        .iter()
        .filter(|t| !t.is_yandere)
        .map(|t| (t.kind, t.weight))
        .collect()
}
