pub mod ability;
pub mod action;
pub mod catalog;
pub mod config;
pub mod game;
pub mod message;
pub mod phase;
pub mod player;
pub mod role;

pub use ability::{Ability, AbilityKind, Uses};
pub use action::{Action, ActionKind, Cohort};
pub use config::GameConfig;
pub use game::{Game, GameSnapshot, PlayerSnapshot};
pub use message::{Message, Recipient};
pub use phase::Phase;
pub use player::{Player, PlayerId};
pub use role::{Alignment, Role, RoleKind, Upgrades};
