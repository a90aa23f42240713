use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::{Alignment, Role};

/// チャット側が払い出す不透明なID (IRCのhostmask、DiscordのユーザーIDなど)
pub type PlayerId = String;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nick: String,
    pub role: Option<Role>,
    pub is_alive: bool,
    pub alignment_override: Option<Alignment>,
}

impl Player {
    pub fn new(id: &str, nick: &str) -> Self {
        Self {
            id: id.to_string(),
            nick: nick.to_string(),
            role: None,
            is_alive: true,
            alignment_override: None,
        }
    }

    /// 占いで見える陣営。上書きがあればそちらを優先する
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment_override
            .or_else(|| self.role.as_ref().map(|r| r.alignment()))
    }

    pub fn is_yandere(&self) -> bool {
        self.role.as_ref().map_or(false, |r| r.is_yandere())
    }

    pub fn role_name(&self) -> &str {
        self.role.as_ref().map_or("nobody", |r| r.name())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nick)
    }
}
