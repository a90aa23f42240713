use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Day,
    Night,
}

impl Phase {
    /// フェーズ番号とロックイン時の人数から昼夜を決める。
    /// 奇数人数は夜から、偶数人数は昼から始まる。
    pub fn from_parity(phase: u32, roster_size: usize) -> Phase {
        if (phase as usize + roster_size) % 2 == 1 {
            Phase::Night
        } else {
            Phase::Day
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Day => "day",
            Phase::Night => "night",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
