use once_cell::sync::Lazy;

use crate::models::config::ArenaConfig;
use opendere_engine::GameConfig;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);

/// 環境変数から一度だけ読む設定
pub struct Config {
    pub arena: ArenaConfig,
    pub game: GameConfig,
}

impl Config {
    fn new() -> Self {
        Self {
            arena: ArenaConfig::from_env(),
            game: GameConfig::from_env(),
        }
    }
}
