use rand::rngs::StdRng;
use rand::SeedableRng;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use opendere_engine::{Clock, Game, GameConfig, SystemClock};

use crate::models::config::ArenaConfig;

/// アリーナごとに1つのゲームを持つ共有状態
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<Mutex<HashMap<String, Game>>>,
    pub game_config: Arc<GameConfig>,
    pub arena_config: Arc<ArenaConfig>,
    pub clock: Arc<dyn Clock>,
    /// 指定されていれば各ゲームの乱数をこの値から作る
    pub seed: Option<u64>,
}

impl AppState {
    pub fn new(game_config: GameConfig, arena_config: ArenaConfig, seed: Option<u64>) -> Self {
        Self::with_clock(game_config, arena_config, seed, Arc::new(SystemClock))
    }

    pub fn with_clock(
        game_config: GameConfig,
        arena_config: ArenaConfig,
        seed: Option<u64>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        AppState {
            games: Arc::new(Mutex::new(HashMap::new())),
            game_config: Arc::new(game_config),
            arena_config: Arc::new(arena_config),
            clock,
            seed,
        }
    }

    /// アリーナ用の新しいゲーム
    pub fn new_game(&self, arena: &str) -> Game {
        let config = self.game_config.for_channel(arena);
        match self.seed {
            Some(seed) => Game::with_seed(config, self.clock.clone(), seed),
            None => Game::with_ports(
                config,
                self.clock.clone(),
                Box::new(StdRng::from_entropy()),
            ),
        }
    }
}
