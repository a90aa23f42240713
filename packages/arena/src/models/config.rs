use std::env;

/// コンソールホスト自体の設定。ゲームの設定は `GameConfig` 側にある
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// 受け付けるアリーナ (チャンネル) の一覧
    pub arenas: Vec<String>,
    /// `tick` を呼ぶ間隔
    pub tick_ms: u64,
    // `status` で生存者の役職まで見せるかどうか
    pub show_player_roles: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arenas: vec!["#opendere".to_string()],
            tick_ms: 1000,
            show_player_roles: cfg!(debug_assertions),
        }
    }
}

impl ArenaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let arenas = env::var("OPENDERE_ARENAS")
            .ok()
            .map(|v| parse_arenas(&v))
            .filter(|arenas| !arenas.is_empty())
            .unwrap_or(defaults.arenas);
        let tick_ms = env::var("OPENDERE_TICK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.tick_ms);
        let show_player_roles = env::var("OPENDERE_SHOW_PLAYER_ROLES")
            .map(|v| v == "true")
            .unwrap_or(defaults.show_player_roles);

        Self {
            arenas,
            tick_ms,
            show_player_roles,
        }
    }

    pub fn is_arena(&self, name: &str) -> bool {
        self.arenas.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// カンマ区切りのアリーナ名。`#` がなければ付ける
pub fn parse_arenas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| {
            if a.starts_with('#') {
                a.to_string()
            } else {
                format!("#{}", a)
            }
        })
        .collect()
}
