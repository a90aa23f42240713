use std::env;

use serde::{Deserialize, Serialize};

/// ゲーム1つ分の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// 公開コマンドを受け付けるチャンネル
    pub channel: String,
    /// 個別メッセージを受け取るボットの名前
    pub bot: String,
    /// ゲーム名 (参加コマンドにもなる)
    pub name: String,
    /// コマンドの接頭辞
    pub prefix: String,
    /// 最初のフェーズ中の途中参加を許すか
    pub allow_late: bool,
    /// 最初の参加者が来てから開始までの秒数
    pub lobby_seconds: i64,
    /// 開始直後のフェーズの秒数
    pub opening_phase_seconds: i64,
    pub day_seconds: i64,
    pub night_seconds: i64,
    /// ロビー中の延長で足される秒数
    pub lobby_extend_seconds: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            channel: "#opendere".to_string(),
            bot: "opendere".to_string(),
            name: "opendere".to_string(),
            prefix: "!".to_string(),
            allow_late: false,
            lobby_seconds: 60,
            opening_phase_seconds: 60,
            day_seconds: 300,
            night_seconds: 120,
            lobby_extend_seconds: 30,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            channel: env::var("OPENDERE_CHANNEL").unwrap_or(defaults.channel),
            bot: env::var("OPENDERE_BOT").unwrap_or(defaults.bot),
            name: env::var("OPENDERE_NAME").unwrap_or(defaults.name),
            prefix: env::var("OPENDERE_PREFIX").unwrap_or(defaults.prefix),
            allow_late: env::var("OPENDERE_ALLOW_LATE")
                .map(|v| v == "true")
                .unwrap_or(defaults.allow_late),
            lobby_seconds: seconds_from_env("OPENDERE_LOBBY_SECONDS", defaults.lobby_seconds),
            opening_phase_seconds: seconds_from_env(
                "OPENDERE_OPENING_PHASE_SECONDS",
                defaults.opening_phase_seconds,
            ),
            day_seconds: seconds_from_env("OPENDERE_DAY_SECONDS", defaults.day_seconds),
            night_seconds: seconds_from_env("OPENDERE_NIGHT_SECONDS", defaults.night_seconds),
            lobby_extend_seconds: seconds_from_env(
                "OPENDERE_LOBBY_EXTEND_SECONDS",
                defaults.lobby_extend_seconds,
            ),
        }
    }

    /// 別のチャンネル用に複製する
    pub fn for_channel(&self, channel: &str) -> Self {
        Self {
            channel: channel.to_string(),
            name: channel.trim_start_matches('#').to_string(),
            ..self.clone()
        }
    }
}

fn seconds_from_env(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.day_seconds, 300);
        assert_eq!(config.night_seconds, 120);
        assert_eq!(config.lobby_seconds, 60);
        assert_eq!(config.prefix, "!");
    }

    #[test]
    fn test_for_channel_renames_game() {
        let config = GameConfig::default().for_channel("#yandere");
        assert_eq!(config.channel, "#yandere");
        assert_eq!(config.name, "yandere");
        assert_eq!(config.day_seconds, 300);
    }
}
