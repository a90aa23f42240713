use std::fmt;

use rand::distributions::WeightedError;

use crate::models::message::Message;

/// コマンドの送り先を間違えたときの案内
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRedirect {
    /// 個別メッセージで送るべきコマンド
    Private { bot: String },
    /// チャンネルで送るべきコマンド
    Public { channel: String },
}

impl fmt::Display for ChannelRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRedirect::Private { bot } => {
                write!(f, "please PM/notice {} with your commands instead.", bot)
            }
            ChannelRedirect::Public { channel } => {
                write!(f, "please enter that command in {} instead.", channel)
            }
        }
    }
}

/// エンジンのエラー。`Display` の文言はそのままプレイヤーへの通知になる。
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("a game needs at least 4 players, but only {found} joined.")]
    InsufficientPlayers { found: usize },
    #[error("'{command}' on target '{target}' is invalid, please try again :(")]
    InvalidTarget { command: String, target: String },
    #[error("please specify who you want to use that ability on :(")]
    MissingTarget,
    #[error("{0}")]
    WrongChannel(ChannelRedirect),
    #[error("you've already done that this phase.")]
    AlreadyActed,
    #[error("you can't do that anymore, sorry :(")]
    NoUsesRemaining,
    #[error("you've already hurried or extended the phase already.")]
    AlreadyRequestedThisPhase,
    #[error("you're not playing in the current game.")]
    NotPlaying,
    #[error("dead players can't do that, sorry :(")]
    NotAlive,
    #[error("you're already playing in the current game.")]
    AlreadyJoined,
    #[error("sorry, you can't join a game that's already in-progress. please wait for the next game.")]
    GameInProgress,
    #[error("the game hasn't started yet.")]
    GameNotStarted,
    #[error("the game is already over.")]
    GameOver,
    #[error("you can't '{0}' right now.")]
    UnknownCommand(String),
    #[error("role sampling failed: {0}")]
    Sampling(#[from] WeightedError),
}

impl GameError {
    /// エラーを本人宛ての通知一件に変換する
    pub fn into_notice(self, actor: &str) -> Message {
        Message::player(actor, self.to_string())
    }

    /// ロビーを破棄すべき致命的なエラーかどうか
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::InsufficientPlayers { .. } | GameError::Sampling(_)
        )
    }
}
