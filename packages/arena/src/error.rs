use opendere_engine::GameError;

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("there's no game running in {0}.")]
    NoGame(String),
    #[error("{0} is not an arena.")]
    UnknownArena(String),
    #[error("you're not playing in any game.")]
    NotPlaying,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("failed to serialize game state: {0}")]
    Snapshot(#[from] serde_json::Error),
}
