use std::time::Duration;

use dotenvy::dotenv;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use structopt::StructOpt;
use tokio::io::{AsyncBufReadExt, BufReader};

use opendere_arena::{
    error::ArenaError,
    models::{
        cli::Opt,
        config::parse_arenas,
        console::{parse_line, render, ConsoleInput, USAGE},
    },
    services::arena_service,
    state::AppState,
    utils::config::CONFIG,
};
use opendere_engine::Message;

// ログ設定
fn init_logger() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .filter_level(level)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

fn print_messages(arena: &str, messages: &[Message]) {
    for message in messages {
        println!("{}", render(arena, message));
    }
}

fn print_error(err: &ArenaError) {
    println!("[error] {}", err);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 環境変数をロード
    if let Err(e) = dotenv() {
        eprintln!("Warning: .envファイルの読み込みに失敗しました: {}", e);
    }

    init_logger();

    let opt = Opt::from_args();
    let mut arena_config = CONFIG.arena.clone();
    if let Some(raw) = opt.arenas.as_deref() {
        let arenas = parse_arenas(raw);
        if !arenas.is_empty() {
            arena_config.arenas = arenas;
        }
    }
    if let Some(tick_ms) = opt.tick_ms.filter(|ms| *ms > 0) {
        arena_config.tick_ms = tick_ms;
    }

    info!(
        "arenas: {}, tick every {}ms",
        arena_config.arenas.join(", "),
        arena_config.tick_ms
    );
    let tick_ms = arena_config.tick_ms;
    let state = AppState::new(CONFIG.game.clone(), arena_config, opt.seed);

    // 締め切りの確認は入力とは別のタスクで回す
    let ticker_state = state.clone();
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            for (arena, messages) in arena_service::tick_all(ticker_state.clone()).await {
                print_messages(&arena, &messages);
            }
        }
    });

    println!("{}", USAGE);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(input) = parse_line(&line) else {
            if !line.trim().is_empty() {
                println!("{}", USAGE);
            }
            continue;
        };

        match input {
            ConsoleInput::Public { arena, nick, text } => {
                match arena_service::public_message(state.clone(), &arena, &nick, &text).await {
                    Ok(messages) => print_messages(&arena, &messages),
                    Err(err) => print_error(&err),
                }
            }
            ConsoleInput::Private { nick, text } => {
                match arena_service::private_message(state.clone(), &nick, &text).await {
                    Ok((arena, messages)) => print_messages(&arena, &messages),
                    Err(err) => print_error(&err),
                }
            }
            ConsoleInput::Status { arena } => {
                match arena_service::status(state.clone(), &arena).await {
                    Ok(json) => println!("{}", json),
                    Err(err) => print_error(&err),
                }
            }
            ConsoleInput::Rename { old, new } => {
                arena_service::rename(state.clone(), &old, &new).await;
            }
            ConsoleInput::Quit => break,
        }
    }

    ticker.abort();
    if let Err(e) = ticker.await {
        if !e.is_cancelled() {
            error!("tick loop failed: {}", e);
        }
    }
    info!("bye!");
    Ok(())
}
