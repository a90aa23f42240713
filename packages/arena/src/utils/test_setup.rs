use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        // .envがなくてもテストが動くように短い締め切りを入れておく
        if std::env::var("OPENDERE_LOBBY_SECONDS").is_err() {
            std::env::set_var("OPENDERE_LOBBY_SECONDS", "60");
        }
        if std::env::var("OPENDERE_ARENAS").is_err() {
            std::env::set_var("OPENDERE_ARENAS", "#opendere,#yandere");
        }
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
