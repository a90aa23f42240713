use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::models::catalog::{town_pool, yandere_pool};
use crate::models::role::Role;
use crate::utils::random::{distinct_then_repeat, weighted_choices};

pub const MIN_PLAYERS: usize = 4;

/// 人数に対するヤンデレの数。
/// 4-6人で1人、7-9人で2人、10-12人で3人…
pub fn yandere_count(num_players: usize) -> usize {
    num_players.saturating_sub(1) / 3
}

/// `num_players` 人分の役職を選ぶ。
/// ヤンデレは役職が重複しないように選び、足りなければ重複を許して補う。
/// 残りは村人・中立のプールから重み付きで復元抽出し、最後に全体を混ぜる。
pub fn select_roles<R: Rng + ?Sized>(num_players: usize, rng: &mut R) -> Result<Vec<Role>, GameError> {
    if num_players < MIN_PLAYERS {
        return Err(GameError::InsufficientPlayers { found: num_players });
    }

    let num_yanderes = yandere_count(num_players);
    let mut kinds = distinct_then_repeat(&yandere_pool(), num_yanderes, rng)?;
    kinds.extend(weighted_choices(
        &town_pool(),
        num_players - num_yanderes,
        rng,
    )?);
    kinds.shuffle(rng);

    Ok(kinds.iter().map(|kind| kind.instantiate(rng)).collect())
}
