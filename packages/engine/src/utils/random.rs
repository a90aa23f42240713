use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;

/// 重み付きの復元抽出。重みは確率に正規化され、カテゴリ分布から `count` 回引く
pub fn weighted_choices<T: Copy, R: Rng + ?Sized>(
    choices: &[(T, u32)],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>, GameError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let dist = WeightedIndex::new(choices.iter().map(|(_, w)| *w))?;
    Ok((0..count).map(|_| choices[dist.sample(rng)].0).collect())
}

/// 非復元抽出。プールを使い切った分は等確率の復元抽出で補う
pub fn distinct_then_repeat<T: Copy, R: Rng + ?Sized>(
    pool: &[T],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>, GameError> {
    let mut picked: Vec<T> = pool.choose_multiple(rng, count).copied().collect();
    if picked.len() < count {
        let uniform: Vec<(T, u32)> = pool.iter().map(|t| (*t, 1)).collect();
        picked.extend(weighted_choices(&uniform, count - picked.len(), rng)?);
    }
    Ok(picked)
}
