use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

const SMILIES: [(&str, u32); 8] = [
    (":D", 30),
    (":3", 10),
    ("^_^", 10),
    ("x_x", 10),
    ("x.x", 10),
    (";_;", 10),
    ("(╯°□°）╯︵ ┻━━┻", 5),
    ("┻━┻︵ \\(°□°)/ ︵ ┻━┻", 5),
];

/// ランダムな顔文字
pub fn random_emoji<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    match WeightedIndex::new(SMILIES.iter().map(|(_, w)| *w)) {
        Ok(dist) => SMILIES[dist.sample(rng)].0,
        Err(_) => SMILIES[0].0,
    }
}

pub fn is_are(count: usize) -> &'static str {
    if count == 1 {
        "is"
    } else {
        "are"
    }
}

pub fn yanderes(count: usize) -> &'static str {
    if count == 1 {
        "yandere"
    } else {
        "yanderes"
    }
}

pub fn join_names<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
    if names.is_empty() {
        "nobody".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_emoji_is_from_table() {
        let mut rng = StdRng::seed_from_u64(9);
        let emoji = random_emoji(&mut rng);
        assert!(SMILIES.iter().any(|(s, _)| *s == emoji));
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(Vec::<String>::new()), "nobody");
        assert_eq!(join_names(["a", "b"]), "a, b");
        assert_eq!(is_are(1), "is");
        assert_eq!(yanderes(2), "yanderes");
    }
}
