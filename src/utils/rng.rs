use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when a seed is configured, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_rngs_agree() {
        let mut a = make_rng(Some(42));
        let mut b = make_rng(Some(42));
        for _ in 0..10 {
            assert_eq!(a.random_range(0..100), b.random_range(0..100));
        }
    }

    #[test]
    fn test_unseeded_rngs_differ() {
        let mut a = make_rng(None);
        let mut b = make_rng(None);
        let draws_a: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let draws_b: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(draws_a, draws_b);
    }
}
