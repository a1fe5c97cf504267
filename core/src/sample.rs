use rand::Rng;

use crate::{GameError, Result};

/// Draws `k` distinct indices in `[0, population)`, uniformly at random.
///
/// The returned vector preserves production order; callers use it as display
/// order when mapping picks onto on-screen positions. Asking for more
/// distinct values than the population holds is an error rather than a spin
/// on the rejection loop.
pub fn draw_distinct<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    k: usize,
) -> Result<Vec<usize>> {
    if k > population {
        return Err(GameError::InvalidSampleSize {
            requested: k,
            population,
        });
    }

    let mut seen = vec![false; population];
    let mut picks = Vec::with_capacity(k);

    while picks.len() < k {
        let candidate = rng.gen_range(0..population);
        if !seen[candidate] {
            seen[candidate] = true;
            picks.push(candidate);
        }
    }

    log::trace!("drew {} of {}: {:?}", k, population, picks);
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draws_exactly_k_distinct_values_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);

        for &(population, k) in &[(100, 6), (8, 5), (5, 5), (1, 1), (3, 0)] {
            let picks = draw_distinct(&mut rng, population, k).unwrap();

            assert_eq!(picks.len(), k);
            assert!(picks.iter().all(|&i| i < population));
            let mut deduped = picks.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(deduped.len(), k);
        }
    }

    #[test]
    fn full_population_draw_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(42);

        let mut picks = draw_distinct(&mut rng, 10, 10).unwrap();
        picks.sort_unstable();

        assert_eq!(picks, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn oversized_request_errors_instead_of_looping() {
        let mut rng = SmallRng::seed_from_u64(0);

        let err = draw_distinct(&mut rng, 3, 4).unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidSampleSize {
                requested: 4,
                population: 3
            }
        );
    }

    #[test]
    fn same_seed_reproduces_the_same_draw() {
        let mut a = SmallRng::seed_from_u64(123);
        let mut b = SmallRng::seed_from_u64(123);

        assert_eq!(
            draw_distinct(&mut a, 50, 6).unwrap(),
            draw_distinct(&mut b, 50, 6).unwrap()
        );
    }
}
