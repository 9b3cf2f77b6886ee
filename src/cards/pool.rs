use std::ops::Range;

use rand::seq::index;
use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::error::{Result, TimelineError};

const MAJOR: Range<usize> = 0..22;
const WANDS: Range<usize> = 22..36;
const CUPS: Range<usize> = 36..50;
const SWORDS: Range<usize> = 50..64;
const PENTACLES: Range<usize> = 64..78;

/// Card indices eligible for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPool {
    indices: Vec<usize>,
}

impl CardPool {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// The 22 major arcana
    pub fn major() -> Self {
        Self::new(MAJOR.collect())
    }

    /// Pool for a reading theme. With `minor` set the four suit themes map to
    /// their 14-card suit and anything else to Wands; otherwise unknown
    /// themes use the major arcana.
    pub fn for_theme(theme: &str, minor: bool) -> Self {
        let range = if minor {
            match theme {
                "애정운" | "love" => CUPS,
                "금전운" | "money" => PENTACLES,
                "의사결정" | "decision" => SWORDS,
                _ => WANDS,
            }
        } else {
            match theme {
                "애정운" | "love" => CUPS,
                "금전운" | "money" => PENTACLES,
                "건강운" | "health" => WANDS,
                _ => MAJOR,
            }
        };
        Self::new(range.collect())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// This pool, or the major arcana when it cannot supply `k` cards
    pub fn widened_for(self, k: usize) -> Self {
        if self.len() >= k {
            self
        } else {
            warn!("Card pool of {} cannot supply {} cards, using the major arcana", self.len(), k);
            Self::major()
        }
    }
}

/// K distinct cards drawn for one video plus the two orders they appear in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSelection {
    /// Drawn deck indices, in draw order
    pub cards: Vec<usize>,
    /// Permutation of `0..k`: order the cards are first shown face-up
    pub display_order: Vec<usize>,
    /// Permutation of `0..k`: order of the cards after the shuffle
    pub shuffled_order: Vec<usize>,
}

impl CardSelection {
    /// Draw `k` cards uniformly without replacement.
    ///
    /// An undersized pool is widened to the major arcana first.
    pub fn draw<R: Rng + ?Sized>(pool: CardPool, k: usize, rng: &mut R) -> Result<Self> {
        let pool = pool.widened_for(k);
        if pool.len() < k {
            return Err(TimelineError::PoolTooSmall { available: pool.len(), requested: k }.into());
        }

        let cards = index::sample(rng, pool.len(), k)
            .into_iter()
            .map(|i| pool.indices()[i])
            .collect();
        let display_order = index::sample(rng, k, k).into_vec();
        let shuffled_order = index::sample(rng, k, k).into_vec();

        Ok(Self { cards, display_order, shuffled_order })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in the order they are first shown face-up
    pub fn cards_in_display_order(&self) -> Vec<usize> {
        self.display_order.iter().map(|&i| self.cards[i]).collect()
    }

    /// Cards in grid order after the shuffle
    pub fn cards_after_shuffle(&self) -> Vec<usize> {
        self.shuffled_order.iter().map(|&i| self.cards[i]).collect()
    }

    /// Reorder per-card values given in draw order into post-shuffle order
    pub fn after_shuffle<T: Clone>(&self, values: &[T]) -> Vec<T> {
        self.shuffled_order.iter().map(|&i| values[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn is_permutation(order: &[usize], k: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..k).collect::<Vec<_>>()
    }

    #[test]
    fn test_theme_pools() {
        assert_eq!(CardPool::for_theme("총운", false).indices(), &(0..22).collect::<Vec<_>>()[..]);
        assert_eq!(CardPool::for_theme("애정운", false).indices()[0], 36);
        assert_eq!(CardPool::for_theme("금전운", true).indices()[0], 64);
        assert_eq!(CardPool::for_theme("의사결정", true).indices()[0], 50);
        assert_eq!(CardPool::for_theme("unknown", true).indices()[0], 22);
        assert_eq!(CardPool::for_theme("unknown", false).len(), 22);
    }

    #[test]
    fn test_six_card_permutations_are_bijections() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let selection = CardSelection::draw(CardPool::major(), 6, &mut rng).unwrap();
            assert!(is_permutation(&selection.display_order, 6));
            assert!(is_permutation(&selection.shuffled_order, 6));

            let mut cards = selection.cards.clone();
            cards.sort_unstable();
            cards.dedup();
            assert_eq!(cards.len(), 6);
            assert!(cards.iter().all(|c| *c < 22));
        }
    }

    #[test]
    fn test_small_pool_is_widened() {
        let mut rng = SmallRng::seed_from_u64(3);
        let selection = CardSelection::draw(CardPool::new(vec![40, 41]), 3, &mut rng).unwrap();
        assert!(selection.cards.iter().all(|c| *c < 22));
    }

    #[test]
    fn test_same_seed_same_selection() {
        let a = CardSelection::draw(CardPool::major(), 6, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = CardSelection::draw(CardPool::major(), 6, &mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reorders_follow_permutations() {
        let selection = CardSelection {
            cards: vec![10, 11, 12],
            display_order: vec![2, 0, 1],
            shuffled_order: vec![1, 2, 0],
        };
        assert_eq!(selection.cards_in_display_order(), vec![12, 10, 11]);
        assert_eq!(selection.cards_after_shuffle(), vec![11, 12, 10]);
        assert_eq!(selection.after_shuffle(&["a", "b", "c"]), vec!["b", "c", "a"]);
    }
}
