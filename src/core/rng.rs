//! Seeded dice for duel resolution.
//!
//! Every random decision the engine makes draws from one [`DuelRng`]:
//!
//! - the coin toss that picks who attacks first
//! - the spell-casting roll (`roll_percent`, compared against a percentage)
//! - the hit roll (`roll_unit`, compared against a probability)
//! - behaviour hooks such as confusion and spoonerisms (`gen_bool`, `choose`)
//!
//! Seeding the manager replays a duel exactly. The checkpoint is a seed
//! plus a stream position, so capturing and restoring it is O(1) no matter
//! how many rolls have happened.
//!
//! ```
//! use wizards_duel::core::DuelRng;
//!
//! let mut rng = DuelRng::new(42);
//! let roll = rng.roll_percent();
//! assert!((0.0..100.0).contains(&roll));
//!
//! let mut replay = DuelRng::new(42);
//! assert_eq!(roll, replay.roll_percent());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct DuelRng {
    seed: u64,
    stream: ChaCha8Rng,
}

impl DuelRng {
    /// Seeded dice; the same seed always rolls the same duel.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stream: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from the thread RNG, for live duels.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform roll in `[0, 100)`.
    pub fn roll_percent(&mut self) -> f64 {
        self.stream.gen_range(0.0..100.0)
    }

    /// Uniform roll in `[0, 1)`.
    pub fn roll_unit(&mut self) -> f64 {
        self.stream.gen::<f64>()
    }

    /// `true` with the given probability, clamped into `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.stream.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Pick one element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.stream)
    }

    /// Capture the position in the stream.
    #[must_use]
    pub fn state(&self) -> DuelRngState {
        DuelRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &DuelRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.stream.set_word_pos(state.word_pos);
        rng
    }
}

/// Checkpoint of a [`DuelRng`], storable next to the duel records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRngState {
    pub seed: u64,
    /// ChaCha word position within the seeded stream.
    pub word_pos: u128,
}
