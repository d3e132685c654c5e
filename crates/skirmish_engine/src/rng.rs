//! Seeded random source threaded through every battle decision.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Handle to the battle's single pseudo-random stream.
///
/// Shuffles, hit rolls, target picks, revival picks and flavor text all
/// draw from here, so a seed fully determines a replay.
#[derive(Debug, Clone)]
pub struct BattleRng {
    seed: u64,
    rng: StdRng,
}

impl BattleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed derived from the two rosters so the same matchup replays
    /// identically when no explicit seed is given.
    pub fn from_rosters<'a, I, S>(teams: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [S])>,
        S: AsRef<str> + 'a,
    {
        Self::new(roster_seed(teams))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for BattleRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// FNV-1a over team names and unit names, separated so that moving a unit
/// between teams changes the seed.
pub fn roster_seed<'a, I, S>(teams: I) -> u64
where
    I: IntoIterator<Item = (&'a str, &'a [S])>,
    S: AsRef<str> + 'a,
{
    let mut hash = FNV_OFFSET;
    let mut feed = |bytes: &[u8]| {
        for byte in bytes {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    };
    for (name, units) in teams {
        feed(name.as_bytes());
        for unit in units {
            feed(b"#");
            feed(unit.as_ref().as_bytes());
        }
        feed(b"|");
    }
    hash
}
