use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Error as RandError, RngCore, SeedableRng};

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

/// 64-bit linear congruential stream.
///
/// Every randomized decision of a run goes through [`Lcg::pick`] and
/// [`Lcg::flip`], so a fixed seed reproduces the whole instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    /// Seed from the process id and the clock. Not reproducible, use the
    /// returned generator's [`Lcg::state`] to rerun the same instance.
    pub fn from_process() -> Self {
        let ticks = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Lcg::mixed(std::process::id() as u64, ticks)
    }

    fn mixed(pid: u64, ticks: u64) -> Self {
        let mut rng = Lcg::new(pid);
        rng.next();
        rng.state ^= ticks;
        rng.next();
        rng
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// A value in `[0, bound)` scaled from the high 32 bits of the next state.
    pub fn pick(&mut self, bound: u32) -> u32 {
        let high = (self.next() >> 32) as f64;
        ((bound as f64 / 4294967296.0) * high) as u32
    }

    pub fn flip(&mut self) -> bool {
        self.pick(2) != 0
    }

    /// One forward Fisher-Yates step: swap position `i` with a uniformly
    /// chosen position in `[0, i]`.
    ///
    /// The bound passed to [`Lcg::pick`] is truncated to 32 bits, so beyond
    /// `2^32` items (clause lists of more than ~268M inputs) the swap is no
    /// longer uniform. It always stays in range.
    pub fn swap_random<T>(&mut self, items: &mut [T], i: usize) {
        assert!(i < items.len());
        if i == 0 {
            return;
        }
        let j = self.pick((i + 1) as u32) as usize;
        if i != j {
            items.swap(i, j);
        }
    }

    /// Remove a uniformly chosen element, moving the last one into its slot.
    pub fn take<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let j = self.pick(items.len() as u32) as usize;
        Some(items.swap_remove(j))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in 0..items.len() {
            self.swap_random(items, i);
        }
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Lcg::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Lcg::new(state)
    }
}
