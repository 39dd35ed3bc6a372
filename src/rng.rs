/// Seedable random source shared by every effect.
///
/// All draws go through this type so a fixed seed replays the same
/// sequence of effects.
#[derive(Debug, Clone)]
pub struct FxRng(fastrand::Rng);

impl FxRng {
    pub fn new(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.0.f64()
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform in `[lo, hi)`.
    pub fn between(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Uniform in `[-span / 2, span / 2)`.
    pub fn centered(&mut self, span: f64) -> f64 {
        (self.unit() - 0.5) * span
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.0.usize(..len)
    }

    /// Whole milliseconds in `[lo, hi)`.
    pub fn millis(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.0.u64(lo..hi)
    }
}
