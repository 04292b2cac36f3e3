use boardtest_core::domain::ports::RandomSource;
use esp_hal::rng::Rng;

pub(crate) fn get_seed() -> u64 {
    let rng = Rng::new();
    u64::from(rng.random()) << 32 | u64::from(rng.random())
}

/// Hardware RNG, seeded by radio noise once Wi-Fi runs.
pub struct EspRandom {
    rng: Rng,
}

impl EspRandom {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }
}

impl Default for EspRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EspRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.random()
    }
}
