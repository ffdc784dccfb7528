//! Per-point traffic and weather penalties.
//!
//! There is no live conditions feed yet, so the production estimators draw
//! placeholder penalties uniformly from fixed sets. A real data source only
//! needs to implement [`TrafficEstimator`] / [`WeatherEstimator`].

use crate::config::ConditionsPolicy;
use crate::constants::{TRAFFIC_DELAY_CHOICES, WEATHER_PENALTY_CHOICES};
use crate::models::Coordinates;
use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use std::sync::{Arc, Mutex};

pub trait TrafficEstimator: Send + Sync {
    /// Traffic delay contribution at a sample point
    fn traffic_delay(&self, point: &Coordinates) -> f64;
}

pub trait WeatherEstimator: Send + Sync {
    /// Weather penalty contribution at a sample point
    fn weather_penalty(&self, point: &Coordinates) -> f64;
}

/// Uniform draw from a fixed candidate set. Shared across concurrent
/// requests, so the RNG sits behind a mutex.
pub struct UniformChoice<T> {
    choices: Vec<T>,
    rng: Mutex<StdRng>,
}

impl<T: Copy> UniformChoice<T> {
    pub fn new(choices: &[T]) -> Self {
        Self::seeded(choices, rand::random())
    }

    pub fn seeded(choices: &[T], seed: u64) -> Self {
        UniformChoice {
            choices: choices.to_vec(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// `None` only when the candidate set is empty
    pub fn draw(&self) -> Option<T> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.choices.choose(&mut *rng).copied()
    }
}

/// Placeholder traffic delay drawn from {0, 1, 2, 3}.
pub struct RandomTrafficEstimator {
    choice: UniformChoice<u8>,
}

impl RandomTrafficEstimator {
    pub fn new() -> Self {
        RandomTrafficEstimator {
            choice: UniformChoice::new(&TRAFFIC_DELAY_CHOICES),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomTrafficEstimator {
            choice: UniformChoice::seeded(&TRAFFIC_DELAY_CHOICES, seed),
        }
    }
}

impl Default for RandomTrafficEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficEstimator for RandomTrafficEstimator {
    fn traffic_delay(&self, _point: &Coordinates) -> f64 {
        self.choice.draw().map(f64::from).unwrap_or(0.0)
    }
}

/// Placeholder weather penalty drawn from {0, 2, 5, 7, 10}.
pub struct RandomWeatherEstimator {
    choice: UniformChoice<u8>,
}

impl RandomWeatherEstimator {
    pub fn new() -> Self {
        RandomWeatherEstimator {
            choice: UniformChoice::new(&WEATHER_PENALTY_CHOICES),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomWeatherEstimator {
            choice: UniformChoice::seeded(&WEATHER_PENALTY_CHOICES, seed),
        }
    }
}

impl Default for RandomWeatherEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherEstimator for RandomWeatherEstimator {
    fn weather_penalty(&self, _point: &Coordinates) -> f64 {
        self.choice.draw().map(f64::from).unwrap_or(0.0)
    }
}

/// The same penalty at every point. `FixedConditions(0.0)` disables the
/// traffic and weather terms.
#[derive(Debug, Clone, Copy)]
pub struct FixedConditions(pub f64);

impl TrafficEstimator for FixedConditions {
    fn traffic_delay(&self, _point: &Coordinates) -> f64 {
        self.0
    }
}

impl WeatherEstimator for FixedConditions {
    fn weather_penalty(&self, _point: &Coordinates) -> f64 {
        self.0
    }
}

pub fn estimators_for(
    policy: &ConditionsPolicy,
) -> (Arc<dyn TrafficEstimator>, Arc<dyn WeatherEstimator>) {
    match policy {
        ConditionsPolicy::Random => (
            Arc::new(RandomTrafficEstimator::new()),
            Arc::new(RandomWeatherEstimator::new()),
        ),
        ConditionsPolicy::None => (Arc::new(FixedConditions(0.0)), Arc::new(FixedConditions(0.0))),
    }
}
