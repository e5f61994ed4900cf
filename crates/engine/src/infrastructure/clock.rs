//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out the given faces in order, then repeats the last one.
#[cfg(test)]
pub struct ScriptedRandom {
    faces: std::sync::Mutex<std::collections::VecDeque<i32>>,
    last: i32,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(faces: &[i32]) -> Self {
        Self {
            faces: std::sync::Mutex::new(faces.iter().copied().collect()),
            last: faces.last().copied().unwrap_or(1),
        }
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        let mut faces = self
            .faces
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        faces.pop_front().unwrap_or(self.last)
    }
}
