//! Synthetic identifiers for calculated fields

use rand::Rng;

const CALCULATION_PREFIX: &str = "Calculation_";
const RANDOM_DIGITS_START: u64 = 1_000_000_000_000_000_000;
const RANDOM_DIGITS_END: u64 = 9_999_999_999_999_999_999;

/// Source of unique field identifiers
pub trait IdGenerator {
    fn next(&mut self) -> String;
}

/// `Calculation_` followed by 19 random digits
#[derive(Debug, Default)]
pub struct RandomCalculationIds;

impl IdGenerator for RandomCalculationIds {
    fn next(&mut self) -> String {
        let digits: u64 = rand::thread_rng().gen_range(RANDOM_DIGITS_START..=RANDOM_DIGITS_END);
        format!("{}{}", CALCULATION_PREFIX, digits)
    }
}

/// Deterministic `Calculation_1`, `Calculation_2`, ...
#[derive(Debug, Default)]
pub struct SequenceIds {
    counter: u64,
}

impl SequenceIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIds {
    fn next(&mut self) -> String {
        self.counter += 1;
        format!("{}{}", CALCULATION_PREFIX, self.counter)
    }
}
