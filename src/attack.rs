use crate::error::CrackError;
use crate::geffe::Geffe;
use crate::utils::{bit_width, check_bits};
use log::debug;
use num_rational::Ratio;

/// Correlation attack against one register of a combination generator.
///
/// For every candidate sub-key the generator is reinitialized with the
/// two non-target registers held at a fixed all-zero baseline and the
/// target register loaded from the candidate, clocked once per observed
/// bit, and scored. A candidate survives when its agreement fraction
/// equals the predicted correlation exactly.
#[derive(Debug, Clone)]
pub struct Attack {
    generator: Geffe,
    observed: Vec<u8>,
    predicted: Ratio<u64>,
    target: usize,
}

impl Attack {
    /// Seed loaded into the non-target registers on every trial.
    const BASELINE: u32 = 0;

    pub fn new(
        generator: Geffe,
        observed: &[u8],
        predicted: (u64, u64),
        target: usize,
    ) -> Result<Attack, CrackError> {
        // an empty stream has no defined agreement fraction
        if observed.is_empty() {
            return Err(CrackError::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        check_bits(observed)?;
        if predicted.1 == 0 {
            return Err(CrackError::InvalidCorrelation);
        }
        if target >= 3 {
            return Err(CrackError::InvalidTarget { index: target });
        }
        Ok(Attack {
            generator,
            observed: observed.to_vec(),
            predicted: Ratio::new(predicted.0, predicted.1),
            target,
        })
    }

    /// Number of candidate sub-keys to try.
    pub fn keyspace(&self) -> u64 {
        1u64 << self.generator.size()
    }

    /// Run one trial and report whether the candidate survives.
    ///
    /// The full register triple is reset before clocking, so trials are
    /// independent of each other in any order.
    pub fn carry_out(&mut self, candidate: u32) -> Result<bool, CrackError> {
        let n = self.generator.size();
        if bit_width(candidate) > n {
            return Err(CrackError::InvalidKey { seed: candidate, n });
        }
        let mut seeds = [Attack::BASELINE; 3];
        seeds[self.target] = candidate;
        self.generator.set_state(seeds)?;

        let mut matches = 0u64;
        for &bit in &self.observed {
            if self.generator.clock() == bit {
                matches += 1;
            }
        }
        // exact comparison; the fraction is never materialized as a float
        Ok(Ratio::new(matches, self.observed.len() as u64) == self.predicted)
    }

    /// Scan the whole keyspace and report every surviving candidate.
    ///
    /// An empty result is a reportable outcome, not an error.
    pub fn run(&mut self) -> Result<Vec<u32>, CrackError> {
        let mut survivors = Vec::new();
        for candidate in 0..self.keyspace() {
            if self.carry_out(candidate as u32)? {
                debug!("candidate {:#x} survives", candidate);
                survivors.push(candidate as u32);
            }
        }
        Ok(survivors)
    }
}
