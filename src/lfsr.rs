use crate::error::CrackError;
use crate::filter::Filter;
use crate::utils::check_bits;
use rand::Rng;
use std::fmt;

/// Maximum register length, so that integer seeds fit in a `u32`.
pub const MAX_LEN: usize = 32;

/// A binary linear-feedback shift register with a fixed tap set.
///
/// Position 0 holds the current output bit, position `n-1` the most
/// recently shifted-in bit. The feedback bit is the XOR of the bits at
/// every tap position.
#[derive(Debug, Clone)]
pub struct Lfsr {
    n: usize,
    taps: Vec<usize>,
    state: Vec<u8>,
}

impl Lfsr {
    pub fn new(n: usize, taps: &[usize]) -> Result<Lfsr, CrackError> {
        if n == 0 {
            return Err(CrackError::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        if n > MAX_LEN {
            return Err(CrackError::InvalidLength {
                expected: MAX_LEN,
                actual: n,
            });
        }
        // the feedback must always involve the output position
        if !taps.contains(&0) || taps.iter().any(|&t| t >= n) {
            return Err(CrackError::InvalidTapSet {
                taps: taps.to_vec(),
                n,
            });
        }
        Ok(Lfsr {
            n,
            taps: taps.to_vec(),
            state: vec![0; n],
        })
    }

    /// Set the full `n`-bit state explicitly.
    pub fn initialize(&mut self, state: &[u8]) -> Result<(), CrackError> {
        if state.len() != self.n {
            return Err(CrackError::InvalidLength {
                expected: self.n,
                actual: state.len(),
            });
        }
        check_bits(state)?;
        self.state.copy_from_slice(state);
        Ok(())
    }

    /// Set each state bit independently and uniformly at random.
    pub fn initialize_random(&mut self) {
        let mut rng = rand::thread_rng();
        for bit in self.state.iter_mut() {
            *bit = rng.gen_range(0..=1);
        }
    }

    /// Emit the output bit, then shift in the feedback bit.
    ///
    /// The output corresponds to the state before the shift.
    pub fn clock(&mut self) -> u8 {
        let output = self.state[0];
        let mut feedback = 0;
        for &t in &self.taps {
            feedback ^= self.state[t];
        }
        self.state.rotate_left(1);
        self.state[self.n - 1] = feedback;
        output
    }

    /// Evaluate a sum-of-monomials function over the current state
    /// without mutating it.
    pub fn filter(&self, f: &Filter) -> Result<u8, CrackError> {
        f.evaluate(&self.state)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn state(&self) -> &[u8] {
        &self.state
    }
}

impl fmt::Display for Lfsr {
    // s0 is printed rightmost
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &bit in self.state.iter().rev() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lfsr {
        let mut lfsr = Lfsr::new(4, &[0, 1, 3]).unwrap();
        lfsr.initialize(&[0, 1, 1, 0]).unwrap();
        lfsr
    }

    #[test]
    fn clock_emits_before_update() {
        let mut lfsr = sample();
        assert_eq!(0, lfsr.clock());
        assert_eq!(&[1, 1, 0, 1], lfsr.state());
    }

    #[test]
    fn clock_sequence_matches_hand_trace() {
        let mut lfsr = sample();
        let outputs = (0..8).map(|_| lfsr.clock()).collect::<Vec<_>>();
        assert_eq!(vec![0, 1, 1, 0, 1, 1, 0, 1], outputs);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(
            Err(CrackError::InvalidLength {
                expected: 1,
                actual: 0
            }),
            Lfsr::new(0, &[0]).map(|_| ())
        );
        assert_eq!(
            Err(CrackError::InvalidLength {
                expected: MAX_LEN,
                actual: 40
            }),
            Lfsr::new(40, &[0]).map(|_| ())
        );
    }

    #[test]
    fn rejects_bad_tap_sets() {
        // missing position 0
        assert_eq!(
            Err(CrackError::InvalidTapSet {
                taps: vec![1, 3],
                n: 4
            }),
            Lfsr::new(4, &[1, 3]).map(|_| ())
        );
        // tap outside the register
        assert_eq!(
            Err(CrackError::InvalidTapSet {
                taps: vec![0, 4],
                n: 4
            }),
            Lfsr::new(4, &[0, 4]).map(|_| ())
        );
    }

    #[test]
    fn initialize_validates_state() {
        let mut lfsr = Lfsr::new(4, &[0, 1]).unwrap();
        assert_eq!(
            Err(CrackError::InvalidLength {
                expected: 4,
                actual: 3
            }),
            lfsr.initialize(&[1, 0, 1])
        );
        assert_eq!(
            Err(CrackError::InvalidBit { value: 7 }),
            lfsr.initialize(&[1, 0, 7, 1])
        );
    }

    #[test]
    fn random_state_stays_binary() {
        let mut lfsr = Lfsr::new(16, &[0, 2]).unwrap();
        lfsr.initialize_random();
        assert_eq!(16, lfsr.state().len());
        assert!(lfsr.state().iter().all(|&b| b <= 1));
    }

    #[test]
    fn display_prints_s0_rightmost() {
        let mut lfsr = Lfsr::new(4, &[0, 1]).unwrap();
        lfsr.initialize(&[1, 1, 0, 1]).unwrap();
        assert_eq!("1011", format!("{}", lfsr));
    }
}
