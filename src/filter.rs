use crate::error::CrackError;
use crate::lfsr::Lfsr;
use crate::utils::check_bits;

/// A monomial is the AND of the named state-bit positions.
pub type Monomial = Vec<usize>;

/// A boolean function given as a XOR of monomials over an `n`-bit state.
///
/// `[(0, 2), (4, 20), (3,), (7,)]` corresponds to
/// `s0*s2 + s4*s20 + s3 + s7`. An empty sum is the constant 0.
#[derive(Debug, Clone)]
pub struct Filter {
    n: usize,
    monomials: Vec<Monomial>,
}

impl Filter {
    pub fn new(n: usize, monomials: &[Monomial]) -> Result<Filter, CrackError> {
        for monomial in monomials {
            if let Some(&position) = monomial.iter().find(|&&p| p >= n) {
                return Err(CrackError::InvalidMonomial { position, n });
            }
        }
        Ok(Filter {
            n,
            monomials: monomials.to_vec(),
        })
    }

    /// Evaluate over an explicit state. Pure: no side effects.
    pub fn evaluate(&self, state: &[u8]) -> Result<u8, CrackError> {
        if state.len() != self.n {
            return Err(CrackError::InvalidLength {
                expected: self.n,
                actual: state.len(),
            });
        }
        check_bits(state)?;
        Ok(self.apply(state))
    }

    // positions were validated against n at construction
    pub(crate) fn apply(&self, state: &[u8]) -> u8 {
        let mut output = 0;
        for monomial in &self.monomials {
            let mut value = 1;
            for &position in monomial {
                value &= state[position];
            }
            output ^= value;
        }
        output
    }
}

/// A nonlinear filter generator: one register whose keystream bit is a
/// boolean function of its own internal state.
#[derive(Debug, Clone)]
pub struct FilteredLfsr {
    register: Lfsr,
    function: Filter,
}

impl FilteredLfsr {
    /// The register state is randomized once at construction.
    pub fn new(n: usize, taps: &[usize], monomials: &[Monomial]) -> Result<FilteredLfsr, CrackError> {
        let mut register = Lfsr::new(n, taps)?;
        let function = Filter::new(n, monomials)?;
        register.initialize_random();
        Ok(FilteredLfsr { register, function })
    }

    /// Replace the random initial state with an explicit one.
    pub fn initialize(&mut self, state: &[u8]) -> Result<(), CrackError> {
        self.register.initialize(state)
    }

    /// Filter the current state, then step the register.
    ///
    /// The register's own output bit is discarded.
    pub fn clock(&mut self) -> u8 {
        let output = self.function.apply(self.register.state());
        self.register.clock();
        output
    }
}
