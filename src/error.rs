use failure::Fail;

/// Validation errors raised at construction and call boundaries.
///
/// Once a register, generator or cipher is validly constructed, its
/// per-clock and per-round operations cannot fail.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CrackError {
    /// A bit sequence whose length does not match the register length,
    /// or a register length outside the supported range.
    #[fail(display = "invalid length: expected {} bits, got {}", expected, actual)]
    InvalidLength { expected: usize, actual: usize },

    /// A tap outside `[0, n-1]`, or a tap set missing position 0.
    #[fail(display = "invalid tap set {:?} for register length {}", taps, n)]
    InvalidTapSet { taps: Vec<usize>, n: usize },

    /// A monomial referencing a position outside the register state.
    #[fail(
        display = "monomial references position {} outside register length {}",
        position, n
    )]
    InvalidMonomial { position: usize, n: usize },

    /// Seed or candidate sub-key wider than the register.
    #[fail(display = "seed {:#x} does not fit in {} bits", seed, n)]
    InvalidKey { seed: u32, n: usize },

    /// A sequence element other than 0 or 1.
    #[fail(display = "sequence element {} is not a bit", value)]
    InvalidBit { value: u8 },

    #[fail(display = "correlation denominator must be nonzero")]
    InvalidCorrelation,

    #[fail(display = "target register index {} out of range", index)]
    InvalidTarget { index: usize },
}
