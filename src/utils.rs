use crate::error::CrackError;

/// Bit `i` of `seed`, least significant bit first.
pub fn seed_bit(seed: u32, i: usize) -> u8 {
    ((seed >> i) & 1) as u8
}

/// Number of bits needed to represent `seed`.
pub fn bit_width(seed: u32) -> usize {
    (32 - seed.leading_zeros()) as usize
}

/// Reject any sequence element other than 0 or 1.
pub fn check_bits(bits: &[u8]) -> Result<(), CrackError> {
    match bits.iter().find(|&&b| b > 1) {
        Some(&value) => Err(CrackError::InvalidBit { value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_bits_lsb_first() {
        assert_eq!(1, seed_bit(0b1101, 0));
        assert_eq!(0, seed_bit(0b1101, 1));
        assert_eq!(1, seed_bit(0b1101, 3));
        assert_eq!(0, seed_bit(0b1101, 31));
    }

    #[test]
    fn bit_widths() {
        assert_eq!(0, bit_width(0));
        assert_eq!(1, bit_width(1));
        assert_eq!(8, bit_width(0xff));
        assert_eq!(9, bit_width(0x100));
        assert_eq!(32, bit_width(u32::max_value()));
    }

    #[test]
    fn check_bits_rejects_non_bits() {
        assert!(check_bits(&[0, 1, 1, 0]).is_ok());
        assert_eq!(
            Err(CrackError::InvalidBit { value: 2 }),
            check_bits(&[0, 1, 2])
        );
    }
}
