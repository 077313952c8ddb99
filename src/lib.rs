use structopt::StructOpt;

pub use crate::attack::Attack;
pub use crate::cipher::ArxCipher;
pub use crate::error::CrackError;
pub use crate::filter::{Filter, FilteredLfsr, Monomial};
pub use crate::geffe::Geffe;
pub use crate::lfsr::Lfsr;

mod attack;
mod cipher;
mod error;
mod filter;
mod geffe;
mod lfsr;
mod utils;

use std::num::ParseIntError;

fn parse_taps(src: &str) -> Result<Vec<usize>, ParseIntError> {
    src.split(',').map(|t| t.trim().parse()).collect()
}

/// Parse a string of '0' and '1' characters into a bit vector.
pub fn parse_bits(src: &str) -> Result<Vec<u8>, String> {
    src.trim()
        .chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            _ => Err(format!("invalid bit {:?}", c)),
        })
        .collect()
}

fn parse_fraction(src: &str) -> Result<(u64, u64), String> {
    let mut parts = src.splitn(2, '/');
    let numerator = parts
        .next()
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|e| format!("invalid numerator: {}", e))?;
    let denominator = match parts.next() {
        Some(d) => d
            .trim()
            .parse()
            .map_err(|e| format!("invalid denominator: {}", e))?,
        None => 1,
    };
    Ok((numerator, denominator))
}

#[derive(StructOpt, Debug)]
#[structopt(name = "corrcrack")]
pub struct Arguments {
    /// Register length in bits
    #[structopt(short = "n", long = "length", default_value = "16")]
    pub length: usize,

    /// Feedback taps of one register, e.g. -t 0,1,4,7 (exactly three times)
    #[structopt(
        short = "t",
        long = "taps",
        number_of_values = 1,
        parse(try_from_str = parse_taps)
    )]
    pub taps: Vec<Vec<usize>>,

    /// Combiner truth table as eight bits, e.g. 10100011
    #[structopt(short = "F", long = "table")]
    pub table: String,

    /// Observed keystream as a bit string
    #[structopt(short = "s", long = "stream", required_unless = "stream-file")]
    pub stream: Option<String>,

    /// File containing the observed keystream bit string
    #[structopt(short = "S", long = "stream-file")]
    pub stream_file: Option<String>,

    /// Index of the register under attack
    #[structopt(short = "r", long = "target", default_value = "1")]
    pub target: usize,

    /// Predicted correlation as an exact fraction, e.g. 3/4
    /// (defaults to the analytic bias of the truth table)
    #[structopt(short = "c", long = "correlation", parse(try_from_str = parse_fraction))]
    pub correlation: Option<(u64, u64)>,
}

#[inline]
pub fn progress(done: usize, total: usize) {
    print!(
        "\r{:.2} % ({} / {})",
        done as f32 / total as f32 * 100.0,
        done,
        total
    );
}

#[cfg(test)]
mod tests {
    use super::{parse_bits, parse_fraction, parse_taps, Attack, Geffe};

    // keystream analyzed in the original attack scenario
    const OBSERVED: &str = "11000101000110101001001101000010111100100010110101100110001101100100101001101011111110001011110111101101010110000010011110101101000010010011011000110001101101001111101100101000001100110011110011111100";

    #[test]
    fn parses_arguments() {
        assert_eq!(vec![0, 1, 4, 7], parse_taps("0,1,4,7").unwrap());
        assert_eq!(vec![1, 0, 1, 1], parse_bits("1011").unwrap());
        assert!(parse_bits("10x1").is_err());
        assert_eq!((3, 4), parse_fraction("3/4").unwrap());
        assert_eq!((1, 1), parse_fraction("1").unwrap());
        assert!(parse_fraction("a/4").is_err());
    }

    #[test]
    #[ignore]
    fn crack() {
        let generator = Geffe::new(
            16,
            [&[0, 1, 4, 7], &[0, 1, 7, 11], &[0, 2, 3, 5]],
            [1, 0, 1, 0, 0, 0, 1, 1],
        )
        .unwrap();
        let observed = parse_bits(OBSERVED).unwrap();
        assert_eq!(200, observed.len());

        let mut attack = Attack::new(generator, &observed, (3, 4), 1).unwrap();
        assert_eq!(1 << 16, attack.keyspace());

        // this table maps the all-zero baseline to a constant stream, so
        // no candidate reaches the predicted correlation on this data
        let survivors = attack.run().unwrap();
        assert!(survivors.is_empty());
    }
}
