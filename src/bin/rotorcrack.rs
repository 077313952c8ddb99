//! Known-plaintext contradiction attack against a fixed 4-rotor machine
//! with a single rotating rotor. Self-contained: brute forces the 26
//! initial settings of the rotating rotor and reports the first setting
//! whose two derived encryptions are free of contradictions.

use failure::{format_err, Error};
use lazy_static::lazy_static;
use log::debug;
use structopt::StructOpt;

use std::process;

/// One fixed-wiring rotor, with the inverse mapping precomputed.
struct Rotor {
    wiring: [u8; 26],
    inverse: [u8; 26],
}

impl Rotor {
    fn new(wiring: &str) -> Rotor {
        let mut table = [0u8; 26];
        table.copy_from_slice(wiring.as_bytes());
        let mut inverse = [0u8; 26];
        for (i, &out) in table.iter().enumerate() {
            inverse[usize::from(out - b'A')] = b'A' + i as u8;
        }
        Rotor {
            wiring: table,
            inverse,
        }
    }

    fn get(&self, c: u8) -> u8 {
        self.wiring[usize::from(c - b'A')]
    }

    fn get_reverse(&self, c: u8) -> u8 {
        self.inverse[usize::from(c - b'A')]
    }
}

lazy_static! {
    static ref N: Rotor = Rotor::new("BDFHJLCPRTXVZNYEIWGAKMUSQO");
    static ref M: Rotor = Rotor::new("AJDKSIRUXBLHWTMCQGZNPYFVOE");
    static ref L: Rotor = Rotor::new("EKMFLGDQVZNTOWYHXUSPAIBRCJ");
    static ref R: Rotor = Rotor::new("YRUHQSLDPXNGOKMIEBFZCWVJAT");
}

fn shift(c: u8, rotation: u8) -> u8 {
    (c - b'A' + rotation) % 26 + b'A'
}

fn unshift(c: u8, rotation: u8) -> u8 {
    (c - b'A' + 26 - rotation) % 26 + b'A'
}

/// The rotating rotor conjugated by the cyclic shift of its offset.
fn rotor_pass(c: u8, rotation: u8) -> u8 {
    unshift(N.get(shift(c, rotation)), rotation)
}

/// The fixed stator stack: through M and L, off R, back through L and M.
fn stator_pass(c: u8) -> u8 {
    M.get_reverse(L.get_reverse(R.get(L.get(M.get(c)))))
}

/// Encrypt a word from an initial setting; the rotor steps before each
/// letter.
fn encrypt<F>(word: &[u8], setting: u8, f: F) -> Vec<u8>
where
    F: Fn(u8, u8) -> u8,
{
    let mut rotation = setting;
    word.iter()
        .map(|&c| {
            rotation = (rotation + 1) % 26;
            f(c, rotation)
        })
        .collect()
}

/// A setting is consistent when equal letters of `a` always map to equal
/// letters of `b`.
fn check_contradictions(a: &[u8], b: &[u8]) -> bool {
    for (i, &c) in a.iter().enumerate() {
        for (j, &d) in a.iter().enumerate() {
            if c == d && b[i] != b[j] {
                return false;
            }
        }
    }
    true
}

/// Brute force the initial setting of the rotating rotor from a known
/// plaintext/ciphertext pair and report the result as a readable line.
pub fn attack(plaintext: &str, ciphertext: &str) -> String {
    let plain = plaintext.as_bytes();
    let cipher = ciphertext.as_bytes();
    for setting in 0..26 {
        let a = encrypt(plain, setting, |c, rotation| {
            stator_pass(rotor_pass(c, rotation))
        });
        let b = encrypt(cipher, setting, rotor_pass);
        debug!(
            "setting {}: checked {} over {}",
            setting,
            String::from_utf8_lossy(&a),
            String::from_utf8_lossy(&b)
        );
        if check_contradictions(&a, &b) {
            return format!("HURRAY. Initial setting of N is {}", (b'A' + setting) as char);
        }
    }
    "The initial rotor setting was not found".to_string()
}

#[derive(StructOpt, Debug)]
#[structopt(name = "rotorcrack")]
struct Arguments {
    /// Known plaintext, uppercase A-Z
    plaintext: String,

    /// Matching ciphertext, uppercase A-Z, same length
    ciphertext: String,
}

fn validate(args: &Arguments) -> Result<(), Error> {
    if args.plaintext.len() != args.ciphertext.len() {
        return Err(format_err!(
            "plaintext and ciphertext must have the same length"
        ));
    }
    for text in &[&args.plaintext, &args.ciphertext] {
        if !text.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(format_err!("inputs must be uppercase A-Z"));
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Arguments::from_args();
    if let Err(e) = validate(&args) {
        eprintln!("{}", e);
        process::exit(1);
    }

    println!("{}", attack(&args.plaintext, &args.ciphertext));
}
