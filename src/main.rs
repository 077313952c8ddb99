use chrono::Local;
use corrcrack::{parse_bits, progress, Arguments, Attack, Geffe};
use failure::{format_err, Error};
use log::debug;
use rayon::prelude::*;
use structopt::StructOpt;

use std::fs;
use std::process;
use std::sync::{Arc, Mutex};

fn now() -> String {
    Local::now().format("%T").to_string()
}

fn load_stream(args: &Arguments) -> Result<Vec<u8>, Error> {
    let text = if let Some(path) = &args.stream_file {
        fs::read_to_string(path)?
    } else {
        args.stream
            .clone()
            .ok_or_else(|| format_err!("no keystream given"))?
    };
    let observed = parse_bits(&text).map_err(|e| format_err!("{}", e))?;
    debug!("loaded {} observed bits", observed.len());
    Ok(observed)
}

fn find_candidates(args: &Arguments) -> Result<Vec<u32>, Error> {
    if args.taps.len() != 3 {
        return Err(format_err!(
            "expected three tap sets, got {}",
            args.taps.len()
        ));
    }
    let entries = parse_bits(&args.table).map_err(|e| format_err!("{}", e))?;
    if entries.len() != 8 {
        return Err(format_err!(
            "truth table must have 8 entries, got {}",
            entries.len()
        ));
    }
    let mut table = [0u8; 8];
    table.copy_from_slice(&entries);

    let generator = Geffe::new(
        args.length,
        [
            args.taps[0].as_slice(),
            args.taps[1].as_slice(),
            args.taps[2].as_slice(),
        ],
        table,
    )?;

    // fall back to the analytic bias of the table for the chosen register
    let predicted = match args.correlation {
        Some(fraction) => fraction,
        None => {
            let bias = generator.correlation(args.target)?;
            (*bias.numer(), *bias.denom())
        }
    };

    let observed = load_stream(args)?;
    let attack = Attack::new(generator, &observed, predicted, args.target)?;

    let keyspace = attack.keyspace();
    println!(
        "[{}] Attack on {} candidates over {} observed bits, predicted correlation {}/{}",
        now(),
        keyspace,
        observed.len(),
        predicted.0,
        predicted.1
    );

    let done = Arc::new(Mutex::new(0));
    let survivors = (0..keyspace)
        .into_par_iter()
        .map(|candidate| {
            {
                let mut done = done.lock().unwrap();
                *done += 1;
                progress(*done, keyspace as usize);
            }

            // each worker drives its own generator instance
            let mut attack = attack.clone();
            let hit = attack.carry_out(candidate as u32)?;
            Ok(hit.then(|| candidate as u32))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    println!();

    Ok(survivors.into_iter().flatten().collect())
}

fn main() {
    env_logger::init();

    let args = Arguments::from_args();

    match find_candidates(&args) {
        Ok(candidates) => {
            // an empty set is a valid outcome, not a failure
            if candidates.is_empty() {
                println!("[{}] No candidate matched the predicted correlation.", now());
            } else {
                println!("[{}] Surviving candidates", now());
                for candidate in &candidates {
                    println!("{:#x} ({})", candidate, candidate);
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
