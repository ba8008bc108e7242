/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::{env, process::ExitCode};

use argbind::{ParseError, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct ParseOpt {
    count: u32,
    ratio: f64,
    name: String,
    verbose: bool,
    color: bool,
    inputs: Vec<String>,
}

impl ParseOpt {
    fn new() -> Result<ParseOpt, ParseError> {
        let mut n_count: u32 = 1;
        let mut n_ratio: f64 = 1.0;
        let mut n_name = String::new();
        let mut n_verbose = false;
        let mut n_color = true;
        let mut n_inputs = Vec::new();

        let mut parser = Parser::new();
        parser.add_option("-n", &mut n_count);
        parser.describe("-n", "Number of repetitions");
        parser.add_option("ratio", &mut n_ratio);
        parser.describe("ratio", "Scale factor, also accepted as ratio=<value>");
        parser.add_option("-name", &mut n_name);
        parser.add_switch("-v", &mut n_verbose, true);
        parser.describe("-v", "Print every input");
        parser.add_switch("-no-color", &mut n_color, false);
        parser.remaining_arguments(&mut n_inputs);
        parser.parse(env::args().skip(1))?;

        Ok(ParseOpt {
            count: n_count,
            ratio: n_ratio,
            name: n_name,
            verbose: n_verbose,
            color: n_color,
            inputs: n_inputs,
        })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = match ParseOpt::new() {
        Ok(args) => args,
        Err(err) => return err.into(),
    };
    info!(inputs = args.inputs.len(), "arguments parsed");

    eprintln!("option -n (Count) with arg {}", args.count);
    eprintln!("option ratio (Ratio) with arg {}", args.ratio);
    eprintln!("option -name (Name) with arg '{}'", args.name);
    eprintln!("switch -v (Verbose) is {}", args.verbose);
    eprintln!("switch -no-color (Color) is {}", args.color);
    if args.verbose {
        for input in &args.inputs {
            eprintln!("Input: {input}");
        }
    } else {
        eprintln!("{} inputs", args.inputs.len());
    }
    ExitCode::SUCCESS
}
