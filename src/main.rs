use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use clap::{error::ErrorKind, Parser};
use env_logger::Env;
use genxormiter::{config::Args, generate, Config, Error};

fn run() -> Result<(), Error> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => e.exit(),
        Err(e) => return Err(Error::Usage(e)),
    };
    let config = Config::from_args(args)?;
    let seed = config.resolve_seed();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    generate(&config, seed, &mut out)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("genxormiter: error: {e}");
            ExitCode::from(1)
        }
    }
}
