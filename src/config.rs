use clap::{ArgAction, Parser};
use log::warn;

use crate::{
    error::{Error, Result},
    rng::Lcg,
};

/// Largest input count whose variables `3 * inputs - 2` still fit in a
/// positive `i32` literal.
pub const INPUTS_MAX: u64 = (i32::MAX as u64 + 2) / 3;

const ABOUT: &str = "Generate the miter between two randomized parity circuits over shared inputs.";

const LONG_ABOUT: &str = "\
Prints on stdout, in DIMACS format, the miter between two XOR-tree circuits
over the given number of shared <INPUTS>. The encoding of the input
variables and the order of the temporary variables introduced for the XOR
gates in both circuits are randomized from <SEED>. Without a seed one is
derived from the process id and the clock, and printed in the first line.

The instances are solvable by XOR reasoning. With '--same' both circuits
reduce their inputs identically and congruence closure refutes the miter.
With '--reverse' the second circuit reduces in reverse order, a miter of
left- versus right-associative parity, and bounded variable elimination
solves it. '--linear' disables all randomization of indices and order.";

#[derive(Parser, Debug)]
#[command(name = "genxormiter", about = ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    /// Include information on variable and XOR order (twice for clauses)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Linear order (no randomization)
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub linear: bool,
    /// Same input order for both parity circuits
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub same: bool,
    /// Reverse input order in the second circuit
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub reverse: bool,
    /// Number of shared inputs
    pub inputs: Option<String>,
    /// Seed of the random stream
    pub seed: Option<String>,
}

/// How the second circuit's frontier relates to the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Independent permutation, pops drawn from anywhere in the frontier.
    Random,
    /// Copy of the first frontier.
    Same,
    /// First frontier reversed.
    Reverse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub inputs: usize,
    pub seed: Option<u64>,
    pub verbose: u8,
    pub linear: bool,
    pub order: Order,
}

impl Default for Config {
    fn default() -> Self {
        Config { inputs: 0, seed: None, verbose: 0, linear: false, order: Order::Random }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DecimalError {
    NonDigit,
    TooLarge,
}

/// Parse a decimal string of ASCII digits no larger than `max`.
pub(crate) fn parse_decimal(arg: &str, max: u64) -> std::result::Result<u64, DecimalError> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::NonDigit);
    }
    arg.bytes().try_fold(0u64, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add((b - b'0') as u64))
            .filter(|acc| *acc <= max)
            .ok_or(DecimalError::TooLarge)
    })
}

impl Config {
    /// The seed to run with, derived from the process when none was given.
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => Lcg::from_process().state(),
        }
    }

    pub fn parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Args::try_parse_from(args) {
            Ok(args) => Config::from_args(args),
            Err(e) => Err(Error::Usage(e)),
        }
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let inputs = match &args.inputs {
            None => 0,
            Some(arg) => match parse_decimal(arg, INPUTS_MAX) {
                Ok(n) => n as usize,
                Err(DecimalError::NonDigit) => {
                    return Err(Error::NonDigit { what: "inputs", arg: arg.clone() })
                }
                Err(DecimalError::TooLarge) => {
                    return Err(Error::InputsTooLarge { arg: arg.clone(), max: INPUTS_MAX })
                }
            },
        };
        let seed = match &args.seed {
            None => None,
            Some(arg) => match parse_decimal(arg, u64::MAX) {
                Ok(seed) => Some(seed),
                Err(DecimalError::NonDigit) => {
                    return Err(Error::NonDigit { what: "seed", arg: arg.clone() })
                }
                Err(DecimalError::TooLarge) => {
                    return Err(Error::SeedTooLarge { arg: arg.clone() })
                }
            },
        };
        let order = match (args.same, args.reverse) {
            (true, true) => {
                warn!("'--same' takes precedence, ignoring '--reverse'");
                Order::Same
            }
            (true, false) => Order::Same,
            (false, true) => Order::Reverse,
            (false, false) => Order::Random,
        };
        Ok(Config { inputs, seed, verbose: args.verbose.min(2), linear: args.linear, order })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        Config::parse_from(std::iter::once("genxormiter").chain(args.iter().copied()))
    }

    #[test]
    fn inputs_max_fits_literals() {
        assert_eq!(INPUTS_MAX, 715827883);
        assert!(3 * INPUTS_MAX - 2 <= i32::MAX as u64);
        assert!(3 * (INPUTS_MAX + 1) - 2 > i32::MAX as u64);
    }

    #[test]
    fn decimals() {
        assert_eq!(parse_decimal("0", 10), Ok(0));
        assert_eq!(parse_decimal("0012", 12), Ok(12));
        assert_eq!(parse_decimal("13", 12), Err(DecimalError::TooLarge));
        assert_eq!(parse_decimal("", 12), Err(DecimalError::NonDigit));
        assert_eq!(parse_decimal("1a", 12), Err(DecimalError::NonDigit));
        assert_eq!(parse_decimal("+1", 12), Err(DecimalError::NonDigit));
        assert_eq!(parse_decimal("18446744073709551615", u64::MAX), Ok(u64::MAX));
        assert_eq!(parse_decimal("18446744073709551616", u64::MAX), Err(DecimalError::TooLarge));
        assert_eq!(parse_decimal("99999999999999999999999", u64::MAX), Err(DecimalError::TooLarge));
    }

    #[test]
    fn non_digit_wins_over_range() {
        assert_eq!(parse_decimal("99999999999999999999x", u64::MAX), Err(DecimalError::NonDigit));
    }

    #[test]
    fn flags_and_positionals() {
        let config = parse(&["-v", "--verbose", "-v", "-l", "7", "42"]).unwrap();
        assert_eq!(
            config,
            Config { inputs: 7, seed: Some(42), verbose: 2, linear: true, order: Order::Random }
        );
        assert_eq!(parse(&[]).unwrap(), Config::default());
        assert_eq!(parse(&["-r", "3"]).unwrap().order, Order::Reverse);
        assert_eq!(parse(&["--same", "3"]).unwrap().order, Order::Same);
        assert_eq!(parse(&["-s", "-r"]).unwrap().order, Order::Same);
    }

    #[test]
    fn range_errors() {
        assert!(parse(&["715827883"]).is_ok());
        assert!(matches!(
            parse(&["715827884"]),
            Err(Error::InputsTooLarge { max: INPUTS_MAX, .. })
        ));
        assert!(matches!(parse(&["1", "18446744073709551616"]), Err(Error::SeedTooLarge { .. })));
    }

    #[test]
    fn malformed_numbers() {
        assert!(matches!(parse(&["1x"]), Err(Error::NonDigit { what: "inputs", .. })));
        assert!(matches!(parse(&["3", "seed"]), Err(Error::NonDigit { what: "seed", .. })));
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse(&["--bogus"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["1", "2", "3"]), Err(Error::Usage(_))));
    }

    #[test]
    fn messages() {
        let err = parse(&["715827884"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number of inputs '715827884' too large (maximum '715827883')"
        );
        let err = parse(&["3", "1-"]).unwrap_err();
        assert_eq!(err.to_string(), "unexpected non-digit letter in seed '1-'");
    }

    #[test]
    fn clap_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
