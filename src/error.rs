use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0.to_string().trim_start_matches("error: ").trim_end())]
    /// Unknown flag or surplus positional argument
    Usage(clap::Error),
    #[error("unexpected non-digit letter in {what} '{arg}'")]
    NonDigit { what: &'static str, arg: String },
    #[error("number of inputs '{arg}' too large (maximum '{max}')")]
    InputsTooLarge { arg: String, max: u64 },
    #[error("seed '{arg}' too large")]
    SeedTooLarge { arg: String },
    #[error("out-of-memory allocating {0}")]
    OutOfMemory(&'static str),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reserve exactly `n` slots, reporting failure instead of aborting.
pub(crate) fn reserve<T>(n: usize, what: &'static str) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| Error::OutOfMemory(what))?;
    Ok(v)
}
