use std::io::Write;

use log::{debug, info};

use crate::{
    config::Config,
    encode::ClauseBuffer,
    error::Result,
    instance::Instance,
    literal::{Clause, Lit},
    pool::{temporaries_for, Pool},
    rng::Lcg,
};

/// Mutable state of one generation run. Diagnostic `c` lines are written to
/// `out` as gates and clauses are produced.
pub(crate) struct Context<'a, W: Write> {
    pub(crate) rng: Lcg,
    pub(crate) linear: bool,
    pub(crate) verbose: u8,
    pub(crate) out: &'a mut W,
    pub(crate) clauses: ClauseBuffer,
    pub(crate) xors: usize,
    pub(crate) distincts: usize,
}

impl<'a, W: Write> Context<'a, W> {
    fn new(
        config: &Config,
        seed: u64,
        out: &'a mut W,
        variables: usize,
        expected: usize,
    ) -> Result<Self> {
        Ok(Context {
            rng: Lcg::new(seed),
            linear: config.linear,
            verbose: config.verbose,
            out,
            clauses: ClauseBuffer::new(variables, expected)?,
            xors: 0,
            distincts: 0,
        })
    }
}

#[cfg(test)]
impl<'a, W: Write> Context<'a, W> {
    pub(crate) fn scratch(
        out: &'a mut W,
        seed: u64,
        linear: bool,
        variables: usize,
        expected: usize,
    ) -> Self {
        let config = Config { linear, ..Config::default() };
        Context::new(&config, seed, out, variables, expected).unwrap()
    }
}

/// Build the miter instance for `config` from `seed`, writing verbose
/// diagnostics to `diagnostics`.
pub fn build<W: Write>(config: &Config, seed: u64, diagnostics: &mut W) -> Result<Instance> {
    let inputs = config.inputs;
    info!("generating miter over {inputs} inputs with seed {seed}");

    if inputs == 0 {
        return Ok(Instance::new(0, vec![Clause::empty()]));
    }

    if inputs == 1 {
        let mut rng = Lcg::new(seed);
        let lit = if !config.linear && rng.flip() { Lit::new(-1) } else { Lit::new(1) };
        return Ok(Instance::new(1, vec![Clause::unit(lit), Clause::unit(-lit)]));
    }

    let temporaries = temporaries_for(inputs);
    let variables = inputs + temporaries;
    let expected = 4 * temporaries + 2;
    debug!("{variables} variables, {expected} clauses expected");

    let mut cx = Context::new(config, seed, diagnostics, variables, expected)?;
    let pool = Pool::allocate(&mut cx, inputs)?;
    let outputs = cx.reduce(&pool, config.order)?;
    cx.distinct(outputs[0], outputs[1])?;
    assert_eq!(cx.xors, temporaries);
    assert_eq!(cx.distincts, 1);
    Ok(cx.assemble())
}

/// Write the complete instance, comment header included, to `out`.
pub fn generate<W: Write>(config: &Config, seed: u64, out: &mut W) -> Result<()> {
    writeln!(out, "c genxormiter {} {}", config.inputs, seed)?;
    let instance = build(config, seed, out)?;
    instance.write(out)?;
    out.flush()?;
    Ok(())
}
