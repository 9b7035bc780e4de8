use std::io::Write;

use crate::{
    error::{reserve, Result},
    generate::Context,
    literal::Lit,
};

/// Number of XOR gate outputs over both circuits.
pub(crate) fn temporaries_for(inputs: usize) -> usize {
    2 * inputs.saturating_sub(1)
}

/// The permuted, polarized variable assignment. Slots below `inputs` are the
/// shared inputs, the rest are gate outputs consumed in slot order.
#[derive(Debug)]
pub(crate) struct Pool {
    lits: Vec<Lit>,
    inputs: usize,
}

impl Pool {
    pub(crate) fn allocate<W: Write>(cx: &mut Context<'_, W>, inputs: usize) -> Result<Self> {
        let variables = inputs + temporaries_for(inputs);
        let mut lits = reserve(variables, "variables")?;
        for j in 0..variables {
            let mut lit = Lit::new(j as i32 + 1);
            if !cx.linear && cx.rng.flip() {
                lit = -lit;
            }
            lits.push(lit);
            if !cx.linear {
                cx.rng.swap_random(&mut lits, j);
            }
        }

        if cx.verbose > 0 {
            for (j, lit) in lits.iter().enumerate() {
                if j < inputs {
                    writeln!(cx.out, "c m[{j}] = input[{j}] = {lit}")?;
                } else {
                    writeln!(cx.out, "c m[{j}] = temporary[{}] = {lit}", j - inputs)?;
                }
            }
        }

        Ok(Pool { lits, inputs })
    }

    pub(crate) fn inputs(&self) -> &[Lit] {
        &self.lits[..self.inputs]
    }

    pub(crate) fn temporaries(&self) -> &[Lit] {
        &self.lits[self.inputs..]
    }
}
