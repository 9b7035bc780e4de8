use std::io::Write;

use crate::{generate::Context, literal::Clause};

/// A finished CNF formula, ready to be written in DIMACS format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    variables: usize,
    clauses: Vec<Clause>,
}

impl Instance {
    pub fn new(variables: usize, clauses: Vec<Clause>) -> Self {
        Instance { variables, clauses }
    }

    pub fn variables(&self) -> usize {
        self.variables
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn write<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "p cnf {} {}", self.variables, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(out, "{clause}")?;
        }
        Ok(())
    }
}

impl<W: Write> Context<'_, W> {
    /// Check the clause total and, unless linear, shuffle clause order.
    pub(crate) fn assemble(mut self) -> Instance {
        assert_eq!(self.clauses.len(), self.clauses.expected(), "clause count mismatch");
        if !self.linear {
            self.rng.shuffle(self.clauses.as_mut_slice());
        }
        Instance::new(self.clauses.variables(), self.clauses.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Lit;

    #[test]
    fn dimacs() {
        let instance = Instance::new(
            2,
            vec![Clause::binary([Lit::new(1), Lit::new(-2)]), Clause::unit(Lit::new(2))],
        );
        let mut out = Vec::new();
        instance.write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }

    #[test]
    #[should_panic(expected = "clause count mismatch")]
    fn short_buffer_aborts() {
        let mut sink = std::io::sink();
        let cx = Context::scratch(&mut sink, 0, true, 4, 10);
        cx.assemble();
    }

    #[test]
    fn shuffle_keeps_clauses() {
        let mut sink = std::io::sink();
        let mut cx = Context::scratch(&mut sink, 21, false, 3, 6);
        cx.xor_gate(Lit::new(1), Lit::new(2), Lit::new(3)).unwrap();
        cx.distinct(Lit::new(1), Lit::new(2)).unwrap();
        let mut before: Vec<Clause> = cx.clauses.as_mut_slice().to_vec();
        let instance = cx.assemble();
        let mut after = instance.clauses().to_vec();
        let key = |c: &Clause| c.lits().map(|l| l.get()).collect::<Vec<_>>();
        before.sort_by_key(key);
        after.sort_by_key(key);
        assert_eq!(before, after);
    }
}
