use std::io::Write;

use log::trace;

use crate::{
    error::{reserve, Result},
    generate::Context,
    literal::{Clause, Lit},
};

/// Append-only clause storage sized once for the whole instance.
#[derive(Debug)]
pub(crate) struct ClauseBuffer {
    clauses: Vec<Clause>,
    expected: usize,
    variables: usize,
}

impl ClauseBuffer {
    pub(crate) fn new(variables: usize, expected: usize) -> Result<Self> {
        Ok(ClauseBuffer { clauses: reserve(expected, "clauses")?, expected, variables })
    }

    fn push(&mut self, clause: Clause) {
        assert!(self.clauses.len() < self.expected, "more than {} clauses", self.expected);
        self.clauses.push(clause);
    }

    pub(crate) fn len(&self) -> usize {
        self.clauses.len()
    }

    pub(crate) fn expected(&self) -> usize {
        self.expected
    }

    pub(crate) fn variables(&self) -> usize {
        self.variables
    }

    pub(crate) fn into_vec(self) -> Vec<Clause> {
        self.clauses
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Clause] {
        &mut self.clauses
    }

    fn valid(&self, lit: Lit) {
        assert!(lit.var() as usize <= self.variables, "literal {lit} out of range");
    }
}

impl<W: Write> Context<'_, W> {
    fn ternary(&mut self, lit0: Lit, lit1: Lit, lit2: Lit) -> Result<()> {
        for lit in [lit0, lit1, lit2] {
            self.clauses.valid(lit);
        }
        assert!(lit0.var() != lit1.var() && lit0.var() != lit2.var() && lit1.var() != lit2.var());
        let mut lits = [lit0, lit1, lit2];
        if !self.linear {
            self.rng.shuffle(&mut lits);
        }
        if self.verbose > 1 {
            writeln!(self.out, "c c[{}] {} {} {}", self.clauses.len(), lits[0], lits[1], lits[2])?;
        }
        self.clauses.push(Clause::ternary(lits));
        Ok(())
    }

    fn binary(&mut self, lit0: Lit, lit1: Lit) -> Result<()> {
        self.clauses.valid(lit0);
        self.clauses.valid(lit1);
        assert!(lit0.var() != lit1.var());
        let mut lits = [lit0, lit1];
        if !self.linear {
            self.rng.shuffle(&mut lits);
        }
        if self.verbose > 1 {
            writeln!(self.out, "c c[{}] {} {}", self.clauses.len(), lits[0], lits[1])?;
        }
        self.clauses.push(Clause::binary(lits));
        Ok(())
    }

    /// Tseitin clauses for `lhs = rhs0 ^ rhs1`.
    ///
    /// Unless linear, the signs of the pairs `(lhs, rhs0)`, `(lhs, rhs1)` and
    /// `(rhs0, rhs1)` are each flipped with probability one half. Flipping two
    /// operands of an XOR together leaves the gate unchanged.
    pub(crate) fn xor_gate(&mut self, mut lhs: Lit, mut rhs0: Lit, mut rhs1: Lit) -> Result<()> {
        if !self.linear {
            if self.rng.flip() {
                lhs = -lhs;
                rhs0 = -rhs0;
            }
            if self.rng.flip() {
                lhs = -lhs;
                rhs1 = -rhs1;
            }
            if self.rng.flip() {
                rhs0 = -rhs0;
                rhs1 = -rhs1;
            }
        }
        trace!("gate {} : {lhs} = {rhs0} ^ {rhs1}", self.xors);
        if self.verbose > 0 {
            writeln!(self.out, "c x[{}] {lhs} = {rhs0} ^ {rhs1}", self.xors)?;
        }
        self.ternary(lhs, rhs0, -rhs1)?;
        self.ternary(lhs, -rhs0, rhs1)?;
        self.ternary(-lhs, rhs0, rhs1)?;
        self.ternary(-lhs, -rhs0, -rhs1)?;
        self.xors += 1;
        Ok(())
    }

    /// The miter: `lit0 != lit1` as two binary clauses.
    pub(crate) fn distinct(&mut self, mut lit0: Lit, mut lit1: Lit) -> Result<()> {
        if !self.linear && self.rng.flip() {
            lit0 = -lit0;
            lit1 = -lit1;
        }
        trace!("distinct {} : {lit0} != {lit1}", self.distincts);
        if self.verbose > 0 {
            writeln!(self.out, "c d[{}] {lit0} != {lit1}", self.distincts)?;
        }
        self.binary(lit0, lit1)?;
        self.binary(-lit0, -lit1)?;
        self.distincts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
        (0..1u32 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
    }

    fn gate(seed: u64, linear: bool, lhs: i32, rhs0: i32, rhs1: i32) -> Vec<Clause> {
        let mut sink = std::io::sink();
        let mut cx = Context::scratch(&mut sink, seed, linear, 3, 4);
        cx.xor_gate(Lit::new(lhs), Lit::new(rhs0), Lit::new(rhs1)).unwrap();
        assert_eq!(cx.xors, 1);
        cx.clauses.into_vec()
    }

    #[quickcheck]
    fn xor_truth_table(seed: u64, linear: bool, signs: u8) -> bool {
        let sign = |bit: u8, v: i32| if signs >> bit & 1 == 1 { -v } else { v };
        let (lhs, rhs0, rhs1) = (sign(0, 3), sign(1, 1), sign(2, 2));
        let clauses = gate(seed, linear, lhs, rhs0, rhs1);
        clauses.len() == 4
            && assignments(3).all(|a| {
                let value = |l: i32| Lit::new(l).eval(&a);
                let holds = value(lhs) == (value(rhs0) != value(rhs1));
                clauses.iter().all(|c| c.satisfied(&a)) == holds
            })
    }

    #[test]
    fn linear_gate_clauses() {
        let rendered: Vec<String> = gate(0, true, 3, 2, 1).iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, ["3 2 -1 0", "3 -2 1 0", "-3 2 1 0", "-3 -2 -1 0"]);
    }

    #[quickcheck]
    fn distinct_truth_table(seed: u64, linear: bool, neg0: bool, neg1: bool) -> bool {
        let lit0 = if neg0 { Lit::new(-1) } else { Lit::new(1) };
        let lit1 = if neg1 { Lit::new(-2) } else { Lit::new(2) };
        let mut sink = std::io::sink();
        let mut cx = Context::scratch(&mut sink, seed, linear, 2, 2);
        cx.distinct(lit0, lit1).unwrap();
        let clauses = cx.clauses.into_vec();
        clauses.iter().all(|c| c.len() == 2)
            && assignments(2).all(|a| {
                clauses.iter().all(|c| c.satisfied(&a)) == (lit0.eval(&a) != lit1.eval(&a))
            })
    }

    #[test]
    fn verbose_lines() {
        let mut out = Vec::new();
        let mut cx = Context::scratch(&mut out, 0, true, 3, 6);
        cx.verbose = 2;
        cx.xor_gate(Lit::new(3), Lit::new(-1), Lit::new(2)).unwrap();
        cx.distinct(Lit::new(1), Lit::new(3)).unwrap();
        drop(cx);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "c x[0] 3 = -1 ^ 2\n\
             c c[0] 3 -1 -2\n\
             c c[1] 3 1 2\n\
             c c[2] -3 -1 2\n\
             c c[3] -3 1 -2\n\
             c d[0] 1 != 3\n\
             c c[4] 1 3\n\
             c c[5] -1 -3\n"
        );
    }

    #[test]
    #[should_panic]
    fn overflowing_buffer_aborts() {
        let mut sink = std::io::sink();
        let mut cx = Context::scratch(&mut sink, 0, true, 3, 3);
        let _ = cx.xor_gate(Lit::new(1), Lit::new(2), Lit::new(3));
    }
}
