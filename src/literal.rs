use std::{fmt::Display, ops::Neg};

/// A signed DIMACS literal. The magnitude is the variable, the sign its
/// polarity. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lit(i32);

impl Lit {
    pub fn new(lit: i32) -> Self {
        assert!(lit != 0 && lit != i32::MIN, "invalid literal {lit}");
        Lit(lit)
    }

    pub fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Value of this literal under an assignment indexed by `var - 1`.
    pub fn eval(self, assignment: &[bool]) -> bool {
        assignment[self.var() as usize - 1] != self.is_negative()
    }
}

impl Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Lit {
        Lit(-self.0)
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// At most three literals, unused slots hold `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    lits: [i32; 3],
}

impl Clause {
    pub fn empty() -> Self {
        Clause { lits: [0; 3] }
    }

    pub fn unit(lit: Lit) -> Self {
        Clause { lits: [lit.0, 0, 0] }
    }

    pub fn binary(lits: [Lit; 2]) -> Self {
        Clause { lits: [lits[0].0, lits[1].0, 0] }
    }

    pub fn ternary(lits: [Lit; 3]) -> Self {
        Clause { lits: [lits[0].0, lits[1].0, lits[2].0] }
    }

    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.lits.iter().filter(|l| **l != 0).map(|l| Lit(*l))
    }

    pub fn len(&self) -> usize {
        self.lits().count()
    }

    pub fn satisfied(&self, assignment: &[bool]) -> bool {
        self.lits().any(|l| l.eval(assignment))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for lit in self.lits() {
            write!(f, "{lit} ")?;
        }
        write!(f, "0")
    }
}
