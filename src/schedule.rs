use std::io::Write;

use log::debug;

use crate::{
    config::Order,
    error::{reserve, Result},
    generate::Context,
    literal::Lit,
    pool::Pool,
};

/// Scheduling policy resolved once from the mode flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Policy {
    order: Order,
    linear: bool,
}

impl Policy {
    /// Pops may take any live signal, not only the most recent one.
    fn random_pops(self) -> bool {
        !self.linear && self.order == Order::Random
    }
}

impl<W: Write> Context<'_, W> {
    fn frontiers(&mut self, pool: &Pool, order: Order) -> Result<[Vec<Lit>; 2]> {
        let inputs = pool.inputs();
        let mut first = reserve(inputs.len(), "first stack")?;
        first.extend_from_slice(inputs);
        if !self.linear {
            self.rng.shuffle(&mut first);
        }

        let mut second = reserve(inputs.len(), "second stack")?;
        match order {
            Order::Same => second.extend_from_slice(&first),
            Order::Reverse => second.extend(first.iter().rev()),
            Order::Random => {
                second.extend_from_slice(inputs);
                if !self.linear {
                    self.rng.shuffle(&mut second);
                }
            }
        }

        if self.verbose > 0 {
            for (i, stack) in [&first, &second].into_iter().enumerate() {
                for (j, lit) in stack.iter().enumerate() {
                    writeln!(self.out, "c s[{i}][{j}] = {lit}")?;
                }
            }
        }
        Ok([first, second])
    }

    /// Reduce both circuits to a single signal each, compiling every gate on
    /// the way. Returns the two circuit outputs.
    pub(crate) fn reduce(&mut self, pool: &Pool, order: Order) -> Result<[Lit; 2]> {
        let policy = Policy { order, linear: self.linear };
        let inputs = pool.inputs().len();
        assert!(inputs > 1);
        let mut stacks = self.frontiers(pool, order)?;
        let mut temporaries = pool.temporaries().iter().copied();

        while stacks[0].len() > 1 || stacks[1].len() > 1 {
            let i = if stacks[0].len() == 1 {
                1
            } else if stacks[1].len() == 1 || policy.linear {
                0
            } else {
                self.rng.flip() as usize
            };
            let stack = &mut stacks[i];
            assert!(stack.len() >= 2);

            let lhs = temporaries.next().expect("temporaries exhausted");
            let mut pop = || {
                let popped = if policy.random_pops() { self.rng.take(stack) } else { stack.pop() };
                popped.expect("empty frontier")
            };
            let rhs = [pop(), pop()];
            self.xor_gate(lhs, rhs[0], rhs[1])?;
            assert!(stack.len() < inputs);
            stack.push(lhs);
        }

        assert!(temporaries.next().is_none(), "unused temporaries");
        debug!("reduced both circuits with {} gates", self.xors);
        Ok([stacks[0][0], stacks[1][0]])
    }
}
