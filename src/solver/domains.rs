//! The current-domain store and its undo log.
//!
//! Domains are pruned in place during search and must be restored exactly
//! (value for value, order preserved) when a branch is abandoned. Every
//! removal therefore goes through [`DomainStore::prune`], which records the
//! value and its position in a [`RemovalLog`]; [`DomainStore::restore`]
//! replays the log in reverse. There is no other way to mutate a current
//! domain.

use crate::{
    error::{Result, SolverError},
    solver::problem::{Value, VariableId},
};

/// One removal record: which value was pruned from which variable's current
/// domain, and at which position it sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Removal {
    var: VariableId,
    value: Value,
    index: usize,
}

/// An ordered log of removals performed since the log was created.
///
/// A fresh log is created per search branch; restoring it undoes exactly the
/// prunings recorded in it and leaves it empty.
#[derive(Debug, Default)]
pub struct RemovalLog {
    entries: Vec<Removal>,
}

impl RemovalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arena-style store of current domains, indexed by variable.
#[derive(Debug, Clone)]
pub struct DomainStore {
    current: Vec<Vec<Value>>,
}

impl DomainStore {
    /// Copies every original domain into a mutable current domain.
    pub fn new(original: &[Vec<Value>]) -> Self {
        Self {
            current: original.to_vec(),
        }
    }

    /// The current domain of `var`, in order.
    pub fn current(&self, var: VariableId) -> &[Value] {
        &self.current[var]
    }

    pub fn size(&self, var: VariableId) -> usize {
        self.current[var].len()
    }

    pub fn is_wiped_out(&self, var: VariableId) -> bool {
        self.current[var].is_empty()
    }

    /// Removes `value` from `var`'s current domain, recording the removal in
    /// `log`. Relative order of the remaining values is unchanged.
    ///
    /// Attempting to prune a value that is not present is a programming
    /// error in propagation bookkeeping and fails with
    /// [`SolverError::Invariant`].
    pub fn prune(&mut self, var: VariableId, value: Value, log: &mut RemovalLog) -> Result<()> {
        let domain = &mut self.current[var];
        let Some(index) = domain.iter().position(|&v| v == value) else {
            return Err(SolverError::Invariant(format!(
                "value {value} is not in the current domain of variable {var}"
            ))
            .into());
        };
        let _ = domain.remove(index);
        log.entries.push(Removal { var, value, index });
        Ok(())
    }

    /// Undoes every removal in `log`, most recent first, reinserting each
    /// value at the position it was removed from. The log is emptied.
    pub fn restore(&mut self, log: &mut RemovalLog) {
        while let Some(Removal { var, value, index }) = log.entries.pop() {
            self.current[var].insert(index, value);
        }
    }
}
