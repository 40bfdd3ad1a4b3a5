//! The mutable, ordered list of argument strings being scanned.
//!
//! Entries are shared handles (`Rc<str>`): any entry handed to a caller
//! stays alive for as long as the caller holds it, no matter how the vector
//! is grown or spliced afterwards. Splices build a complete replacement
//! backing vector aside and swap it in only on success, so a failed
//! operation is never observable as a half-applied splice.
//!
//! The vector holds the process argument list verbatim, entry 0 included;
//! scanning conventions (starting at entry 1) live in [`crate::cursor`].

use std::rc::Rc;

use crate::error::AllocError;

/// Growable, ordered sequence of argument strings with atomic splicing.
#[derive(Debug, Clone, Default)]
pub struct ArgVec {
    entries: Vec<Rc<str>>,
    limit: Option<usize>,
}

impl ArgVec {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vector from a process-style argument list, entry 0 first.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: args.into_iter().map(|s| Rc::from(s.as_ref())).collect(),
            limit: None,
        }
    }

    /// Caps the total entry count at `max_entries`.
    ///
    /// Growth past the cap fails with [`AllocError::LimitExceeded`] and
    /// leaves the vector unchanged. The cap guards against a response file
    /// expanding into an absurd number of entries; entries already present
    /// are never evicted by it.
    pub fn with_limit(mut self, max_entries: usize) -> Self {
        self.limit = Some(max_entries);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the vector holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.as_ref())
    }

    /// Returns a shared handle to the entry at `index`.
    ///
    /// The handle stays valid across later splices of the vector.
    pub fn entry(&self, index: usize) -> Option<Rc<str>> {
        self.entries.get(index).cloned()
    }

    /// All entries, in order.
    pub fn as_slice(&self) -> &[Rc<str>] {
        &self.entries
    }

    /// Consumes the vector, yielding its entries.
    pub fn into_entries(self) -> Vec<Rc<str>> {
        self.entries
    }

    /// Appends `strings` at the end.
    ///
    /// On failure nothing is appended.
    pub fn append_range<I, S>(&mut self, strings: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let new: Vec<Rc<str>> = strings
            .into_iter()
            .map(|s| Rc::from(s.as_ref()))
            .collect();
        let requested = self.entries.len() + new.len();
        self.check_limit(requested)?;
        self.entries.try_reserve_exact(new.len())?;
        self.entries.extend(new);
        Ok(())
    }

    /// Replaces the single entry at `index` with `tokens`.
    ///
    /// Entries before `index` are preserved, entries after it shift by
    /// `tokens.len() - 1`. An empty `tokens` removes the entry. The
    /// replacement backing vector is sized to exactly the final length and
    /// swapped in whole, so on failure the vector is untouched and handles
    /// returned earlier stay valid either way.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn splice_replace(&mut self, index: usize, tokens: &[Rc<str>]) -> Result<(), AllocError> {
        assert!(
            index < self.entries.len(),
            "splice_replace index {index} out of bounds (len {})",
            self.entries.len()
        );
        let new_len = self.entries.len() - 1 + tokens.len();
        self.check_limit(new_len)?;
        let mut next: Vec<Rc<str>> = Vec::new();
        next.try_reserve_exact(new_len)?;
        next.extend(self.entries[..index].iter().cloned());
        next.extend(tokens.iter().cloned());
        next.extend(self.entries[index + 1..].iter().cloned());
        log::trace!(
            "spliced {} token(s) over entry {index}, vector now {} entries",
            tokens.len(),
            next.len()
        );
        self.entries = next;
        Ok(())
    }

    /// Inserts `tokens` before the entry at `index` without removing
    /// anything. `index == len` appends.
    ///
    /// Same atomicity as [`ArgVec::splice_replace`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the current length.
    pub fn splice_insert(&mut self, index: usize, tokens: &[Rc<str>]) -> Result<(), AllocError> {
        assert!(
            index <= self.entries.len(),
            "splice_insert index {index} out of bounds (len {})",
            self.entries.len()
        );
        if tokens.is_empty() {
            return Ok(());
        }
        let new_len = self.entries.len() + tokens.len();
        self.check_limit(new_len)?;
        let mut next: Vec<Rc<str>> = Vec::new();
        next.try_reserve_exact(new_len)?;
        next.extend(self.entries[..index].iter().cloned());
        next.extend(tokens.iter().cloned());
        next.extend(self.entries[index..].iter().cloned());
        log::trace!(
            "inserted {} token(s) at entry {index}, vector now {} entries",
            tokens.len(),
            next.len()
        );
        self.entries = next;
        Ok(())
    }

    fn check_limit(&self, requested: usize) -> Result<(), AllocError> {
        match self.limit {
            Some(limit) if requested > limit => {
                Err(AllocError::LimitExceeded { requested, limit })
            }
            _ => Ok(()),
        }
    }
}
