//! # Distribution
//!
//! This module implements the algebra the interpreter computes with: exact
//! integer-weighted distributions.
//!
//! A distribution is a sequence of `(value, weight)` entries kept strictly sorted by
//! value, with every weight positive and no value present twice. The combinators all
//! build fresh distributions and uphold that invariant; weights combine by
//! multiplication (independent draws) and accumulate by addition (shared outcomes).
//!
//! All weight and value arithmetic is checked: combining distributions too heavy for
//! the fixed-width integers fails with an [`OverflowError`] instead of wrapping.

use std::{error::Error, fmt::Display};

/// One value of a distribution with its integer weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub value: i64,
    pub weight: u64,
}

/// Error raised when combining distributions overflows the fixed-width value or
/// weight arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowError;

impl Display for OverflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("distribution arithmetic overflowed")
    }
}

impl Error for OverflowError {}

/// An exact, finite, integer-weighted distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<Entry>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution holding a single value with weight 1.
    pub fn singleton(value: i64) -> Self {
        Self {
            entries: vec![Entry { value, weight: 1 }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entries, sorted ascending by value.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Adds `weight` to `value`, inserting the entry at its sorted position when the
    /// value is not present yet. Pushing a zero weight does nothing.
    pub fn push(&mut self, value: i64, weight: u64) -> Result<(), OverflowError> {
        if weight == 0 {
            return Ok(());
        }

        match self.entries.binary_search_by(|entry| entry.value.cmp(&value)) {
            Ok(index) => {
                let entry = &mut self.entries[index];
                entry.weight = entry.weight.checked_add(weight).ok_or(OverflowError)?;
            }
            Err(index) => self.entries.insert(index, Entry { value, weight }),
        }

        Ok(())
    }

    /// Distribution of the sums of two independent draws. An empty side acts as the
    /// neutral element.
    pub fn add(&self, rhs: &Distribution) -> Result<Distribution, OverflowError> {
        if self.is_empty() || rhs.is_empty() {
            let mut out = Distribution::new();
            out.push_all(self)?;
            out.push_all(rhs)?;
            return Ok(out);
        }

        Self::combine(self, rhs, |l, r| {
            Ok(Entry {
                value: l.value.checked_add(r.value).ok_or(OverflowError)?,
                weight: l.weight.checked_mul(r.weight).ok_or(OverflowError)?,
            })
        })
    }

    /// Distribution of the differences of two independent draws. An empty right side
    /// yields a copy of the left one.
    pub fn sub(&self, rhs: &Distribution) -> Result<Distribution, OverflowError> {
        if rhs.is_empty() {
            let mut out = Distribution::new();
            out.push_all(self)?;
            return Ok(out);
        }

        Self::combine(self, rhs, |l, r| {
            Ok(Entry {
                value: l.value.checked_sub(r.value).ok_or(OverflowError)?,
                weight: l.weight.checked_mul(r.weight).ok_or(OverflowError)?,
            })
        })
    }

    /// Distribution of the products of two independent draws.
    pub fn mul(&self, rhs: &Distribution) -> Result<Distribution, OverflowError> {
        Self::combine(self, rhs, |l, r| {
            Ok(Entry {
                value: l.value.checked_mul(r.value).ok_or(OverflowError)?,
                weight: l.weight.checked_mul(r.weight).ok_or(OverflowError)?,
            })
        })
    }

    /// Merges both operands into one distribution, accumulating the weights of shared
    /// values.
    pub fn union(&self, rhs: &Distribution) -> Result<Distribution, OverflowError> {
        let mut out = Distribution::new();

        out.push_all(self)?;
        out.push_all(rhs)?;

        Ok(out)
    }

    /// Expands every entry `(n, w)` into a fair die `1..=n` scaled by `w`. Entries
    /// with `n < 1` contribute nothing.
    pub fn dice(&self) -> Result<Distribution, OverflowError> {
        let mut out = Distribution::new();

        for entry in &self.entries {
            for face in 1..=entry.value.max(0) {
                out.push(face, entry.weight)?;
            }
        }

        Ok(out)
    }

    /// Treats `self` as a count distribution and rolls `die` that many times: every
    /// entry `(n, w)` contributes the distribution of the sum of `n` independent `die`
    /// draws, scaled by `w`. Counts below 1 contribute nothing.
    pub fn roll(&self, die: &Distribution) -> Result<Distribution, OverflowError> {
        let mut out = Distribution::new();

        for entry in &self.entries {
            if entry.value < 1 {
                continue;
            }

            let mut sum = die.clone();
            for _ in 1..entry.value {
                sum = sum.add(die)?;
            }

            out.push_all(&sum.scaled(entry.weight)?)?;
        }

        Ok(out)
    }

    fn push_all(&mut self, from: &Distribution) -> Result<(), OverflowError> {
        for entry in &from.entries {
            self.push(entry.value, entry.weight)?;
        }

        Ok(())
    }

    /// Multiplies every weight by `factor`.
    fn scaled(&self, factor: u64) -> Result<Distribution, OverflowError> {
        let mut out = Distribution::new();

        for entry in &self.entries {
            out.push(entry.value, entry.weight.checked_mul(factor).ok_or(OverflowError)?)?;
        }

        Ok(out)
    }

    /// Pairwise combination: applies `f` to every pair of entries of both operands and
    /// accumulates the results.
    fn combine(
        lhs: &Distribution,
        rhs: &Distribution,
        f: impl Fn(Entry, Entry) -> Result<Entry, OverflowError>,
    ) -> Result<Distribution, OverflowError> {
        let mut out = Distribution::new();

        for l in &lhs.entries {
            for r in &rhs.entries {
                let entry = f(*l, *r)?;
                out.push(entry.value, entry.weight)?;
            }
        }

        Ok(out)
    }
}
