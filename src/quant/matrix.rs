use std::borrow::Cow;
use std::collections::{btree_set, BTreeSet};
use std::io::{self, Write};

use crate::quant::counts::SampleCounts;
use crate::quant::template::IdTemplate;

/// How the rows of the counts matrix are enumerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPolicy {
    /// One row per molecule observed in any sample, in sorted order
    Discovery,
    /// One row per index in `start..=end`, rendered through `template`
    FixedRange {
        template: IdTemplate,
        start: u64,
        end: u64,
    },
}

impl IdPolicy {
    pub fn is_discovery(&self) -> bool {
        matches!(self, IdPolicy::Discovery)
    }
}

/// Column layout of the rendered matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFormat {
    pub delimiter: char,
    pub include_ids: bool,
}

/// One output row: a molecule ID and its count in each sample, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow<'a> {
    pub molecule_id: Cow<'a, str>,
    pub counts: Vec<u64>,
}

/// Molecule IDs to report, computed once all samples are loaded
#[derive(Debug)]
pub enum MoleculeIndex<'a> {
    Discovered(BTreeSet<&'a str>),
    Range {
        template: &'a IdTemplate,
        start: u64,
        end: u64,
    },
}

impl<'a> MoleculeIndex<'a> {
    pub fn build(samples: &'a [SampleCounts], policy: &'a IdPolicy) -> Self {
        match policy {
            IdPolicy::Discovery => MoleculeIndex::Discovered(
                samples.iter().flat_map(SampleCounts::molecule_ids).collect(),
            ),
            IdPolicy::FixedRange { template, start, end } => MoleculeIndex::Range {
                template,
                start: *start,
                end: *end,
            },
        }
    }

    /// Number of rows this index will produce
    pub fn len(&self) -> usize {
        match self {
            MoleculeIndex::Discovered(ids) => ids.len(),
            MoleculeIndex::Range { start, end, .. } if start <= end => {
                usize::try_from(end - start).map_or(usize::MAX, |n| n.saturating_add(1))
            }
            MoleculeIndex::Range { .. } => 0,
        }
    }
}

enum MoleculeIds<'a> {
    Discovered(btree_set::IntoIter<&'a str>),
    Range {
        template: &'a IdTemplate,
        next: u64,
        end: u64,
        exhausted: bool,
    },
}

impl<'a> Iterator for MoleculeIds<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            MoleculeIds::Discovered(ids) => ids.next().map(Cow::Borrowed),
            MoleculeIds::Range { template, next, end, exhausted } => {
                if *exhausted || *next > *end {
                    return None;
                }
                let id = template.render(*next);
                // `end` may be u64::MAX, so stop before overflowing
                if *next == *end {
                    *exhausted = true;
                } else {
                    *next += 1;
                }
                Some(Cow::Owned(id))
            }
        }
    }
}

/// Lazy sequence of matrix rows over a fixed set of samples
pub struct MatrixRows<'a> {
    samples: &'a [SampleCounts],
    ids: MoleculeIds<'a>,
    remaining: usize,
}

impl<'a> Iterator for MatrixRows<'a> {
    type Item = MatrixRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let molecule_id = self.ids.next()?;
        let counts = self
            .samples
            .iter()
            .map(|sample| sample.get(&molecule_id))
            .collect();
        self.remaining = self.remaining.saturating_sub(1);
        Some(MatrixRow { molecule_id, counts })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for MatrixRows<'_> {}

/// Build the row sequence for `samples` under the given ID policy
///
/// # Arguments
/// * `samples` - Per-sample counts, in input file order
/// * `policy` - Discovery or fixed-range enumeration of molecule IDs
///
/// # Returns
/// * An iterator yielding exactly one row per molecule in the index
pub fn assemble<'a>(samples: &'a [SampleCounts], policy: &'a IdPolicy) -> MatrixRows<'a> {
    let index = MoleculeIndex::build(samples, policy);
    let remaining = index.len();
    let ids = match index {
        MoleculeIndex::Discovered(ids) => MoleculeIds::Discovered(ids.into_iter()),
        MoleculeIndex::Range { template, start, end } => MoleculeIds::Range {
            template,
            next: start,
            end,
            exhausted: start > end,
        },
    };
    MatrixRows { samples, ids, remaining }
}

/// Write matrix rows as delimiter-separated text, one row per line
///
/// Returns the number of rows written.
pub fn write_counts_matrix<'a, W, I>(writer: &mut W, rows: I, format: &MatrixFormat) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = MatrixRow<'a>>,
{
    let mut written = 0;
    for row in rows {
        let mut first = true;
        if format.include_ids {
            write!(writer, "{}", row.molecule_id)?;
            first = false;
        }
        for count in &row.counts {
            if !first {
                write!(writer, "{}", format.delimiter)?;
            }
            write!(writer, "{}", count)?;
            first = false;
        }
        writeln!(writer)?;
        written += 1;
    }
    Ok(written)
}
