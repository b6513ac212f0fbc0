//! Deferred output records.
//!
//! The machine never writes anywhere. Each `PRINT` appends an
//! [`OutputRecord`] to the run's [`Output`], and the caller decides what to do
//! with the sequence once the run has finished.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An item in the program output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputRecord {
    /// Emit one integer.
    Emit(i64),
}

impl OutputRecord {
    /// The integer this record emits.
    pub fn value(&self) -> i64 {
        match self {
            OutputRecord::Emit(v) => *v,
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputRecord::Emit(v) => write!(f, "{}", v),
        }
    }
}

/// Ordered sequence of output records accumulated during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output {
    records: Vec<OutputRecord>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record after every record already present.
    pub fn append(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Emitted integers in program order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(OutputRecord::value)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<OutputRecord> {
        self.records
    }
}

impl From<Vec<OutputRecord>> for Output {
    fn from(records: Vec<OutputRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<OutputRecord> for Output {
    fn from_iter<I: IntoIterator<Item = OutputRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Output {
    type Item = OutputRecord;
    type IntoIter = std::vec::IntoIter<OutputRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Output {
    type Item = &'a OutputRecord;
    type IntoIter = std::slice::Iter<'a, OutputRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
