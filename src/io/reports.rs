//! Result output: the final lookup table and the collision report.
//!
//! The output table is what the external text-transform UI consumes: for
//! every word (lowercased, O(1) lookup) the assigned phonetic form, its
//! respelled Latin rendering, and the original syllable count.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::assign::engine::{AssignMethod, AssignmentRecord, DuplicateEntry};
use crate::core::errors::Result;
use crate::io::persistence::write_json;
use crate::respell::respell;

/// One word's entry in the output table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Assigned monosyllabic phonetic form.
    pub mono: String,
    /// Approximate Latin respelling of the assigned form.
    pub respelled: String,
    /// The word's original syllable count.
    #[serde(rename = "numSyllables")]
    pub num_syllables: usize,
    /// Provenance of the assignment.
    pub method: AssignMethod,
}

/// Word → output record, keyed by lowercased word.
pub type OutputTable = IndexMap<String, OutputRecord>;

/// Build the output table from assignment records, running the respelling
/// pass. Bracketed failure placeholders are passed through unrespelled.
pub fn build_output_table(records: &IndexMap<String, AssignmentRecord>) -> OutputTable {
    let mut table = OutputTable::with_capacity(records.len());
    for (word, record) in records {
        let respelled = if record.method == AssignMethod::Failed {
            record.form.clone()
        } else {
            respell(&record.form)
        };
        table.insert(
            word.to_lowercase(),
            OutputRecord {
                mono: record.form.clone(),
                respelled,
                num_syllables: record.syllable_count,
                method: record.method,
            },
        );
    }
    table
}

/// Write the output table for the external UI.
pub async fn write_output_table(path: &Path, table: &OutputTable) -> Result<()> {
    write_json(path, table).await
}

/// Write the duplicate report for manual review.
pub async fn write_duplicates(path: &Path, duplicates: &[DuplicateEntry]) -> Result<()> {
    write_json(path, &duplicates).await
}
