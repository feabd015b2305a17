//! Tab-separated input and output
//!
//! Input rows must carry the column headers the [`Variant`] model
//! expects; extra columns are ignored. Output is the fixed 17-column
//! layout from [`crate::record`].

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::PriorsError;
use crate::record::{VariantRecord, OUTPUT_HEADERS};
use crate::variant::Variant;

/// Read variants from tab-separated input with a header row
pub fn read_variants<R: Read>(reader: R) -> Result<Vec<Variant>, PriorsError> {
    let mut tsv = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut variants = Vec::new();
    for row in tsv.deserialize() {
        variants.push(row?);
    }
    Ok(variants)
}

pub fn read_variants_from_path(path: &Path) -> Result<Vec<Variant>, PriorsError> {
    let file = std::fs::File::open(path)?;
    read_variants(file)
}

/// Write the full output table, header row included
pub fn write_records<W: Write>(writer: W, records: &[VariantRecord]) -> Result<(), PriorsError> {
    let mut tsv = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    tsv.write_record(OUTPUT_HEADERS)?;
    for record in records {
        tsv.write_record(record.to_row())?;
    }
    tsv.flush()?;
    Ok(())
}

pub fn write_records_to_path(path: &Path, records: &[VariantRecord]) -> Result<(), PriorsError> {
    let file = std::fs::File::create(path)?;
    write_records(file, records)
}
