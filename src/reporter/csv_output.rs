use crate::app::error::Error;
use crate::app::model::TestRecord;
use crate::configuration::constants::common::CSV_FILE_NAME;
use crate::reporter::write_atomically;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io;
use std::path::{Path, PathBuf};

const HEADER: [&str; 4] = ["category", "class", "test", "durationSeconds"];

/// Renders the export. The test name is always wrapped in double quotes and
/// never escaped, matching the files downstream consumers already read; a
/// name containing `"` or a line break therefore yields an invalid row.
pub fn render_csv(records: &[TestRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);
    writer.write_record(&HEADER)?;
    for record in records {
        writer.write_record(&[
            record.category.clone(),
            record.class_name.clone(),
            format!("\"{}\"", record.name),
            record.duration_seconds.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::Other, err.to_string())))
}

/// Writes every record, in order, to the fixed CSV file inside `dir`.
pub fn write_csv(records: &[TestRecord], dir: &Path) -> Result<PathBuf, Error> {
    let target = dir.join(CSV_FILE_NAME);
    let contents = render_csv(records).map_err(|err| Error::Output {
        path: target.clone(),
        source: err.into(),
    })?;
    write_atomically(&target, &contents)?;
    Ok(target)
}
