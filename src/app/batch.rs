use crate::app::error::Error;
use crate::configuration::constants::common::BATCH_FILE_NAME;
use crate::configuration::manifest::BatchSettings;
use crate::reporter::write_atomically;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

const LINE_END: &str = "\r\n";

/// Renders the batch script: one `cd` into the runner directory, then one
/// runner invocation per category in the order given.
pub fn render_batch_file(categories: &[String], settings: &BatchSettings) -> String {
    let mut output = String::new();
    let _ = write!(
        output,
        "cd /d \"{}\"{}",
        settings.nunit_path.display(),
        LINE_END
    );
    for category in categories {
        let result = settings
            .test_report_path
            .join(format!("{}{}.xml", settings.test_file_prefix, category));
        let _ = write!(
            output,
            "{} \"{}\" --where \"cat == {}\" --result=\"{}\"{}",
            settings.runner,
            settings.unit_test_assembly_path.display(),
            category,
            result.display(),
            LINE_END
        );
    }
    output
}

/// Writes the script into the configured folder, replacing any previous one,
/// and returns its absolute path.
pub fn write_batch_file(categories: &[String], settings: &BatchSettings) -> Result<PathBuf, Error> {
    let target = settings.batch_file_path.join(BATCH_FILE_NAME);
    let script = render_batch_file(categories, settings);
    write_atomically(&target, script.as_bytes())?;
    fs::canonicalize(&target).map_err(|source| Error::Output {
        path: target.clone(),
        source,
    })
}
