pub(crate) mod aggregate;
pub(crate) mod batch;
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod model;
pub(crate) mod report;

use crate::app::aggregate::{
    category_aggregates, top_categories_by_average, top_categories_by_total, top_slowest_tests,
    total_time,
};
use crate::app::batch::write_batch_file;
use crate::app::discovery::discover_categories;
use crate::app::error::Error;
use crate::app::model::{CategoryAggregate, TestRecord};
use crate::app::report::collect_records;
use crate::configuration::manifest::{AnalysisSettings, BatchSettings, Mode};
use crate::reporter::console::Summary;
use crate::reporter::csv_output::write_csv;
use std::path::PathBuf;

pub struct App {
    mode: Mode,
}

/// Result of one analysis run, kept until the summary is printed.
#[derive(Debug)]
pub struct Analysis {
    pub records: Vec<TestRecord>,
    pub aggregates: Vec<CategoryAggregate>,
    pub csv_path: PathBuf,
}

impl App {
    pub fn new(mode: Mode) -> Self {
        App { mode }
    }

    pub fn run(&self) -> Result<(), Error> {
        match &self.mode {
            Mode::GenerateBatchFile(settings) => {
                info!("Generating batch file from sources in {}", settings.source_path.display());
                let path = generate(settings)?;
                println!("Batch file written to {}", path.display());
                println!("Run it to produce the reports, then run again without --generate-batch-file");
            }
            Mode::AnalyzeReports(settings) => {
                info!("Analysing reports in {}", settings.test_report_path.display());
                let analysis = analyze(settings)?;
                println!("{}", analysis.summary(settings));
            }
        }
        Ok(())
    }
}

/// Discovers categories and writes the batch file, returning its path.
pub fn generate(settings: &BatchSettings) -> Result<PathBuf, Error> {
    let categories = discover_categories(&settings.source_path, &settings.source_file_suffix)?;
    info!("Discovered {} categories", categories.len());
    let path = write_batch_file(&categories, settings)?;
    info!("Batch file written to {}", path.display());
    Ok(path)
}

/// Parses every report, then exports the CSV. Nothing is written unless all
/// reports parsed.
pub fn analyze(settings: &AnalysisSettings) -> Result<Analysis, Error> {
    let records = collect_records(&settings.test_report_path, &settings.test_file_prefix)?;
    info!("Collected {} test records", records.len());
    let csv_path = write_csv(&records, &settings.test_report_path)?;
    info!("CSV written to {}", csv_path.display());
    let aggregates = category_aggregates(&records);
    Ok(Analysis {
        records,
        aggregates,
        csv_path,
    })
}

impl Analysis {
    pub fn total_seconds(&self) -> f64 {
        total_time(&self.records)
    }

    pub fn summary<'a>(&'a self, settings: &AnalysisSettings) -> Summary<'a> {
        Summary {
            record_count: self.records.len(),
            csv_path: &self.csv_path,
            min_duration: settings.min_duration,
            top_count: settings.top_count,
            slowest_tests: top_slowest_tests(&self.records, settings.min_duration, settings.top_count),
            slowest_by_average: top_categories_by_average(&self.aggregates, settings.top_categories),
            slowest_by_total: top_categories_by_total(&self.aggregates, settings.top_categories),
            total_seconds: self.total_seconds(),
        }
    }
}
