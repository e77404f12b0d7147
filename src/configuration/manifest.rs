use crate::app::error::Error;
use crate::configuration::command_line::Opt;
use crate::configuration::constants::{common::ENV_PREFIX, defaults};
use config::{Config, ConfigError, Environment, File, Source, Value};
use std::collections::HashMap;
use derivative::*;
use serde_derive::Deserialize;
use std::path::PathBuf;

/// Merged settings: defaults, then configuration file, then environment,
/// then command line flags. Keys may also be spelled in camelCase.
#[derive(Debug, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Manifest {
    pub generate_batch_file: bool,
    pub source_path: Option<PathBuf>,
    pub batch_file_path: Option<PathBuf>,
    pub test_report_path: Option<PathBuf>,
    pub nunit_path: Option<PathBuf>,
    pub unit_test_assembly_path: Option<PathBuf>,
    #[derivative(Default(value = "defaults::TEST_FILE_PREFIX.to_owned()"))]
    pub test_file_prefix: String,
    #[derivative(Default(value = "defaults::SOURCE_FILE_SUFFIX.to_owned()"))]
    pub source_file_suffix: String,
    #[derivative(Default(value = "defaults::RUNNER.to_owned()"))]
    pub runner: String,
    #[serde(with = "crate::configuration::deserialize::seconds")]
    #[derivative(Default(value = "defaults::MIN_DURATION_SECONDS"))]
    pub min_duration: f64,
    #[derivative(Default(value = "defaults::TOP_COUNT"))]
    pub top_count: usize,
    #[derivative(Default(value = "defaults::TOP_CATEGORIES"))]
    pub top_categories: usize,
}

/// Everything the batch file generator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSettings {
    pub source_path: PathBuf,
    pub source_file_suffix: String,
    pub batch_file_path: PathBuf,
    pub test_report_path: PathBuf,
    pub nunit_path: PathBuf,
    pub unit_test_assembly_path: PathBuf,
    pub runner: String,
    pub test_file_prefix: String,
}

/// Everything the report analyzer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub test_report_path: PathBuf,
    pub test_file_prefix: String,
    pub min_duration: f64,
    pub top_count: usize,
    pub top_categories: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    GenerateBatchFile(BatchSettings),
    AnalyzeReports(AnalysisSettings),
}

impl Manifest {
    pub fn load(options: &Opt) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        if let Some(file) = &options.config {
            merge_canonical(&mut config, File::from(file.as_path()))?;
        }
        merge_canonical(&mut config, Environment::with_prefix(ENV_PREFIX))?;
        Self::apply_overrides(&mut config, options)?;

        config.try_into()
    }

    fn apply_overrides(config: &mut Config, options: &Opt) -> Result<(), ConfigError> {
        if options.generate_batch_file {
            config.set("generate_batch_file", true)?;
        }
        let paths = [
            ("source_path", &options.source_path),
            ("batch_file_path", &options.batch_file_path),
            ("test_report_path", &options.test_report_path),
            ("nunit_path", &options.nunit_path),
            ("unit_test_assembly_path", &options.unit_test_assembly_path),
        ];
        for (key, path) in paths.iter() {
            if let Some(path) = path {
                config.set(key, path.to_string_lossy().into_owned())?;
            }
        }
        if let Some(prefix) = &options.test_file_prefix {
            config.set("test_file_prefix", prefix.clone())?;
        }
        if let Some(min_duration) = &options.min_duration {
            config.set("min_duration", min_duration.clone())?;
        }
        if let Some(top_count) = options.top_count {
            config.set("top_count", top_count as i64)?;
        }
        Ok(())
    }

    /// Picks the run mode and checks that the paths it needs are present.
    pub fn into_mode(self) -> Result<Mode, Error> {
        if self.generate_batch_file {
            Ok(Mode::GenerateBatchFile(BatchSettings {
                source_path: required(self.source_path, "source_path")?,
                batch_file_path: required(self.batch_file_path, "batch_file_path")?,
                test_report_path: required(self.test_report_path, "test_report_path")?,
                nunit_path: required(self.nunit_path, "nunit_path")?,
                unit_test_assembly_path: required(
                    self.unit_test_assembly_path,
                    "unit_test_assembly_path",
                )?,
                source_file_suffix: self.source_file_suffix,
                runner: self.runner,
                test_file_prefix: self.test_file_prefix,
            }))
        } else {
            Ok(Mode::AnalyzeReports(AnalysisSettings {
                test_report_path: required(self.test_report_path, "test_report_path")?,
                test_file_prefix: self.test_file_prefix,
                min_duration: self.min_duration,
                top_count: self.top_count,
                top_categories: self.top_categories,
            }))
        }
    }
}

const KEYS: [&str; 12] = [
    "generate_batch_file",
    "source_path",
    "batch_file_path",
    "test_report_path",
    "nunit_path",
    "unit_test_assembly_path",
    "test_file_prefix",
    "source_file_suffix",
    "runner",
    "min_duration",
    "top_count",
    "top_categories",
];

/// `config` lowercases keys, so `testReportPath` arrives as `testreportpath`.
/// Both spellings map onto the snake_case field name.
fn canonical_key(key: &str) -> String {
    let folded = key.replace('_', "").to_lowercase();
    KEYS.iter()
        .find(|known| known.replace('_', "") == folded)
        .map(|known| (*known).to_owned())
        .unwrap_or_else(|| key.to_owned())
}

/// Merges one source under canonical keys, keeping later sources on top.
fn merge_canonical<S>(config: &mut Config, source: S) -> Result<(), ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let mut layer = Config::new();
    layer.merge(source)?;
    let values: HashMap<String, Value> = layer.try_into()?;
    for (key, value) in values {
        config.set(&canonical_key(&key), value)?;
    }
    Ok(())
}

fn required(value: Option<PathBuf>, key: &str) -> Result<PathBuf, Error> {
    value.ok_or_else(|| Error::Configuration(format!("missing required setting `{}`", key)))
}
