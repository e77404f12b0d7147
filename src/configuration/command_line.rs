use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Clone, Copy)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

/// Command line surface. Every setting except logging can also come from the
/// configuration file or `NUNIT_AUDIT_*` environment variables; flags win.
#[derive(StructOpt, Debug, Default)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Configuration file. Supported: YAML, JSON, TOML, HJSON, INI
    #[structopt(long, short = "c", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,

    /// Scan sources and write the batch file instead of analysing reports
    #[structopt(long, short = "g")]
    pub generate_batch_file: bool,

    /// Root of the test sources scanned for [Category("...")] attributes
    #[structopt(long, parse(from_os_str))]
    pub source_path: Option<PathBuf>,

    /// Directory the batch file is written to
    #[structopt(long, parse(from_os_str))]
    pub batch_file_path: Option<PathBuf>,

    /// Directory holding the XML reports, also receives the CSV export
    #[structopt(long, parse(from_os_str))]
    pub test_report_path: Option<PathBuf>,

    /// Working directory of the runner inside the batch file
    #[structopt(long, parse(from_os_str))]
    pub nunit_path: Option<PathBuf>,

    /// Test assembly handed to the runner
    #[structopt(long, parse(from_os_str))]
    pub unit_test_assembly_path: Option<PathBuf>,

    /// Prefix shared by generated and analysed report files
    #[structopt(long)]
    pub test_file_prefix: Option<String>,

    /// Tests at or below this duration are left out of the slowest list (e.g. 0.1, 250ms)
    #[structopt(long)]
    pub min_duration: Option<String>,

    /// Length of the slowest tests list
    #[structopt(long, short = "n")]
    pub top_count: Option<usize>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_flags() {
        let opt = Opt::from_iter_safe(&[
            "nunit-audit",
            "--test-report-path",
            "reports",
            "--min-duration",
            "250ms",
            "-n",
            "10",
        ])
        .unwrap();

        assert!(!opt.generate_batch_file);
        assert_eq!(opt.test_report_path, Some(PathBuf::from("reports")));
        assert_eq!(opt.min_duration.as_deref(), Some("250ms"));
        assert_eq!(opt.top_count, Some(10));
        assert!(opt.config.is_none());
    }

    #[test]
    fn test_parse_generate_flag() {
        let opt = Opt::from_iter_safe(&["nunit-audit", "-g", "--source-path", "src"]).unwrap();

        assert!(opt.generate_batch_file);
        assert_eq!(opt.source_path, Some(PathBuf::from("src")));
    }
}
