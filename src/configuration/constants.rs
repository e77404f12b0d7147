pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod common {
    /// Environment variables carrying configuration start with this prefix.
    pub const ENV_PREFIX: &'static str = "NUNIT_AUDIT";
    pub const BATCH_FILE_NAME: &'static str = "go.bat";
    pub const CSV_FILE_NAME: &'static str = "TestTimings.csv";
    pub const REPORT_EXTENSION: &'static str = "xml";
}

pub mod defaults {
    pub const TEST_FILE_PREFIX: &'static str = "TestResult-";
    pub const SOURCE_FILE_SUFFIX: &'static str = ".cs";
    pub const RUNNER: &'static str = "nunit3-console.exe";
    pub const MIN_DURATION_SECONDS: f64 = 0.1;
    pub const TOP_COUNT: usize = 50;
    pub const TOP_CATEGORIES: usize = 5;
}
