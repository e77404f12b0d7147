use crate::app::error::Error;
use crate::app::model::TestRecord;
use crate::configuration::constants::common::REPORT_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use sxd_document::dom::Element;
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{evaluate_xpath, Value};

const TEST_CASE_XPATH: &str = "//test-case";

/// A report file together with the category its name encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub path: PathBuf,
    pub category: String,
}

/// Lists `<prefix>*.xml` files directly inside `dir`, sorted by file name.
pub fn find_report_files(dir: &Path, prefix: &str) -> Result<Vec<ReportFile>, Error> {
    let report_error = |source| Error::Report {
        path: dir.to_path_buf(),
        source,
    };
    let mut reports = vec![];
    for entry in fs::read_dir(dir).map_err(report_error)? {
        let entry = entry.map_err(report_error)?;
        let path = entry.path();
        if !entry.file_type().map_err(report_error)?.is_file() {
            debug!("Skipping {}, not a file", path.display());
            continue;
        }
        if let Some(category) = category_of(&path, prefix) {
            reports.push(ReportFile { category, path });
        }
    }
    reports.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(reports)
}

/// `TestResult-Billing.xml` with prefix `TestResult-` is category `Billing`.
fn category_of(path: &Path, prefix: &str) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !extension.eq_ignore_ascii_case(REPORT_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(prefix).map(str::to_owned)
}

/// Reads every `<test-case>` of one report in document order.
pub fn parse_report(report: &ReportFile) -> Result<Vec<TestRecord>, Error> {
    let text = fs::read_to_string(&report.path).map_err(|source| Error::Report {
        path: report.path.clone(),
        source,
    })?;
    parse_test_cases(text.trim_start_matches('\u{feff}'), report)
}

fn parse_test_cases(text: &str, report: &ReportFile) -> Result<Vec<TestRecord>, Error> {
    let xml_error = |message: String| Error::Xml {
        path: report.path.clone(),
        message,
    };
    let package = parser::parse(text).map_err(|err| xml_error(format!("{:?}", err)))?;
    let document = package.as_document();
    let nodes = match evaluate_xpath(&document, TEST_CASE_XPATH)
        .map_err(|err| xml_error(format!("{:?}", err)))?
    {
        Value::Nodeset(nodes) => nodes.document_order(),
        _ => vec![],
    };
    nodes
        .into_iter()
        .filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
        .map(|element| to_record(element, report))
        .collect()
}

fn to_record(element: Element, report: &ReportFile) -> Result<TestRecord, Error> {
    let data_error = |message: String| Error::Data {
        path: report.path.clone(),
        message,
    };
    let name = attribute_or_empty(element, "name", report);
    let class_name = attribute_or_empty(element, "classname", report);
    let duration = element
        .attribute_value("duration")
        .ok_or_else(|| data_error(format!("test-case '{}' has no duration", name)))?;
    let duration_seconds = duration.trim().parse::<f64>().map_err(|_| {
        data_error(format!(
            "test-case '{}' duration '{}' is not a number",
            name, duration
        ))
    })?;
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(data_error(format!(
            "test-case '{}' duration '{}' is not a non-negative number",
            name, duration
        )));
    }
    Ok(TestRecord::new(
        report.category.as_str(),
        class_name,
        name,
        duration_seconds,
    ))
}

fn attribute_or_empty(element: Element, attribute: &str, report: &ReportFile) -> String {
    match element.attribute_value(attribute) {
        Some(value) => value.to_owned(),
        None => {
            warn!(
                "test-case without {} attribute in {}",
                attribute,
                report.path.display()
            );
            String::new()
        }
    }
}

/// Parses every report in `dir`. The first failing report aborts the run.
pub fn collect_records(dir: &Path, prefix: &str) -> Result<Vec<TestRecord>, Error> {
    let reports = find_report_files(dir, prefix)?;
    info!("Found {} report files in {}", reports.len(), dir.display());
    let mut records = vec![];
    for report in &reports {
        let parsed = parse_report(report)?;
        debug!(
            "Parsed {} test cases from {}",
            parsed.len(),
            report.path.display()
        );
        records.extend(parsed);
    }
    Ok(records)
}
