use crate::app::model::{CategoryAggregate, TestRecord};
use std::fmt;
use std::path::Path;

/// Everything printed after an analysis run, already ranked.
pub struct Summary<'a> {
    pub record_count: usize,
    pub csv_path: &'a Path,
    pub min_duration: f64,
    pub top_count: usize,
    pub slowest_tests: Vec<&'a TestRecord>,
    pub slowest_by_average: Vec<&'a CategoryAggregate>,
    pub slowest_by_total: Vec<&'a CategoryAggregate>,
    pub total_seconds: f64,
}

impl<'a> fmt::Display for Summary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parsed {} test records", group_thousands(self.record_count as f64, 0))?;
        writeln!(f, "CSV written to {}", self.csv_path.display())?;
        writeln!(f)?;

        writeln!(
            f,
            "Top {} slowest tests over {} seconds",
            self.top_count,
            group_thousands(self.min_duration, 2)
        )?;
        for record in &self.slowest_tests {
            writeln!(f, "classname: {}", record.class_name)?;
            writeln!(f, "Name: {}", record.name)?;
            writeln!(f, "Duration: {}", group_thousands(record.duration_seconds, 2))?;
            writeln!(f)?;
        }

        writeln!(f, "Slowest categories (avg seconds)")?;
        for aggregate in &self.slowest_by_average {
            write_aggregate(f, aggregate)?;
        }
        writeln!(f)?;

        writeln!(f, "Slowest categories (total seconds)")?;
        for aggregate in &self.slowest_by_total {
            write_aggregate(f, aggregate)?;
        }
        writeln!(f)?;

        write!(
            f,
            "Total test time: {} seconds, {} mins, {} hours",
            group_thousands(self.total_seconds, 0),
            group_thousands(self.total_seconds / 60.0, 2),
            group_thousands(self.total_seconds / 60.0 / 60.0, 2)
        )
    }
}

fn write_aggregate(f: &mut fmt::Formatter, aggregate: &CategoryAggregate) -> fmt::Result {
    writeln!(
        f,
        "Cat: {} Count: {} Avg: {} Total: {}",
        aggregate.category,
        aggregate.count,
        group_thousands(aggregate.average_seconds, 2),
        group_thousands(aggregate.total_seconds, 2)
    )
}

/// `1234567.891` with two decimals becomes `1,234,567.89`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.find('.') {
        Some(dot) => fixed.split_at(dot),
        None => (fixed.as_str(), ""),
    };
    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(fraction);
    grouped
}
