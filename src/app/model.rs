/// One `<test-case>` observed in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    /// Taken from the report file name, never from the XML content.
    pub category: String,
    pub class_name: String,
    pub name: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAggregate {
    pub category: String,
    pub count: usize,
    pub average_seconds: f64,
    pub total_seconds: f64,
}

impl TestRecord {
    pub fn new<C, K, N>(category: C, class_name: K, name: N, duration_seconds: f64) -> Self
    where
        C: Into<String>,
        K: Into<String>,
        N: Into<String>,
    {
        Self {
            category: category.into(),
            class_name: class_name.into(),
            name: name.into(),
            duration_seconds,
        }
    }
}

impl CategoryAggregate {
    /// Aggregates the records of `category`. Returns `None` when none of the
    /// records belong to it, since the average is undefined then.
    pub fn from_records<'a, I>(category: &str, records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a TestRecord>,
    {
        let (count, total_seconds) = records
            .into_iter()
            .filter(|record| record.category == category)
            .fold((0usize, 0f64), |(count, total), record| {
                (count + 1, total + record.duration_seconds)
            });
        if count == 0 {
            return None;
        }
        Some(Self {
            category: category.to_owned(),
            count,
            average_seconds: total_seconds / count as f64,
            total_seconds,
        })
    }
}
