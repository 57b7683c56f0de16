use std::sync::Arc;

/// Text used for SQL NULL values
pub const NULL_TEXT: &str = "None";

/// One row: column headers and a textual value per column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Headers are shared between the rows of one result set
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// (header, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(&self.values)
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.iter().find(|(h, _)| *h == header).map(|(_, v)| v)
    }
}
