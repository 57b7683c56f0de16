//! In-memory row source

use std::sync::Arc;

use async_trait::async_trait;

use crate::source::{RecordVisitor, RowSource};
use crate::{Record, Result, StorageError};

/// Fixed rows. The query text is ignored; every call yields all rows.
#[derive(Debug, Clone)]
pub struct MemorySource {
    headers: Arc<[String]>,
    rows: Vec<Vec<String>>,
    closed: bool,
}

impl MemorySource {
    pub fn new<H, S>(headers: H) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            closed: false,
        }
    }

    pub fn with_row<V, S>(mut self, values: V) -> Self
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait(?Send)]
impl RowSource for MemorySource {
    async fn for_each_record(
        &mut self,
        _query: &str,
        visit: &mut RecordVisitor<'_>,
    ) -> Result<usize> {
        if self.closed {
            return Err(StorageError::Closed);
        }

        for values in &self.rows {
            visit(&Record::new(self.headers.clone(), values.clone()));
        }
        Ok(self.rows.len())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
