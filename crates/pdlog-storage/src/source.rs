//! Row source trait

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::{Column, ColumnIndex, Database, Decode, Executor, Row, ValueRef};

use crate::{NULL_TEXT, Record, Result};

pub type RecordVisitor<'a> = dyn FnMut(&Record) + 'a;

/// Trait for providers of tabular records
#[async_trait(?Send)]
pub trait RowSource {
    /// Run `query` and call `visit` once per row, in result order.
    ///
    /// Returns the number of rows visited. Stops at the first error.
    async fn for_each_record(
        &mut self,
        query: &str,
        visit: &mut RecordVisitor<'_>,
    ) -> Result<usize>;

    /// Release the underlying connection. Closing twice is a no-op.
    async fn close(&mut self) -> Result<()>;
}

/// Stream `query` over the text protocol and hand every row to `visit`
pub(crate) async fn stream_records<'e, E, DB>(
    executor: E,
    query: &'e str,
    visit: &mut RecordVisitor<'_>,
) -> Result<usize>
where
    E: Executor<'e, Database = DB> + 'e,
    DB: Database,
    usize: ColumnIndex<DB::Row>,
    for<'r> String: Decode<'r, DB>,
    for<'r> Vec<u8>: Decode<'r, DB>,
{
    let mut rows = sqlx::raw_sql(query).fetch(executor);
    let mut headers: Option<Arc<[String]>> = None;
    let mut count = 0;

    while let Some(row) = rows.try_next().await? {
        let headers = headers
            .get_or_insert_with(|| {
                row.columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect()
            })
            .clone();

        visit(&Record::new(headers, decode_row(&row)?));
        count += 1;
    }

    Ok(count)
}

/// Every column as text; NULL becomes [`NULL_TEXT`], bytes that aren't
/// UTF-8 are rendered lossily
fn decode_row<R>(row: &R) -> Result<Vec<String>>
where
    R: Row,
    usize: ColumnIndex<R>,
    for<'r> String: Decode<'r, R::Database>,
    for<'r> Vec<u8>: Decode<'r, R::Database>,
{
    (0..row.len())
        .map(|idx| {
            if row.try_get_raw(idx)?.is_null() {
                return Ok(NULL_TEXT.to_string());
            }
            match row.try_get_unchecked::<String, _>(idx) {
                Ok(text) => Ok(text),
                Err(sqlx::Error::ColumnDecode { .. }) => {
                    let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
                    Ok(String::from_utf8_lossy(&bytes).into_owned())
                }
                Err(err) => Err(err.into()),
            }
        })
        .collect()
}
