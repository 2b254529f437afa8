//! Lazy row stream over an order export.

use std::io::Read;

use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder};
use tracing::{debug, warn};

use crate::report::types::{OrderRecord, RawOrderRow};

/// Positions of the columns the report reads. Everything else is ignored.
#[derive(Debug, Default)]
struct Columns {
    email: Option<usize>,
    food_name: Option<usize>,
    quantity: Option<usize>,
}

impl Columns {
    /// A repeated header name resolves to its last occurrence.
    fn from_headers(headers: &ByteRecord) -> Self {
        let find = |name: &[u8]| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .map(|(i, _)| i)
                .last()
        };
        Self {
            email: find(b"email"),
            food_name: find(b"food_name"),
            quantity: find(b"quantity"),
        }
    }

    /// Decodes only the needed fields; invalid UTF-8 becomes U+FFFD.
    fn extract(&self, record: &ByteRecord) -> RawOrderRow {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|f| !f.is_empty())
                .map(|f| String::from_utf8_lossy(f).into_owned())
        };
        RawOrderRow {
            email: field(self.email),
            food_name: field(self.food_name),
            quantity: field(self.quantity),
        }
    }
}

/// Single-pass iterator of validated [`OrderRecord`]s.
///
/// Rows without an email are skipped. Fields are read as bytes, so stray
/// encodings in any column never drop a row. An I/O error ends the stream:
/// it is yielded once, after which the iterator reports no further rows.
pub struct OrderRows<R> {
    records: ByteRecordsIntoIter<R>,
    columns: Columns,
    pending: Option<csv::Error>,
    skipped: usize,
    failed: bool,
}

impl<R: Read> OrderRows<R> {
    /// Number of rows dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: Read> Iterator for OrderRows<R> {
    type Item = Result<OrderRecord, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(e) = self.pending.take() {
            self.failed = true;
            return Some(Err(e));
        }

        loop {
            match self.records.next()? {
                Ok(record) => match OrderRecord::from_raw(self.columns.extract(&record)) {
                    Some(order) => return Some(Ok(order)),
                    None => {
                        self.skipped += 1;
                        debug!("Skipping row without email");
                    }
                },
                Err(e) if e.is_io_error() => {
                    self.failed = true;
                    return Some(Err(e));
                }
                Err(e) => {
                    self.skipped += 1;
                    warn!(error = %e, "Skipping malformed row");
                }
            }
        }
    }
}

/// Wraps `reader` as a stream of order rows. The first line is the header.
pub fn order_rows<R: Read>(reader: R) -> OrderRows<R> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let (columns, pending) = match reader.byte_headers() {
        Ok(headers) => (Columns::from_headers(headers), None),
        Err(e) => (Columns::default(), Some(e)),
    };

    OrderRows {
        records: reader.into_byte_records(),
        columns,
        pending,
        skipped: 0,
        failed: false,
    }
}
