//! Format B: one comma-separated line with every field in fixed order.
//!
//! ```text
//! id,text,priority,deadline,isDone,creationDate,modifyDate
//! x1,Buy milk,high,0,false,1700000000.0,0
//! ```
//!
//! Absent dates are written as `0` and any date that reads back as exactly
//! zero is treated as absent, so an epoch-zero date does not survive. There
//! is no escaping: a comma inside `text` shifts every later column. The
//! colour is not carried and decodes to the default.

use crate::error::{CodecError, Result};
use crate::fields::{self, FieldMap, RecordMap};
use crate::item::TodoItem;
use crate::timestamp::{format_optional, format_seconds, is_sentinel};

/// Number of columns a flat line must have. Extra columns are ignored.
pub const FLAT_FIELD_COUNT: usize = 7;

const DELIMITER: char = ',';

impl TodoItem {
    /// Serialize to format B.
    pub fn to_flat(&self) -> String {
        if self.text.contains(DELIMITER) {
            log::warn!(
                "todo item '{}' has a comma in its text; the flat line will not decode cleanly",
                self.id()
            );
        }
        format!(
            "{},{},{},{},{},{},{}",
            self.id(),
            self.text,
            self.priority,
            format_optional(self.deadline.as_ref()),
            self.is_done,
            format_seconds(&self.creation_date),
            format_optional(self.modify_date.as_ref()),
        )
    }

    /// Parse a format B line.
    pub fn from_flat(line: &str) -> Result<TodoItem> {
        decode_flat(line).inspect_err(|e| log::warn!("flat decode failed: {e}"))
    }

    /// Parse format B from raw bytes, which must be UTF-8.
    pub fn from_flat_bytes(bytes: &[u8]) -> Result<TodoItem> {
        std::str::from_utf8(bytes)
            .map_err(CodecError::from)
            .and_then(decode_flat)
            .inspect_err(|e| log::warn!("flat decode failed: {e}"))
    }
}

fn decode_flat(line: &str) -> Result<TodoItem> {
    let columns: Vec<&str> = line.split(DELIMITER).collect();
    if columns.len() < FLAT_FIELD_COUNT {
        return Err(CodecError::TooFewFields {
            expected: FLAT_FIELD_COUNT,
            found: columns.len(),
        });
    }

    let mut entry = FieldMap::new();
    entry.insert(fields::TEXT.to_string(), columns[1].to_string());
    entry.insert(fields::PRIORITY.to_string(), columns[2].to_string());
    entry.insert(fields::IS_DONE.to_string(), columns[4].to_string());
    entry.insert(fields::CREATION_DATE.to_string(), columns[5].to_string());
    for (name, raw) in [(fields::DEADLINE, columns[3]), (fields::MODIFY_DATE, columns[6])] {
        if !is_sentinel(raw) {
            entry.insert(name.to_string(), raw.to_string());
        }
    }

    fields::reconstruct(RecordMap::from([(columns[0].to_string(), entry)]))
}
