//! Format A: a JSON object keyed by the item id whose value maps field names
//! to string values.
//!
//! ```text
//! {"<id>":{"colorHEX":"000000FF","creationDate":"1700000000.0","isDone":"false","modifyDate":"0","text":"Buy milk"}}
//! ```
//!
//! `priority` is written only when it is not `normal`, `deadline` only when
//! present. `modifyDate` is always written, with `"0"` for absent.

use std::collections::BTreeMap;

use crate::error::{CodecError, Result};
use crate::fields::{self, FieldMap, RecordMap};
use crate::item::{Priority, TodoItem};
use crate::timestamp::{format_optional, format_seconds, is_sentinel};

impl TodoItem {
    /// Serialize to format A.
    pub fn to_tagged(&self) -> Result<String> {
        let mut entry: BTreeMap<&str, String> = BTreeMap::new();
        entry.insert(fields::TEXT, self.text.clone());
        entry.insert(fields::IS_DONE, self.is_done.to_string());
        entry.insert(fields::CREATION_DATE, format_seconds(&self.creation_date));
        entry.insert(
            fields::MODIFY_DATE,
            format_optional(self.modify_date.as_ref()),
        );
        entry.insert(fields::COLOR_HEX, self.color_hex.clone());
        if let Some(deadline) = &self.deadline {
            entry.insert(fields::DEADLINE, format_seconds(deadline));
        }
        if self.priority != Priority::Normal {
            entry.insert(fields::PRIORITY, self.priority.as_str().to_string());
        }

        let record = BTreeMap::from([(self.id(), entry)]);
        serde_json::to_string(&record).map_err(|e| {
            log::error!("failed to serialize todo item '{}': {e}", self.id());
            CodecError::SerializationFailure(e)
        })
    }

    /// Parse format A text.
    pub fn from_tagged(text: &str) -> Result<TodoItem> {
        decode_tagged(text).inspect_err(|e| log::warn!("tagged decode failed: {e}"))
    }

    /// Parse format A from raw bytes, which must be UTF-8.
    pub fn from_tagged_bytes(bytes: &[u8]) -> Result<TodoItem> {
        std::str::from_utf8(bytes)
            .map_err(CodecError::from)
            .and_then(decode_tagged)
            .inspect_err(|e| log::warn!("tagged decode failed: {e}"))
    }

    /// Parse format A carried inside a JSON value, which must be a string.
    pub fn from_tagged_value(value: &serde_json::Value) -> Result<TodoItem> {
        value
            .as_str()
            .ok_or(CodecError::NotTextInput)
            .and_then(decode_tagged)
            .inspect_err(|e| log::warn!("tagged decode failed: {e}"))
    }
}

fn decode_tagged(text: &str) -> Result<TodoItem> {
    let mut records: RecordMap = serde_json::from_str(text)
        .map_err(|e| CodecError::MalformedStructuredText(e.to_string()))?;
    for entry in records.values_mut() {
        drop_sentinel_dates(entry);
    }
    fields::reconstruct(records)
}

/// The encoder writes `"0"` for an absent `modifyDate`; without this an
/// absent date would come back as the epoch.
fn drop_sentinel_dates(entry: &mut FieldMap) {
    for name in [fields::DEADLINE, fields::MODIFY_DATE] {
        if entry.get(name).is_some_and(|raw| is_sentinel(raw)) {
            entry.remove(name);
        }
    }
}
