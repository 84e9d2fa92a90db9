//! Intermediate representation shared by both decoders, and the routine that
//! turns it into a [`TodoItem`].
//!
//! # Contract
//! A [`RecordMap`] maps an item id to a [`FieldMap`] of wire field name to raw
//! string value. Decoders are expected to produce exactly one entry and to
//! have dropped sentinel-zero dates already: [`reconstruct`] parses whatever
//! it is given and does no sentinel handling of its own.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{CodecError, Result};
use crate::item::{Priority, TodoItem, DEFAULT_COLOR_HEX};
use crate::timestamp::parse_seconds;

pub const TEXT: &str = "text";
pub const PRIORITY: &str = "priority";
pub const DEADLINE: &str = "deadline";
pub const IS_DONE: &str = "isDone";
pub const CREATION_DATE: &str = "creationDate";
pub const MODIFY_DATE: &str = "modifyDate";
pub const COLOR_HEX: &str = "colorHEX";

/// Wire field name -> raw value for one record.
pub type FieldMap = BTreeMap<String, String>;

/// Record id -> its fields. Ordered, so "first entry" is deterministic.
pub type RecordMap = BTreeMap<String, FieldMap>;

/// Build a [`TodoItem`] from the first (lexicographically smallest) entry of
/// `records`.
///
/// Fails only when `records` is empty or the entry has no `text`. Every
/// other field falls back to its default when missing or unparseable.
pub fn reconstruct(records: RecordMap) -> Result<TodoItem> {
    if records.len() > 1 {
        log::warn!(
            "record map holds {} entries; only the first is decoded",
            records.len()
        );
    }
    let (id, mut fields) = records.into_iter().next().ok_or_else(|| {
        CodecError::MalformedStructuredText("no record entry found".to_string())
    })?;

    let text = fields
        .remove(TEXT)
        .ok_or_else(|| CodecError::MissingRequiredField {
            id: id.clone(),
            field: TEXT,
        })?;

    let priority = match fields.get(PRIORITY) {
        Some(name) => Priority::from_name(name).unwrap_or_else(|| {
            log::debug!("record '{id}': unknown priority '{name}', using normal");
            Priority::Normal
        }),
        None => Priority::Normal,
    };

    let mut builder = TodoItem::builder(text, priority)
        .id(id.as_str())
        .deadline(optional_date(&id, &fields, DEADLINE))
        .done(fields.get(IS_DONE).is_some_and(|v| v == "true"))
        .modify_date(optional_date(&id, &fields, MODIFY_DATE))
        .color_hex(
            fields
                .remove(COLOR_HEX)
                .unwrap_or_else(|| DEFAULT_COLOR_HEX.to_string()),
        );
    if let Some(created) = optional_date(&id, &fields, CREATION_DATE) {
        builder = builder.creation_date(created);
    }
    Ok(builder.build())
}

fn optional_date(
    id: &str,
    fields: &FieldMap,
    name: &str,
) -> Option<chrono::DateTime<Utc>> {
    let raw = fields.get(name)?;
    let parsed = parse_seconds(raw);
    if parsed.is_none() {
        log::debug!("record '{id}': unparseable {name} '{raw}', ignoring");
    }
    parsed
}
