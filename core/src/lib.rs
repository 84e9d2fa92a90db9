//! Model and codecs for a single to-do item.
//!
//! # Overview
//! A [`TodoItem`] can be written in two text forms:
//! - **tagged** (`to_tagged` / `from_tagged*`): a JSON object keyed by the
//!   item id, with every value a string and default-valued fields omitted.
//! - **flat** (`to_flat` / `from_flat*`): one comma-separated line holding
//!   every field in fixed order.
//!
//! # Design
//! - Both decoders reduce their input to a [`RecordMap`] and share
//!   [`fields::reconstruct`], so defaulting rules live in one place.
//! - Only shape errors fail a decode. Unknown priorities and unparseable
//!   dates fall back to defaults.
//! - Absent dates encode as `0`, and `0` decodes as absent. An epoch-zero
//!   date cannot be represented.
//! - No I/O and no shared state; diagnostics go through the `log` facade
//!   and the host decides whether a logger is installed.

pub mod error;
pub mod fields;
pub mod flat;
pub mod item;
pub mod tagged;
pub mod timestamp;

pub use error::{CodecError, Result};
pub use fields::{FieldMap, RecordMap};
pub use flat::FLAT_FIELD_COUNT;
pub use item::{Priority, TodoItem, TodoItemBuilder, DEFAULT_COLOR_HEX};
pub use timestamp::DATE_SENTINEL;
