//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! `FfiTodoItem` mirrors `TodoItem` with C-compatible fields: `*mut c_char`
//! instead of `String`, `f64` seconds instead of `DateTime`, and a `has_*`
//! flag next to each optional date. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use todo_codec::timestamp::{from_seconds, to_seconds};
use todo_codec::{CodecError, Priority, TodoItem};

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// Priority as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiPriority {
    Low = 0,
    Normal = 1,
    High = 2,
}

impl From<Priority> for FfiPriority {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Low => FfiPriority::Low,
            Priority::Normal => FfiPriority::Normal,
            Priority::High => FfiPriority::High,
        }
    }
}

impl From<FfiPriority> for Priority {
    fn from(p: FfiPriority) -> Self {
        match p {
            FfiPriority::Low => Priority::Low,
            FfiPriority::Normal => Priority::Normal,
            FfiPriority::High => Priority::High,
        }
    }
}

/// A to-do item exposed to C.
///
/// Dates are seconds since the Unix epoch. `deadline` is meaningful only
/// when `has_deadline` is set, `modify_date` only when `has_modify_date` is.
/// When passed *into* the library, a null `id` means "generate one" and a
/// null `color_hex` means the default colour.
#[repr(C)]
pub struct FfiTodoItem {
    pub id: *mut c_char,
    pub text: *mut c_char,
    pub priority: FfiPriority,
    pub has_deadline: bool,
    pub deadline: f64,
    pub is_done: bool,
    pub creation_date: f64,
    pub has_modify_date: bool,
    pub modify_date: f64,
    pub color_hex: *mut c_char,
}

impl FfiTodoItem {
    /// Convert a core item into C representation. Strings are owned by the
    /// result and released by `free_ffi_item_fields`.
    pub(crate) fn from_core(item: TodoItem) -> Self {
        FfiTodoItem {
            id: to_c_string(item.id()),
            text: to_c_string(&item.text),
            priority: item.priority.into(),
            has_deadline: item.deadline.is_some(),
            deadline: item.deadline.as_ref().map(to_seconds).unwrap_or(0.0),
            is_done: item.is_done,
            creation_date: to_seconds(&item.creation_date),
            has_modify_date: item.modify_date.is_some(),
            modify_date: item.modify_date.as_ref().map(to_seconds).unwrap_or(0.0),
            color_hex: to_c_string(&item.color_hex),
        }
    }

    /// Read a caller-provided item back into a core `TodoItem`.
    ///
    /// # Safety
    /// Every non-null string pointer must point to a NUL-terminated buffer
    /// that stays valid for the duration of the call.
    pub(crate) unsafe fn to_core(&self) -> Result<TodoItem, CodecError> {
        let text = unsafe { read_c_str(self.text) }?.ok_or(CodecError::NotTextInput)?;
        let mut builder = TodoItem::builder(text, self.priority.into())
            .deadline(self.has_deadline.then(|| from_seconds(self.deadline)).flatten())
            .done(self.is_done)
            .modify_date(
                self.has_modify_date
                    .then(|| from_seconds(self.modify_date))
                    .flatten(),
            );
        if let Some(id) = unsafe { read_c_str(self.id) }? {
            builder = builder.id(id);
        }
        if let Some(color_hex) = unsafe { read_c_str(self.color_hex) }? {
            builder = builder.color_hex(color_hex);
        }
        if let Some(created) = from_seconds(self.creation_date) {
            builder = builder.creation_date(created);
        }
        Ok(builder.build())
    }
}

/// Null maps to `None`; non-UTF-8 content is an error.
///
/// # Safety
/// `ptr` must be null or point to a valid NUL-terminated string.
pub(crate) unsafe fn read_c_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, CodecError> {
    if ptr.is_null() {
        return Ok(None);
    }
    Ok(Some(unsafe { CStr::from_ptr(ptr) }.to_str()?))
}

/// Interior NULs cannot cross the boundary and are dropped.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Free the C-string fields of an `FfiTodoItem` (but not the struct itself).
pub(crate) fn free_ffi_item_fields(item: &FfiTodoItem) {
    for ptr in [item.id, item.text, item.color_hex] {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in the result envelopes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotText = 1,
    EncodingInvalid = 2,
    MalformedStructuredText = 3,
    TooFewFields = 4,
    MissingRequiredField = 5,
    Serialization = 6,
    NullArg = 7,
    Panic = 8,
}

impl From<&CodecError> for FfiErrorCode {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::NotTextInput => FfiErrorCode::NotText,
            CodecError::EncodingInvalid(_) => FfiErrorCode::EncodingInvalid,
            CodecError::MalformedStructuredText(_) => FfiErrorCode::MalformedStructuredText,
            CodecError::TooFewFields { .. } => FfiErrorCode::TooFewFields,
            CodecError::MissingRequiredField { .. } => FfiErrorCode::MissingRequiredField,
            CodecError::SerializationFailure(_) => FfiErrorCode::Serialization,
        }
    }
}

/// Result envelope for the decode functions.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `item`
/// points to the decoded item. On failure `item` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiItemResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub item: *mut FfiTodoItem,
}

impl FfiItemResult {
    pub(crate) fn ok(item: TodoItem) -> *mut Self {
        Box::into_raw(Box::new(FfiItemResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            item: Box::into_raw(Box::new(FfiTodoItem::from_core(item))),
        }))
    }

    pub(crate) fn from_error(err: CodecError) -> *mut Self {
        Self::failure((&err).into(), &err.to_string())
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg)
    }

    fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiItemResult {
            error_code,
            error_message: to_c_string(msg),
            item: std::ptr::null_mut(),
        }))
    }
}

/// Result envelope for the encode functions.
///
/// On success `text` holds the encoded form; on failure it is null and
/// `error_message` explains why.
#[repr(C)]
pub struct FfiStringResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub text: *mut c_char,
}

impl FfiStringResult {
    pub(crate) fn ok(text: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiStringResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            text: to_c_string(text),
        }))
    }

    pub(crate) fn from_error(err: CodecError) -> *mut Self {
        Self::failure((&err).into(), &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg)
    }

    fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiStringResult {
            error_code,
            error_message: to_c_string(msg),
            text: std::ptr::null_mut(),
        }))
    }
}
