//! C-ABI wrapper around `todo-codec`.
//!
//! # Overview
//! Exposes item construction and both codecs through `extern "C"` functions
//! so any language with a C FFI can encode and decode to-do items without
//! linking to serde or chrono directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Decoders take a NUL-terminated string. A null pointer is reported as
//!   `NotText` and non-UTF-8 bytes as `EncodingInvalid`.
//! - `FfiItemResult` / `FfiStringResult` carry either a payload or an error
//!   code plus message.
//! - The C caller owns all returned pointers and must call the matching
//!   `todo_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use todo_codec::{CodecError, TodoItem};

use types::*;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Install an `env_logger` logger configured from `RUST_LOG`.
///
/// Returns false if a logger was already installed (including by an earlier
/// call). The library logs nothing until a logger is installed.
#[unsafe(no_mangle)]
pub extern "C" fn todo_codec_init_logging() -> bool {
    catch_unwind(|| env_logger::try_init().is_ok()).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Item lifecycle
// ---------------------------------------------------------------------------

/// Create a new item with a generated id, created now, other fields defaulted.
///
/// Returns null if `text` is null or not valid UTF-8.
/// The caller must free the returned pointer with `todo_free_item`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_item_new(text: *const c_char, priority: FfiPriority) -> *mut FfiTodoItem {
    catch_unwind(|| {
        let text = match unsafe { read_c_str(text) } {
            Ok(Some(text)) => text,
            _ => return std::ptr::null_mut(),
        };
        let item = TodoItem::new(text, priority.into());
        Box::into_raw(Box::new(FfiTodoItem::from_core(item)))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Encode functions
// ---------------------------------------------------------------------------

fn encode_with(
    fn_name: &str,
    item: *const FfiTodoItem,
    encode: fn(&TodoItem) -> todo_codec::Result<String>,
) -> *mut FfiStringResult {
    catch_unwind(|| {
        if item.is_null() {
            return FfiStringResult::null_arg("item");
        }
        let item = match unsafe { (*item).to_core() } {
            Ok(item) => item,
            Err(e) => return FfiStringResult::from_error(e),
        };
        match encode(&item) {
            Ok(text) => FfiStringResult::ok(&text),
            Err(e) => FfiStringResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiStringResult::panic(&format!("panic in {fn_name}")))
}

/// Encode an item in the tagged (JSON) form.
///
/// `item.text` must be non-null; a null `id` gets a generated one.
/// The caller must free the result with `todo_free_string_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_item_encode_tagged(item: *const FfiTodoItem) -> *mut FfiStringResult {
    encode_with("todo_item_encode_tagged", item, TodoItem::to_tagged)
}

/// Encode an item as a flat comma-separated line.
///
/// The caller must free the result with `todo_free_string_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_item_encode_flat(item: *const FfiTodoItem) -> *mut FfiStringResult {
    encode_with("todo_item_encode_flat", item, |item| Ok(item.to_flat()))
}

// ---------------------------------------------------------------------------
// Decode functions
// ---------------------------------------------------------------------------

fn decode_with(
    fn_name: &str,
    text: *const c_char,
    decode: fn(&[u8]) -> todo_codec::Result<TodoItem>,
) -> *mut FfiItemResult {
    catch_unwind(|| {
        if text.is_null() {
            log::warn!("{fn_name}: null input");
            return FfiItemResult::from_error(CodecError::NotTextInput);
        }
        let bytes = unsafe { CStr::from_ptr(text) }.to_bytes();
        match decode(bytes) {
            Ok(item) => FfiItemResult::ok(item),
            Err(e) => FfiItemResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiItemResult::panic(&format!("panic in {fn_name}")))
}

/// Decode an item from the tagged (JSON) form.
///
/// Returns a result with a non-null `item` on success.
/// The caller must free the result with `todo_free_item_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_item_decode_tagged(text: *const c_char) -> *mut FfiItemResult {
    decode_with("todo_item_decode_tagged", text, TodoItem::from_tagged_bytes)
}

/// Decode an item from a flat comma-separated line.
///
/// The caller must free the result with `todo_free_item_result`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_item_decode_flat(text: *const c_char) -> *mut FfiItemResult {
    decode_with("todo_item_decode_flat", text, TodoItem::from_flat_bytes)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an item returned by `todo_item_new`. Safe to call with null.
///
/// Items owned by an `FfiItemResult` are released by `todo_free_item_result`
/// and must not be passed here.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_item(item: *mut FfiTodoItem) {
    if item.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let item = unsafe { Box::from_raw(item) };
        free_ffi_item_fields(&item);
    });
}

/// Free an `FfiItemResult` returned by a decode function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_item_result(result: *mut FfiItemResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.item.is_null() {
            let item = unsafe { Box::from_raw(result.item) };
            free_ffi_item_fields(&item);
        }
    });
}

/// Free an `FfiStringResult` returned by an encode function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string_result(result: *mut FfiStringResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        for ptr in [result.error_message, result.text] {
            if !ptr.is_null() {
                drop(unsafe { CString::from_raw(ptr) });
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn c_str<'a>(ptr: *const c_char) -> &'a str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    /// Stack-built item the way a C caller would fill one in.
    fn caller_item(id: &CString, text: &CString) -> FfiTodoItem {
        FfiTodoItem {
            id: id.as_ptr() as *mut c_char,
            text: text.as_ptr() as *mut c_char,
            priority: FfiPriority::High,
            has_deadline: false,
            deadline: 0.0,
            is_done: false,
            creation_date: 1_700_000_000.0,
            has_modify_date: false,
            modify_date: 0.0,
            color_hex: std::ptr::null_mut(),
        }
    }

    #[test]
    fn init_logging_is_idempotent() {
        todo_codec_init_logging();
        assert!(!todo_codec_init_logging());
    }

    #[test]
    fn item_new_and_free() {
        let text = CString::new("Buy milk").unwrap();
        let item = todo_item_new(text.as_ptr(), FfiPriority::Low);
        assert!(!item.is_null());

        let item_ref = unsafe { &*item };
        assert_eq!(c_str(item_ref.text), "Buy milk");
        assert_eq!(c_str(item_ref.color_hex), "000000FF");
        assert!(!c_str(item_ref.id).is_empty());
        assert_eq!(item_ref.priority, FfiPriority::Low);
        assert!(!item_ref.has_deadline);
        assert!(!item_ref.has_modify_date);
        assert!(item_ref.creation_date > 0.0);

        todo_free_item(item);
    }

    #[test]
    fn item_new_null_text_returns_null() {
        let item = todo_item_new(std::ptr::null(), FfiPriority::Normal);
        assert!(item.is_null());
    }

    #[test]
    fn encode_flat_from_caller_item() {
        let id = CString::new("x1").unwrap();
        let text = CString::new("Buy milk").unwrap();
        let item = caller_item(&id, &text);

        let result = todo_item_encode_flat(&item);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(c_str(r.text), "x1,Buy milk,high,0,false,1700000000.0,0");

        todo_free_string_result(result);
    }

    #[test]
    fn encode_tagged_from_caller_item() {
        let id = CString::new("x1").unwrap();
        let text = CString::new("Buy milk").unwrap();
        let mut item = caller_item(&id, &text);
        item.has_deadline = true;
        item.deadline = 1_700_086_400.0;

        let result = todo_item_encode_tagged(&item);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let body: serde_json::Value = serde_json::from_str(c_str(r.text)).unwrap();
        assert_eq!(body["x1"]["text"], "Buy milk");
        assert_eq!(body["x1"]["priority"], "high");
        assert_eq!(body["x1"]["deadline"], "1700086400.0");
        assert_eq!(body["x1"]["modifyDate"], "0");

        todo_free_string_result(result);
    }

    #[test]
    fn encode_null_item_returns_null_arg() {
        let result = todo_item_encode_tagged(std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert!(r.text.is_null());
        todo_free_string_result(result);
    }

    #[test]
    fn encode_item_without_text_is_not_text() {
        let id = CString::new("x1").unwrap();
        let text = CString::new("unused").unwrap();
        let mut item = caller_item(&id, &text);
        item.text = std::ptr::null_mut();

        let result = todo_item_encode_flat(&item);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotText);
        assert!(!r.error_message.is_null());
        todo_free_string_result(result);
    }

    #[test]
    fn decode_flat_success() {
        let line = CString::new("x1,Buy milk,high,0,false,1700000000.0,0").unwrap();
        let result = todo_item_decode_flat(line.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let item = unsafe { &*r.item };
        assert_eq!(c_str(item.id), "x1");
        assert_eq!(c_str(item.text), "Buy milk");
        assert_eq!(item.priority, FfiPriority::High);
        assert!(!item.has_deadline);
        assert!(!item.has_modify_date);
        assert_eq!(item.creation_date, 1_700_000_000.0);

        todo_free_item_result(result);
    }

    #[test]
    fn decode_tagged_success() {
        let text = CString::new(
            r#"{"x1":{"text":"Buy milk","deadline":"1700086400.0","isDone":"true","creationDate":"1700000000.0","modifyDate":"0","colorHEX":"FF0000FF"}}"#,
        )
        .unwrap();
        let result = todo_item_decode_tagged(text.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let item = unsafe { &*r.item };
        assert_eq!(item.priority, FfiPriority::Normal);
        assert!(item.has_deadline);
        assert_eq!(item.deadline, 1_700_086_400.0);
        assert!(item.is_done);
        assert!(!item.has_modify_date);
        assert_eq!(c_str(item.color_hex), "FF0000FF");

        todo_free_item_result(result);
    }

    #[test]
    fn decode_null_is_not_text() {
        for result in [
            todo_item_decode_tagged(std::ptr::null()),
            todo_item_decode_flat(std::ptr::null()),
        ] {
            let r = unsafe { &*result };
            assert_eq!(r.error_code, FfiErrorCode::NotText);
            assert!(r.item.is_null());
            todo_free_item_result(result);
        }
    }

    #[test]
    fn decode_invalid_utf8_is_encoding_invalid() {
        let bytes = CString::new(vec![b'x', b'1', b',', 0xff, 0xfe]).unwrap();
        let result = todo_item_decode_flat(bytes.as_ptr());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::EncodingInvalid);
        todo_free_item_result(result);
    }

    #[test]
    fn decode_errors_map_to_codes() {
        type Decode = extern "C" fn(*const c_char) -> *mut FfiItemResult;
        let cases: [(Decode, &str, FfiErrorCode); 3] = [
            (todo_item_decode_tagged, "{not json", FfiErrorCode::MalformedStructuredText),
            (todo_item_decode_tagged, r#"{"x1":{"isDone":"true"}}"#, FfiErrorCode::MissingRequiredField),
            (todo_item_decode_flat, "a,b,c", FfiErrorCode::TooFewFields),
        ];
        for (decode, input, expected) in cases {
            let input = CString::new(input).unwrap();
            let result = decode(input.as_ptr());
            let r = unsafe { &*result };
            assert_eq!(r.error_code, expected, "{input:?}");
            assert!(!r.error_message.is_null());
            todo_free_item_result(result);
        }
    }

    #[test]
    fn decoded_item_re_encodes() {
        let line = CString::new("x1,Buy milk,low,1700086400.0,true,1700000000.0,1700003600.0").unwrap();
        let decoded = todo_item_decode_flat(line.as_ptr());
        let item = unsafe { (*decoded).item };

        let encoded = todo_item_encode_flat(item);
        assert_eq!(c_str(unsafe { (*encoded).text }), line.to_str().unwrap());

        todo_free_string_result(encoded);
        todo_free_item_result(decoded);
    }

    #[test]
    fn free_item_null_is_safe() {
        todo_free_item(std::ptr::null_mut());
    }

    #[test]
    fn free_item_result_null_is_safe() {
        todo_free_item_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_result_null_is_safe() {
        todo_free_string_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        todo_free_string(std::ptr::null_mut());
    }
}
