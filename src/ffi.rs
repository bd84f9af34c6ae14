//! C FFI layer for hosts that hold their document trees as JSON.

use crate::process_json;
use crate::resolve::ResolveConfig;
use libc::c_char;
use std::ffi::{CStr, CString};
use std::ptr;

/// Result type for FFI operations.
#[repr(C)]
pub struct MdaEqnumResult {
    /// Pointer to result string (caller must free with mda_eqnum_free_string)
    pub data: *mut c_char,
    /// Error message if data is null (caller must free with mda_eqnum_free_string)
    pub error: *mut c_char,
}

impl MdaEqnumResult {
    fn ok(data: String) -> Self {
        match CString::new(data) {
            Ok(c_string) => Self {
                data: c_string.into_raw(),
                error: ptr::null_mut(),
            },
            Err(_) => Self::err("Output contains an interior NUL byte".to_string()),
        }
    }

    fn err(error: String) -> Self {
        // Fall back to an empty message rather than losing the error slot
        let c_string = CString::new(error).unwrap_or_default();
        Self {
            data: ptr::null_mut(),
            error: c_string.into_raw(),
        }
    }
}

/// Number equations in a JSON document tree.
///
/// `format` names the output format (`latex`, `html`, `docx`, or anything
/// else for the plain fallback). A null `format` selects the fallback.
///
/// # Safety
///
/// - `json` must be a valid null-terminated UTF-8 string.
/// - `format` must be null or a valid null-terminated UTF-8 string.
/// - The strings in the returned result must be freed with `mda_eqnum_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mda_eqnum_process_json(
    json: *const c_char,
    format: *const c_char,
) -> MdaEqnumResult {
    if json.is_null() {
        return MdaEqnumResult::err("Null input pointer".to_string());
    }

    let json = match CStr::from_ptr(json).to_str() {
        Ok(s) => s,
        Err(_) => return MdaEqnumResult::err("Invalid UTF-8 input".to_string()),
    };

    let config = if format.is_null() {
        ResolveConfig::default()
    } else {
        match CStr::from_ptr(format).to_str() {
            Ok(name) => ResolveConfig::new(name),
            Err(_) => return MdaEqnumResult::err("Invalid UTF-8 format".to_string()),
        }
    };

    match process_json(json, &config) {
        Ok(output) => MdaEqnumResult::ok(output),
        Err(e) => MdaEqnumResult::err(e.to_string()),
    }
}

/// Free a string returned by mda_eqnum functions.
///
/// # Safety
///
/// - `s` must be a pointer returned by a mda_eqnum function, or null.
#[no_mangle]
pub unsafe extern "C" fn mda_eqnum_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the library version.
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn mda_eqnum_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// C header for hosts
/// ```c
/// // mda_eqnum.h
/// #ifndef MDA_EQNUM_H
/// #define MDA_EQNUM_H
///
/// typedef struct {
///     char* data;
///     char* error;
/// } MdaEqnumResult;
///
/// MdaEqnumResult mda_eqnum_process_json(const char* json, const char* format);
/// void mda_eqnum_free_string(char* s);
/// const char* mda_eqnum_version(void);
///
/// #endif
/// ```
const _: () = ();
