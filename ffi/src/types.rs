//! `#[repr(C)]` types and handle internals for the FFI boundary.
//!
//! # Design
//! The app handle owns its own current-thread tokio runtime; every exported
//! call blocks on it, so C callers never see async. Todos cross the boundary
//! as JSON C strings, statistics as a plain struct.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use todo_core::{ReqwestTransport, TodoApp, TodoRepository, TodoStats};

/// Opaque handle to a `TodoApp`. C callers receive a pointer to this and
/// pass it back into every `todo_app_*` function.
pub struct FfiTodoApp {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inner: TodoApp<TodoRepository<ReqwestTransport>>,
}

/// Completion statistics exposed to C.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FfiTodoStats {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    pub completion_rate: u32,
}

impl From<TodoStats> for FfiTodoStats {
    fn from(stats: TodoStats) -> Self {
        Self {
            total: stats.total as u32,
            completed: stats.completed as u32,
            pending: stats.pending as u32,
            completion_rate: stats.completion_rate,
        }
    }
}

/// Read a borrowed C string. `None` for null or invalid UTF-8.
pub(crate) fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_string)
}

/// Hand an owned C string to the caller; null if `s` has an interior NUL.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(std::ptr::null_mut())
}
