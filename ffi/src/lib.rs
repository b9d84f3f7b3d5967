//! C-ABI wrapper around `todo-core`'s application state provider.
//!
//! # Overview
//! Exposes the list screen's operations (list, add, update, toggle, delete,
//! clear, stats) through `extern "C"` functions so a mobile host can drive
//! the todo core without linking to Rust's async runtime or serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A null handle is answered with the function's failure value.
//! - Todos are returned as JSON C strings owned by the caller, which must
//!   release them with `todo_free_string`.
//! - A null id is passed through as an empty id, so it fails the core's
//!   missing-id check and sets `todo_app_last_error`.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use todo_core::{StoreConfig, TodoApp, TodoId};

use types::*;

/// Run `f` against a live handle, answering `fallback` for null or panic.
fn with_app<T>(app: *const FfiTodoApp, fallback: T, f: impl FnOnce(&FfiTodoApp) -> T) -> T {
    if app.is_null() {
        return fallback;
    }
    let app = unsafe { &*app };
    catch_unwind(AssertUnwindSafe(|| f(app))).unwrap_or(fallback)
}

fn todo_id(id: *const c_char) -> TodoId {
    TodoId::from(read_str(id).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Handle lifecycle
// ---------------------------------------------------------------------------

/// Create an app bound to the store at `base_url`.
///
/// `contract_key` and `table` may be null to use the defaults. Returns null
/// if `base_url` is null or the runtime or HTTP client cannot be built.
/// The caller must free the returned pointer with `todo_app_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_new(
    base_url: *const c_char,
    contract_key: *const c_char,
    table: *const c_char,
) -> *mut FfiTodoApp {
    catch_unwind(|| {
        let Some(base_url) = read_str(base_url) else {
            return std::ptr::null_mut();
        };
        let mut config = StoreConfig::with_base_url(&base_url);
        if let Some(contract_key) = read_str(contract_key) {
            config.contract_key = contract_key;
        }
        if let Some(table) = read_str(table) {
            config.table = table;
        }

        let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(error = %e, "building runtime failed");
                return std::ptr::null_mut();
            }
        };
        let inner = {
            let _entered = runtime.enter();
            match TodoApp::connect(&config) {
                Ok(app) => app,
                Err(e) => {
                    tracing::error!(error = %e, "building store client failed");
                    return std::ptr::null_mut();
                }
            }
        };
        Box::into_raw(Box::new(FfiTodoApp { runtime, inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an app created by `todo_app_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_free(app: *mut FfiTodoApp) {
    if !app.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(app) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Reload the list from the store.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_refresh(app: *const FfiTodoApp) -> bool {
    with_app(app, false, |app| app.runtime.block_on(app.inner.refresh()))
}

/// The current list as a JSON array of `{"id","name","completed"}`.
///
/// Returns null if `app` is null. Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_list_json(app: *const FfiTodoApp) -> *mut c_char {
    with_app(app, std::ptr::null_mut(), |app| {
        serde_json::to_string(&app.inner.todos())
            .map(into_c_string)
            .unwrap_or(std::ptr::null_mut())
    })
}

/// Create a todo named `name`.
///
/// Returns the created todo as a JSON object, or null on failure (see
/// `todo_app_last_error`). Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_add(app: *const FfiTodoApp, name: *const c_char) -> *mut c_char {
    with_app(app, std::ptr::null_mut(), |app| {
        let name = read_str(name).unwrap_or_default();
        match app.runtime.block_on(app.inner.add(&name)) {
            Some(todo) => serde_json::to_string(&todo)
                .map(into_c_string)
                .unwrap_or(std::ptr::null_mut()),
            None => std::ptr::null_mut(),
        }
    })
}

/// Replace the name and completion flag of the todo `id`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_update(
    app: *const FfiTodoApp,
    id: *const c_char,
    name: *const c_char,
    completed: bool,
) -> bool {
    with_app(app, false, |app| {
        let name = read_str(name).unwrap_or_default();
        app.runtime.block_on(app.inner.update(&todo_id(id), &name, completed))
    })
}

/// Flip the completion flag of the todo `id`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_toggle(app: *const FfiTodoApp, id: *const c_char) -> bool {
    with_app(app, false, |app| app.runtime.block_on(app.inner.toggle(&todo_id(id))))
}

/// Delete the todo `id`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_delete(app: *const FfiTodoApp, id: *const c_char) -> bool {
    with_app(app, false, |app| app.runtime.block_on(app.inner.delete(&todo_id(id))))
}

/// Delete every todo in the table.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_clear(app: *const FfiTodoApp) -> bool {
    with_app(app, false, |app| app.runtime.block_on(app.inner.clear_all()))
}

// ---------------------------------------------------------------------------
// State accessors
// ---------------------------------------------------------------------------

/// Statistics for the current list. All zero for a null handle.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_stats(app: *const FfiTodoApp) -> FfiTodoStats {
    with_app(app, FfiTodoStats::default(), |app| app.inner.stats().into())
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_is_loading(app: *const FfiTodoApp) -> bool {
    with_app(app, false, |app| app.inner.is_loading())
}

/// The last user-facing error message, or null if the last operation
/// succeeded. Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_last_error(app: *const FfiTodoApp) -> *mut c_char {
    with_app(app, std::ptr::null_mut(), |app| {
        app.inner.error().map(into_c_string).unwrap_or(std::ptr::null_mut())
    })
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
