//! Matstack FFI - C Foreign Function Interface
//!
//! C-compatible API for the transform matrix stack, for callers migrating
//! off the legacy fixed-function pipeline. Matrices cross the boundary as
//! flat arrays of 16 floats in column-major order (the GL convention).
//!
//! All entry points null-check their pointers and report failure with a
//! `c_int` status (1 success, 0 failure).

use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use glam::Mat4;
use matstack::MatrixStack;

/// Opaque handle to a MatrixStack (C-compatible)
pub struct MatStackHandle {
    _private: [u8; 0],
}

/// Create a new matrix stack with the given capacity
///
/// Returns null when `capacity` is invalid (must be at least 1).
///
/// # Safety
/// Safe to call.
#[no_mangle]
pub unsafe extern "C" fn matstack_create(capacity: usize) -> *mut MatStackHandle {
    match MatrixStack::new(capacity) {
        Ok(stack) => Box::into_raw(Box::new(stack)) as *mut MatStackHandle,
        Err(err) => {
            log::debug!("matstack_create rejected: {}", err);
            ptr::null_mut()
        }
    }
}

/// Destroy a matrix stack
///
/// # Safety
/// Caller must ensure ptr is valid and not already freed.
#[no_mangle]
pub unsafe extern "C" fn matstack_destroy(ptr: *mut MatStackHandle) {
    if !ptr.is_null() {
        let _ = Box::from_raw(ptr as *mut MatrixStack);
    }
}

/// Reset the stack to its just-constructed state
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_clear(ptr: *mut MatStackHandle) {
    if ptr.is_null() {
        return;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.clear();
}

/// Push a copy of the current matrix
///
/// Returns 0 when the stack is already at capacity.
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_push(ptr: *mut MatStackHandle) -> c_int {
    if ptr.is_null() {
        return 0;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    match stack.push() {
        Ok(()) => 1,
        Err(err) => {
            log::debug!("matstack_push rejected: {}", err);
            0
        }
    }
}

/// Pop back to the parent matrix
///
/// Returns 0 when the stack is already at the bottom.
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_pop(ptr: *mut MatStackHandle) -> c_int {
    if ptr.is_null() {
        return 0;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    match stack.pop() {
        Ok(()) => 1,
        Err(err) => {
            log::debug!("matstack_pop rejected: {}", err);
            0
        }
    }
}

/// Reset the current matrix to identity
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_load_identity(ptr: *mut MatStackHandle) {
    if ptr.is_null() {
        return;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.load_identity();
}

/// Replace the current matrix with the given column-major 16-float array
///
/// Returns 0 when either pointer is null.
///
/// # Safety
/// Caller must ensure ptr is valid and mat points at 16 floats.
#[no_mangle]
pub unsafe extern "C" fn matstack_load_matrix(
    ptr: *mut MatStackHandle,
    mat: *const f32,
) -> c_int {
    if ptr.is_null() || mat.is_null() {
        return 0;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.load_matrix(&Mat4::from_cols_slice(slice::from_raw_parts(mat, 16)));
    1
}

/// Right-multiply the given column-major 16-float matrix against the
/// current matrix
///
/// Returns 0 when either pointer is null.
///
/// # Safety
/// Caller must ensure ptr is valid and mat points at 16 floats.
#[no_mangle]
pub unsafe extern "C" fn matstack_mult_matrix(
    ptr: *mut MatStackHandle,
    mat: *const f32,
) -> c_int {
    if ptr.is_null() || mat.is_null() {
        return 0;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.mult_matrix(&Mat4::from_cols_slice(slice::from_raw_parts(mat, 16)));
    1
}

/// Apply a translation to the current matrix
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_translate(ptr: *mut MatStackHandle, x: f32, y: f32, z: f32) {
    if ptr.is_null() {
        return;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.translate(x, y, z);
}

/// Apply scaling to the current matrix
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_scale(ptr: *mut MatStackHandle, x: f32, y: f32, z: f32) {
    if ptr.is_null() {
        return;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.scale(x, y, z);
}

/// Apply an axis-angle rotation (degrees) to the current matrix
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_rotate(
    ptr: *mut MatStackHandle,
    angle_deg: f32,
    x: f32,
    y: f32,
    z: f32,
) {
    if ptr.is_null() {
        return;
    }

    let stack = &mut *(ptr as *mut MatrixStack);
    stack.rotate(angle_deg, x, y, z);
}

/// Copy the current matrix into `out` as 16 column-major floats
///
/// Returns 0 when either pointer is null.
///
/// # Safety
/// Caller must ensure ptr is valid and out points at 16 writable floats.
#[no_mangle]
pub unsafe extern "C" fn matstack_get(ptr: *const MatStackHandle, out: *mut f32) -> c_int {
    if ptr.is_null() || out.is_null() {
        return 0;
    }

    let stack = &*(ptr as *const MatrixStack);
    stack
        .get()
        .write_cols_to_slice(slice::from_raw_parts_mut(out, 16));
    1
}

/// Current cursor depth (0 is the bottom matrix)
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_depth(ptr: *const MatStackHandle) -> usize {
    if ptr.is_null() {
        return 0;
    }

    let stack = &*(ptr as *const MatrixStack);
    stack.depth()
}

/// Capacity the stack was created with
///
/// # Safety
/// Caller must ensure ptr is valid.
#[no_mangle]
pub unsafe extern "C" fn matstack_capacity(ptr: *const MatStackHandle) -> usize {
    if ptr.is_null() {
        return 0;
    }

    let stack = &*(ptr as *const MatrixStack);
    stack.capacity()
}

/// Get library version string
///
/// # Safety
/// Returns a static string, safe to call.
#[no_mangle]
pub extern "C" fn matstack_version() -> *const c_char {
    "0.1.0\0".as_ptr() as *const c_char
}
