// canvas-kit/src/ownership.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Moves reference-counted objects across a raw-pointer boundary.
//!
//! Inside this crate every reference-counted object lives behind an `Arc`. A foreign caller only
//! sees raw pointers, and each raw pointer is either *owning* (its holder must hand it back to
//! `release` exactly once) or *borrowed* (valid for the duration of one call, never released by
//! its holder).
//!
//! All pointers produced here point at the object itself, never at the `Arc` header, so the same
//! address is observed no matter how the pointer was obtained.

use std::mem;
use std::ptr;
use std::sync::Arc;

/// Detaches a handle from automatic management and returns it as an owning pointer.
///
/// The reference count is unchanged. Responsibility for the decrement moves to whoever receives
/// the pointer.
#[inline]
pub fn into_owning<T>(handle: Arc<T>) -> *const T {
    Arc::into_raw(handle)
}

/// Like `into_owning`, but maps `None` to null.
#[inline]
pub fn option_into_owning<T>(handle: Option<Arc<T>>) -> *const T {
    match handle {
        Some(handle) => Arc::into_raw(handle),
        None => ptr::null(),
    }
}

/// Returns a borrowed pointer into a live handle. The count is not touched, and the pointer is
/// valid only while `handle` (or another reference to the same object) is alive.
#[inline]
pub fn borrow_raw<T>(handle: &Arc<T>) -> *const T {
    Arc::as_ptr(handle)
}

/// Upgrades a borrowed pointer into a new owned handle, incrementing the reference count once.
///
/// The caller's pointer stays independently valid and must still be released by its owner.
/// Returns `None` for null.
///
/// # Safety
///
/// `ptr` must be null or have been produced by `into_owning`/`borrow_raw` for an object that is
/// still alive for the duration of this call.
pub unsafe fn retain_borrowed<T>(ptr: *const T) -> Option<Arc<T>> {
    if ptr.is_null() {
        return None;
    }
    let handle = Arc::from_raw(ptr);
    mem::forget(handle.clone());
    Some(handle)
}

/// Dereferences a borrowed pointer without adjusting the reference count.
///
/// # Safety
///
/// `ptr` must be null or point at a live object for the whole lifetime `'a`, which the caller must
/// not let escape the current call.
#[inline]
pub unsafe fn borrow<'a, T>(ptr: *const T) -> Option<&'a T> {
    ptr.as_ref()
}

/// Consumes an owning pointer, decrementing the reference count once. Null is ignored.
///
/// Releasing the same owning pointer twice is undefined behavior.
///
/// # Safety
///
/// `ptr` must be null or an owning pointer produced by `into_owning` (or by an upgrade whose
/// result was handed out through `into_owning`) that has not been released yet.
pub unsafe fn release<T>(ptr: *const T) {
    if !ptr.is_null() {
        drop(Arc::from_raw(ptr))
    }
}

/// Reports the current reference count of the object behind `ptr` without changing it. Null
/// reports zero.
///
/// # Safety
///
/// `ptr` must be null or point at a live object produced by `into_owning`/`borrow_raw`.
pub unsafe fn ref_count<T>(ptr: *const T) -> usize {
    if ptr.is_null() {
        return 0;
    }
    let handle = mem::ManuallyDrop::new(Arc::from_raw(ptr));
    Arc::strong_count(&handle)
}
