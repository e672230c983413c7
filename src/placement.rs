// canvas-kit/src/placement.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructs value objects directly inside storage that somebody else owns.
//!
//! Nothing here allocates. The storage's size and alignment are the owner's responsibility.

use std::fmt::{self, Debug, Formatter};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr;

/// Moves `value` into `dst` without reading or dropping whatever `dst` held before, and returns
/// `dst` unchanged.
///
/// # Safety
///
/// `dst` must be non-null, valid for writes of `T`, and aligned for `T`. The previous contents are
/// overwritten, not dropped.
#[inline]
pub unsafe fn construct_at<T>(dst: *mut T, value: T) -> *mut T {
    ptr::write(dst, value);
    dst
}

/// Drops the object at `dst` in place, releasing whatever it retained. The storage itself is left
/// to its owner.
///
/// # Safety
///
/// `dst` must point at an object previously initialized by `construct_at` (or otherwise live) that
/// has not been torn down yet. Tearing down twice is undefined behavior.
#[inline]
pub unsafe fn destroy_at<T>(dst: *mut T) {
    ptr::drop_in_place(dst)
}

/// A value living in borrowed storage.
///
/// Dropping a `Placed` tears the value down in place; the storage stays with its owner and can be
/// reused afterward.
pub struct Placed<'a, T> {
    slot: &'a mut MaybeUninit<T>,
}

impl<'a, T> Placed<'a, T> {
    /// Initializes `slot` with `value`.
    #[inline]
    pub fn new(slot: &'a mut MaybeUninit<T>, value: T) -> Placed<'a, T> {
        slot.write(value);
        Placed { slot }
    }

    /// Drops the value in place and gives the now-uninitialized storage back.
    #[inline]
    pub fn tear_down(self) -> &'a mut MaybeUninit<T> {
        let mut this = mem::ManuallyDrop::new(self);
        let slot: *mut &'a mut MaybeUninit<T> = &mut this.slot;
        unsafe {
            let slot = ptr::read(slot);
            destroy_at(slot.as_mut_ptr());
            slot
        }
    }

    /// Hands the initialized storage to a caller who promises to tear it down with `destroy_at`.
    #[inline]
    pub fn into_raw(self) -> *mut T {
        let mut this = mem::ManuallyDrop::new(self);
        this.slot.as_mut_ptr()
    }
}

impl<'a, T> Deref for Placed<'a, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        unsafe { &*self.slot.as_ptr() }
    }
}

impl<'a, T> DerefMut for Placed<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.slot.as_mut_ptr() }
    }
}

// Shows the storage address only, so `T` needn't be `Debug`.
impl<'a, T> Debug for Placed<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placed")
            .field("slot", &self.slot.as_ptr())
            .finish()
    }
}

impl<'a, T> Drop for Placed<'a, T> {
    fn drop(&mut self) {
        unsafe { destroy_at(self.slot.as_mut_ptr()) }
    }
}
