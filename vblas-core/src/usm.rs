//! Unified (shared) memory for the raw-pointer calling convention.
//!
//! # Design
//!
//! - 64-byte aligned allocations (cache-line aligned, matches USM alignment)
//! - `UsmVec` owns the allocation; operations receive plain pointers and the
//!   caller keeps the allocation alive until the returned event completes
//! - `ConstPtr` / `MutPtr` carry those pointers into queued kernels

use std::alloc;
use std::fmt;
use std::ptr::NonNull;

use crate::scalar::Element;

/// Alignment for all allocations.
pub const ALIGNMENT: usize = 64;

/// Owned, fixed-length, 64-byte aligned allocation of `T`.
///
/// Never hands out references on its own; callers go through raw pointers
/// or the explicit slice accessors of the owning type.
pub(crate) struct AlignedAlloc<T: Element> {
    ptr: NonNull<T>,
    len: usize,
    layout: alloc::Layout,
}

impl<T: Element> AlignedAlloc<T> {
    pub(crate) fn from_slice(data: &[T]) -> Self {
        let out = Self::uninit(data.len());
        // SAFETY: fresh allocation of `data.len()` elements, disjoint from `data`.
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), out.ptr.as_ptr(), data.len());
        }
        out
    }

    pub(crate) fn from_elem(value: T, len: usize) -> Self {
        let out = Self::uninit(len);
        for i in 0..len {
            // SAFETY: i < len, inside the allocation.
            unsafe { out.ptr.as_ptr().add(i).write(value) };
        }
        out
    }

    fn uninit(len: usize) -> Self {
        let byte_len = len
            .checked_mul(std::mem::size_of::<T>())
            .unwrap_or_else(|| panic!("allocation of {len} elements overflows"));
        let align = ALIGNMENT.max(std::mem::align_of::<T>());
        let layout = match alloc::Layout::from_size_align(byte_len, align) {
            Ok(layout) => layout,
            Err(_) => panic!("invalid layout for {len} elements"),
        };
        let ptr = if byte_len == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: non-zero size.
            let p = unsafe { alloc::alloc(layout) } as *mut T;
            match NonNull::new(p) {
                Some(p) => p,
                None => alloc::handle_alloc_error(layout),
            }
        };
        Self { ptr, len, layout }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// # Safety
    /// No kernel may be writing to the allocation for the lifetime of the slice.
    #[inline(always)]
    pub(crate) unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(self.ptr.as_ptr(), self.len)
    }

    /// # Safety
    /// No kernel may be accessing the allocation for the lifetime of the slice.
    #[allow(clippy::mut_from_ref)]
    #[inline(always)]
    pub(crate) unsafe fn as_mut_slice(&self) -> &mut [T] {
        std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len)
    }
}

impl<T: Element> Drop for AlignedAlloc<T> {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            // SAFETY: allocated in `uninit` with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

// SAFETY: the allocation is uniquely owned; `T: Send + Sync` via `Element`.
unsafe impl<T: Element> Send for AlignedAlloc<T> {}
unsafe impl<T: Element> Sync for AlignedAlloc<T> {}

/// Shared unified-memory allocation, addressable from the host and from
/// every backend the raw-pointer convention targets.
pub struct UsmVec<T: Element> {
    mem: AlignedAlloc<T>,
}

impl<T: Element> UsmVec<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            mem: AlignedAlloc::from_slice(data),
        }
    }

    pub fn from_elem(value: T, len: usize) -> Self {
        Self {
            mem: AlignedAlloc::from_elem(value, len),
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.len() == 0
    }

    pub fn as_ptr(&self) -> *const T {
        self.mem.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.mem.as_ptr()
    }

    /// Host view of the data. Wait on every event that writes this
    /// allocation before reading it.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: outstanding writers are excluded by the raw-pointer
        // contract the caller accepted when submitting them.
        unsafe { self.mem.as_slice() }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above; `&mut self` excludes other host views.
        unsafe { self.mem.as_mut_slice() }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Element + Default> UsmVec<T> {
    pub fn zeroed(len: usize) -> Self {
        Self::from_elem(T::default(), len)
    }
}

impl<T: Element> fmt::Debug for UsmVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsmVec")
            .field("ptr", &self.mem.as_ptr())
            .field("len", &self.len())
            .finish()
    }
}

/// Read-only operand pointer that may cross into a queued kernel.
#[repr(transparent)]
pub struct ConstPtr<T>(*const T);

/// Mutable operand pointer that may cross into a queued kernel.
#[repr(transparent)]
pub struct MutPtr<T>(*mut T);

// SAFETY: the pointers are only dereferenced inside kernels, under the
// raw-pointer contract (memory alive and not raced until the event completes).
unsafe impl<T: Send> Send for ConstPtr<T> {}
unsafe impl<T: Sync> Sync for ConstPtr<T> {}
unsafe impl<T: Send> Send for MutPtr<T> {}
unsafe impl<T: Sync> Sync for MutPtr<T> {}

impl<T> ConstPtr<T> {
    #[inline(always)]
    pub fn new(ptr: *const T) -> Self {
        Self(ptr)
    }

    #[inline(always)]
    pub fn get(self) -> *const T {
        self.0
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// Pointer `count` elements further on.
    ///
    /// # Safety
    /// Same as [`pointer::add`]: the result must stay inside the allocation.
    #[inline(always)]
    pub unsafe fn add(self, count: usize) -> Self {
        Self(self.0.add(count))
    }
}

impl<T> MutPtr<T> {
    #[inline(always)]
    pub fn new(ptr: *mut T) -> Self {
        Self(ptr)
    }

    #[inline(always)]
    pub fn get(self) -> *mut T {
        self.0
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    #[inline(always)]
    pub fn as_const(self) -> ConstPtr<T> {
        ConstPtr(self.0)
    }

    /// # Safety
    /// Same as [`pointer::add`].
    #[inline(always)]
    pub unsafe fn add(self, count: usize) -> Self {
        Self(self.0.add(count))
    }
}

impl<T> Clone for ConstPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for ConstPtr<T> {}

impl<T> Clone for MutPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for MutPtr<T> {}

impl<T> From<*const T> for ConstPtr<T> {
    fn from(ptr: *const T) -> Self {
        Self(ptr)
    }
}

impl<T> From<*mut T> for MutPtr<T> {
    fn from(ptr: *mut T) -> Self {
        Self(ptr)
    }
}

impl<T> fmt::Debug for ConstPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

impl<T> fmt::Debug for MutPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_alignment() {
        let v = UsmVec::<f32>::zeroed(1000);
        assert_eq!(v.as_ptr() as usize % ALIGNMENT, 0);
        let z = UsmVec::<Complex64>::zeroed(3);
        assert_eq!(z.as_ptr() as usize % ALIGNMENT, 0);
    }

    #[test]
    fn test_round_trip_contents() {
        let mut v = UsmVec::from_slice(&[1.0f64, 2.0, 3.0]);
        v.as_mut_slice()[1] = 5.0;
        assert_eq!(v.to_vec(), vec![1.0, 5.0, 3.0]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_empty() {
        let v = UsmVec::<f32>::from_slice(&[]);
        assert!(v.is_empty());
        assert!(v.as_slice().is_empty());
    }

    #[test]
    fn test_pointer_wrappers() {
        let mut v = UsmVec::from_elem(7i32, 4);
        let p = MutPtr::new(v.as_mut_ptr());
        unsafe { p.add(2).get().write(9) };
        assert_eq!(v.as_slice(), &[7, 7, 9, 7]);
        assert!(!p.as_const().is_null());
    }
}
