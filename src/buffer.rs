use std::fmt::Write as _;
use std::os::raw::c_void;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::ze::{check, ZeRuntime};

/// Number of elements shown at each end of a printed buffer.
pub const PREVIEW_EDGE: usize = 8;

/// Bytes needed for `count` i32 elements, or `None` if that overflows `usize`.
pub fn element_bytes(count: u32) -> Option<usize> {
    usize::try_from(count)
        .ok()?
        .checked_mul(std::mem::size_of::<i32>())
}

/// Device allocation of `len` i32 elements. Freed when dropped.
pub struct DeviceBuffer {
    rt: Rc<ZeRuntime>,
    ptr: *mut c_void,
    len: usize,
    ordinal: u32,
}

impl DeviceBuffer {
    /// Wrap a pointer returned by `zeMemAllocDevice` in `rt`'s context.
    pub(crate) fn from_raw(rt: Rc<ZeRuntime>, ptr: *mut c_void, len: usize, ordinal: u32) -> Self {
        Self { rt, ptr, len, ordinal }
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn size_bytes(&self) -> usize {
        self.len * std::mem::size_of::<i32>()
    }

    /// Ordinal of the device the memory lives on.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        debug!("Freeing {} bytes on GPU {} at {:p}", self.size_bytes(), self.ordinal, self.ptr);
        let code = unsafe { (self.rt.api.zeMemFree)(self.rt.context, self.ptr) };
        if let Err(e) = check("zeMemFree", code) {
            warn!("{}", e);
        }
    }
}

/// Render buffer contents, eliding the middle when there are more than
/// `2 * edge` elements.
pub fn format_preview(values: &[i32], edge: usize) -> String {
    let mut out = String::new();
    if values.len() <= edge * 2 {
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}", v);
        }
        return out;
    }

    for v in &values[..edge] {
        let _ = write!(out, "{} ", v);
    }
    out.push_str("...");
    for v in &values[values.len() - edge..] {
        let _ = write!(out, " {}", v);
    }
    out
}
