//! Memory accounting: a tracking allocator with process-wide counters.
//!
//! All kernel allocations route through one accounting primitive — the
//! global allocator. A binary opts in with
//! `#[global_allocator] static A: TrackingAllocator = TrackingAllocator;`;
//! without that the counters simply stay at zero and records report a peak
//! of zero bytes.
//!
//! The counters are process-wide state; the harness resets the peak only at
//! sub-cell boundaries and the whole set only at program start. Freeing more
//! than is outstanding clamps the current counter at zero and latches a
//! corruption flag surfaced by `leak_check` — the allocator itself never
//! logs or allocates.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::LabError;

static CURRENT_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);
static TOTAL_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static TOTAL_DEALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static RELEASE_UNDERFLOW: AtomicBool = AtomicBool::new(false);

/// System-allocator wrapper that maintains the accounting counters.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    TOTAL_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    let now = CURRENT_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_BYTES.fetch_max(now, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    TOTAL_DEALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    let prev = CURRENT_BYTES
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
            Some(cur.saturating_sub(size))
        })
        .unwrap_or(0);
    if prev < size {
        RELEASE_UNDERFLOW.store(true, Ordering::Relaxed);
    }
}

/// Point-in-time view of the accounting counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemStats {
    pub current_bytes: usize,
    pub peak_bytes: usize,
    pub allocations: usize,
    pub deallocations: usize,
}

/// Read all counters.
pub fn snapshot() -> MemStats {
    MemStats {
        current_bytes: CURRENT_BYTES.load(Ordering::Relaxed),
        peak_bytes: PEAK_BYTES.load(Ordering::Relaxed),
        allocations: TOTAL_ALLOCATIONS.load(Ordering::Relaxed),
        deallocations: TOTAL_DEALLOCATIONS.load(Ordering::Relaxed),
    }
}

/// Peak ← current. Called at sub-cell boundaries by the harness.
pub fn reset_peak() {
    PEAK_BYTES.store(CURRENT_BYTES.load(Ordering::Relaxed), Ordering::Relaxed);
}

/// Zero every counter and the corruption flag.
pub fn reset_all() {
    CURRENT_BYTES.store(0, Ordering::Relaxed);
    PEAK_BYTES.store(0, Ordering::Relaxed);
    TOTAL_ALLOCATIONS.store(0, Ordering::Relaxed);
    TOTAL_DEALLOCATIONS.store(0, Ordering::Relaxed);
    RELEASE_UNDERFLOW.store(false, Ordering::Relaxed);
}

/// End-of-run parity check: current bytes must be zero, allocation and
/// deallocation counts must match, and no release underflow may have been
/// latched. A mismatch is reported, not fatal — already-emitted records
/// stay valid.
pub fn leak_check() -> Result<(), LabError> {
    let stats = snapshot();
    if RELEASE_UNDERFLOW.load(Ordering::Relaxed) {
        return Err(LabError::MemoryAccounting(
            "release underflow: more bytes freed than were outstanding".into(),
        ));
    }
    if stats.current_bytes != 0 {
        return Err(LabError::MemoryAccounting(format!(
            "{} bytes still outstanding at program end",
            stats.current_bytes
        )));
    }
    if stats.allocations != stats.deallocations {
        return Err(LabError::MemoryAccounting(format!(
            "{} allocations vs {} deallocations",
            stats.allocations, stats.deallocations
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The unit-test binary does not register the tracking allocator, so the
    // counters move only through these direct calls. One combined test keeps
    // the assertions free of interleaving.
    #[test]
    fn counters_track_alloc_and_dealloc() {
        let before = snapshot();
        let layout = Layout::from_size_align(1024, 8).unwrap();
        let a = TrackingAllocator;
        let ptr = unsafe { a.alloc(layout) };
        assert!(!ptr.is_null());

        let mid = snapshot();
        assert_eq!(mid.allocations, before.allocations + 1);
        assert!(mid.current_bytes >= before.current_bytes + 1024);
        assert!(mid.peak_bytes >= mid.current_bytes);

        unsafe { a.dealloc(ptr, layout) };
        let after = snapshot();
        assert_eq!(after.deallocations, mid.deallocations + 1);
        assert_eq!(after.current_bytes, mid.current_bytes - 1024);

        // Peak is monotone until explicitly reset.
        assert!(after.peak_bytes >= mid.peak_bytes);
        reset_peak();
        assert_eq!(snapshot().peak_bytes, snapshot().current_bytes);

        // This binary registers no tracking allocator, so the only counted
        // traffic is the balanced pair above.
        assert!(leak_check().is_ok());
    }
}
