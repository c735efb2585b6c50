use std::sync::Arc;

use arc_swap::ArcSwapOption;

use dso_core::snapshot::CaptureSnapshot;

/// Hand-off point between the capture producer and the display layer.
///
/// The producer overwrites the slot whenever a new post-processed frame is
/// ready; the UI thread consumes it at exactly one point per frame. Both sides
/// only ever exchange reference-counted immutable snapshots, so a consumer can
/// keep reading a frame the producer has already replaced.
#[derive(Default)]
pub struct SnapshotSlot {
    slot: ArcSwapOption<CaptureSnapshot>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    /// Publish a frame, replacing any frame not yet consumed.
    pub fn offer(&self, snapshot: Arc<CaptureSnapshot>) {
        self.slot.store(Some(snapshot));
    }

    /// Consume the pending frame, if any. Each published frame is returned at
    /// most once.
    pub fn take(&self) -> Option<Arc<CaptureSnapshot>> {
        self.slot.swap(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_frame_consumed_once() {
        let slot = SnapshotSlot::new();
        assert!(slot.take().is_none());

        slot.offer(Arc::new(CaptureSnapshot::new(Vec::new(), 10)));
        let taken = slot.take().expect("frame pending");
        assert_eq!(taken.sample_count(), 10);
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_offer_overwrites_unconsumed_frame() {
        let slot = SnapshotSlot::new();
        slot.offer(Arc::new(CaptureSnapshot::new(Vec::new(), 1)));
        slot.offer(Arc::new(CaptureSnapshot::new(Vec::new(), 2)));
        assert_eq!(slot.take().expect("frame pending").sample_count(), 2);
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_producer_keeps_its_reference() {
        let slot = SnapshotSlot::new();
        let frame = Arc::new(CaptureSnapshot::new(Vec::new(), 3));
        slot.offer(frame.clone());
        let taken = slot.take().expect("frame pending");
        // Shared ownership: the producer-side Arc is still alive.
        assert_eq!(Arc::strong_count(&taken), 2);
        assert_eq!(frame.sample_count(), taken.sample_count());
    }
}
