//! Write-once cell for the pending session result.

use barcode_scan_core::ScanResult;
use std::sync::OnceLock;

/// Holds the first result offered to it and refuses every later one.
///
/// Offers are check-and-set: concurrent callers race on a single
/// assignment and exactly one of them wins.
#[derive(Debug, Default)]
pub struct ResultSlot {
    cell: OnceLock<ScanResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` if the slot is empty.
    ///
    /// Returns `Err(result)` with the rejected value when a result is
    /// already queued.
    pub fn offer(&self, result: ScanResult) -> Result<(), ScanResult> {
        self.cell.set(result)
    }

    #[inline]
    pub fn get(&self) -> Option<&ScanResult> {
        self.cell.get()
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcode_scan_core::Symbology;
    use std::sync::Barrier;

    #[test]
    fn first_offer_wins() {
        let slot = ResultSlot::new();
        assert!(slot
            .offer(ScanResult::barcode(Symbology::Qr, "", "first"))
            .is_ok());
        let rejected = slot
            .offer(ScanResult::barcode(Symbology::Qr, "", "second"))
            .unwrap_err();
        assert_eq!(rejected, ScanResult::barcode(Symbology::Qr, "", "second"));
        assert_eq!(
            slot.get(),
            Some(&ScanResult::barcode(Symbology::Qr, "", "first"))
        );
    }

    #[test]
    fn racing_offers_assign_exactly_once() {
        let slot = ResultSlot::new();
        let barrier = Barrier::new(8);
        let wins: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let slot = &slot;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        slot.offer(ScanResult::barcode(Symbology::Qr, "", format!("{i}")))
                            .is_ok() as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("join")).sum()
        });
        assert_eq!(wins, 1);
        assert!(slot.is_filled());
    }
}
