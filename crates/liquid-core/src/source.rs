use crate::cell::CellRef;

/// Supplies the ordered cells animated by an open or close cycle.
///
/// Queried only when a cycle starts; the cells captured then stay
/// authoritative until the next `open`/`close`, whatever the source reports
/// in between.
pub trait CircleSource {
    /// Number of cells currently offered.
    fn count(&self) -> usize;

    /// The cell at `index`, or `None` when out of range.
    fn object_at(&self, index: usize) -> Option<CellRef>;

    /// Snapshot of every cell in order.
    fn cells(&self) -> Vec<CellRef> {
        (0..self.count()).filter_map(|i| self.object_at(i)).collect()
    }
}

impl CircleSource for Vec<CellRef> {
    fn count(&self) -> usize {
        self.len()
    }

    fn object_at(&self, index: usize) -> Option<CellRef> {
        self.get(index).cloned()
    }
}

/// Receives the index of a selected cell.
pub trait SelectionListener {
    fn did_select(&mut self, index: usize);
}

// Default no-op implementation
impl SelectionListener for () {
    fn did_select(&mut self, _index: usize) {}
}
