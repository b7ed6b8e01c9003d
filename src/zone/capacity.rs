//! Bin-packing estimate of the room an object set needs
//!
//! Objects are laid out in rows in list order. Each one reserves twice its
//! width so it has space to move; a row wraps when the next reservation
//! would overrun the zone width. The estimate is conservative: it can
//! reject sets that would physically fit, and passing it does not
//! guarantee random placement succeeds.

/// Minimum zone size an object set needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapacityEstimate {
    pub min_width: usize,
    pub min_height: usize,
}

impl CapacityEstimate {
    /// Lay out `(width, height)` object sizes in rows no wider than `zone_width`
    pub fn for_objects(sizes: impl IntoIterator<Item = (usize, usize)>, zone_width: usize) -> Self {
        let mut estimate = Self::default();
        let mut row_width = 0;
        let mut row_height = 0;

        for (width, height) in sizes {
            let reserved = width * 2;
            if row_width > 0 && row_width + reserved > zone_width {
                estimate.close_row(row_width, row_height);
                row_width = 0;
                row_height = 0;
            }
            row_width += reserved;
            row_height = row_height.max(height);
        }
        estimate.close_row(row_width, row_height);
        estimate
    }

    fn close_row(&mut self, row_width: usize, row_height: usize) {
        self.min_width = self.min_width.max(row_width);
        self.min_height += row_height;
    }

    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.min_width <= width && self.min_height <= height
    }
}
