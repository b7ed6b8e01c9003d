//! Dense grids for per-cell simulation data

use crate::core::error::{RadarError, Result};
use crate::core::types::Position;

/// Generic row-major 2D grid addressed by integer positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Clone> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a grid from explicit rows; all rows must have the same length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(RadarError::InvalidState(format!(
                    "grid row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index(pos).map(move |i| &mut self.data[i])
    }

    /// Set a cell; positions outside the grid are ignored
    #[inline]
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(i) = self.index(pos) {
            self.data[i] = value;
        }
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }
}

/// Vacancy map of a zone: `true` means the cell is free
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Grid<bool>,
}

impl OccupancyGrid {
    /// Fully vacant grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::filled(width, height, true),
        }
    }

    /// Rebuild from saved vacancy rows (`rows[y][x]`)
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        Ok(Self {
            cells: Grid::from_rows(rows)?,
        })
    }

    pub fn width(&self) -> usize {
        self.cells.width
    }

    pub fn height(&self) -> usize {
        self.cells.height
    }

    /// Out-of-bounds cells are never vacant
    #[inline]
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.cells.get(pos).copied().unwrap_or(false)
    }

    /// True when every listed cell lies inside the grid and is vacant
    pub fn all_vacant(&self, cells: &[Position]) -> bool {
        cells.iter().all(|&pos| self.is_vacant(pos))
    }

    pub fn occupy(&mut self, cells: &[Position]) {
        self.set_cells(cells, false);
    }

    pub fn free(&mut self, cells: &[Position]) {
        self.set_cells(cells, true);
    }

    fn set_cells(&mut self, cells: &[Position], vacant: bool) {
        for &pos in cells {
            self.cells.set(pos, vacant);
        }
    }

    /// True when the whole rectangle lies inside the grid and is vacant
    pub fn region_is_vacant(&self, origin: Position, width: usize, height: usize) -> bool {
        region(origin, width, height).all(|pos| self.is_vacant(pos))
    }

    pub fn occupy_region(&mut self, origin: Position, width: usize, height: usize) {
        self.set_region(origin, width, height, false);
    }

    pub fn free_region(&mut self, origin: Position, width: usize, height: usize) {
        self.set_region(origin, width, height, true);
    }

    fn set_region(&mut self, origin: Position, width: usize, height: usize, vacant: bool) {
        for pos in region(origin, width, height) {
            self.cells.set(pos, vacant);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.data.iter().filter(|&&vacant| !vacant).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.rows()
    }

    /// Copy of the vacancy rows, suitable for `from_rows`
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }
}

/// Every cell of the rectangle anchored at `origin`
pub fn region(origin: Position, width: usize, height: usize) -> impl Iterator<Item = Position> {
    let (w, h) = (width as i32, height as i32);
    (0..h).flat_map(move |dy| (0..w).map(move |dx| origin.offset(dx, dy)))
}
