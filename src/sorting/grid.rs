use crate::types::Item;

/**
 * The belt surface: a fixed rows-by-columns matrix of items stored row-major.
 * Row 0 is where new beads enter; row rows-1 is the far end of the belt.
 * Every cell always holds exactly one item (possibly Empty) and the matrix is
 * never resized after construction.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Item>,
}

impl Grid {
    /// Creates an all-empty grid with the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Item::Empty; rows * columns],
        }
    }

    /// Number of rows on the belt.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (lanes) on the belt.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the item at the given cell.
    pub fn get(&self, row: usize, column: usize) -> Item {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[row * self.columns + column]
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, item: Item) {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[row * self.columns + column] = item;
    }

    /// Returns one row of the belt as a slice.
    pub fn row(&self, row: usize) -> &[Item] {
        debug_assert!(row < self.rows);
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    pub(crate) fn replace_row(&mut self, row: usize, items: &[Item]) {
        debug_assert!(row < self.rows);
        debug_assert_eq!(items.len(), self.columns);
        self.cells[row * self.columns..(row + 1) * self.columns].copy_from_slice(items);
    }

    /// Counts the beads currently on the belt.
    pub fn bead_count(&self) -> usize {
        self.cells.iter().filter(|item| !item.is_empty()).count()
    }

    /// Copies the grid into a nested row-major matrix for snapshots.
    pub fn to_matrix(&self) -> Vec<Vec<Item>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.to_vec())
            .collect()
    }
}
