//! Int-grid CSV parsing.
//!
//! LDtk writes one CSV per int-grid layer in its "super simple export"
//! (`Collisions.csv` and friends): one line per row, one integer per cell,
//! usually with a trailing comma. Blank cells read as `0`.

use thiserror::Error;

/// A parsed int-grid, flattened row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntGridCsv {
    /// Columns (the widest row; shorter rows are padded with `0`).
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// `values[row * width + col]`
    pub values: Vec<i32>,
}

impl IntGridCsv {
    /// Value at `(col, row)`, `None` if out of bounds.
    pub fn get(&self, col: u32, row: u32) -> Option<i32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get((row * self.width + col) as usize).copied()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("Invalid integer '{value}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: String },
}

/// Parse CSV text into an [`IntGridCsv`].
pub fn parse_int_grid_csv(text: &str) -> Result<IntGridCsv, CsvError> {
    let mut rows: Vec<Vec<i32>> = Vec::new();

    for (row_index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells: Vec<&str> = line.split(',').collect();
        // A trailing comma yields one empty cell that isn't part of the grid
        if cells.len() > 1 && cells.last().is_some_and(|c| c.trim().is_empty()) {
            cells.pop();
        }

        let mut row = Vec::with_capacity(cells.len());
        for (col_index, cell) in cells.iter().enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                row.push(0);
                continue;
            }
            let value = cell.parse::<i32>().map_err(|_| CsvError::InvalidCell {
                row: row_index,
                col: col_index,
                value: cell.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();

    let mut values = Vec::with_capacity(width * height);
    for mut row in rows {
        row.resize(width, 0);
        values.extend(row);
    }

    Ok(IntGridCsv {
        width: width as u32,
        height: height as u32,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_trailing_commas() {
        let grid = parse_int_grid_csv("0,0,1,\n1,1,1,\n").unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.values, vec![0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_blank_cells_are_zero() {
        let grid = parse_int_grid_csv("1, ,2\n,3,").unwrap();

        assert_eq!(grid.width, 3);
        // Second row: "" -> 0, "3", trailing "" dropped -> padded back to 0
        assert_eq!(grid.values, vec![1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = parse_int_grid_csv("1,1,1,1\n2\r\n\n3,3").unwrap();

        assert_eq!(grid.width, 4);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.get(0, 1), Some(2));
        assert_eq!(grid.get(3, 1), Some(0));
        assert_eq!(grid.get(1, 2), Some(3));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn test_invalid_cell_reports_position() {
        let err = parse_int_grid_csv("0,1\n0,x").unwrap_err();

        assert_eq!(
            err,
            CsvError::InvalidCell {
                row: 1,
                col: 1,
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let grid = parse_int_grid_csv("").unwrap();

        assert_eq!(grid.width, 0);
        assert_eq!(grid.height, 0);
        assert!(grid.values.is_empty());
    }
}
