use thiserror::Error;

use super::math::Recti;

/// Collision class of one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TileCollision {
    /// No interaction.
    #[default]
    Passable,
    /// Solid on every side.
    Block,
    /// One-way: solid only when landing on it from above.
    Platform,
}

/// Tile grid convention:
/// - Cell (0,0) is the top-left of the map, +y points down.
/// - Cell (x,y) covers pixels `[x*size, (x+1)*size) x [y*size, (y+1)*size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: u32,
    cells: Vec<TileCollision>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileGridError {
    #[error("cell count mismatch: expected {expected}, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile glyph '{glyph}' in row {row}")]
    UnknownGlyph { glyph: char, row: usize },
}

impl TileGrid {
    pub fn new(
        width: u32,
        height: u32,
        tile_size: u32,
        cells: Vec<TileCollision>,
    ) -> Result<Self, TileGridError> {
        let expected = width as usize * height as usize;
        let actual = cells.len();
        if expected != actual {
            return Err(TileGridError::CellCountMismatch { expected, actual });
        }
        Ok(Self {
            width,
            height,
            tile_size,
            cells,
        })
    }

    /// Builds a grid from text rows: `'.'` passable, `'#'` block, `'-'` platform.
    pub fn from_rows(tile_size: u32, rows: &[&str]) -> Result<Self, TileGridError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(TileGridError::RowLengthMismatch {
                    row: row_index,
                    expected: width,
                    actual,
                });
            }
            for glyph in row.chars() {
                cells.push(match glyph {
                    '.' => TileCollision::Passable,
                    '#' => TileCollision::Block,
                    '-' => TileCollision::Platform,
                    other => {
                        return Err(TileGridError::UnknownGlyph {
                            glyph: other,
                            row: row_index,
                        })
                    }
                });
            }
        }
        Self::new(width as u32, rows.len() as u32, tile_size, cells)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Collision class at cell (x,y). Out-of-range queries are Passable so a
    /// body leaving the mapped area never crashes the simulation.
    pub fn collision(&self, x: i32, y: i32) -> TileCollision {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return TileCollision::Passable;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Pixel bounds of cell (x,y). Valid for any indices.
    pub fn tile_bounds(&self, x: i32, y: i32) -> Recti {
        let size = self.tile_size as i32;
        Recti::new(x * size, y * size, size, size)
    }
}
