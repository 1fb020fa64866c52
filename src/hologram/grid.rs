//! The glyph grid behind the hologram.

use rand::Rng;

use crate::config::HologramConfig;

/// Glyphs a non-blank cell can hold.
pub const GLYPHS: [char; 2] = ['.', '·'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// `' '` for a blank cell.
    pub glyph: char,
    pub opacity: f64,
    pub flash: bool,
}

impl GridCell {
    pub fn is_blank(&self) -> bool {
        self.glyph == ' '
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Iterates `(row, col, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    /// Copy of the grid with every cell's flash flag set to `flash`.
    pub fn with_flash(&self, flash: bool) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|c| GridCell { flash, ..*c }).collect(),
        }
    }
}

fn base_opacity<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>() * 0.3 + 0.1
}

/// Fresh grid: each cell holds a glyph with `glyph_probability`, otherwise
/// blank, and a base opacity in `[0.1, 0.4)`.
pub fn generate_grid<R>(rows: usize, cols: usize, config: &HologramConfig, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let cells = (0..rows * cols)
        .map(|_| {
            let glyph = if rng.random_bool(config.glyph_probability) {
                GLYPHS[usize::from(rng.random_bool(0.5))]
            } else {
                ' '
            };
            GridCell {
                glyph,
                opacity: base_opacity(rng),
                flash: false,
            }
        })
        .collect();
    Grid { rows, cols, cells }
}

/// One refresh tick: each cell rerolls its opacity with
/// `opacity_reroll_probability` and flashes for this tick with
/// `flash_probability`.
pub fn update_grid<R>(grid: &Grid, config: &HologramConfig, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let cells = grid
        .cells
        .iter()
        .map(|cell| {
            let opacity = if rng.random_bool(config.opacity_reroll_probability) {
                base_opacity(rng)
            } else {
                cell.opacity
            };
            GridCell {
                glyph: cell.glyph,
                opacity,
                flash: rng.random_bool(config.flash_probability),
            }
        })
        .collect();
    Grid {
        rows: grid.rows,
        cols: grid.cols,
        cells,
    }
}
