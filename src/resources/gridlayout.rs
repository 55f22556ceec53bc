//! Data-driven grid layouts.
//!
//! A layout is a JSON file describing the board the rigs play on: which cells
//! are blocked, the color palette items are drawn from and the cell the
//! spawner starts on. [`GridBoard::from_layout`](crate::resources::grid::GridBoard::from_layout)
//! turns it into the live grid resource.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "grid": [
//!     "..#..",
//!     ".....",
//!     "..#.."
//!   ],
//!   "legend": { ".": "free", "#": "blocked" },
//!   "palette": [[231, 76, 60], [46, 204, 113], [52, 152, 219]],
//!   "spawner": [0, 1]
//! }
//! ```
//!
//! `legend` is optional and defaults to `.` = free, `#` = blocked. Rows are
//! listed top row first.

use raylib::prelude::Color;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::grid::GridPos;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Free,
    Blocked,
}

fn default_legend() -> FxHashMap<char, CellKind> {
    let mut legend = FxHashMap::default();
    legend.insert('.', CellKind::Free);
    legend.insert('#', CellKind::Blocked);
    legend
}

fn default_palette() -> Vec<[u8; 3]> {
    vec![
        [231, 76, 60],
        [46, 204, 113],
        [52, 152, 219],
        [241, 196, 15],
        [155, 89, 182],
    ]
}

/// Structure representing the grid layout data loaded from JSON.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridLayoutData {
    pub grid: Vec<String>,
    #[serde(default = "default_legend")]
    pub legend: FxHashMap<char, CellKind>,
    #[serde(default = "default_palette")]
    pub palette: Vec<[u8; 3]>,
    #[serde(default)]
    pub spawner: [i32; 2],
}

impl GridLayoutData {
    /// Open board of the given size with the default palette and the spawner
    /// in the bottom-left cell.
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            grid: vec![".".repeat(width); height],
            legend: default_legend(),
            palette: default_palette(),
            spawner: [0, height.saturating_sub(1) as i32],
        }
    }

    /// Loads grid layout data from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let layout = Self::from_json(&file_content)?;
        Ok(layout)
    }

    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let layout: GridLayoutData = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Width and height in cells. Rows must be non-empty and of equal length.
    pub fn dimensions(&self) -> Result<(i32, i32), String> {
        let height = self.grid.len();
        let width = self.grid.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err("Grid layout has no cells".to_string());
        }
        if let Some((row, line)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, line)| line.chars().count() != width)
        {
            return Err(format!(
                "Grid row {} has {} cells, expected {}",
                row,
                line.chars().count(),
                width
            ));
        }
        Ok((width as i32, height as i32))
    }

    pub fn cell_kind(&self, ch: char) -> Result<CellKind, String> {
        self.legend
            .get(&ch)
            .copied()
            .ok_or_else(|| format!("Grid character '{}' is not in the legend", ch))
    }

    pub fn spawner_cell(&self) -> GridPos {
        GridPos::new(self.spawner[0], self.spawner[1])
    }

    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette
            .iter()
            .map(|[r, g, b]| Color::new(*r, *g, *b, 255))
            .collect()
    }

    /// Check shape, legend coverage, palette and spawner placement.
    pub fn validate(&self) -> Result<(), String> {
        let (width, height) = self.dimensions()?;
        for line in &self.grid {
            for ch in line.chars() {
                self.cell_kind(ch)?;
            }
        }
        if self.palette.is_empty() {
            return Err("Grid layout palette is empty".to_string());
        }
        let [sx, sy] = self.spawner;
        if sx < 0 || sy < 0 || sx >= width || sy >= height {
            return Err(format!(
                "Spawner cell ({}, {}) is outside the {}x{} grid",
                sx, sy, width, height
            ));
        }
        let row = &self.grid[sy as usize];
        if let Some(ch) = row.chars().nth(sx as usize) {
            if self.cell_kind(ch)? == CellKind::Blocked {
                return Err(format!("Spawner cell ({}, {}) is blocked", sx, sy));
            }
        }
        Ok(())
    }
}
