//! Grid manager resource.
//!
//! [`GridBoard`] is the collaborator both rigs lean on: it stores the cells
//! with their recorded world positions, the blocked/occupied state, the color
//! palette and the ordered stack of cells waiting for an item. The spawner only
//! talks to it through the [`GridAccess`] trait.
//!
//! Coordinates: `GridPos { x: 0, y: 0 }` is the top-left cell. World space has
//! Y pointing up and unit cells, and the grid is centered on the origin:
//!
//! ```text
//! world.x = x - x_offset
//! world.y = (height - 1 - y) - y_offset
//! ```

use bevy_ecs::prelude::*;
use log::{debug, warn};
use raylib::prelude::{Color, Vector2};

use crate::resources::gridlayout::{CellKind, GridLayoutData};

/// Integer grid coordinate. `y` grows downwards (row index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn distance_sq(self, other: GridPos) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Item registered in a cell.
#[derive(Debug, Clone, Copy)]
pub struct CellItem {
    pub entity: Entity,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct GridCell {
    /// Recorded world position of the cell center.
    pub position: Vector2,
    pub blocked: bool,
    pub item: Option<CellItem>,
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }
}

/// What the spawner needs from a grid manager.
pub trait GridAccess {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn x_offset(&self) -> f32;
    fn y_offset(&self) -> f32;
    fn cell(&self, pos: GridPos) -> Option<&GridCell>;
    /// Whether an item may be placed at `pos`.
    fn is_valid_position(&self, pos: GridPos) -> bool;
    fn palette(&self) -> &[Color];
    /// `false` when no spawn stack has been prepared at all.
    fn has_spawn_stack(&self) -> bool;
    /// Pops the next candidate cell (last in, first out).
    fn pop_spawn_target(&mut self) -> Option<GridPos>;
    /// Puts a popped cell back on top of the stack.
    fn push_spawn_target(&mut self, pos: GridPos);
    fn add_item(&mut self, pos: GridPos, entity: Entity, color: Color);
}

#[derive(Resource, Debug, Clone)]
pub struct GridBoard {
    width: i32,
    height: i32,
    x_offset: f32,
    y_offset: f32,
    cells: Vec<GridCell>,
    palette: Vec<Color>,
    spawn_stack: Option<Vec<GridPos>>,
}

impl GridBoard {
    /// All-free board centered on the world origin. No spawn stack yet.
    pub fn new(width: i32, height: i32, palette: Vec<Color>) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let x_offset = (width - 1) as f32 * 0.5;
        let y_offset = (height - 1) as f32 * 0.5;
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(GridCell {
                    position: Vector2 {
                        x: x as f32 - x_offset,
                        y: (height - 1 - y) as f32 - y_offset,
                    },
                    blocked: false,
                    item: None,
                });
            }
        }
        Self {
            width,
            height,
            x_offset,
            y_offset,
            cells,
            palette,
            spawn_stack: None,
        }
    }

    /// Build a board from a validated layout.
    pub fn from_layout(layout: &GridLayoutData) -> Result<Self, String> {
        let (width, height) = layout.dimensions()?;
        let mut board = Self::new(width, height, layout.palette_colors());
        for (y, row) in layout.grid.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if layout.cell_kind(ch)? == CellKind::Blocked {
                    board.set_blocked(GridPos::new(x as i32, y as i32), true);
                }
            }
        }
        Ok(board)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn cell_mut(&mut self, pos: GridPos) -> Option<&mut GridCell> {
        let idx = self.index(pos)?;
        self.cells.get_mut(idx)
    }

    pub fn set_blocked(&mut self, pos: GridPos, blocked: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.blocked = blocked;
        }
    }

    /// Iterate all cells with their coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (GridPos, &GridCell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (GridPos::new(i as i32 % width, i as i32 / width), c))
    }

    pub fn free_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.blocked && c.is_empty())
            .count()
    }

    /// Rebuild the spawn stack around `origin`: every valid cell except
    /// `origin` itself, ordered so that the nearest cell is popped first.
    /// Ties are broken by row, then column.
    pub fn fill_spawn_stack(&mut self, origin: GridPos) {
        let mut targets: Vec<GridPos> = self
            .iter_cells()
            .map(|(pos, _)| pos)
            .filter(|pos| *pos != origin && self.is_valid_position(*pos))
            .collect();
        // Farthest first; `pop` takes from the end.
        targets.sort_by(|a, b| {
            b.distance_sq(origin)
                .cmp(&a.distance_sq(origin))
                .then(b.y.cmp(&a.y))
                .then(b.x.cmp(&a.x))
        });
        debug!(
            "Spawn stack rebuilt around ({}, {}): {} targets",
            origin.x,
            origin.y,
            targets.len()
        );
        self.spawn_stack = Some(targets);
    }

    pub fn clear_spawn_stack(&mut self) {
        self.spawn_stack = None;
    }

    pub fn spawn_stack(&self) -> Option<&[GridPos]> {
        self.spawn_stack.as_deref()
    }

    /// Replace the spawn stack wholesale. The last element is popped first.
    pub fn set_spawn_stack(&mut self, stack: Vec<GridPos>) {
        self.spawn_stack = Some(stack);
    }
}

impl GridAccess for GridBoard {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn x_offset(&self) -> f32 {
        self.x_offset
    }

    fn y_offset(&self) -> f32 {
        self.y_offset
    }

    fn cell(&self, pos: GridPos) -> Option<&GridCell> {
        let idx = self.index(pos)?;
        self.cells.get(idx)
    }

    fn is_valid_position(&self, pos: GridPos) -> bool {
        self.cell(pos)
            .map(|c| !c.blocked && c.is_empty())
            .unwrap_or(false)
    }

    fn palette(&self) -> &[Color] {
        &self.palette
    }

    fn has_spawn_stack(&self) -> bool {
        self.spawn_stack.is_some()
    }

    fn pop_spawn_target(&mut self) -> Option<GridPos> {
        self.spawn_stack.as_mut()?.pop()
    }

    fn push_spawn_target(&mut self, pos: GridPos) {
        if let Some(stack) = self.spawn_stack.as_mut() {
            stack.push(pos);
        }
    }

    fn add_item(&mut self, pos: GridPos, entity: Entity, color: Color) {
        match self.cell_mut(pos) {
            Some(cell) => cell.item = Some(CellItem { entity, color }),
            None => warn!("add_item outside the grid at ({}, {})", pos.x, pos.y),
        }
    }
}
