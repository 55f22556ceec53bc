//! Item spawner component.
//!
//! A [`Spawner`] does two things:
//!
//! - **Spawning**: [`Spawner::spawn`] pops candidate cells from the grid's
//!   spawn stack until it finds a valid one, creates an item at the spawner's
//!   position with a random palette color, registers it in the cell and starts
//!   a short move into place. The move is a [`SpawnJob`] owned by the spawner
//!   and advanced by [`Spawner::tick`]; only one runs at a time.
//! - **Relocation**: the spawner can be dragged with the pointer. Dropping it
//!   snaps onto the nearest cell if that cell is free, otherwise it returns to
//!   where the drag started.
//!
//! ```text
//! Idle --press--> Dragging --release--> snap_to_cell --> Idle
//!                                          |-- free cell: Moved(cell), callback
//!                                          `-- blocked/occupied: RolledBack
//! ```
//!
//! Completion is reported through the two callbacks bound by
//! [`Spawner::initialize`].

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{debug, info, warn};
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::item::ItemFactory;
use crate::components::tween::SpawnTween;
use crate::resources::grid::{GridAccess, GridPos};
use crate::resources::input::ButtonState;

/// Seconds an item takes to travel from the spawner into its cell.
pub const SPAWN_DURATION: f32 = 0.1;

pub type AllItemsSpawnedFn = Box<dyn FnMut() + Send + Sync>;
pub type SpawnerMovedFn = Box<dyn FnMut(GridPos) + Send + Sync>;

/// The in-flight move of a freshly spawned item.
#[derive(Debug, Clone, Copy)]
pub struct SpawnJob {
    pub item: Entity,
    pub cell: GridPos,
    pub tween: SpawnTween,
}

/// Result of one [`Spawner::tick`].
#[derive(Debug, Clone, Copy)]
pub struct JobProgress {
    pub item: Entity,
    pub position: Vector2,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// An item was created and is moving into `cell`.
    Started { item: Entity, cell: GridPos },
    /// The spawn stack ran dry; the all-spawned callback fired.
    Exhausted,
    /// The grid has no spawn stack at all.
    NoStack,
    /// An earlier item is still moving into place.
    Busy,
    /// The grid palette is empty.
    NoPalette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    Moved(GridPos),
    RolledBack,
}

#[derive(Component)]
pub struct Spawner {
    dragging: bool,
    position_before_drag: Vector2,
    spawn_duration: f32,
    job: Option<SpawnJob>,
    on_all_items_spawned: Option<AllItemsSpawnedFn>,
    on_spawner_moved: Option<SpawnerMovedFn>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_DURATION)
    }
}

impl Spawner {
    pub fn new(spawn_duration: f32) -> Self {
        Self {
            dragging: false,
            position_before_drag: Vector2 { x: 0.0, y: 0.0 },
            spawn_duration,
            job: None,
            on_all_items_spawned: None,
            on_spawner_moved: None,
        }
    }

    /// Bind the completion callbacks.
    pub fn initialize(
        &mut self,
        on_all_items_spawned: impl FnMut() + Send + Sync + 'static,
        on_spawner_moved: impl FnMut(GridPos) + Send + Sync + 'static,
    ) {
        self.on_all_items_spawned = Some(Box::new(on_all_items_spawned));
        self.on_spawner_moved = Some(Box::new(on_spawner_moved));
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn spawn_duration(&self) -> f32 {
        self.spawn_duration
    }

    pub fn set_spawn_duration(&mut self, duration: f32) {
        self.spawn_duration = duration;
    }

    pub fn active_job(&self) -> Option<&SpawnJob> {
        self.job.as_ref()
    }

    /// Place the next item from the grid's spawn stack.
    ///
    /// Returns right after the first item is created; its move into the cell
    /// is driven by [`Spawner::tick`].
    pub fn spawn<G, F>(
        &mut self,
        origin: Vector2,
        grid: &mut G,
        factory: &mut F,
        rng: &mut Rng,
    ) -> SpawnOutcome
    where
        G: GridAccess + ?Sized,
        F: ItemFactory + ?Sized,
    {
        if self.job.is_some() {
            debug!("Spawn ignored: previous item still moving");
            return SpawnOutcome::Busy;
        }
        if !grid.has_spawn_stack() {
            return SpawnOutcome::NoStack;
        }

        while let Some(cell) = grid.pop_spawn_target() {
            if !grid.is_valid_position(cell) {
                continue;
            }
            let Some(target) = grid.cell(cell).map(|c| c.position) else {
                continue;
            };
            if grid.palette().is_empty() {
                grid.push_spawn_target(cell);
                warn!("Spawn ignored: grid palette is empty");
                return SpawnOutcome::NoPalette;
            }

            let palette = grid.palette();
            let color = palette[rng.usize(..palette.len())];
            let item = factory.instantiate(origin, color, cell);
            grid.add_item(cell, item, color);

            self.job = Some(SpawnJob {
                item,
                cell,
                tween: SpawnTween::new(origin, target, self.spawn_duration),
            });
            debug!("Spawned {:?} towards ({}, {})", item, cell.x, cell.y);
            return SpawnOutcome::Started { item, cell };
        }

        info!("Spawn stack exhausted");
        if let Some(callback) = self.on_all_items_spawned.as_mut() {
            callback();
        }
        SpawnOutcome::Exhausted
    }

    /// Advance the in-flight item move, if any.
    pub fn tick(&mut self, dt: f32) -> Option<JobProgress> {
        let job = self.job.as_mut()?;
        let position = job.tween.tick(dt);
        let progress = JobProgress {
            item: job.item,
            position,
            finished: job.tween.is_finished(),
        };
        if progress.finished {
            self.job = None;
        }
        Some(progress)
    }

    /// Whether the pointer at `cursor_world` grabs this spawner.
    pub fn is_mouse_over_or_dragging(
        &self,
        position: Vector2,
        collider: &BoxCollider,
        cursor_world: Vector2,
    ) -> bool {
        collider.contains_point(position, cursor_world) || self.dragging
    }

    /// Run the drag state machine for one frame.
    ///
    /// `position` is the spawner's world position and is updated in place.
    /// Returns the snap result on the frame the drag ends.
    pub fn handle_drag<G>(
        &mut self,
        position: &mut Vector2,
        cursor_world: Vector2,
        button: ButtonState,
        grid: &G,
    ) -> Option<SnapOutcome>
    where
        G: GridAccess + ?Sized,
    {
        if button.pressed {
            self.position_before_drag = *position;
            self.dragging = true;
        }

        let mut outcome = None;
        if button.released && self.dragging {
            let snap = self.snap_to_cell(position, cursor_world, grid);
            if let SnapOutcome::Moved(cell) = snap {
                if let Some(callback) = self.on_spawner_moved.as_mut() {
                    callback(cell);
                }
            }
            self.dragging = false;
            outcome = Some(snap);
        }

        if self.dragging {
            *position = cursor_world;
        }
        outcome
    }

    /// Drop the spawner at `cursor_world`: snap to the nearest cell if it is
    /// free, otherwise restore the position the drag started from.
    pub fn snap_to_cell<G>(
        &mut self,
        position: &mut Vector2,
        cursor_world: Vector2,
        grid: &G,
    ) -> SnapOutcome
    where
        G: GridAccess + ?Sized,
    {
        let cell = nearest_cell(grid, cursor_world);
        match grid.cell(cell) {
            Some(target) if !target.blocked && target.is_empty() => {
                *position = target.position;
                debug!("Spawner dropped on ({}, {})", cell.x, cell.y);
                SnapOutcome::Moved(cell)
            }
            _ => {
                *position = self.position_before_drag;
                debug!("Spawner drop on ({}, {}) rejected", cell.x, cell.y);
                SnapOutcome::RolledBack
            }
        }
    }
}

/// Grid cell under a world point, clamped into the grid.
///
/// Rounds half to even on both axes.
pub fn nearest_cell<G>(grid: &G, world: Vector2) -> GridPos
where
    G: GridAccess + ?Sized,
{
    let x = (world.x + grid.x_offset()).round_ties_even() as i32;
    let y = (grid.height() as f32 - 1.0 - world.y - grid.y_offset()).round_ties_even() as i32;
    GridPos::new(
        x.min(grid.width() - 1).max(0),
        y.min(grid.height() - 1).max(0),
    )
}
