//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and pushes the camera tuning into the
//! [`CameraRig`] and the spawn duration into every [`Spawner`]. A new zoom
//! padding refits the zoom range to the board. Window settings are applied by
//! the binary when it opens the window.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::spawner::Spawner;
use crate::events::grid::GridResizedEvent;
use crate::resources::camerarig::CameraRig;
use crate::resources::gameconfig::GameConfig;
use crate::resources::grid::{GridAccess, GridBoard};

/// System that applies game configuration changes.
///
/// Runs its body when [`GameConfig`] was added or modified since the last run.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rig: ResMut<CameraRig>,
    mut spawners: Query<&mut Spawner>,
    grid: Option<Res<GridBoard>>,
    mut commands: Commands,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !config.is_changed() {
        return;
    }

    let tuning = config.camera_tuning();
    if rig.tuning() != tuning {
        let refit = rig.tuning().padding != tuning.padding;
        rig.set_tuning(tuning);
        if refit {
            if let Some(grid) = grid {
                commands.trigger(GridResizedEvent {
                    width: grid.width(),
                    height: grid.height(),
                });
            }
        }
    }
    for mut spawner in spawners.iter_mut() {
        if spawner.spawn_duration() != config.spawn_duration {
            spawner.set_spawn_duration(config.spawn_duration);
        }
    }
    info!("GameConfig changes applied.");
}
