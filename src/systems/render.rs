use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::item::Item;
use crate::components::mapposition::MapPosition;
use crate::components::spawner::Spawner;
use crate::resources::camerarig::{CameraRig, OrthoView};
use crate::resources::debugmode::DebugMode;
use crate::resources::grid::{GridAccess, GridBoard};
use crate::resources::screensize::ScreenSize;
use crate::resources::ui::{UiState, ZoomSlider};
use crate::systems::ui::slider_track;

const BACKGROUND: Color = Color {
    r: 30,
    g: 32,
    b: 40,
    a: 255,
};
const FREE_CELL: Color = Color {
    r: 70,
    g: 74,
    b: 88,
    a: 255,
};
const BLOCKED_CELL: Color = Color {
    r: 20,
    g: 20,
    b: 24,
    a: 255,
};
const SPAWNER: Color = Color {
    r: 240,
    g: 240,
    b: 240,
    a: 255,
};
/// Fraction of a cell covered by its tile.
const CELL_FILL: f32 = 0.92;
const ITEM_RADIUS: f32 = 0.35;

/// Draw-space rectangle of a world box centered on `center`.
///
/// Inside the 2D camera pass world points are drawn at `(x, -y)`.
fn world_rect(center: Vector2, w: f32, h: f32) -> Rectangle {
    Rectangle::new(center.x - w * 0.5, -(center.y + h * 0.5), w, h)
}

fn collider_rect(collider: &BoxCollider, position: Vector2) -> Rectangle {
    let (min, max) = collider.aabb(position);
    Rectangle::new(min.x, -max.y, max.x - min.x, max.y - min.y)
}

fn flip_y(v: Vector2) -> Vector2 {
    Vector2 { x: v.x, y: -v.y }
}

/// Draw one frame: the world pass through the rig's camera, then the zoom
/// slider and, in debug mode, the diagnostics overlay in screen space.
///
/// We render inside raylib's drawing scope and query the ECS World directly.
pub fn render_frame(world: &mut World, d: &mut RaylibDrawHandle) {
    let screen = *world.resource::<ScreenSize>();
    let view = world.resource::<CameraRig>().view(screen);

    d.clear_background(BACKGROUND);

    {
        let mut d2 = d.begin_mode2D(view.camera2d());
        render_pass(world, &mut d2, &view);
    }

    render_zoom_slider(world, d);
    render_debug_ui(world, d, &view);
}

/// World-space pass: board, items, spawners and debug colliders.
pub fn render_pass(
    world: &mut World,
    d2: &mut RaylibMode2D<RaylibDrawHandle>, // drawing in 2D camera space
    view: &OrthoView,
) {
    // Outline widths are given in pixels
    let px = 1.0 / view.pixels_per_unit();

    if let Some(grid) = world.get_resource::<GridBoard>() {
        for (_, cell) in grid.iter_cells() {
            let color = if cell.blocked { BLOCKED_CELL } else { FREE_CELL };
            d2.draw_rectangle_rec(world_rect(cell.position, CELL_FILL, CELL_FILL), color);
        }
    }

    let mut items = world.query::<(&Item, &MapPosition)>();
    for (item, position) in items.iter(world) {
        d2.draw_circle_v(flip_y(position.pos), ITEM_RADIUS, item.color);
    }

    let mut spawners = world.query::<(&Spawner, &MapPosition, &BoxCollider)>();
    for (spawner, position, collider) in spawners.iter(world) {
        let thickness = if spawner.is_dragging() { 4.0 } else { 2.0 };
        d2.draw_rectangle_lines_ex(
            collider_rect(collider, position.pos),
            thickness * px,
            SPAWNER,
        );
    }

    if world.contains_resource::<DebugMode>() {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            d2.draw_rectangle_lines_ex(collider_rect(collider, position.pos), px, Color::RED);
        }
    }
}

fn render_zoom_slider(world: &World, d: &mut RaylibDrawHandle) {
    let screen = *world.resource::<ScreenSize>();
    let slider = *world.resource::<ZoomSlider>();
    let busy = world
        .get_resource::<UiState>()
        .map(|ui| ui.pointer_over_ui || ui.dragging_slider)
        .unwrap_or(false);

    let track = slider_track(screen);
    let track_color = if busy {
        Color::new(200, 200, 210, 255)
    } else {
        Color::new(120, 120, 130, 255)
    };
    d.draw_rectangle_rec(track, track_color);

    // Top of the track is the max value
    let knob_y = track.y + (1.0 - slider.normalized()) * track.height;
    d.draw_rectangle_rec(
        Rectangle::new(track.x - 4.0, knob_y - 6.0, track.width + 8.0, 12.0),
        Color::RAYWHITE,
    );
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle, view: &OrthoView) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen = *world.resource::<ScreenSize>();

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::RAYWHITE);

    let rig = world.resource::<CameraRig>();
    let pos = rig.position();
    let cam_text = format!(
        "Camera pos: ({:.2}, {:.2}, {:.2}) Zoom: {:.2} [{:.2}, {:.2}] Speed: {:.2}",
        pos.x,
        pos.y,
        pos.z,
        rig.orthographic_size(),
        rig.min_zoom(),
        rig.max_zoom(),
        rig.pan_speed()
    );
    d.draw_text(&cam_text, 10, (screen.h - 30) as i32, 10, Color::RAYWHITE);

    if let Some(grid) = world.get_resource::<GridBoard>() {
        let remaining = grid.spawn_stack().map(|s| s.len());
        let grid_text = format!(
            "Grid: {}x{} free: {} stack: {:?}",
            grid.width(),
            grid.height(),
            grid.free_cell_count(),
            remaining
        );
        d.draw_text(&grid_text, 10, 30, 10, Color::RAYWHITE);
    }

    let mouse_pos = d.get_mouse_position();
    let mouse_world = flip_y(d.get_screen_to_world2D(mouse_pos, view.camera2d()));
    let mouse_text = format!(
        "Mouse screen: ({:.1}, {:.1}) World: ({:.2}, {:.2})",
        mouse_pos.x, mouse_pos.y, mouse_world.x, mouse_world.y
    );
    d.draw_text(&mouse_text, 10, 50, 10, Color::RAYWHITE);
}
