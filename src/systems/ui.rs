//! Zoom slider widget.
//!
//! The slider is a vertical track on the right edge of the screen. The top of
//! the track is the most zoomed-out value. [`zoom_slider_system`] updates
//! [`UiState`] from the pointer (hover, drag start/stop) and writes the
//! [`ZoomSlider`] value from a track drag or the mouse wheel. The camera picks
//! the value up through change detection in
//! [`zoom_sync_system`](crate::systems::camera::zoom_sync_system).

use bevy_ecs::prelude::*;
use raylib::prelude::{Rectangle, Vector2};

use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;
use crate::resources::ui::{UiState, ZoomControl, ZoomSlider};

const TRACK_WIDTH: f32 = 16.0;
const TRACK_MARGIN: f32 = 24.0;
/// Extra pixels around the track that still count as "over the slider".
const HOVER_SLACK: f32 = 8.0;
/// Fraction of the zoom range covered by one wheel notch.
const WHEEL_STEP: f32 = 0.1;

/// Screen rectangle of the slider track.
pub fn slider_track(screen: ScreenSize) -> Rectangle {
    let h = screen.h as f32;
    Rectangle::new(
        screen.w as f32 - TRACK_MARGIN - TRACK_WIDTH,
        h * 0.15,
        TRACK_WIDTH,
        h * 0.7,
    )
}

fn over_track(track: &Rectangle, point: Vector2) -> bool {
    point.x >= track.x - HOVER_SLACK
        && point.x <= track.x + track.width + HOVER_SLACK
        && point.y >= track.y - HOVER_SLACK
        && point.y <= track.y + track.height + HOVER_SLACK
}

/// Slider value under a screen y coordinate.
fn value_at(track: &Rectangle, slider: &ZoomSlider, y: f32) -> f32 {
    let t = if track.height > 0.0 {
        ((y - track.y) / track.height).clamp(0.0, 1.0)
    } else {
        0.0
    };
    slider.max() - t * (slider.max() - slider.min())
}

pub fn zoom_slider_system(
    pointer: Res<PointerState>,
    screen: Res<ScreenSize>,
    mut ui: ResMut<UiState>,
    mut slider: ResMut<ZoomSlider>,
) {
    let track = slider_track(*screen);
    let hovering = over_track(&track, pointer.screen);

    if ui.pointer_over_ui != hovering {
        ui.pointer_over_ui = hovering;
    }
    if pointer.primary.pressed && hovering {
        ui.dragging_slider = true;
    }

    let mut wanted = slider.value();
    if ui.dragging_slider {
        wanted = value_at(&track, &slider, pointer.screen.y);
        if pointer.primary.released || !pointer.primary.down {
            ui.dragging_slider = false;
        }
    }
    if pointer.wheel != 0.0 {
        // Wheel up zooms in, i.e. towards the smaller extent
        wanted -= pointer.wheel * WHEEL_STEP * (slider.max() - slider.min());
    }

    let clamped = wanted.clamp(slider.min(), slider.max());
    if clamped != slider.value() {
        slider.set_value(clamped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::ButtonState;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(PointerState::default());
        world.insert_resource(ScreenSize { w: 1000, h: 1000 });
        world.insert_resource(UiState::default());
        let mut slider = ZoomSlider::default();
        slider.set_limits(3.5, 13.5);
        slider.set_value(13.5);
        world.insert_resource(slider);
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(zoom_slider_system);
        schedule.run(world);
    }

    fn track_center(world: &World) -> Vector2 {
        let track = slider_track(*world.resource::<ScreenSize>());
        Vector2 {
            x: track.x + track.width * 0.5,
            y: track.y + track.height * 0.5,
        }
    }

    #[test]
    fn test_hover_marks_ui_busy() {
        let mut world = world();
        let center = track_center(&world);
        world.resource_mut::<PointerState>().screen = center;
        run(&mut world);
        assert!(world.resource::<UiState>().pointer_over_ui);

        world.resource_mut::<PointerState>().screen = Vector2 { x: 10.0, y: 10.0 };
        run(&mut world);
        assert!(!world.resource::<UiState>().pointer_over_ui);
    }

    #[test]
    fn test_drag_sets_value_and_release_ends_drag() {
        let mut world = world();
        let center = track_center(&world);
        {
            let mut pointer = world.resource_mut::<PointerState>();
            pointer.screen = center;
            pointer.primary = ButtonState {
                down: true,
                pressed: true,
                released: false,
            };
        }
        run(&mut world);
        assert!(world.resource::<UiState>().dragging_slider);
        assert!((world.resource::<ZoomSlider>().value() - 8.5).abs() < 1e-3);

        // Dragging keeps going even when the pointer leaves the track.
        {
            let mut pointer = world.resource_mut::<PointerState>();
            pointer.screen = Vector2 { x: 10.0, y: 0.0 };
            pointer.primary.pressed = false;
        }
        run(&mut world);
        assert!(world.resource::<UiState>().dragging_slider);
        assert!((world.resource::<ZoomSlider>().value() - 13.5).abs() < 1e-3);

        world.resource_mut::<PointerState>().primary = ButtonState {
            down: false,
            pressed: false,
            released: true,
        };
        run(&mut world);
        assert!(!world.resource::<UiState>().dragging_slider);
    }

    #[test]
    fn test_wheel_zooms_in_and_clamps() {
        let mut world = world();
        world.resource_mut::<PointerState>().wheel = 1.0;
        run(&mut world);
        assert!((world.resource::<ZoomSlider>().value() - 12.5).abs() < 1e-3);

        world.resource_mut::<PointerState>().wheel = 50.0;
        run(&mut world);
        assert!((world.resource::<ZoomSlider>().value() - 3.5).abs() < 1e-3);
    }
}
