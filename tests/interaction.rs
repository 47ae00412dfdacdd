//! Mouse-driven pan and zoom through `handle_mouse_event`.

use iced::mouse::{Button, Event, ScrollDelta};
use linegraph::{LineGraph, LineGraphBuilder, Point, RecordingBackend, Rect};

fn graph() -> LineGraph<RecordingBackend> {
    let mut graph = LineGraph::new(RecordingBackend::new(800, 600));
    graph.display(Rect::new(0.0, 0.0, 100.0, 100.0), false).unwrap();
    graph
}

fn moved(x: f32, y: f32) -> Event {
    Event::CursorMoved {
        position: iced::Point::new(x, y),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ====================
// Drag to pan
// ====================

#[test]
fn test_drag_pans_view() {
    let mut graph = graph();

    assert!(!graph.handle_mouse_event(moved(100.0, 100.0)).unwrap());
    assert!(!graph.handle_mouse_event(Event::ButtonPressed(Button::Left)).unwrap());
    assert!(graph.is_panning());

    assert!(graph.handle_mouse_event(moved(180.0, 160.0)).unwrap());
    let origin = graph.viewport().unwrap().data_origin();
    assert!(close(origin.x, -10.0));
    assert!(close(origin.y, 10.0));

    graph
        .handle_mouse_event(Event::ButtonReleased(Button::Left))
        .unwrap();
    assert!(!graph.is_panning());
    assert!(!graph.handle_mouse_event(moved(400.0, 400.0)).unwrap());
    assert_eq!(graph.viewport().unwrap().data_origin(), origin);
    assert_eq!(graph.backend().frames(), 1);
}

#[test]
fn test_other_buttons_do_not_pan() {
    let mut graph = graph();
    graph.handle_mouse_event(moved(10.0, 10.0)).unwrap();
    graph
        .handle_mouse_event(Event::ButtonPressed(Button::Right))
        .unwrap();
    assert!(!graph.is_panning());
    assert!(!graph.handle_mouse_event(moved(50.0, 50.0)).unwrap());
}

#[test]
fn test_pan_disabled_ignores_drag() {
    let mut graph = LineGraphBuilder::new()
        .with_pan_enabled(false)
        .build(RecordingBackend::new(800, 600))
        .unwrap();
    assert!(!graph.pan_enabled());

    graph.handle_mouse_event(moved(10.0, 10.0)).unwrap();
    graph
        .handle_mouse_event(Event::ButtonPressed(Button::Left))
        .unwrap();
    assert!(!graph.is_panning());
    assert!(!graph.handle_mouse_event(moved(90.0, 90.0)).unwrap());
    assert_eq!(graph.backend().frames(), 0);
}

#[test]
fn test_disabling_pan_mid_drag() {
    let mut graph = graph();
    graph.handle_mouse_event(moved(10.0, 10.0)).unwrap();
    graph
        .handle_mouse_event(Event::ButtonPressed(Button::Left))
        .unwrap();
    graph.set_pan_enabled(false);

    assert!(!graph.handle_mouse_event(moved(90.0, 90.0)).unwrap());
    assert_eq!(graph.viewport().unwrap().data_origin(), Point::ORIGIN);

    // Re-enabling does not resume the old gesture.
    graph.set_pan_enabled(true);
    assert!(!graph.handle_mouse_event(moved(120.0, 120.0)).unwrap());
}

// ====================
// Wheel zoom
// ====================

#[test]
fn test_wheel_lines_zoom() {
    let mut graph = graph();
    let drew = graph
        .handle_mouse_event(Event::WheelScrolled {
            delta: ScrollDelta::Lines { x: 0.0, y: 1.0 },
        })
        .unwrap();
    assert!(drew);
    assert!(close(graph.viewport().unwrap().data_width(), 90.0));

    graph
        .handle_mouse_event(Event::WheelScrolled {
            delta: ScrollDelta::Lines { x: 0.0, y: -1.0 },
        })
        .unwrap();
    assert!(close(graph.viewport().unwrap().data_width(), 99.0));
}

#[test]
fn test_wheel_pixels_zoom_by_sign_only() {
    let mut graph = graph();
    graph
        .handle_mouse_event(Event::WheelScrolled {
            delta: ScrollDelta::Pixels { x: 0.0, y: -37.0 },
        })
        .unwrap();
    assert!(close(graph.viewport().unwrap().data_width(), 110.0));
    assert!(close(graph.viewport().unwrap().data_origin().x, -5.0));
}

#[test]
fn test_horizontal_scroll_ignored() {
    let mut graph = graph();
    let drew = graph
        .handle_mouse_event(Event::WheelScrolled {
            delta: ScrollDelta::Lines { x: 3.0, y: 0.0 },
        })
        .unwrap();
    assert!(!drew);
    assert_eq!(graph.viewport().unwrap().data_width(), 100.0);
    assert_eq!(graph.backend().frames(), 0);
}

#[test]
fn test_scroll_to_zoom_disabled() {
    let mut controls = linegraph::ChartControls::default();
    controls.zoom.scroll_to_zoom = false;
    let mut graph = LineGraphBuilder::new()
        .with_controls(controls)
        .with_display_rect(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build(RecordingBackend::new(800, 600))
        .unwrap();

    let drew = graph
        .handle_mouse_event(Event::WheelScrolled {
            delta: ScrollDelta::Lines { x: 0.0, y: 1.0 },
        })
        .unwrap();
    assert!(!drew);
    assert_eq!(graph.viewport().unwrap().data_width(), 100.0);

    // Programmatic zoom still works.
    graph.zoom(1.0).unwrap();
    assert!(close(graph.viewport().unwrap().data_width(), 90.0));
}
