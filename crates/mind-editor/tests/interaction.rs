//! Integration tests: input events → session → map (mind-editor).
//!
//! Drives a `Session` with the same event stream a window would produce and
//! checks the resulting graph, view, and file state across crate boundaries.

use mind_core::{Color, EditorConfig, FixedMetrics, MindMap, NodeId, Pan};
use mind_editor::{InputEvent, Modifiers, PointerButton, Session};
use mind_render::SceneCanvas;
use pretty_assertions::assert_eq;

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session(dir: &std::path::Path) -> Session {
    init_logger();
    let config = EditorConfig {
        data_dir: Some(dir.to_path_buf()),
        ..Default::default()
    };
    Session::new(config, WIDTH, HEIGHT)
}

fn add_node(s: &mut Session, x: f32, y: f32) -> NodeId {
    let id = s.map_mut().create_node(x, y);
    s.map_mut().refresh_layouts(&FixedMetrics::default());
    id
}

fn press(s: &mut Session, x: f32, y: f32, button: PointerButton) {
    s.handle_event(&InputEvent::PointerDown { x, y, button });
}

fn release(s: &mut Session, x: f32, y: f32, button: PointerButton) {
    s.handle_event(&InputEvent::PointerUp { x, y, button });
}

fn click(s: &mut Session, x: f32, y: f32) {
    press(s, x, y, PointerButton::Primary);
    release(s, x, y, PointerButton::Primary);
}

fn move_to(s: &mut Session, x: f32, y: f32) {
    s.handle_event(&InputEvent::PointerMove { x, y });
}

fn key(s: &mut Session, key: &str, modifiers: Modifiers) {
    s.handle_event(&InputEvent::key(key, modifiers));
}

fn position(map: &MindMap, id: NodeId) -> (f32, f32) {
    let node = map.node(id).unwrap();
    (node.x, node.y)
}

// ─── Links ───────────────────────────────────────────────────────────────

#[test]
fn set_parent_by_clicks_toggles_link() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);
    let b = add_node(&mut s, 700.0, 400.0);

    click(&mut s, 300.0, 400.0);
    key(&mut s, "s", Modifiers::CTRL);
    click(&mut s, 700.0, 400.0);

    assert_eq!(s.map().parents(a).as_slice(), &[b]);
    assert_eq!(s.map().children(b).as_slice(), &[a]);
    assert_eq!(s.map().roots(), &[b]);
    assert_eq!(s.map().selected(), Some(a));

    key(&mut s, "s", Modifiers::CTRL);
    click(&mut s, 700.0, 400.0);
    assert!(s.map().parents(a).is_empty());
    assert!(s.map().children(b).is_empty());
    assert_eq!(s.map().roots().len(), 2);
    assert_eq!(s.map().selected(), Some(a));
}

#[test]
fn clicking_self_in_set_parent_mode_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);

    click(&mut s, 300.0, 400.0);
    key(&mut s, "s", Modifiers::CTRL);
    click(&mut s, 300.0, 400.0);

    assert!(s.map().parents(a).is_empty());
    assert!(!s.controller().is_setting_parent());
}

#[test]
fn delete_key_removes_node_and_its_links() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);
    let b = add_node(&mut s, 700.0, 400.0);
    s.map_mut().add_child_link(a, b);

    click(&mut s, 300.0, 400.0);
    key(&mut s, "Delete", Modifiers::NONE);

    assert!(!s.map().contains(a));
    assert!(s.map().parents(b).is_empty());
    assert_eq!(s.map().roots(), &[b]);
    assert_eq!(s.map().selected(), None);
}

// ─── Dragging ────────────────────────────────────────────────────────────

#[test]
fn ctrl_drag_moves_descendants_rigidly() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 400.0, 400.0);
    let b = add_node(&mut s, 600.0, 400.0);
    let c = add_node(&mut s, 800.0, 500.0);
    s.map_mut().add_child_link(a, b);
    s.map_mut().add_child_link(b, c);

    s.handle_event(&InputEvent::ModifiersChanged(Modifiers::CTRL));
    press(&mut s, 400.0, 400.0, PointerButton::Primary);
    move_to(&mut s, 410.0, 420.0);
    release(&mut s, 410.0, 420.0, PointerButton::Primary);

    assert_eq!(position(s.map(), a), (410.0, 420.0));
    assert_eq!(position(s.map(), b), (610.0, 420.0));
    assert_eq!(position(s.map(), c), (810.0, 520.0));
}

#[test]
fn plain_drag_moves_only_the_node() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 400.0, 400.0);
    let b = add_node(&mut s, 600.0, 400.0);
    s.map_mut().add_child_link(a, b);

    press(&mut s, 405.0, 400.0, PointerButton::Primary);
    move_to(&mut s, 455.0, 380.0);
    move_to(&mut s, 505.0, 360.0);
    release(&mut s, 505.0, 360.0, PointerButton::Primary);
    move_to(&mut s, 900.0, 900.0);

    assert_eq!(position(s.map(), a), (500.0, 360.0));
    assert_eq!(position(s.map(), b), (600.0, 400.0));
}

// ─── View ────────────────────────────────────────────────────────────────

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    s.map_mut().pan = Pan::new(-50.0, 25.0);
    let cursor = (700.0, 300.0);

    let world = |s: &Session| {
        s.controller()
            .viewport
            .screen_to_world(s.map().pan, cursor.0, cursor.1)
    };
    let before = world(&s);
    for _ in 0..3 {
        s.handle_event(&InputEvent::Wheel {
            x: cursor.0,
            y: cursor.1,
            delta: -1.0,
        });
    }
    let after = world(&s);

    assert_eq!(s.controller().viewport.zoom_percent(), 85);
    assert!((before.0 - after.0).abs() < 1e-2);
    assert!((before.1 - after.1).abs() < 1e-2);
}

#[test]
fn right_drag_pans_and_commits() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 300.0);

    press(&mut s, 1000.0, 800.0, PointerButton::Secondary);
    move_to(&mut s, 1100.0, 750.0);
    assert_eq!(s.frame_view().pan, Pan::new(100.0, -50.0));
    assert_eq!(s.map().pan, Pan::default());
    release(&mut s, 1100.0, 750.0, PointerButton::Secondary);

    assert_eq!(s.map().pan, Pan::new(100.0, -50.0));
    // The node now sits 100 right and 50 up on screen.
    click(&mut s, 400.0, 250.0);
    assert_eq!(s.map().selected(), Some(a));
}

// ─── Editing ─────────────────────────────────────────────────────────────

#[test]
fn typing_edits_selected_node_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);

    click(&mut s, 300.0, 400.0);
    key(&mut s, "Backspace", Modifiers::CTRL);
    assert!(s.text_input_active());
    s.handle_event(&InputEvent::Text("Hello".into()));
    key(&mut s, "Backspace", Modifiers::NONE);
    assert_eq!(s.map().node(a).unwrap().text(), "Hell");

    key(&mut s, "Escape", Modifiers::NONE);
    assert!(!s.text_input_active());
    s.handle_event(&InputEvent::Text("!".into()));
    assert_eq!(s.map().node(a).unwrap().text(), "Hell");
}

#[test]
fn slider_sets_one_channel() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);
    s.map_mut().node_mut(a).unwrap().bg_color = Color::rgb(10, 20, 30);

    click(&mut s, 300.0, 400.0);
    // Green column spans (WIDTH-80, WIDTH-60).
    press(&mut s, WIDTH - 70.0, 100.0, PointerButton::Primary);
    move_to(&mut s, WIDTH - 70.0, 75.0);
    release(&mut s, WIDTH - 70.0, 75.0, PointerButton::Primary);

    assert_eq!(s.map().node(a).unwrap().bg_color, Color::rgb(10, 200, 30));
    assert_eq!(s.map().selected(), Some(a));
}

#[test]
fn copy_paste_color_between_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);
    let b = add_node(&mut s, 700.0, 400.0);
    s.map_mut().node_mut(a).unwrap().bg_color = Color::rgb(200, 100, 50);

    click(&mut s, 300.0, 400.0);
    key(&mut s, "a", Modifiers::CTRL);
    click(&mut s, 700.0, 400.0);
    key(&mut s, "z", Modifiers::CTRL);

    assert_eq!(s.map().node(b).unwrap().bg_color, Color::rgb(200, 100, 50));
}

// ─── Files ───────────────────────────────────────────────────────────────

#[test]
fn save_then_load_restores_map_and_resets_zoom() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    let a = add_node(&mut s, 300.0, 400.0);
    let b = add_node(&mut s, 700.0, 400.0);
    s.map_mut().add_child_link(a, b);
    s.map_mut().select(Some(b));
    s.map_mut().pan = Pan::new(12.0, -8.0);

    key(&mut s, "w", Modifiers::CTRL);
    assert!(dir.path().join("map.mind").exists());

    // Diverge from the saved state.
    s.map_mut().remove_node(a);
    s.handle_event(&InputEvent::Wheel {
        x: 0.0,
        y: 0.0,
        delta: -1.0,
    });
    assert_eq!(s.controller().viewport.zoom_percent(), 95);

    key(&mut s, "o", Modifiers::CTRL);

    let map = s.map();
    assert_eq!(map.len(), 2);
    let ids: Vec<NodeId> = map.node_ids().collect();
    assert_eq!(map.children(ids[0]).as_slice(), &[ids[1]]);
    assert_eq!(map.selected(), Some(ids[1]));
    assert_eq!(map.pan, Pan::new(12.0, -8.0));
    assert_eq!(s.controller().viewport.zoom_percent(), 100);
    assert!(map.nodes().all(|(_, n)| !n.is_layout_dirty()));
}

#[test]
fn corrupt_file_leaves_active_map() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("map.mind"), b"MIND\x00garbage").unwrap();
    let mut s = session(dir.path());
    add_node(&mut s, 300.0, 400.0);

    key(&mut s, "o", Modifiers::CTRL);

    assert_eq!(s.map().len(), 1);
    assert!(s.status().is_some());
}

// ─── Frame ───────────────────────────────────────────────────────────────

#[test]
fn paint_refreshes_layouts_and_encodes_scene() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session(dir.path());
    key(&mut s, "n", Modifiers::CTRL);
    let id = s.map().node_ids().next().unwrap();
    assert!(s.map().node(id).unwrap().is_layout_dirty());

    let mut canvas = SceneCanvas::new();
    s.paint(&mut canvas);

    assert!(!s.map().node(id).unwrap().is_layout_dirty());
    assert!(s.map().node(id).unwrap().radius() > 0.0);
    assert!(canvas.shape_count() > 0);
}
