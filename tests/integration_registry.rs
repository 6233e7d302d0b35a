use std::collections::HashSet;

use toolwin::constants::BASE_Z_INDEX;
use toolwin::content::WindowContent;
use toolwin::window::{FloatRect, WindowId, WindowPatch, WindowRegistry, WindowSpec};

fn spec(title: &str, x: i32, y: i32) -> WindowSpec {
    WindowSpec::new(
        title,
        WindowContent::Text(format!("{title} body")),
        FloatRect::new(x, y, 200, 150),
    )
}

#[test]
fn ids_are_unique_and_z_strictly_increases() {
    let registry = WindowRegistry::new();
    let mut seen = HashSet::new();
    let mut last_z = None;
    for i in 0..50 {
        let id = registry.open_window(spec("w", i, i));
        assert!(seen.insert(id), "duplicate id {id}");
        let z = registry.get(id).unwrap().z_index();
        if let Some(prev) = last_z {
            assert!(z > prev);
        } else {
            assert_eq!(z, BASE_Z_INDEX);
        }
        last_z = Some(z);
    }
    // closing never frees an id for reuse
    let ids: Vec<WindowId> = registry.windows().iter().map(|w| w.id()).collect();
    for id in &ids[..10] {
        registry.close_window(*id);
    }
    let fresh = registry.open_window(spec("fresh", 0, 0));
    assert!(!seen.contains(&fresh));
}

#[test]
fn bring_to_front_always_wins() {
    let registry = WindowRegistry::new();
    let ids: Vec<WindowId> = (0..6).map(|i| registry.open_window(spec("w", i, 0))).collect();
    for &id in ids.iter().step_by(2).chain(ids.iter().rev()) {
        registry.bring_to_front(id);
        let max = registry.windows().iter().map(|w| w.z_index()).max().unwrap();
        assert_eq!(registry.get(id).unwrap().z_index(), max);
    }
}

#[test]
fn close_then_update_is_a_no_op() {
    let registry = WindowRegistry::new();
    let a = registry.open_window(spec("a", 0, 0));
    let b = registry.open_window(spec("b", 10, 10));
    let before = registry.len();
    registry.close_window(a);
    assert_eq!(registry.len(), before - 1);

    let snapshot = registry.windows();
    registry.update_window(a, WindowPatch::new().title("ghost").position(99, 99));
    registry.minimize_window(a);
    registry.maximize_window(a);
    registry.bring_to_front(a);
    registry.close_window(a);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.windows()[0].id(), b);
    assert_eq!(registry.windows()[0].geometry(), snapshot[0].geometry());
    assert_eq!(registry.windows()[0].z_index(), snapshot[0].z_index());
}

#[test]
fn minimize_twice_restores_state_and_geometry() {
    let registry = WindowRegistry::new();
    let id = registry.open_window(spec("a", 40, 60));
    let before = registry.get(id).unwrap();
    registry.minimize_window(id);
    registry.minimize_window(id);
    let after = registry.get(id).unwrap();
    assert!(!after.is_minimized());
    assert_eq!(after.geometry(), before.geometry());
    assert_eq!(after.z_index(), before.z_index());
}

#[test]
fn windows_can_open_minimized() {
    let registry = WindowRegistry::new();
    let hidden = registry.open_window(spec("hidden", 0, 0).minimized(true));
    let shown = registry.open_window(spec("shown", 0, 0));
    assert_eq!(registry.topmost(), Some(shown));
    registry.close_window(shown);
    assert_eq!(registry.topmost(), None);
    assert!(registry.contains(hidden));
}
