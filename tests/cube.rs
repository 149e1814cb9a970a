use heat_conduction_toolbox::cube::{
    Position, ProximityCube, TemperatureHistory, CUBE_AMBIENT_C, CUBE_MAX_C,
};
use heat_conduction_toolbox::material_db::find_preset;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label}: actual={actual}, expected={expected}, diff={diff}, tol={tol}"
    );
}

#[test]
fn heats_near_source() {
    let mut cube = ProximityCube::new();
    for _ in 0..10 {
        cube.update(1.0);
    }
    assert_close("t", cube.temperature(), 22.0, 1e-9);
}

#[test]
fn cools_but_not_below_ambient() {
    let mut cube = ProximityCube::new();
    cube.update(0.5);
    for _ in 0..100 {
        cube.update(5.0);
    }
    assert_close("t", cube.temperature(), CUBE_AMBIENT_C, 0.0);
}

#[test]
fn heating_is_capped() {
    let mut cube = ProximityCube::new();
    cube.select_preset(find_preset("metal").unwrap());
    for _ in 0..6000 {
        cube.update(0.0);
    }
    assert_close("t", cube.temperature(), CUBE_MAX_C, 0.0);
}

#[test]
fn boundary_distance_counts_as_far() {
    let mut cube = ProximityCube::new();
    cube.update(2.0);
    assert_close("t", cube.temperature(), CUBE_AMBIENT_C, 0.0);
}

#[test]
fn preset_sets_rates() {
    let mut cube = ProximityCube::new();
    cube.select_preset(find_preset("Wood").unwrap());
    assert_close("heat", cube.heating_rate(), 0.00013, 1e-12);
    assert_close("cool", cube.cooling_rate(), 0.006, 1e-12);

    // 밀도가 없는 프리셋은 냉각 속도를 유지
    cube.select_preset(find_preset("material-2").unwrap());
    assert_close("heat", cube.heating_rate(), 0.0003, 1e-12);
    assert_close("cool", cube.cooling_rate(), 0.006, 1e-12);
}

#[test]
fn history_window_covers_last_hundred_seconds() {
    let mut cube = ProximityCube::new();
    for _ in 0..150 {
        cube.update(1.0);
    }
    assert_eq!(cube.history().len(), 150);
    let window: Vec<(f64, f64)> = cube.history().visible_window().copied().collect();
    assert_eq!(window.len(), 101);
    assert_close("first", window[0].0, 50.0, 1e-9);
    assert_close("last", window[100].0, 150.0, 1e-9);
}

#[test]
fn history_drops_oldest_at_capacity() {
    let mut history = TemperatureHistory::with_capacity(3);
    for i in 0..5 {
        history.push(i as f64, 20.0 + i as f64);
    }
    let kept: Vec<(f64, f64)> = history.samples().copied().collect();
    assert_eq!(kept, vec![(2.0, 22.0), (3.0, 23.0), (4.0, 24.0)]);
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.visible_window().count(), 0);
}

#[test]
fn reset_returns_to_ambient() {
    let mut cube = ProximityCube::new();
    for _ in 0..20 {
        cube.update(0.1);
    }
    cube.reset();
    assert_close("t", cube.temperature(), CUBE_AMBIENT_C, 0.0);
    assert!(cube.history().is_empty());
}

#[test]
fn position_distance() {
    let source = Position::new(0.0, 0.0, 0.0);
    let near = Position::new(1.0, 1.0, 0.0);
    assert_close("d", Position::new(3.0, 4.0, 0.0).distance_to(&source), 5.0, 1e-12);

    let mut cube = ProximityCube::new();
    cube.update_at(&near, &source);
    assert!(cube.temperature() > CUBE_AMBIENT_C);
}

#[test]
fn full_history_keeps_window_at_the_tail() {
    let mut history = TemperatureHistory::with_capacity(150);
    for i in 1..=400 {
        history.push(i as f64, 20.0);
    }
    assert_eq!(history.len(), 150);
    assert_eq!(history.samples().next(), Some(&(251.0, 20.0)));
    let window: Vec<f64> = history.visible_window().map(|(t, _)| *t).collect();
    assert_eq!(window.len(), 101);
    assert_eq!(window.first(), Some(&300.0));
    assert_eq!(window.last(), Some(&400.0));
}

#[test]
fn preset_lookup_ignores_case() {
    let glass = find_preset("GLASS").unwrap();
    assert_eq!(glass.code, "glass");
    assert_eq!(glass.density, Some(2.5));
    assert_eq!(find_preset(" Material 3 ").unwrap().conductivity, 0.7);
    assert!(find_preset("granite").is_none());
}
