use super::*;

const BOXES: [(f64, f64); 5] = [
    (200.0, 100.0),
    (100.0, 200.0),
    (640.0, 480.0),
    (1.0, 1.0),
    (333.3, 77.7),
];
const NATURALS: [(f64, f64); 5] = [
    (50.0, 50.0),
    (500.0, 500.0),
    (1920.0, 1080.0),
    (3.0, 7.0),
    (64.0, 640.0),
];

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn contain_fits_inside_and_touches_one_axis() {
    for (tw, th) in BOXES {
        for (nw, nh) in NATURALS {
            let s = resolve(tw, th, nw, nh, FitMode::Contain);
            assert!(s.is_uniform());
            let (w, h) = s.applied_to(nw, nh);
            assert!(w <= tw + 1e-9 && h <= th + 1e-9);
            assert!(close(w, tw) || close(h, th));
        }
    }
}

#[test]
fn fill_covers_and_touches_one_axis() {
    for (tw, th) in BOXES {
        for (nw, nh) in NATURALS {
            let s = resolve(tw, th, nw, nh, FitMode::Fill);
            assert!(s.is_uniform());
            let (w, h) = s.applied_to(nw, nh);
            assert!(w >= tw - 1e-9 && h >= th - 1e-9);
            assert!(close(w, tw) || close(h, th));
        }
    }
}

#[test]
fn stretch_is_exact_per_axis() {
    for (tw, th) in BOXES {
        for (nw, nh) in NATURALS {
            let s = resolve(tw, th, nw, nh, FitMode::Stretch);
            assert_eq!(s.x, tw / nw);
            assert_eq!(s.y, th / nh);
        }
    }
}

#[test]
fn center_is_contain_clamped_to_one() {
    for (tw, th) in BOXES {
        for (nw, nh) in NATURALS {
            let contain = resolve(tw, th, nw, nh, FitMode::Contain);
            let s = resolve(tw, th, nw, nh, FitMode::Center);
            assert!(s.is_uniform());
            assert_eq!(s.x, contain.x.min(1.0));
        }
    }
}

#[test]
fn contain_scenario_small_image_in_wide_box() {
    let s = resolve(200.0, 100.0, 50.0, 50.0, FitMode::Contain);
    assert_eq!(s, FitScale::uniform(2.0));
    assert_eq!(s.applied_to(50.0, 50.0), (100.0, 100.0));
}

#[test]
fn fill_scenario_small_image_in_wide_box() {
    let s = resolve(200.0, 100.0, 50.0, 50.0, FitMode::Fill);
    assert_eq!(s, FitScale::uniform(4.0));
    assert_eq!(s.applied_to(50.0, 50.0), (200.0, 200.0));
}

#[test]
fn center_scenario_shrinks_large_image() {
    let s = resolve(200.0, 100.0, 500.0, 500.0, FitMode::Center);
    assert!(close(s.x, 0.2));
    assert!(s.is_uniform());
}

#[test]
fn center_never_upscales() {
    let s = resolve(2000.0, 1000.0, 50.0, 50.0, FitMode::Center);
    assert_eq!(s, FitScale::uniform(1.0));
}

#[test]
fn equal_ratios_agree_across_uniform_modes() {
    let c = resolve(100.0, 50.0, 20.0, 10.0, FitMode::Contain);
    let f = resolve(100.0, 50.0, 20.0, 10.0, FitMode::Fill);
    assert_eq!(c, f);
    assert_eq!(c, FitScale::uniform(5.0));
}

#[test]
fn degenerate_natural_size_is_zero_not_nan() {
    for mode in FitMode::ALL {
        let s = resolve(200.0, 100.0, 0.0, 50.0, mode);
        assert!(s.x.is_finite() && s.y.is_finite());
        if mode != FitMode::Stretch {
            assert_eq!(s, FitScale::ZERO);
        }
    }
    let s = resolve(200.0, 100.0, 0.0, 0.0, FitMode::Stretch);
    assert_eq!(s, FitScale::ZERO);
}

#[test]
fn zero_box_yields_zero_scale() {
    for mode in FitMode::ALL {
        let s = resolve(0.0, 0.0, 50.0, 50.0, mode);
        assert_eq!(s.x, 0.0);
        assert_eq!(s.y, 0.0);
    }
}

#[test]
fn mirrored_box_keeps_sign_per_axis() {
    let mirrored = resolve(-200.0, 100.0, 50.0, 50.0, FitMode::Contain);
    assert_eq!(mirrored, FitScale { x: -2.0, y: 2.0 });
    assert!(mirrored.is_uniform());

    let both = resolve(-200.0, -100.0, 50.0, 50.0, FitMode::Fill);
    assert_eq!(both, FitScale::uniform(-4.0));

    let center = resolve(200.0, -100.0, 500.0, 500.0, FitMode::Center);
    assert_eq!(center, FitScale { x: 0.2, y: -0.2 });

    let stretched = resolve(-200.0, 100.0, 50.0, 50.0, FitMode::Stretch);
    assert_eq!(stretched, FitScale { x: -4.0, y: 2.0 });
}

#[test]
fn non_finite_target_is_zero() {
    let s = resolve(f64::INFINITY, 100.0, 50.0, 50.0, FitMode::Stretch);
    assert_eq!(s.x, 0.0);
    assert_eq!(s.y, 2.0);
}
