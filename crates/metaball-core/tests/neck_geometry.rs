use kurbo::{PathEl, Point, Shape};
use metaball_core::{connect, Circle, Color, EngineParameters, MetaballEngine};

fn circle(x: f64, y: f64, r: f64) -> Circle {
    Circle::new((x, y), r, Color::default())
}

fn path_points(path: &kurbo::BezPath) -> Vec<Point> {
    let mut out = Vec::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => out.push(p),
            PathEl::QuadTo(p1, p2) => out.extend([p1, p2]),
            PathEl::CurveTo(p1, p2, p3) => out.extend([p1, p2, p3]),
            PathEl::ClosePath => {}
        }
    }
    out
}

fn contains_point(set: &[Point], p: Point) -> bool {
    set.iter().any(|q| q.distance(p) < 1e-9)
}

#[test]
fn test_beyond_threshold_has_no_connector() {
    let params = EngineParameters::new(50.0, 0.5, 0.6);
    let a = circle(0.0, 0.0, 10.0);
    let b = circle(50.5, 0.0, 10.0);
    assert!(connect(&params, &a, &b).is_none());

    let mut engine = MetaballEngine::new(params, Color::default());
    assert!(engine.push(&a, &b).is_none());
    assert_eq!(engine.draw(&a).connectors, 0);
}

#[test]
fn test_coincident_centers_have_no_connector() {
    let params = EngineParameters::default();
    let a = circle(12.0, 12.0, 10.0);
    let b = circle(12.0, 12.0, 4.0);
    assert!(connect(&params, &a, &b).is_none());

    let mut engine = MetaballEngine::new(params, Color::default());
    assert!(engine.push(&a, &b).is_none());
    let shape = engine.draw(&a);
    assert!(path_points(&shape.path).iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn test_reversed_pair_is_congruent() {
    let params = EngineParameters::new(120.0, 0.7, 0.55);
    let a = circle(10.0, 20.0, 18.0);
    let b = circle(70.0, 55.0, 12.0);

    let ab = connect(&params, &a, &b).unwrap();
    let ba = connect(&params, &b, &a).unwrap();

    assert!((ab.spread - ba.spread).abs() < 1e-12);

    let ab_anchors: Vec<Point> = ab.anchors_a.iter().chain(&ab.anchors_b).copied().collect();
    for p in ba.anchors_a.iter().chain(&ba.anchors_b) {
        assert!(contains_point(&ab_anchors, *p), "anchor {:?} missing from reversed pair", p);
    }
    for w in ba.waists {
        assert!(contains_point(&ab.waists, w), "waist {:?} missing from reversed pair", w);
    }

    let area_ab = ab.path.area();
    let area_ba = ba.path.area();
    assert!(
        (area_ab - area_ba).abs() < 1e-3 * area_ab.abs(),
        "areas differ: {} vs {}",
        area_ab,
        area_ba
    );

    let bb_ab = ab.path.bounding_box();
    let bb_ba = ba.path.bounding_box();
    assert!((bb_ab.x0 - bb_ba.x0).abs() < 0.1 && (bb_ab.y1 - bb_ba.y1).abs() < 0.1);
}

#[test]
fn test_spread_shrinks_with_distance() {
    let params = EngineParameters::new(100.0, 0.8, 0.65);
    let a = circle(0.0, 0.0, 15.0);

    let mut previous = f64::INFINITY;
    for step in 1..=100 {
        let d = step as f64;
        let b = circle(d, 0.0, 15.0);
        let c = connect(&params, &a, &b).expect("within threshold");
        assert!(c.spread <= previous, "spread grew at d = {}", d);
        previous = c.spread;
    }
    assert_eq!(previous, 0.0, "spread must reach zero at the threshold");
}

#[test]
fn test_threshold_distance_gives_zero_width_neck() {
    let params = EngineParameters::new(60.0, 0.5, 0.65);
    let a = circle(0.0, 0.0, 20.0);
    let b = circle(0.0, 60.0, 20.0);

    let c = connect(&params, &a, &b).expect("distance equal to the threshold still connects");
    assert_eq!(c.spread, 0.0);
    assert!(c.anchors_a[0].distance(c.anchors_a[1]) < 1e-9);
    assert!(c.anchors_b[0].distance(c.anchors_b[1]) < 1e-9);
    assert!(c.anchors_a[0].distance(Point::new(0.0, 20.0)) < 1e-9);
    assert!(c.anchors_b[0].distance(Point::new(0.0, 40.0)) < 1e-9);

    for p in path_points(&c.path) {
        assert!(p.x.is_finite() && p.y.is_finite(), "non-finite point {:?}", p);
    }
    let two_disks = std::f64::consts::PI * (400.0 + 400.0);
    assert!((c.path.area() - two_disks).abs() < 5.0);
}

#[test]
fn test_viscosity_thickens_the_neck() {
    let a = circle(0.0, 0.0, 20.0);
    let b = circle(50.0, 0.0, 20.0);

    let mut previous = -1.0;
    let mut previous_area = 0.0;
    for v in [0.05, 0.25, 0.5, 0.75, 1.0] {
        let params = EngineParameters::new(80.0, 0.6, v);
        let c = connect(&params, &a, &b).unwrap();
        let height = c.waists[0].y.abs();
        assert!(height >= previous, "waist thinned at viscosity {}", v);
        let area = c.path.area();
        assert!(area >= previous_area - 1e-6, "outline shrank at viscosity {}", v);
        previous = height;
        previous_area = area;
    }

    // Full viscosity keeps the waist on the straight anchor line.
    let params = EngineParameters::new(80.0, 0.6, 1.0);
    let c = connect(&params, &a, &b).unwrap();
    let mid = c.anchors_a[0].midpoint(c.anchors_b[0]);
    assert!(c.waists[0].distance(mid) < 1e-9);
}

#[test]
fn test_draw_is_idempotent() {
    let mut engine = MetaballEngine::default();
    let base = circle(100.0, 100.0, 28.0);
    let c0 = circle(100.0, 45.0, 20.0);
    let c1 = circle(100.0, -10.0, 20.0);

    engine.clear();
    engine.push(&base, &c0);
    engine.push(&c0, &c1);

    let first = engine.draw(&base);
    let second = engine.draw(&base);
    assert_eq!(first, second);
    assert_eq!(first.connectors, 2);
    assert_eq!(engine.pairs().len(), 2);
}

#[test]
fn test_composite_contains_base_disk() {
    let engine = MetaballEngine::default();
    let base = circle(40.0, 40.0, 10.0);
    let shape = engine.draw(&base);
    assert_eq!(shape.connectors, 0);

    let bb = shape.bounding_box();
    assert!((bb.width() - 20.0).abs() < 0.5);
    assert!((shape.path.area() - std::f64::consts::PI * 100.0).abs() < 1.0);
}
