//! 펌프 적합성 판정과 출력 순 정렬.
use std::collections::HashSet;

use solar_pump_selector::catalog::{Catalog, PowerRating, Pump};
use solar_pump_selector::curve::CurvePoint;
use solar_pump_selector::operating_point::OperatingPoint;
use solar_pump_selector::selection::select;

fn pump(model: &str, power: &str, raw: &[(f64, f64)]) -> Pump {
    let curve: Vec<CurvePoint> = raw.iter().map(|&(q, h)| CurvePoint::new(q, h)).collect();
    Pump::new(model, PowerRating::parse(power).unwrap(), &curve)
}

fn point(flow: f64, head: f64) -> OperatingPoint {
    OperatingPoint {
        flow_m3_per_h: flow,
        head_m: head,
    }
}

#[test]
fn end_to_end_two_pumps() {
    let catalog = vec![
        pump("A", "0.5", &[(0.0, 40.0), (10.0, 0.0)]),
        pump("B", "1.0", &[(0.0, 60.0), (10.0, 20.0)]),
    ];
    let res = select(&point(5.0, 30.0), &catalog);
    let rec = res.recommended.as_ref().expect("B is compatible");
    assert_eq!(rec.model, "B");
    assert!((rec.head_at_flow - 40.0).abs() < 1e-12);
    assert_eq!(res.compatible.len(), 1);
    assert_eq!(res.incompatible.len(), 1);
    assert_eq!(res.incompatible[0].model, "A");
}

#[test]
fn exact_head_is_compatible() {
    let catalog = vec![pump("A", "1 cv", &[(0.0, 40.0), (10.0, 0.0)])];
    let res = select(&point(5.0, 20.0), &catalog);
    assert_eq!(res.compatible.len(), 1);
}

#[test]
fn ranked_by_power_magnitude_not_catalog_order() {
    let flat = [(0.0, 100.0), (10.0, 100.0)];
    let catalog = vec![
        pump("big", "3 cv", &flat),
        pump("small", "0,5 cv", &flat),
        pump("mid", "1.5 hp", &flat),
    ];
    let res = select(&point(2.0, 50.0), &catalog);
    let order: Vec<&str> = res.compatible.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(order, ["small", "mid", "big"]);
    assert_eq!(res.recommended.unwrap().model, "small");
}

#[test]
fn power_ties_keep_catalog_order() {
    let flat = [(0.0, 100.0), (10.0, 100.0)];
    let catalog = vec![
        pump("first", "1 cv", &flat),
        pump("cheap", "0.5 cv", &flat),
        pump("second", "1 cv", &flat),
        pump("third", "1.0 cv", &flat),
    ];
    let res = select(&point(1.0, 10.0), &catalog);
    let order: Vec<&str> = res.compatible.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(order, ["cheap", "first", "second", "third"]);
}

#[test]
fn negative_zero_power_ties_with_zero() {
    let flat = [(0.0, 100.0), (10.0, 100.0)];
    let catalog = vec![pump("first", "0 cv", &flat), pump("second", "-0 cv", &flat)];
    let res = select(&point(1.0, 10.0), &catalog);
    let order: Vec<&str> = res.compatible.iter().map(|p| p.model.as_str()).collect();
    assert_eq!(order, ["first", "second"]);
}

#[test]
fn nothing_compatible_means_no_recommendation() {
    let catalog = vec![
        pump("A", "0.5", &[(0.0, 40.0), (10.0, 0.0)]),
        pump("B", "1.0", &[(0.0, 60.0), (10.0, 20.0)]),
    ];
    let res = select(&point(5.0, 500.0), &catalog);
    assert!(res.recommended.is_none());
    assert!(res.compatible.is_empty());
    assert_eq!(res.incompatible.len(), 2);
    assert_eq!(res.recommended_label(), None);
}

#[test]
fn recommended_label_joins_model_and_power() {
    let catalog = vec![pump("SP 3-40", "0.5 cv", &[(0.0, 60.0), (4.0, 14.0)])];
    let res = select(&point(1.0, 10.0), &catalog);
    assert_eq!(res.recommended_label().as_deref(), Some("SP 3-40, 0.5 cv"));
}

#[test]
fn empty_curve_pump_lands_in_incompatible() {
    let mut broken = pump("broken", "0.1 cv", &[(0.0, 10.0)]);
    broken.curve.clear();
    let catalog = vec![broken, pump("ok", "1 cv", &[(0.0, 50.0), (5.0, 40.0)])];
    let res = select(&point(1.0, 10.0), &catalog);
    assert_eq!(res.recommended.unwrap().model, "ok");
    assert_eq!(res.incompatible.len(), 1);
    assert_eq!(res.incompatible[0].model, "broken");
}

#[test]
fn partition_and_ranking_hold_on_sample_catalog() {
    let catalog = Catalog::from_json(include_str!("../data/bombas.json")).unwrap();
    for flow in [0.0, 0.5, 1.0, 2.5, 4.0, 6.0, 9.5, 13.0] {
        for head in [0.0, 15.0, 40.0, 80.0, 130.0, 199.0, 260.0] {
            let res = select(&point(flow, head), &catalog.pumps);
            assert_eq!(res.compatible.len() + res.incompatible.len(), catalog.len());

            let compat: HashSet<&str> = res.compatible.iter().map(|p| p.model.as_str()).collect();
            let incompat: HashSet<&str> =
                res.incompatible.iter().map(|p| p.model.as_str()).collect();
            assert!(compat.is_disjoint(&incompat));

            assert!(res
                .compatible
                .windows(2)
                .all(|w| w[0].power.magnitude <= w[1].power.magnitude));
            assert_eq!(res.recommended.as_ref(), res.compatible.first());
            assert!(res.compatible.iter().all(|p| p.head_at_flow >= head));
        }
    }
}

#[test]
fn catalog_is_not_mutated() {
    let catalog = vec![
        pump("A", "0.5", &[(0.0, 40.0), (10.0, 0.0)]),
        pump("B", "1.0", &[(0.0, 60.0), (10.0, 20.0)]),
    ];
    let before = catalog.clone();
    select(&point(5.0, 30.0), &catalog);
    assert_eq!(catalog, before);
}
