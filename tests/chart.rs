//! 렌더러로 넘기는 차트 데이터.
use solar_pump_selector::catalog::Catalog;
use solar_pump_selector::chart::{ChartData, ChartHandle, MAX_TICKS, PALETTE};
use solar_pump_selector::operating_point::OperatingPoint;

fn sample() -> Catalog {
    Catalog::from_json(include_str!("../data/bombas.json")).unwrap()
}

#[test]
fn one_series_per_pump_with_highlight() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 2.0,
        head_m: 70.0,
    };
    let data = ChartData::build(&point, &c.pumps, Some("SP 3-80"));
    assert_eq!(data.series.len(), c.len());
    let highlighted: Vec<&str> = data
        .series
        .iter()
        .filter(|s| s.highlighted)
        .map(|s| s.model.as_str())
        .collect();
    assert_eq!(highlighted, ["SP 3-80"]);
    assert_eq!(data.series[1].label, "SP 3-80 (1 cv)");
    assert_eq!(data.series[0].points[0], (0.0, 60.0));
    assert!(data.series.iter().all(|s| s.palette_index < PALETTE.len()));
}

#[test]
fn marker_and_guides_meet_at_operating_point() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 3.5,
        head_m: 42.0,
    };
    let data = ChartData::build(&point, &c.pumps, None);
    assert_eq!(data.operating_point, (3.5, 42.0));
    assert_eq!(data.guides[0], [(0.0, 42.0), (3.5, 42.0)]);
    assert_eq!(data.guides[1], [(3.5, 0.0), (3.5, 42.0)]);
    assert!(data.series.iter().all(|s| !s.highlighted));
}

#[test]
fn axes_keep_defaults_and_grow_with_data() {
    let c = sample();
    let small = OperatingPoint {
        flow_m3_per_h: 1.0,
        head_m: 10.0,
    };
    let data = ChartData::build(&small, &c.pumps, None);
    assert_eq!(data.x_axis.max, 12.0);
    assert_eq!(data.y_axis.max, 250.0);

    let big = OperatingPoint {
        flow_m3_per_h: 14.2,
        head_m: 301.0,
    };
    let data = ChartData::build(&big, &c.pumps, None);
    assert_eq!(data.x_axis.max, 15.0);
    assert_eq!(data.y_axis.max, 350.0);
}

#[test]
fn huge_flow_keeps_tick_count_bounded() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 1e9,
        head_m: 10.0,
    };
    let data = ChartData::build(&point, &c.pumps, None);
    assert!(data.x_axis.max >= 1e9);
    assert!(data.x_axis.max / data.x_axis.step <= MAX_TICKS as f64);
    assert_eq!(data.x_axis.step, 5e7);
    assert_eq!(data.x_axis.max, 1e9);

    let ticks: Vec<f64> = data.x_axis.ticks().collect();
    assert_eq!(ticks.len(), MAX_TICKS + 1);
    assert_eq!(ticks[0], 0.0);
    assert_eq!(*ticks.last().unwrap(), 1e9);
    assert!(data.y_axis.ticks().count() <= MAX_TICKS + 1);
}

#[test]
fn moderate_flow_widens_step_to_a_round_value() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 33.0,
        head_m: 1200.0,
    };
    let data = ChartData::build(&point, &c.pumps, None);
    assert_eq!(data.x_axis.step, 2.0);
    assert_eq!(data.x_axis.max, 34.0);
    assert_eq!(data.y_axis.step, 100.0);
    assert_eq!(data.y_axis.max, 1200.0);
}

#[test]
fn handle_replacement_bumps_revision() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 1.0,
        head_m: 10.0,
    };
    let first = ChartHandle::replace(None, ChartData::build(&point, &c.pumps, None));
    assert_eq!(first.revision, 0);
    let second = ChartHandle::replace(Some(first), ChartData::build(&point, &c.pumps, None));
    assert_eq!(second.revision, 1);
}

#[test]
fn chart_data_serializes_for_export() {
    let c = sample();
    let point = OperatingPoint {
        flow_m3_per_h: 1.0,
        head_m: 10.0,
    };
    let data = ChartData::build(&point, &c.pumps, Some("SP 3-40"));
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["series"].as_array().unwrap().len(), 6);
    assert_eq!(json["series"][0]["highlighted"], true);
}
