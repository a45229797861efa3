//! Tests for histogram and scatter series

use cardash::pipeline::{apply, FilterDomain, FilterSpec, NumericRange, Selection};
use cardash::report::{scatter_points, ChartPayload, Histogram};
use std::collections::BTreeSet;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_histogram_from_filtered_frame() {
    let dataset = load_vehicles();
    let spec = FilterSpec::ranges(
        NumericRange::new(5000.0, 30000.0),
        NumericRange::new(2010.0, 2019.0),
    );
    let (filtered, _) = apply(&dataset, &spec).unwrap();

    let histogram = Histogram::from_frame(&filtered, dataset.mapping(), 5).unwrap();

    assert_eq!(histogram.values, vec![5000.0, 30000.0, 15000.0, 8000.0]);
    assert_eq!(histogram.bins.iter().map(|b| b.count).sum::<usize>(), 4);
}

#[test]
fn test_scatter_points_vehicles() {
    let dataset = load_vehicles();

    let points = scatter_points(dataset.frame(), dataset.mapping()).unwrap();

    assert_eq!(points.len(), 6);
    let first = &points[0];
    assert_eq!(first.x, 2010.0);
    assert_eq!(first.y, 5000.0);
    assert_eq!(first.color, "ford");
    assert_eq!(first.tooltip.label, "f-150");
    assert!(first.tooltip.category.is_none(), "Vehicles tooltip has no category");
}

#[test]
fn test_scatter_tooltip_includes_fuel_for_car_details() {
    let dataset = load_car_details();

    let points = scatter_points(dataset.frame(), dataset.mapping()).unwrap();

    assert_eq!(points.len(), 4);
    assert_eq!(points[2].tooltip.label, "Honda City 2017-2020 EXi");
    assert_eq!(points[2].tooltip.category.as_deref(), Some("Petrol"));
    assert_eq!(points[2].color, "Petrol");
    assert_eq!(points[2].x, 2006.0);
    assert_eq!(points[2].y, 158000.0);
}

#[test]
fn test_chart_payload_json() {
    let dataset = load_car_details();
    let selection = FilterDomain::from_dataset(&dataset).unwrap().default_selection();
    let (filtered, metrics) = apply(&dataset, &selection.to_spec(&dataset)).unwrap();

    let payload = ChartPayload::build(
        &filtered,
        dataset.mapping(),
        &metrics,
        &selection,
        "car_details.csv",
        10,
    )
    .unwrap();
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("charts.json");
    payload.write_json(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["metadata"]["input_file"], "car_details.csv");
    assert_eq!(json["metadata"]["columns"]["price"], "selling_price");
    assert_eq!(json["metrics"]["count"], 4);
    assert_eq!(json["scatter"].as_array().unwrap().len(), 4);
    assert_eq!(json["scatter"][0]["tooltip"]["category"], "Diesel");
    // The default 5000-30000 range lies outside the data, so the full bounds apply
    assert_eq!(json["metadata"]["filters"]["price"]["low"], 158000.0);
    assert_eq!(json["metadata"]["filters"]["price"]["high"], 450000.0);
    assert_eq!(
        json["metadata"]["filters"]["categories"],
        serde_json::json!(["Diesel", "Petrol"])
    );
}

#[test]
fn test_empty_payload_serializes_undefined_metrics() {
    let dataset = load_vehicles();
    let selection = Selection {
        price: NumericRange::new(1.0, 0.0),
        year: NumericRange::new(0.0, 3000.0),
        categories: BTreeSet::new(),
        labels: BTreeSet::new(),
    };
    let (filtered, metrics) = apply(&dataset, &selection.to_spec(&dataset)).unwrap();

    let payload =
        ChartPayload::build(&filtered, dataset.mapping(), &metrics, &selection, "x.csv", 30).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["metrics"]["count"], 0);
    assert!(json["metrics"]["mean_price"].is_null());
    assert!(json["metrics"]["top_category"].is_null());
    assert!(json["histogram"]["bins"].as_array().unwrap().is_empty());
    assert!(json["scatter"].as_array().unwrap().is_empty());
    assert!(json["metadata"]["filters"]["labels"].as_array().unwrap().is_empty());
}
