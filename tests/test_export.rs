//! Tests for the CSV download

use cardash::pipeline::{apply, read_frame, FilterSpec, NumericRange, SchemaProfile};
use cardash::report::{to_csv_bytes, CsvDownload, CSV_CONTENT_TYPE};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn default_spec() -> FilterSpec {
    FilterSpec::ranges(
        NumericRange::new(5000.0, 30000.0),
        NumericRange::new(2010.0, 2019.0),
    )
}

#[test]
fn test_export_round_trip() {
    let dataset = load_vehicles();
    let (filtered, _) = apply(&dataset, &default_spec()).unwrap();

    let download = CsvDownload::from_frame(&filtered, dataset.mapping()).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = download.save(temp_dir.path()).unwrap();
    let reloaded = read_frame(&path, 100).unwrap();

    assert_eq!(reloaded.get_column_names(), filtered.get_column_names());
    assert!(
        reloaded.equals_missing(&filtered),
        "Re-loaded export should match the filtered rows:\n{}\nvs\n{}",
        reloaded,
        filtered
    );
}

#[test]
fn test_export_has_header_and_no_index() {
    let dataset = load_vehicles();
    let (filtered, _) = apply(&dataset, &default_spec()).unwrap();

    let bytes = to_csv_bytes(&filtered).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("price,model_year,model,manufacturer,fuel,odometer")
    );
    assert_eq!(lines.next(), Some("5000,2010,f-150,ford,gas,120000"));
    assert_eq!(text.lines().count(), 1 + filtered.height());
}

#[test]
fn test_empty_export_is_header_only() {
    let dataset = load_vehicles();
    let spec = FilterSpec::ranges(NumericRange::new(1.0, 0.0), NumericRange::new(2010.0, 2019.0));
    let (filtered, _) = apply(&dataset, &spec).unwrap();

    let text = String::from_utf8(to_csv_bytes(&filtered).unwrap()).unwrap();

    assert_eq!(text.trim_end(), "price,model_year,model,manufacturer,fuel,odometer");
}

#[test]
fn test_download_file_name_and_content_type() {
    let vehicles = load_vehicles();
    let cars = load_car_details();

    let a = CsvDownload::from_frame(vehicles.frame(), vehicles.mapping()).unwrap();
    let b = CsvDownload::from_frame(cars.frame(), cars.mapping()).unwrap();

    assert_eq!(a.file_name, "filtered_vehicles.csv");
    assert_eq!(b.file_name, SchemaProfile::CarDetails.mapping().export_file_name);
    assert_eq!(a.content_type, CSV_CONTENT_TYPE);
    assert_eq!(CSV_CONTENT_TYPE, "text/csv");
}

#[test]
fn test_save_to_explicit_file_path() {
    let dataset = load_vehicles();
    let download = CsvDownload::from_frame(dataset.frame(), dataset.mapping()).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("custom.csv");

    let written = download.save(&target).unwrap();

    assert_eq!(written, target);
    assert_eq!(std::fs::read(&target).unwrap(), download.bytes);
}
