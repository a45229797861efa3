//! Shared test utilities and fixture generators

#![allow(dead_code)]

use cardash::pipeline::{load_dataset, ColumnMapping, Dataset, SchemaProfile};
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Vehicle adverts with known characteristics:
/// - prices sit exactly on and just outside the 5000-30000 default range
/// - the `accord` row has no model_year and is dropped on load
/// - the `corolla` row has no odometer (not required) and is kept
/// - ford and toyota tie inside the default range; ford appears first
pub const VEHICLES_CSV: &str = "\
price,model_year,model,manufacturer,fuel,odometer
5000,2010,f-150,ford,gas,120000
30000,2018,camry,toyota,gas,20000
4999,2012,civic,honda,gas,90000
30001,2019,f-150,ford,diesel,10000
15000,2015,corolla,toyota,gas,
12000,,accord,honda,gas,60000
8000,2011,focus,ford,gas,110000
";

/// Car details listings for the second schema profile
pub const CAR_DETAILS_CSV: &str = "\
name,year,selling_price,km_driven,fuel,seller_type
Maruti Swift Dzire VDI,2014,450000,145500,Diesel,Individual
Hyundai Verna 1.6 SX,2012,225000,127000,Diesel,Individual
Honda City 2017-2020 EXi,2006,158000,140000,Petrol,Individual
Maruti Wagon R LXI,2010,260000,120000,Petrol,Individual
Toyota Innova 2.5 G,2007,,150000,Diesel,Dealer
";

/// Write `contents` to a CSV file in a fresh temporary directory
pub fn write_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("listings.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Write a DataFrame to a CSV file in a fresh temporary directory
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write a DataFrame to a Parquet file in a fresh temporary directory
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// The [`VEHICLES_CSV`] fixture loaded with the vehicles profile
pub fn load_vehicles() -> Dataset {
    let (_temp_dir, path) = write_temp_csv(VEHICLES_CSV);
    load_dataset(&path, &SchemaProfile::Vehicles.mapping(), 100).unwrap()
}

/// The [`CAR_DETAILS_CSV`] fixture loaded with the car details profile
pub fn load_car_details() -> Dataset {
    let (_temp_dir, path) = write_temp_csv(CAR_DETAILS_CSV);
    load_dataset(&path, &SchemaProfile::CarDetails.mapping(), 100).unwrap()
}

/// Build a vehicles-profile dataset directly from column vectors
pub fn vehicles_dataset(
    prices: &[f64],
    years: &[i64],
    models: &[&str],
    manufacturers: &[&str],
) -> Dataset {
    let df = df! {
        "price" => prices,
        "model_year" => years,
        "model" => models,
        "manufacturer" => manufacturers,
    }
    .unwrap();
    Dataset::from_frame(df, ColumnMapping::default()).unwrap()
}

/// Generate a random vehicles-profile dataset
pub fn create_large_vehicles_dataset(rows: usize) -> Dataset {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let makes = ["ford", "toyota", "honda", "bmw", "kia", "chevrolet"];

    let prices: Vec<f64> = (0..rows).map(|_| rng.gen_range(500.0..80000.0)).collect();
    let years: Vec<i64> = (0..rows).map(|_| rng.gen_range(1990..2020)).collect();
    let manufacturers: Vec<&str> = (0..rows).map(|_| makes[rng.gen_range(0..makes.len())]).collect();
    let models: Vec<String> = manufacturers
        .iter()
        .map(|m| format!("{} model {}", m, rng.gen_range(0..5)))
        .collect();
    let model_refs: Vec<&str> = models.iter().map(String::as_str).collect();

    vehicles_dataset(&prices, &years, &model_refs, &manufacturers)
}

/// String values of a column, in row order
pub fn column_strings(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

/// Numeric values of a column as f64, in row order
pub fn column_f64(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}
