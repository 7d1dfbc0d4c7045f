//! netCDF fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

/// Time (3) and height (4): one variable per dimension signature.
pub fn write_sample(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", 3).unwrap();
    file.add_dimension("height", 4).unwrap();
    file.add_attribute("datastream", "humboldt.buoy.c1").unwrap();
    file.add_attribute("title", "title").unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "Seconds since 1970-01-01 00:00:00")
        .unwrap();
    time.put_values(&[1649116800.0, 1649145600.0, 1649174400.0], ..)
        .unwrap();

    let mut height = file.add_variable::<f64>("height", &["height"]).unwrap();
    height.put_attribute("units", "m").unwrap();
    height.put_attribute("long_name", "Height AGL").unwrap();
    height.put_values(&[0.0, 10.0, 20.0, 30.0], ..).unwrap();

    let mut temperature = file
        .add_variable::<f64>("temperature", &["time", "height"])
        .unwrap();
    temperature.put_attribute("units", "degF").unwrap();
    temperature.put_attribute("_FillValue", -9999.0).unwrap();
    temperature
        .put_values(
            &[
                88.0, 80.0, 75.0, 70.0, 89.0, 81.0, 76.0, 71.0, 88.5, 81.5, 75.5, 69.5,
            ],
            ..,
        )
        .unwrap();

    let mut humidity = file.add_variable::<f64>("humidity", &["time"]).unwrap();
    humidity.put_attribute("units", "%").unwrap();
    humidity.put_attribute("_FillValue", -9999.0).unwrap();
    humidity.put_values(&[60.5, -9999.0, 63.0], ..).unwrap();

    let mut other = file.add_variable::<i32>("other", &["height"]).unwrap();
    other.put_attribute("units", "1").unwrap();
    other.put_values(&[1, 2, 3, 4], ..).unwrap();

    let mut scalar = file.add_variable::<f64>("static", &[]).unwrap();
    scalar.put_values(&[1.5], ..).unwrap();
}

/// A dataset with variables faceted mode must reject.
pub fn write_bad(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", 3).unwrap();
    file.add_dimension("range", 3).unwrap();
    file.add_dimension("height", 4).unwrap();
    file.add_attribute("datastream", "bad.buoy.c1").unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_values(&[0.0, 1.0, 2.0], ..).unwrap();

    let mut height = file.add_variable::<f64>("height", &["height"]).unwrap();
    height.put_attribute("units", "m").unwrap();
    height.put_values(&[0.0, 10.0, 20.0, 30.0], ..).unwrap();

    let mut temperature = file
        .add_variable::<f64>("temperature", &["range", "height"])
        .unwrap();
    temperature.put_values(&[1.0; 12], ..).unwrap();

    let mut too_large = file
        .add_variable::<f64>("too_large", &["time", "range", "height"])
        .unwrap();
    too_large.put_values(&[1.0; 36], ..).unwrap();

    let mut time_var = file.add_variable::<f64>("time_var", &["time"]).unwrap();
    time_var.put_values(&[1.0, 2.0, 3.0], ..).unwrap();
}

/// String coordinates and data, and 64-bit integers beyond f64 precision.
pub fn write_mixed(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("station", 2).unwrap();
    file.add_dimension("time", 2).unwrap();
    file.add_attribute("big", u64::MAX).unwrap();

    let mut station = file.add_string_variable("station", &["station"]).unwrap();
    station.put_attribute("long_name", "Station code").unwrap();
    station.put_string("HUM", [0]).unwrap();
    station.put_string("EKA", [1]).unwrap();

    let mut time = file.add_variable::<i64>("time", &["time"]).unwrap();
    time.put_attribute("units", "nanoseconds since 1970-01-01")
        .unwrap();
    time.put_values(&[1_649_116_800_000_000_001i64, 1_649_116_800_000_000_003], ..)
        .unwrap();

    let mut label = file.add_string_variable("label", &["time"]).unwrap();
    label.put_string("first", [0]).unwrap();
    label.put_string("second", [1]).unwrap();

    let mut speed = file
        .add_variable::<f64>("speed", &["station", "time"])
        .unwrap();
    speed.put_values(&[1.0, 2.0, 3.0, 4.0], ..).unwrap();
}
