//! Datasets shared by unit tests.

use super::{Dataset, Dimension, Signature, Variable};

/// Time (3) and height (4) with one variable per dimension signature.
pub(crate) fn sample_dataset() -> Dataset {
    Dataset::builder()
        .with_dimension(
            Dimension::new("time", vec![1649116800.0, 1649145600.0, 1649174400.0])
                .with_attribute("units", "Seconds since 1970-01-01 00:00:00"),
        )
        .with_dimension(
            Dimension::new("height", vec![0.0, 10.0, 20.0, 30.0])
                .with_attribute("units", "m")
                .with_attribute("long_name", "Height AGL"),
        )
        .variable(
            Variable::from_shape_vec(
                "temperature",
                Signature::new(["time", "height"]),
                &[3, 4],
                vec![
                    88.0, 80.0, 75.0, 70.0, //
                    89.0, 81.0, 76.0, 71.0, //
                    88.5, 81.5, 75.5, 69.5,
                ],
            )
            .unwrap()
            .with_attribute("units", "degF")
            .with_attribute("_FillValue", -9999.0),
        )
        .variable(
            Variable::from_vec("humidity", "time", vec![60.5, 65.5, 63.0])
                .with_attribute("units", "%")
                .with_attribute("_FillValue", -9999.0),
        )
        .variable(
            Variable::from_vec("other", "height", vec![1.0, 2.0, 3.0, 4.0])
                .with_attribute("units", "1")
                .with_attribute("_FillValue", -9999.0),
        )
        .variable(Variable::scalar("static", 1.5))
        .attribute("datastream", "humboldt.buoy.c1")
        .attribute("title", "title")
        .build()
        .unwrap()
}

/// Variables the faceted flattener cannot place on a time index.
pub(crate) fn bad_dataset() -> Dataset {
    let ones = |n: usize| vec![1.0; n];
    Dataset::builder()
        .dimension("time", vec![0.0, 1.0, 2.0])
        .dimension("range", vec![1.0, 2.0, 3.0])
        .with_dimension(Dimension::new("height", vec![0.0, 10.0, 20.0, 30.0]).with_attribute("units", "m"))
        .variable(
            Variable::from_shape_vec("temperature", Signature::new(["range", "height"]), &[3, 4], ones(12))
                .unwrap(),
        )
        .variable(
            Variable::from_shape_vec(
                "too_large",
                Signature::new(["time", "range", "height"]),
                &[3, 3, 4],
                ones(36),
            )
            .unwrap(),
        )
        .variable(Variable::from_vec("humidity", "range", vec![60.5, 65.5, 63.0]))
        .variable(Variable::from_vec("other", "height", vec![1.0, 2.0, 3.0, 4.0]))
        .variable(Variable::from_vec("time_var", "time", vec![1.0, 2.0, 3.0]))
        .attribute("datastream", "bad.buoy.c1")
        .build()
        .unwrap()
}
