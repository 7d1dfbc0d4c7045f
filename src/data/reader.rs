//! NetCDF file reader.

use super::{AttrValue, Attributes, Dataset, Dimension, Signature, Variable};
use crate::error::{NcflattenError, Result};
use ndarray::{Array1, ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::fmt;
use std::path::Path;

/// A variable that could not be carried into the dataset exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadIssue {
    /// Variable name.
    pub variable: String,
    /// What was lost.
    pub kind: ReadIssueKind,
}

/// What happened to a variable while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadIssueKind {
    /// Non-numeric values that were left out. Holds the netCDF type.
    Unsupported(String),
    /// Integer values that were rounded when widened to `f64`.
    PrecisionLoss(usize),
}

impl fmt::Display for ReadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReadIssueKind::Unsupported(vartype) => write!(
                f,
                "{} has non-numeric type {} and was not converted",
                self.variable, vartype
            ),
            ReadIssueKind::PrecisionLoss(count) => write!(
                f,
                "{} has {} integer value(s) that could not be represented exactly",
                self.variable, count
            ),
        }
    }
}

/// A dataset together with what could not be read exactly.
#[derive(Debug, Clone)]
pub struct Loaded {
    /// The dataset.
    pub dataset: Dataset,
    /// Variables dropped or altered while reading, in file order.
    pub issues: Vec<ReadIssue>,
}

/// Read a netCDF file into an in-memory [`Dataset`].
///
/// See [`load_dataset`] for the variables that are left out or rounded.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    load_dataset(path).map(|loaded| loaded.dataset)
}

/// Read a netCDF file, reporting what could not be read exactly.
///
/// Coordinate variables (one-dimensional variables named after their
/// dimension) become the dimension's coordinate values and attributes.
/// Dimensions without a numeric one are indexed `0..len`. Every other numeric
/// variable becomes a data variable with CF packing and fill values decoded.
/// Non-numeric variables are reported as [`ReadIssueKind::Unsupported`].
pub fn load_dataset(path: &Path) -> Result<Loaded> {
    let file = netcdf::open(path)
        .map_err(|e| NcflattenError::NetCDF(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut builder = Dataset::builder();
    let mut issues = Vec::new();

    for attr in file.attributes() {
        if let Some(value) = attr_value(&attr) {
            builder = builder.attribute(attr.name().to_string(), value);
        }
    }

    let mut coordinate_names = Vec::new();
    for dim in file.dimensions() {
        let name = dim.name().to_string();
        let len = dim.len();
        let index = || -> Vec<f64> { (0..len).map(|i| i as f64).collect() };

        let dimension = match file.variable(&name) {
            Some(var) if is_coordinate(&var, &name) => {
                coordinate_names.push(name.clone());
                let attributes = read_attributes(&var);
                let coords = if is_numeric(&var.vartype()) {
                    let (data, lossy) = read_values(&var, &[len], &attributes)?;
                    note_precision_loss(&mut issues, &name, lossy);
                    data.into_iter().collect()
                } else {
                    issues.push(unsupported(&var));
                    Array1::from_vec(index())
                };
                Dimension {
                    name,
                    coords,
                    attributes,
                }
            },
            _ => Dimension::new(name, index()),
        };
        builder = builder.with_dimension(dimension);
    }

    for var in file.variables() {
        let name = var.name().to_string();
        if coordinate_names.contains(&name) {
            continue;
        }

        if !is_numeric(&var.vartype()) {
            tracing::warn!(variable = %name, vartype = ?var.vartype(), "skipping non-numeric variable");
            issues.push(unsupported(&var));
            continue;
        }

        let dims: Signature = var
            .dimensions()
            .iter()
            .map(|d: &netcdf::Dimension<'_>| d.name().to_string())
            .collect();
        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let attributes = read_attributes(&var);
        let (data, lossy) = read_values(&var, &shape, &attributes)?;
        note_precision_loss(&mut issues, &name, lossy);

        tracing::debug!(variable = %name, dims = %dims, "read variable");
        builder = builder.variable(Variable {
            name,
            dims,
            data,
            attributes,
        });
    }

    Ok(Loaded {
        dataset: builder.build()?,
        issues,
    })
}

fn is_numeric(vartype: &NcVariableType) -> bool {
    matches!(vartype, NcVariableType::Int(_) | NcVariableType::Float(_))
}

fn unsupported(var: &netcdf::Variable<'_>) -> ReadIssue {
    ReadIssue {
        variable: var.name().to_string(),
        kind: ReadIssueKind::Unsupported(format!("{:?}", var.vartype())),
    }
}

fn note_precision_loss(issues: &mut Vec<ReadIssue>, variable: &str, lossy: usize) {
    if lossy > 0 {
        tracing::warn!(variable, values = lossy, "integer values rounded to f64");
        issues.push(ReadIssue {
            variable: variable.to_string(),
            kind: ReadIssueKind::PrecisionLoss(lossy),
        });
    }
}

fn is_coordinate(var: &netcdf::Variable<'_>, dim_name: &str) -> bool {
    let dims = var.dimensions();
    dims.len() == 1 && dims[0].name() == dim_name
}

fn read_attributes(var: &netcdf::Variable<'_>) -> Attributes {
    var.attributes()
        .filter_map(|attr| attr_value(&attr).map(|value| (attr.name().to_string(), value)))
        .collect()
}

/// Read values as `f64`, applying `scale_factor`/`add_offset` and masking
/// `_FillValue`/`missing_value` to NaN. Also returns how many integer values
/// were rounded.
fn read_values(
    var: &netcdf::Variable<'_>,
    shape: &[usize],
    attributes: &Attributes,
) -> Result<(ArrayD<f64>, usize)> {
    let (mut data, lossy) = read_variable_array(var, shape)?;

    let sentinels: Vec<f64> = ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|key| attributes.get(*key).and_then(AttrValue::as_f64))
        .collect();
    if !sentinels.is_empty() {
        data.mapv_inplace(|v| if sentinels.contains(&v) { f64::NAN } else { v });
    }

    let scale_factor = attributes
        .get("scale_factor")
        .and_then(AttrValue::as_f64)
        .unwrap_or(1.0);
    let add_offset = attributes
        .get("add_offset")
        .and_then(AttrValue::as_f64)
        .unwrap_or(0.0);
    if scale_factor != 1.0 || add_offset != 0.0 {
        data.mapv_inplace(|v| v * scale_factor + add_offset);
    }

    Ok((data, lossy))
}

/// Widen integers to `f64`, counting the values that do not convert back.
fn widen<T: Copy + Into<i128>>(values: Vec<T>) -> (Vec<f64>, usize) {
    let mut lossy = 0;
    let widened = values
        .into_iter()
        .map(|x| {
            let exact: i128 = x.into();
            let value = exact as f64;
            if value as i128 != exact {
                lossy += 1;
            }
            value
        })
        .collect();
    (widened, lossy)
}

fn read_variable_array(
    var: &netcdf::Variable<'_>,
    shape: &[usize],
) -> Result<(ArrayD<f64>, usize)> {
    let vartype = var.vartype();

    let from_vec = |v: Vec<f64>| -> Result<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(shape), v)
            .map_err(|e| NcflattenError::NetCDF(format!("Invalid shape/data size: {}", e)))
    };

    macro_rules! get {
        ($t:ty) => {{
            let values: Vec<$t> = var.get_values(..).map_err(|e| {
                NcflattenError::NetCDF(format!(
                    "Failed to read {} data for '{}': {}",
                    stringify!($t),
                    var.name(),
                    e
                ))
            })?;
            values
        }};
    }
    macro_rules! read_float {
        ($t:ty) => {{
            let values = get!($t);
            Ok((from_vec(values.into_iter().map(f64::from).collect())?, 0))
        }};
    }
    macro_rules! read_int {
        ($t:ty) => {{
            let (values, lossy) = widen(get!($t));
            Ok((from_vec(values)?, lossy))
        }};
    }

    match vartype {
        NcVariableType::Float(FloatType::F64) => read_float!(f64),
        NcVariableType::Float(FloatType::F32) => read_float!(f32),
        NcVariableType::Int(IntType::I64) => read_int!(i64),
        NcVariableType::Int(IntType::I32) => read_int!(i32),
        NcVariableType::Int(IntType::I16) => read_int!(i16),
        NcVariableType::Int(IntType::I8) => read_int!(i8),
        NcVariableType::Int(IntType::U64) => read_int!(u64),
        NcVariableType::Int(IntType::U32) => read_int!(u32),
        NcVariableType::Int(IntType::U16) => read_int!(u16),
        NcVariableType::Int(IntType::U8) => read_int!(u8),
        _ => Err(NcflattenError::NetCDF(format!(
            "Unsupported variable type for '{}': {:?}",
            var.name(),
            vartype
        ))),
    }
}

/// Attribute value, or `None` (logged) when it cannot be read.
///
/// Unsigned 64-bit values beyond `i64::MAX` are kept as decimal text.
fn attr_value(attr: &netcdf::Attribute<'_>) -> Option<AttrValue> {
    use netcdf::AttributeValue;

    fn ints<T: Into<i64>>(v: Vec<T>) -> AttrValue {
        AttrValue::Ints(v.into_iter().map(Into::into).collect())
    }

    let value = match attr.value() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(attribute = %attr.name(), error = %e, "skipping unreadable attribute");
            return None;
        },
    };

    let value = match value {
        AttributeValue::Uchar(v) => AttrValue::Int(v.into()),
        AttributeValue::Schar(v) => AttrValue::Int(v.into()),
        AttributeValue::Ushort(v) => AttrValue::Int(v.into()),
        AttributeValue::Short(v) => AttrValue::Int(v.into()),
        AttributeValue::Uint(v) => AttrValue::Int(v.into()),
        AttributeValue::Int(v) => AttrValue::Int(v.into()),
        AttributeValue::Ulonglong(v) => {
            i64::try_from(v).map_or_else(|_| AttrValue::Str(v.to_string()), AttrValue::Int)
        },
        AttributeValue::Longlong(v) => AttrValue::Int(v),
        AttributeValue::Float(v) => AttrValue::Float(v.into()),
        AttributeValue::Double(v) => AttrValue::Float(v),
        AttributeValue::Str(v) => AttrValue::Str(v),
        AttributeValue::Uchars(v) => ints(v),
        AttributeValue::Schars(v) => ints(v),
        AttributeValue::Ushorts(v) => ints(v),
        AttributeValue::Shorts(v) => ints(v),
        AttributeValue::Uints(v) => ints(v),
        AttributeValue::Ints(v) => ints(v),
        AttributeValue::Ulonglongs(v) => match v
            .iter()
            .map(|&x| i64::try_from(x))
            .collect::<std::result::Result<Vec<i64>, _>>()
        {
            Ok(ints) => AttrValue::Ints(ints),
            Err(_) => AttrValue::Strs(v.iter().map(u64::to_string).collect()),
        },
        AttributeValue::Longlongs(v) => AttrValue::Ints(v),
        AttributeValue::Floats(v) => AttrValue::Floats(v.into_iter().map(f64::from).collect()),
        AttributeValue::Doubles(v) => AttrValue::Floats(v),
        AttributeValue::Strs(v) => AttrValue::Strs(v),
    };
    Some(value)
}
