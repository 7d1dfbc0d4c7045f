//! Dataset information.

use super::{AttrValue, Attributes, Signature};
use crate::error::{NcflattenError, Result};
use indexmap::IndexMap;
use ndarray::{arr0, Array1, ArrayD, IxDyn};

/// A named axis and its coordinate values.
#[derive(Debug, Clone)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Coordinate values, one per position along the axis.
    pub coords: Array1<f64>,
    /// Attributes of the coordinate variable.
    pub attributes: Attributes,
}

impl Dimension {
    /// Create a dimension with the given coordinate values.
    pub fn new(name: impl Into<String>, coords: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            coords: Array1::from(coords),
            attributes: Attributes::new(),
        }
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Number of coordinate values.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the axis has no coordinate values.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The `units` attribute, if present.
    pub fn unit(&self) -> Option<&str> {
        self.attributes.get("units").and_then(AttrValue::as_str)
    }
}

/// A named array over an ordered set of dimensions.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Dimensions the values vary along.
    pub dims: Signature,
    /// Values, shaped like the dimensions in `dims`.
    pub data: ArrayD<f64>,
    /// Variable attributes.
    pub attributes: Attributes,
}

impl Variable {
    /// Create a variable.
    pub fn new(name: impl Into<String>, dims: Signature, data: ArrayD<f64>) -> Self {
        Self {
            name: name.into(),
            dims,
            data,
            attributes: Attributes::new(),
        }
    }

    /// Create a one-dimensional variable.
    pub fn from_vec(name: impl Into<String>, dim: impl Into<String>, values: Vec<f64>) -> Self {
        let data = Array1::from(values).into_dyn();
        Self::new(name, Signature::new([dim.into()]), data)
    }

    /// Create a zero-dimensional variable.
    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Signature::scalar(), arr0(value).into_dyn())
    }

    /// Create a variable from row-major values and an explicit shape.
    pub fn from_shape_vec(
        name: impl Into<String>,
        dims: Signature,
        shape: &[usize],
        values: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        let len = values.len();
        let data = ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| {
            NcflattenError::ShapeMismatch {
                variable: name.clone(),
                shape: vec![len],
                expected: shape.to_vec(),
            }
        })?;
        Ok(Self::new(name, dims, data))
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// The `units` attribute, if present.
    pub fn unit(&self) -> Option<&str> {
        self.attributes.get("units").and_then(AttrValue::as_str)
    }
}

/// An immutable multi-dimensional dataset.
///
/// Construction validates that every variable refers to declared dimensions
/// and that its array shape matches their lengths, so the engine can rely on
/// these facts. Dimensions and variables keep their insertion order, which
/// decides the order of output tables and columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    dimensions: IndexMap<String, Dimension>,
    variables: IndexMap<String, Variable>,
    attributes: Attributes,
}

impl Dataset {
    /// Create a dataset, validating it.
    pub fn new(
        dimensions: Vec<Dimension>,
        variables: Vec<Variable>,
        attributes: Attributes,
    ) -> Result<Self> {
        let mut dims = IndexMap::with_capacity(dimensions.len());
        for dim in dimensions {
            if dims.contains_key(&dim.name) {
                return Err(NcflattenError::DuplicateDimension(dim.name));
            }
            dims.insert(dim.name.clone(), dim);
        }

        let mut vars = IndexMap::with_capacity(variables.len());
        for var in variables {
            if vars.contains_key(&var.name) {
                return Err(NcflattenError::DuplicateVariable(var.name));
            }
            vars.insert(var.name.clone(), var);
        }

        let dataset = Self {
            dimensions: dims,
            variables: vars,
            attributes,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Start building a dataset.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Dimensions in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions.values()
    }

    /// Look up a dimension.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Look up a variable.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Dataset-level attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Check every variable against the declared dimensions.
    pub fn validate(&self) -> Result<()> {
        self.variables().try_for_each(|var| self.check_variable(var))
    }

    /// Resolve the dimensions of a signature, in signature order.
    pub fn resolve(&self, variable: &str, signature: &Signature) -> Result<Vec<&Dimension>> {
        signature
            .iter()
            .map(|name| {
                self.dimension(name)
                    .ok_or_else(|| NcflattenError::undeclared_dimension(variable, name))
            })
            .collect()
    }

    fn check_variable(&self, var: &Variable) -> Result<()> {
        let dims = self.resolve(&var.name, &var.dims)?;

        if var.data.ndim() != dims.len() {
            return Err(NcflattenError::RankMismatch {
                variable: var.name.clone(),
                rank: var.data.ndim(),
                expected: dims.len(),
            });
        }

        let expected: Vec<usize> = dims.iter().map(|d| d.len()).collect();
        if var.data.shape() != expected.as_slice() {
            return Err(NcflattenError::ShapeMismatch {
                variable: var.name.clone(),
                shape: var.data.shape().to_vec(),
                expected,
            });
        }

        if let Some(empty) = dims.iter().find(|d| d.is_empty()) {
            return Err(NcflattenError::EmptyCoordinates {
                dimension: empty.name.clone(),
                variable: var.name.clone(),
            });
        }

        Ok(())
    }
}

/// Incremental [`Dataset`] construction.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    dimensions: Vec<Dimension>,
    variables: Vec<Variable>,
    attributes: Attributes,
}

impl DatasetBuilder {
    /// Declare a dimension with coordinate values.
    pub fn dimension(self, name: impl Into<String>, coords: Vec<f64>) -> Self {
        self.with_dimension(Dimension::new(name, coords))
    }

    /// Declare a fully described dimension.
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Add a variable.
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Add a dataset-level attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Validate and build the dataset.
    pub fn build(self) -> Result<Dataset> {
        Dataset::new(self.dimensions, self.variables, self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::sample_dataset;

    #[test]
    fn keeps_declaration_order() {
        let ds = sample_dataset();
        let names: Vec<&str> = ds.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["temperature", "humidity", "other", "static"]);
        let dims: Vec<&str> = ds.dimensions().map(|d| d.name.as_str()).collect();
        assert_eq!(dims, ["time", "height"]);
        assert_eq!(ds.dimension("height").and_then(Dimension::unit), Some("m"));
    }

    #[test]
    fn rejects_undeclared_dimension() {
        let err = Dataset::builder()
            .dimension("time", vec![0.0, 1.0])
            .variable(Variable::from_vec("x", "range", vec![1.0, 2.0]))
            .build()
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(matches!(
            err,
            NcflattenError::UndeclaredDimension { ref variable, ref dimension }
                if variable == "x" && dimension == "range"
        ));
    }

    #[test]
    fn rejects_shape_mismatch() {
        let err = Dataset::builder()
            .dimension("time", vec![0.0, 1.0, 2.0])
            .variable(Variable::from_vec("x", "time", vec![1.0, 2.0]))
            .build()
            .unwrap_err();
        assert!(matches!(err, NcflattenError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_rank_mismatch() {
        let var = Variable::new("x", Signature::new(["time"]), arr0(1.0).into_dyn());
        let err = Dataset::builder()
            .dimension("time", vec![0.0])
            .variable(var)
            .build()
            .unwrap_err();
        assert!(matches!(err, NcflattenError::RankMismatch { rank: 0, expected: 1, .. }));
    }

    #[test]
    fn rejects_empty_axis_with_dependants() {
        let var = Variable::from_shape_vec("x", Signature::new(["time"]), &[0], vec![]).unwrap();
        let err = Dataset::builder()
            .dimension("time", vec![])
            .variable(var)
            .build()
            .unwrap_err();
        assert!(matches!(err, NcflattenError::EmptyCoordinates { .. }));

        // An unused empty axis is fine.
        assert!(Dataset::builder().dimension("time", vec![]).build().is_ok());
    }

    #[test]
    fn rejects_duplicate_dimension() {
        let err = Dataset::builder()
            .dimension("time", vec![0.0])
            .dimension("time", vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, NcflattenError::DuplicateDimension(ref d) if d == "time"));
    }

    #[test]
    fn rejects_duplicate_variable() {
        let err = Dataset::builder()
            .dimension("time", vec![0.0, 1.0])
            .variable(Variable::from_vec("a", "time", vec![1.0, 2.0]))
            .variable(Variable::scalar("a", 3.0))
            .build()
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(matches!(err, NcflattenError::DuplicateVariable(ref v) if v == "a"));
    }
}
