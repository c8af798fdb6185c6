//! Expectation primitives.
//!
//! An expectation declares what a named attribute or variable should look
//! like. Every field is optional and an undeclared field never reports a
//! mismatch, whatever the observed value.

use crate::dataset::{AttrValue, DataType};

/// Expected type and literal value of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeExpectation {
    pub dtype: Option<DataType>,
    pub value: Option<&'static str>,
}

impl AttributeExpectation {
    pub fn type_bad(&self, observed: DataType) -> bool {
        matches!(self.dtype, Some(expected) if expected != observed)
    }

    /// Literal comparison. A numeric attribute never equals an expected text.
    pub fn value_bad(&self, observed: &AttrValue) -> bool {
        match self.value {
            None => false,
            Some(expected) => observed.as_text() != Some(expected),
        }
    }
}

/// Expected type, dimension names and units of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableExpectation {
    pub dtype: Option<DataType>,
    /// `Some(&[])` expects a scalar.
    pub dims: Option<&'static [&'static str]>,
    pub units: Option<&'static str>,
}

impl VariableExpectation {
    pub fn dtype_bad(&self, observed: DataType) -> bool {
        matches!(self.dtype, Some(expected) if expected != observed)
    }

    pub fn dims_bad(&self, observed: &[String]) -> bool {
        match self.dims {
            None => false,
            Some(expected) => {
                expected.len() != observed.len()
                    || expected.iter().zip(observed).any(|(e, o)| *e != o.as_str())
            }
        }
    }

    pub fn units_bad(&self, observed: &AttrValue) -> bool {
        match self.units {
            None => false,
            Some(expected) => observed.as_text() != Some(expected),
        }
    }
}

/// Render a dimension tuple as `(time, range)`.
pub fn format_dims<S: AsRef<str>>(dims: &[S]) -> String {
    let names: Vec<&str> = dims.iter().map(AsRef::as_ref).collect();
    format!("({})", names.join(", "))
}
