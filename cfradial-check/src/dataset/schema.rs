use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Element type of a variable or attribute, using the CDL type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Int64,
    UInt64,
    Float,
    Double,
    Char,
    String,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Byte => "byte",
            DataType::UByte => "ubyte",
            DataType::Short => "short",
            DataType::UShort => "ushort",
            DataType::Int => "int",
            DataType::UInt => "uint",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Char => "char",
            DataType::String => "string",
        }
    }

    /// Parse a CDL type keyword (`float`, `int`, `long`, ...).
    pub fn from_cdl(keyword: &str) -> Option<Self> {
        let dtype = match keyword {
            "byte" => DataType::Byte,
            "ubyte" => DataType::UByte,
            "short" => DataType::Short,
            "ushort" => DataType::UShort,
            "int" | "long" => DataType::Int,
            "uint" => DataType::UInt,
            "int64" => DataType::Int64,
            "uint64" => DataType::UInt64,
            "float" | "real" => DataType::Float,
            "double" => DataType::Double,
            "char" => DataType::Char,
            "string" => DataType::String,
            _ => return None,
        };
        Some(dtype)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Char | DataType::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a global or variable attribute.
///
/// Char and string attributes both load as `Text` and report the `string`
/// type, so a text expectation accepts either storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttr", into = "RawAttr")]
pub enum AttrValue {
    Text(String),
    Numeric { dtype: DataType, values: Vec<f64> },
}

impl AttrValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttrValue::Text(value.into())
    }

    pub fn scalar(dtype: DataType, value: f64) -> Self {
        AttrValue::Numeric {
            dtype,
            values: vec![value],
        }
    }

    pub fn dtype(&self) -> DataType {
        match self {
            AttrValue::Text(_) => DataType::String,
            AttrValue::Numeric { dtype, .. } => *dtype,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Numeric { .. } => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Numeric { values, .. } => {
                if values.len() == 1 {
                    return write!(f, "{}", values[0]);
                }
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// JSON surface form of an attribute: bare strings and numbers, or an
/// explicitly typed object such as `{"type": "float", "value": 0.5}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAttr {
    Text(String),
    Int(i64),
    Float(f64),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Typed {
        #[serde(rename = "type")]
        dtype: DataType,
        value: RawValue,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Scalar(f64),
    List(Vec<f64>),
}

impl TryFrom<RawAttr> for AttrValue {
    type Error = String;

    fn try_from(raw: RawAttr) -> Result<Self, Self::Error> {
        let value = match raw {
            RawAttr::Text(s) => AttrValue::Text(s),
            RawAttr::Int(v) => AttrValue::scalar(DataType::Int, v as f64),
            RawAttr::Float(v) => AttrValue::scalar(DataType::Double, v),
            RawAttr::Ints(vs) => AttrValue::Numeric {
                dtype: DataType::Int,
                values: vs.into_iter().map(|v| v as f64).collect(),
            },
            RawAttr::Floats(values) => AttrValue::Numeric {
                dtype: DataType::Double,
                values,
            },
            RawAttr::Typed { dtype, value } => match (dtype.is_text(), value) {
                (true, RawValue::Text(s)) => AttrValue::Text(s),
                (false, RawValue::Scalar(v)) => AttrValue::scalar(dtype, v),
                (false, RawValue::List(values)) => AttrValue::Numeric { dtype, values },
                (true, _) => return Err(format!("{} attribute needs a string value", dtype)),
                (false, RawValue::Text(_)) => {
                    return Err(format!("{} attribute needs a numeric value", dtype))
                }
            },
        };
        Ok(value)
    }
}

impl From<AttrValue> for RawAttr {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Text(s) => RawAttr::Text(s),
            AttrValue::Numeric { dtype, mut values } => {
                let value = if values.len() == 1 {
                    RawValue::Scalar(values.remove(0))
                } else {
                    RawValue::List(values)
                };
                RawAttr::Typed { dtype, value }
            }
        }
    }
}

/// Payload of a variable, when the source carried one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableData {
    /// A 0-D or 1-D character buffer.
    Text(String),
    /// A 2-D character array, one string per row.
    Rows(Vec<String>),
    Numbers(Vec<f64>),
}

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("variable '{0}' carries no data")]
    NoData(String),
    #[error("{dtype} variable '{variable}' holds numeric values")]
    NotCharacter { variable: String, dtype: DataType },
}

/// Read access to named attributes, shared by the dataset (global
/// attributes) and its variables.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&AttrValue>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// The attribute's text, or `None` when absent or numeric.
    fn text_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttrValue::as_text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub dtype: DataType,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VariableData>,
}

impl Variable {
    pub fn new(name: impl Into<String>, dtype: DataType, dimensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            dtype,
            dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
            attributes: BTreeMap::new(),
            data: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_text_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_attribute(name, AttrValue::Text(value.into()))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.data = Some(VariableData::Text(text.into()));
        self
    }

    pub fn with_rows<S: Into<String>>(mut self, rows: impl IntoIterator<Item = S>) -> Self {
        self.data = Some(VariableData::Rows(rows.into_iter().map(Into::into).collect()));
        self
    }

    pub fn first_dimension(&self) -> Option<&str> {
        self.dimensions.first().map(String::as_str)
    }

    pub fn has_dimensions(&self, expected: &[&str]) -> bool {
        self.dimensions.len() == expected.len()
            && self.dimensions.iter().zip(expected).all(|(a, b)| a.as_str() == *b)
    }

    /// The whole character buffer with trailing NULs removed.
    pub fn char_string(&self) -> Result<String, DatasetError> {
        let raw = match self.char_payload()? {
            CharPayload::Text(s) => s.to_string(),
            CharPayload::Rows(rows) => rows.concat(),
        };
        Ok(raw.trim_end_matches('\0').to_string())
    }

    /// The whole character buffer with NULs and whitespace stripped from
    /// both ends.
    pub fn char_value(&self) -> Result<String, DatasetError> {
        let raw = match self.char_payload()? {
            CharPayload::Text(s) => s.to_string(),
            CharPayload::Rows(rows) => rows.concat(),
        };
        Ok(trim_chars(&raw).to_string())
    }

    /// One trimmed string per row. A 1-D buffer is a single row.
    pub fn char_rows(&self) -> Result<Vec<String>, DatasetError> {
        let rows = match self.char_payload()? {
            CharPayload::Text(s) => vec![trim_chars(s).to_string()],
            CharPayload::Rows(rows) => rows.iter().map(|r| trim_chars(r).to_string()).collect(),
        };
        Ok(rows)
    }

    fn char_payload(&self) -> Result<CharPayload<'_>, DatasetError> {
        match &self.data {
            None => Err(DatasetError::NoData(self.name.clone())),
            Some(VariableData::Text(s)) => Ok(CharPayload::Text(s)),
            Some(VariableData::Rows(rows)) => Ok(CharPayload::Rows(rows)),
            Some(VariableData::Numbers(_)) => Err(DatasetError::NotCharacter {
                variable: self.name.clone(),
                dtype: self.dtype,
            }),
        }
    }
}

impl AttributeSource for Variable {
    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}

enum CharPayload<'a> {
    Text(&'a str),
    Rows(&'a [String]),
}

fn trim_chars(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}

/// An opened dataset: dimensions, global attributes and variables in file
/// order. The checker only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub dimensions: BTreeMap<String, usize>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, name: impl Into<String>, len: usize) -> Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_text_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_attribute(name, AttrValue::Text(value.into()))
    }

    /// Add a variable, replacing any existing variable of the same name.
    pub fn with_variable(mut self, variable: Variable) -> Self {
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
        self
    }

    pub fn has_dimension(&self, name: &str) -> bool {
        self.dimensions.contains_key(name)
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions.get(name).copied()
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|v| v.name == name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}

impl AttributeSource for Dataset {
    fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}
