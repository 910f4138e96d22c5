use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;

use crate::expression::error::ExprError;
use crate::expression::eval::{Variables, evaluate, strip_delimiters};

/// A template parameter value: a literal number, a formula string, or a list of either.
///
/// JSON numbers deserialize to [`ParamValue::Literal`], strings to [`ParamValue::Formula`],
/// arrays to [`ParamValue::List`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A number used as-is.
    Literal(f64),
    /// `"{{ expr }}"` or a plain numeric string such as `"0.5"`.
    Formula(String),
    /// Positional values flattened in order.
    List(Vec<ParamValue>),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Literal(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Formula(s.to_owned())
    }
}

impl ParamValue {
    /// Return the formula text when this value needs evaluation.
    pub fn formula(&self) -> Option<&str> {
        match self {
            Self::Formula(s) => Some(s),
            Self::Literal(_) | Self::List(_) => None,
        }
    }

    /// Resolve every scalar in declaration order, appending to `out`.
    pub fn resolve_into<V: Variables + ?Sized>(
        &self,
        vars: &V,
        out: &mut Vec<f64>,
    ) -> Result<(), ExprError> {
        match self {
            Self::List(items) => {
                for item in items {
                    item.resolve_into(vars, out)?;
                }
                Ok(())
            }
            scalar => {
                out.push(resolve_value(scalar, vars)?);
                Ok(())
            }
        }
    }
}

/// Resolve a scalar parameter value.
///
/// Literals come back unchanged. Formula strings are evaluated when delimited with `{{ }}`,
/// parsed directly when they are plain numbers, and rejected otherwise. Lists are rejected:
/// callers that accept positional lists use [`ParamValue::resolve_into`].
pub fn resolve_value<V: Variables + ?Sized>(
    value: &ParamValue,
    vars: &V,
) -> Result<f64, ExprError> {
    match value {
        ParamValue::Literal(v) => Ok(*v),
        ParamValue::Formula(s) => {
            if let Some(body) = strip_delimiters(s) {
                return evaluate(body, vars);
            }
            s.trim().parse::<f64>().map_err(|_| {
                ExprError::syntax(
                    0,
                    format!("expected a number or a {{{{ formula }}}}, found '{s}'"),
                )
            })
        }
        ParamValue::List(_) => Err(ExprError::syntax(
            0,
            "list value where a single number is required",
        )),
    }
}

/// Parameter map that keeps declaration order.
///
/// Resolved parameters are packed positionally, so the order keys appear in the source document
/// is significant and must survive deserialization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamMap(Vec<(String, ParamValue)>);

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, replacing an earlier one with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut m = Self::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

impl serde::Serialize for ParamMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for ParamMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamMapVisitor;

        impl<'de> Visitor<'de> for ParamMapVisitor {
            type Value = ParamMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to numbers, formulas or lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ParamMap, A::Error> {
                let mut out = ParamMap::new();
                while let Some((k, v)) = access.next_entry::<String, ParamValue>()? {
                    out.insert(k, v);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ParamMapVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/value.rs"]
mod tests;
