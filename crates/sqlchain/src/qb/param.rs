//! Bind values and predicate operands.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{QbError, QbResult};
use crate::qb::traits::SqlQb;

/// A scalar bind value, passed positionally to the driver.
///
/// The variant is fixed when the value is created, so rendering and
/// placeholder expansion never need to inspect runtime types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Check if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = QbError;

    /// Convert a scalar JSON value. Arrays and objects have no bind-value form.
    fn try_from(v: serde_json::Value) -> QbResult<Self> {
        match v {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .ok_or_else(|| QbError::conversion(format!("number {n} is out of range"))),
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(_) => Err(QbError::conversion("JSON array is not a scalar")),
            serde_json::Value::Object(_) => Err(QbError::conversion("JSON object is not a scalar")),
        }
    }
}

/// A column reference used on the right-hand side of a comparison.
///
/// Rendered verbatim and never turned into a placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column(pub String);

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column(name.into())
    }
}

/// Right-hand side of a predicate, before the operator picks a node shape.
#[derive(Clone)]
pub enum Operand {
    /// No value (`is null`, `is not null`).
    None,
    /// A single bind value.
    Value(Value),
    /// A sequence of bind values (`in`).
    List(Vec<Value>),
    /// Lower and upper bound (`between`).
    Pair(Value, Value),
    /// Another column.
    Column(String),
    /// A nested statement, built when the enclosing statement is built.
    Query(Rc<dyn SqlQb>),
}

impl Operand {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Operand::None => "no value",
            Operand::Value(_) => "a scalar value",
            Operand::List(_) => "a list",
            Operand::Pair(..) => "a pair",
            Operand::Column(_) => "a column reference",
            Operand::Query(_) => "a sub-query",
        }
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => f.write_str("None"),
            Operand::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Operand::List(vs) => f.debug_tuple("List").field(vs).finish(),
            Operand::Pair(a, b) => f.debug_tuple("Pair").field(a).field(b).finish(),
            Operand::Column(c) => f.debug_tuple("Column").field(c).finish(),
            Operand::Query(q) => f.debug_tuple("Query").field(q).finish(),
        }
    }
}

macro_rules! impl_operand_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_from_scalar!(i8, i16, i32, i64, u8, u16, u32, bool, f32, f64, String);

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl From<&String> for Operand {
    fn from(v: &String) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(vs: Vec<T>) -> Self {
        Operand::List(vs.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Operand {
    fn from(vs: [T; N]) -> Self {
        Operand::List(vs.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Operand {
    fn from(vs: &[T]) -> Self {
        Operand::List(vs.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Operand {
    fn from((low, high): (A, B)) -> Self {
        Operand::Pair(low.into(), high.into())
    }
}

impl From<Column> for Operand {
    fn from(c: Column) -> Self {
        Operand::Column(c.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(7i8), Value::Int(7));
        assert_eq!(Value::from(7u32), Value::Int(7));
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn test_operand_shapes() {
        assert!(matches!(Operand::from(1i32), Operand::Value(Value::Int(1))));
        assert!(matches!(Operand::from(vec![1, 2, 3]), Operand::List(ref v) if v.len() == 3));
        assert!(matches!(Operand::from(["a", "b"]), Operand::List(ref v) if v.len() == 2));
        assert!(matches!(Operand::from((1, "x")), Operand::Pair(Value::Int(1), Value::Text(_))));
        assert!(matches!(Operand::from(Column::new("users.id")), Operand::Column(ref c) if c == "users.id"));
    }

    #[test]
    fn test_from_json() {
        let v = Value::try_from(serde_json::json!(42)).unwrap();
        assert_eq!(v, Value::Int(42));
        let v = Value::try_from(serde_json::json!(1.5)).unwrap();
        assert_eq!(v, Value::Float(1.5));
        let v = Value::try_from(serde_json::json!("zhangsan")).unwrap();
        assert_eq!(v, Value::Text("zhangsan".to_string()));
        assert!(Value::try_from(serde_json::json!([1, 2])).is_err());
        assert!(Value::try_from(serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![Value::Int(1), Value::Text("a".to_string()), Value::Null, Value::Bool(false)];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,"a",null,false]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
