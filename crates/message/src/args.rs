use std::fmt;

use bytes::Bytes;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// String-keyed nested attributes. Values may nest further maps or arrays.
pub type AttributeMap = Map<String, Value>;

/// One positional argument of a message.
///
/// Arguments are classified once, when they are converted into an `Arg`;
/// nothing downstream inspects runtime types again.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Bytes(Bytes),
    /// Message of an error value. A sole error argument raises the level to ERROR.
    Error(String),
    Map(AttributeMap),
    Seq(Vec<Value>),
    /// A value whose serialization hook failed; renders as nothing.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Scalar,
    Mapping,
    Sequence,
    ErrorValue,
    Unsupported,
}

impl Arg {
    /// Capture an error value by its display message.
    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Arg::Error(err.to_string())
    }

    /// Serialization hook for anything outside the closed set of shapes.
    ///
    /// The value goes through `serde_json::to_value` and is classified from the
    /// resulting JSON shape. A failing `Serialize` impl yields `Arg::Unsupported`.
    pub fn serialized<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(json) => Arg::from(json),
            Err(e) => {
                tracing::debug!("argument serialization failed, rendering as empty: {}", e);
                Arg::Unsupported
            }
        }
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Map(_) => ArgKind::Mapping,
            Arg::Seq(_) => ArgKind::Sequence,
            Arg::Error(_) => ArgKind::ErrorValue,
            Arg::Unsupported => ArgKind::Unsupported,
            _ => ArgKind::Scalar,
        }
    }

    /// Structured arguments render as flattened properties rather than inline.
    pub fn is_structured(&self) -> bool {
        matches!(
            self.kind(),
            ArgKind::Mapping | ArgKind::Sequence | ArgKind::Unsupported
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind() == ArgKind::ErrorValue
    }

    /// JSON view of the argument, used by the flattener.
    pub fn to_json(&self) -> Value {
        match self {
            Arg::Null | Arg::Unsupported => Value::Null,
            Arg::Str(s) | Arg::Error(s) => Value::String(s.clone()),
            Arg::Int(i) => Value::from(*i),
            Arg::Uint(u) => Value::from(*u),
            Arg::Float(f) => Value::from(*f),
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            Arg::Map(map) => Value::Object(map.clone()),
            Arg::Seq(items) => Value::Array(items.clone()),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => f.write_str("null"),
            Arg::Str(s) | Arg::Error(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Uint(u) => write!(f, "{}", u),
            Arg::Float(v) => write!(f, "{}", v),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Arg::Map(_) | Arg::Seq(_) => write!(f, "{}", self.to_json()),
            Arg::Unsupported => Ok(()),
        }
    }
}

impl Serialize for Arg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Arg::Null | Arg::Unsupported => serializer.serialize_unit(),
            Arg::Str(s) | Arg::Error(s) => serializer.serialize_str(s),
            Arg::Int(i) => serializer.serialize_i64(*i),
            Arg::Uint(u) => serializer.serialize_u64(*u),
            Arg::Float(v) => serializer.serialize_f64(*v),
            Arg::Bool(b) => serializer.serialize_bool(*b),
            Arg::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
            Arg::Map(map) => map.serialize(serializer),
            Arg::Seq(items) => items.serialize(serializer),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Arg::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Arg::Uint(u)
                } else {
                    Arg::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => Arg::Str(s),
            Value::Array(items) => Arg::Seq(items),
            Value::Object(map) => Arg::Map(map),
        }
    }
}

impl From<AttributeMap> for Arg {
    fn from(map: AttributeMap) -> Self {
        Arg::Map(map)
    }
}

impl From<Vec<Value>> for Arg {
    fn from(items: Vec<Value>) -> Self {
        Arg::Seq(items)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Str(s.clone())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg::Bytes(b)
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Arg::Float(f64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Uint(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Account {
        owner: String,
        balance: i64,
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    // ── Classification ───────────────────────────────────────────

    #[test]
    fn test_scalars_classify_as_scalar() {
        for arg in [Arg::from("x"), Arg::from(3), Arg::from(2.5), Arg::from(true), Arg::Null] {
            assert_eq!(arg.kind(), ArgKind::Scalar);
            assert!(!arg.is_structured());
        }
    }

    #[test]
    fn test_json_object_classifies_as_mapping() {
        let arg = Arg::from(json!({"a": 1}));
        assert_eq!(arg.kind(), ArgKind::Mapping);
        assert!(arg.is_structured());
    }

    #[test]
    fn test_json_array_classifies_as_sequence() {
        let arg = Arg::from(json!(["one", "two"]));
        assert_eq!(arg.kind(), ArgKind::Sequence);
    }

    #[test]
    fn test_error_argument() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let arg = Arg::error(&err);
        assert!(arg.is_error());
        assert!(!arg.is_structured());
        assert_eq!(arg.to_string(), "disk full");
    }

    // ── Serialization hook ───────────────────────────────────────

    #[test]
    fn test_serialized_struct_becomes_mapping() {
        let arg = Arg::serialized(&Account {
            owner: "tim".into(),
            balance: 10,
        });
        match arg {
            Arg::Map(map) => {
                assert_eq!(map["owner"], "tim");
                assert_eq!(map["balance"], 10);
            }
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_failure_is_unsupported() {
        let arg = Arg::serialized(&Broken);
        assert_eq!(arg, Arg::Unsupported);
        assert!(arg.is_structured());
        assert_eq!(arg.to_string(), "");
    }

    // ── Display ──────────────────────────────────────────────────

    #[test]
    fn test_display_forms() {
        assert_eq!(Arg::from(42u8).to_string(), "42");
        assert_eq!(Arg::from(-7i32).to_string(), "-7");
        assert_eq!(Arg::from(1.5f64).to_string(), "1.5");
        assert_eq!(Arg::from(false).to_string(), "false");
        assert_eq!(Arg::from(&b"raw"[..]).to_string(), "raw");
        assert_eq!(Arg::from(json!({"k": "v"})).to_string(), r#"{"k":"v"}"#);
    }

    #[test]
    fn test_number_classification_prefers_integers() {
        assert_eq!(Arg::from(json!(42)), Arg::Int(42));
        assert_eq!(Arg::from(json!(u64::MAX)), Arg::Uint(u64::MAX));
        assert_eq!(Arg::from(json!(0.25)), Arg::Float(0.25));
    }
}
