//! Values tested by constraints.
//!
//! The core never inspects host types itself: objects reach it as
//! `Arc<dyn Inspect>` and every property, attribute or type question is
//! answered by the host's `Inspect` implementation.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use num_traits::ToPrimitive;

/// Host-supplied inspection capability for object values.
pub trait Inspect: fmt::Debug + Send + Sync {
    /// Name of the concrete type.
    fn type_name(&self) -> &str;

    /// Returns true if the object is an instance of `type_name`, including
    /// any supertype the host knows about.
    fn is_instance_of(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }

    /// Returns true if a value of `type_name` can stand where this object's
    /// type is expected, i.e. `type_name` is this type or one of its subtypes.
    fn is_assignable_from(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }

    /// Looks up a named property.
    fn property(&self, name: &str) -> Option<Value>;

    /// Looks up a named attribute (metadata attached to the object or its type).
    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Text used for this object in failure messages.
    fn render(&self) -> String {
        format!("<{}>", self.type_name())
    }
}

/// A value under test, or an expected value held by a constraint.
///
/// `PartialEq` is structural identity (floats compare by bit pattern, objects
/// and code by pointer). Matching semantics live in the constraint module.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Vec<Value>),
    /// Host object answered through `Inspect`.
    Object(Arc<dyn Inspect>),
    /// A block of code, tested by the throws constraints.
    Code(Code),
}

impl Value {
    /// Wraps a host object.
    pub fn object(object: impl Inspect + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Builds a list value.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a code value from a fallible closure.
    pub fn code(f: impl Fn() -> Result<(), Fault> + Send + Sync + 'static) -> Self {
        Value::Code(Code::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of ints and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => v.to_f64(),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the value's type, as used by the type constraints.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(o) => o.type_name(),
            Value::Code(_) => "code",
        }
    }

    /// Instance-of test. Ints and floats are also instances of `number`.
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        match self {
            Value::Null => false,
            Value::Int(_) | Value::Float(_) if type_name == "number" => true,
            Value::Object(o) => o.is_instance_of(type_name),
            _ => self.type_name() == type_name,
        }
    }

    pub fn is_assignable_from(&self, type_name: &str) -> bool {
        match self {
            Value::Null => false,
            Value::Object(o) => o.is_assignable_from(type_name),
            _ => self.type_name() == type_name,
        }
    }

    /// Looks up a property. Strings and lists answer `length` and `count`;
    /// objects defer to the host.
    pub fn property(&self, name: &str) -> Option<Value> {
        match (self, name) {
            (Value::Str(s), "length" | "count") => Some(Value::from(s.chars().count())),
            (Value::List(items), "length" | "count") => Some(Value::from(items.len())),
            (Value::Object(o), _) => o.property(name),
            _ => None,
        }
    }

    /// Looks up an attribute. Only host objects carry attributes.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.attribute(name),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (Value::Code(a), Value::Code(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int(v) => write!(f, "Int({v})"),
            Value::Float(v) => write!(f, "Float({v:?})"),
            Value::Str(v) => write!(f, "Str({v:?})"),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(o).finish(),
            Value::Code(_) => write!(f, "Code"),
        }
    }
}

/// Plain rendering, used when a value is substituted into a message template.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(o) => write!(f, "{}", o.render()),
            Value::Code(_) => write!(f, "<code>"),
        }
    }
}

macro_rules! impl_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    match v.to_i64() {
                        Some(i) => Value::Int(i),
                        None => Value::Float(v.to_f64().unwrap_or(f64::NAN)),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

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
        Value::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Arc::from(v))
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<Code> for Value {
    fn from(v: Code) -> Self {
        Value::Code(v)
    }
}

impl From<Fault> for Value {
    fn from(v: Fault) -> Self {
        Value::Object(Arc::new(v))
    }
}

/// A failure raised by code under test: an `Err` it returned or a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    kind: Arc<str>,
    message: Arc<str>,
}

impl Fault {
    pub fn new(kind: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Builds a fault from an error, using the error's type name as the kind.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let full = std::any::type_name::<E>();
        let kind = full.rsplit("::").next().unwrap_or(full);
        Self::new(kind, error.to_string())
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::from("panic with a non-string payload")
        };
        Self::new("panic", message)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Inspect for Fault {
    fn type_name(&self) -> &str {
        &self.kind
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "kind" => Some(Value::Str(self.kind.clone())),
            "message" => Some(Value::Str(self.message.clone())),
            _ => None,
        }
    }

    fn render(&self) -> String {
        format!("<{}: {}>", self.kind, self.message)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

type CodeFn = dyn Fn() -> Result<(), Fault> + Send + Sync;

/// Code under test for the throws constraints.
#[derive(Clone)]
pub struct Code(Arc<CodeFn>);

impl Code {
    pub fn new(f: impl Fn() -> Result<(), Fault> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Runs the code, returning the fault it raised if any. Panics are caught
    /// and reported as faults of kind `panic`.
    pub fn run(&self) -> Option<Fault> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.0)())) {
            Ok(Ok(())) => None,
            Ok(Err(fault)) => Some(fault),
            Err(payload) => Some(Fault::from_panic(payload)),
        }
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Code")
    }
}

/// The actual value handed to an assertion, possibly computed on demand.
pub enum Actual {
    Value(Value),
    /// Computed once, after the assertion counter has been incremented.
    Lazy(Box<dyn FnOnce() -> Value>),
}

impl Actual {
    pub fn lazy<T: Into<Value>>(f: impl FnOnce() -> T + 'static) -> Self {
        Actual::Lazy(Box::new(move || f().into()))
    }

    pub fn into_value(self) -> Value {
        match self {
            Actual::Value(v) => v,
            Actual::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for Actual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actual::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Actual::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

impl From<Value> for Actual {
    fn from(v: Value) -> Self {
        Actual::Value(v)
    }
}

macro_rules! impl_actual_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Actual {
                fn from(v: $t) -> Self {
                    Actual::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_actual_from!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, i128, u128, f32, f64, &str, String,
    Arc<str>, Code, Fault
);

impl<T: Into<Value>> From<Vec<T>> for Actual {
    fn from(v: Vec<T>) -> Self {
        Actual::Value(Value::list(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Actual {
    fn from(v: Option<T>) -> Self {
        Actual::Value(Value::from(v))
    }
}
