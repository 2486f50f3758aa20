//! Test utilities for assertforge-core
//!
//! Provides host objects and code samples shared by the crate's test modules.

use std::sync::Arc;

use crate::constraint::Constraint;
use crate::expression::{Expression, Resolve};
use crate::value::{Code, Fault, Inspect, Value};

/// A host object with a name, a price and a `Serializable` attribute.
#[derive(Debug)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            price,
        }
    }

    pub fn value(name: &str, price: f64) -> Value {
        Value::Object(Arc::new(Self::new(name, price)))
    }
}

impl Inspect for Item {
    fn type_name(&self) -> &str {
        "Item"
    }

    fn is_instance_of(&self, type_name: &str) -> bool {
        matches!(type_name, "Item" | "Product")
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "price" => Some(Value::Float(self.price)),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "Serializable").then(|| Value::Bool(true))
    }

    fn render(&self) -> String {
        format!("<Item {}>", self.name)
    }
}

/// Code that fails with the given fault kind and message.
pub fn failing(kind: &'static str, message: &'static str) -> Value {
    Value::Code(Code::new(move || Err(Fault::new(kind, message))))
}

/// Code that completes normally.
pub fn succeeding() -> Value {
    Value::Code(Code::new(|| Ok(())))
}

/// Resolves an expression that is known to be well formed.
pub fn resolved(expression: Expression) -> Constraint {
    expression.resolve().unwrap()
}
