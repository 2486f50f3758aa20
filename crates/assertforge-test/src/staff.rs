//! Host object fixtures.
//!
//! `Employee` and `Manager` form a small type hierarchy: a manager is also an
//! instance of `Employee`. Both expose properties through `Inspect`, and
//! `Employee` carries a `Table` attribute.
//!
//! # Example
//!
//! ```ignore
//! use assertforge_test::staff::Employee;
//!
//! let ada = Employee::new("Ada", 36).with_email("ada@example.com").into_value();
//! ```

use std::sync::Arc;

use assertforge_core::{Inspect, Value};

/// An employee record.
#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
    pub skills: Vec<String>,
}

impl Employee {
    /// Creates an employee with no email and no skills.
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: None,
            skills: Vec::new(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_skill(mut self, skill: &str) -> Self {
        self.skills.push(skill.to_string());
        self
    }

    /// Wraps the employee as an object value.
    pub fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }
}

impl Inspect for Employee {
    fn type_name(&self) -> &str {
        "Employee"
    }

    fn is_assignable_from(&self, type_name: &str) -> bool {
        matches!(type_name, "Employee" | "Manager")
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "age" => Some(Value::Int(self.age)),
            "email" => Some(Value::from(self.email.clone())),
            "skills" => Some(Value::list(self.skills.iter().map(String::as_str))),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "Table" => Some(Value::from("employees")),
            _ => None,
        }
    }

    fn render(&self) -> String {
        format!("<Employee {}>", self.name)
    }
}

/// An employee with reports.
#[derive(Clone, Debug, PartialEq)]
pub struct Manager {
    pub employee: Employee,
    pub reports: Vec<Employee>,
}

impl Manager {
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            reports: Vec::new(),
        }
    }

    pub fn with_report(mut self, report: Employee) -> Self {
        self.reports.push(report);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }
}

impl Inspect for Manager {
    fn type_name(&self) -> &str {
        "Manager"
    }

    fn is_instance_of(&self, type_name: &str) -> bool {
        matches!(type_name, "Manager" | "Employee")
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "reports" => Some(Value::list(
                self.reports.iter().cloned().map(Employee::into_value),
            )),
            _ => self.employee.property(name),
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.employee.attribute(name)
    }

    fn render(&self) -> String {
        format!("<Manager {}>", self.employee.name)
    }
}
