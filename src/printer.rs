use crate::types::{Function, Value};
use std::fmt;

pub fn pr_str(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Symbol(name) => name.to_string(),
        // Functions have no readable form.
        Value::Function(_) => String::from("#<function>"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Primitive(p) => write!(f, "#<function {}>", p.name),
            Function::Closure(c) => write!(f, "#<function {}>", c),
            Function::Constant(value) => write!(f, "#<constant {}>", value),
        }
    }
}
