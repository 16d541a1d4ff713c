extern crate derive_more;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;
use std::borrow::Borrow;
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};
use std::rc::Rc;

pub type Int = i64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(String::from(name))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed source text. Leaves are integers or symbols: there is no way to
/// write a function literal, so a function can never appear here.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(Int),
    Symbol(Symbol),
    Form(Form),
}

#[derive(Deref, Debug, Clone, PartialEq)]
pub struct Form(pub Vec<Expression>);

impl Expression {
    pub fn form(elements: Vec<Expression>) -> Self {
        Self::Form(Form(elements))
    }

    pub fn symbol(name: &str) -> Self {
        Self::Symbol(Symbol::from(name))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(n) => write!(f, "{}", n),
            Expression::Symbol(s) => write!(f, "{}", s),
            Expression::Form(elements) => write!(f, "({})", elements.iter().join(" ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug, PartialEq)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "when calling {} expected {} arguments, but received {}",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

/// A built-in function. The name is only used to register the function in
/// the global environment and to report bad calls.
pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Vec<Expression>,
    /// Child of the scope the `lambda` form was evaluated in. Every call
    /// spawns its own scope from here.
    pub scope: Rc<Environment>,
}

impl Closure {
    pub fn arity(&self) -> Arity {
        Arity::exactly(self.parameters.len())
    }
}

impl fmt::Debug for Closure {
    // Not derived: the scope may well contain this closure.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(lambda ({}) {})",
            self.parameters.iter().join(" "),
            self.body.iter().join(" ")
        )
    }
}

/// Everything bound in an environment is one of these. Plain values are
/// bound as a `Constant`, a function taking no arguments that returns them.
#[derive(Debug, Clone)]
pub enum Function {
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
    Constant(Rc<Value>),
}

impl From<Value> for Function {
    fn from(value: Value) -> Self {
        match value {
            Value::Function(f) => f,
            other => Function::Constant(Rc::new(other)),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        use Function::*;
        match (self, other) {
            (Primitive(x), Primitive(y)) => std::ptr::eq(*x, *y),
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            (Constant(x), Constant(y)) => Rc::ptr_eq(x, y) || x == y,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(Int),
    Symbol(Symbol),
    Function(Function),
}

#[derive(Debug, PartialEq)]
pub enum TypeMismatch {
    NotAnInteger,
}

impl Value {
    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInteger),
        }
    }
}

impl From<Int> for Value {
    fn from(n: Int) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Integer(if b { 1 } else { 0 })
    }
}
