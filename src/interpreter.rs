use crate::environment::Environment;
use crate::types::{Expression, Value};
use crate::{evaluator, printer, reader};
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl From<reader::Error> for Error {
    fn from(e: reader::Error) -> Self {
        Error::Read(e)
    }
}

impl From<evaluator::Error> for Error {
    fn from(e: evaluator::Error) -> Self {
        Error::Eval(e)
    }
}

#[allow(non_snake_case)]
pub fn READ(line: &str) -> Result<Option<Expression>, Error> {
    reader::read_str(line).map_err(Error::Read)
}

#[allow(non_snake_case)]
pub fn EVAL(ast: &Expression, env: &Rc<Environment>) -> Result<Value, Error> {
    evaluator::EVAL(ast, env).map_err(Error::Eval)
}

#[allow(non_snake_case)]
pub fn PRINT(value: &Value) -> String {
    printer::pr_str(value)
}

/// Read, evaluate and print one line. `Ok(None)` for a line with nothing on it.
pub fn rep(line: &str, env: &Rc<Environment>) -> Result<Option<String>, Error> {
    match READ(line)? {
        None => Ok(None),
        Some(ast) => EVAL(&ast, env).map(|value| Some(PRINT(&value))),
    }
}
