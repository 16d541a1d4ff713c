use crate::environment::Environment;
use crate::evaluator::{Error, Result, EVAL};
use crate::types::{Closure, Expression, Function, Symbol, Value};
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub enum DefError {
    WrongArgCount(usize),
    KeyNotASymbol,
}

// (def <symbol> <expr>)
pub fn apply_def(args: &[Expression], env: &Rc<Environment>) -> Result {
    let (key, value) = match args {
        [key, value] => Ok((key, value)),
        _ => Err(DefError::WrongArgCount(args.len())),
    }?;
    let key = match key {
        Expression::Symbol(s) => Ok(s),
        _ => Err(DefError::KeyNotASymbol),
    }?;
    let value = EVAL(value, env)?;
    env.set(key.clone(), Function::from(value.clone()));
    log::debug!("define {} as {}", key, value);
    Ok(value)
}

#[derive(Debug, PartialEq)]
pub enum LambdaError {
    MissingParameters,
    ParametersNotGivenAsForm,
    ParameterNotASymbol,
}

// (lambda (<symbol>...) <expr>...)
pub fn apply_lambda(args: &[Expression], env: &Rc<Environment>) -> Result {
    let (parameters, body) = args
        .split_first()
        .ok_or(LambdaError::MissingParameters)?;
    let parameters = match parameters {
        Expression::Form(p) => Ok(p),
        _ => Err(LambdaError::ParametersNotGivenAsForm),
    }?;
    let extract_symbol = |expr: &Expression| match expr {
        Expression::Symbol(s) => Ok(s.clone()),
        _ => Err(LambdaError::ParameterNotASymbol),
    };
    let parameters = parameters
        .iter()
        .map(extract_symbol)
        .collect::<std::result::Result<Vec<Symbol>, _>>()?;
    if body.is_empty() {
        return Err(Error::EmptyLambdaBody);
    }

    // The closure's scope is made now, not per call.
    let closure = Closure {
        parameters,
        body: body.to_vec(),
        scope: Environment::spawn_from(env),
    };
    Ok(Value::Function(Function::Closure(Rc::new(closure))))
}
