use crate::environment::{Environment, UnknownSymbol};
use crate::special_forms::{self, DefError, LambdaError};
use crate::types::{
    Arity, BadArgCount, Closure, Expression, Function, PrimitiveFn, TypeMismatch, Value,
};
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnboundSymbol(UnknownSymbol),
    Malformed(Malformed),
    ArityMismatch(BadArgCount),
    EmptyLambdaBody,
    TypeMismatch(TypeMismatch),
    DivideByZero,
}

/// Source that parsed fine but does not have a shape we can evaluate.
#[derive(Debug, PartialEq)]
pub enum Malformed {
    EmptyForm,
    OperatorNotASymbol,
    Def(DefError),
    Lambda(LambdaError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundSymbol(e) => write!(f, "{}", e),
            Error::Malformed(e) => write!(f, "malformed expression: {}", e),
            Error::ArityMismatch(e) => write!(f, "{}", e),
            Error::EmptyLambdaBody => write!(f, "lambda: body must not be empty"),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {:?}", e),
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
        }
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::EmptyForm => write!(f, "nothing to apply in ()"),
            Malformed::OperatorNotASymbol => write!(f, "expected symbol in operator position"),
            Malformed::Def(e) => write!(f, "def: {:?}", e),
            Malformed::Lambda(e) => write!(f, "lambda: {:?}", e),
        }
    }
}

impl From<UnknownSymbol> for Error {
    fn from(e: UnknownSymbol) -> Self {
        Self::UnboundSymbol(e)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::ArityMismatch(e)
    }
}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<Malformed> for Error {
    fn from(e: Malformed) -> Self {
        Self::Malformed(e)
    }
}

impl From<DefError> for Error {
    fn from(e: DefError) -> Self {
        Self::Malformed(Malformed::Def(e))
    }
}

impl From<LambdaError> for Error {
    fn from(e: LambdaError) -> Self {
        Self::Malformed(Malformed::Lambda(e))
    }
}

#[allow(non_snake_case)]
pub fn EVAL(ast: &Expression, env: &Rc<Environment>) -> Result {
    log::trace!("eval {}", ast);
    match ast {
        Expression::Integer(n) => Ok(Value::Integer(*n)),
        // Every binding is a function; a plain value is a constant one.
        Expression::Symbol(s) => apply(&env.fetch(s)?, &[]),
        Expression::Form(form) => evaluate_form(form, env),
    }
}

fn evaluate_form(form: &[Expression], env: &Rc<Environment>) -> Result {
    let (head, operands) = form.split_first().ok_or(Malformed::EmptyForm)?;
    let name = match head {
        Expression::Symbol(name) => name,
        Expression::Integer(_) | Expression::Form(_) => Err(Malformed::OperatorNotASymbol)?,
    };
    match name.as_str() {
        "def" => special_forms::apply_def(operands, env),
        "lambda" => special_forms::apply_lambda(operands, env),
        _ => {
            let callable = env.fetch(name)?;
            let args = evaluate_sequence_elementwise(operands, env)?;
            log::trace!("apply {} = {} to {}", name, callable, pretty_print_args(&args));
            apply(&callable, &args)
        }
    }
}

pub fn evaluate_sequence_elementwise(
    seq: &[Expression],
    env: &Rc<Environment>,
) -> Result<Vec<Value>> {
    seq.iter().map(|expr| EVAL(expr, env)).collect()
}

pub fn apply(callable: &Function, args: &[Value]) -> Result {
    match callable {
        Function::Primitive(f) => call_primitive(f, args),
        Function::Closure(c) => call_closure(c, args),
        Function::Constant(value) => {
            Arity::exactly(0).validate_for(args.len(), "constant")?;
            Ok(Value::clone(value))
        }
    }
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[Value]) -> Result {
    log::trace!("Call {} with {}", func, pretty_print_args(args));
    let env = make_closure_env(func, args)?;
    let mut result = Err(Error::EmptyLambdaBody);
    for expr in &func.body {
        result = Ok(EVAL(expr, &env)?);
    }
    result
}

/// A fresh scope per call, so calls never see each other's arguments.
fn make_closure_env(func: &Closure, args: &[Value]) -> Result<Rc<Environment>> {
    func.arity().validate_for(args.len(), "lambda")?;
    let env = Environment::spawn_from(&func.scope);
    for (key, value) in func.parameters.iter().zip(args) {
        env.set(key.clone(), Function::from(value.clone()));
    }
    Ok(env)
}
