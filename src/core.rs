use crate::evaluator::{Error, Result};
use crate::types::{Arity, Int, PrimitiveFn, Value};
use std::collections::HashMap;

fn integers(args: &[Value]) -> Result<Vec<Int>> {
    args.iter()
        .map(|arg| arg.as_int().map_err(Error::from))
        .collect()
}

fn fold_integers(args: &[Value], identity: Int, op: fn(Int, Int) -> Int) -> Result {
    Ok(Value::Integer(integers(args)?.into_iter().fold(identity, op)))
}

// With one argument `-` negates, otherwise it subtracts the rest from the first.
fn difference(args: &[Value]) -> Result {
    match integers(args)?.split_first() {
        Some((x, [])) => Ok(Value::Integer(x.wrapping_neg())),
        Some((x, rest)) => Ok(Value::Integer(
            rest.iter().fold(*x, |acc, y| acc.wrapping_sub(*y)),
        )),
        None => unreachable!("arity is checked before the call"),
    }
}

fn quotient(args: &[Value]) -> Result {
    match integers(args)?[..] {
        [_, 0] => Err(Error::DivideByZero),
        [x, y] => Ok(Value::Integer(x.wrapping_div(y))),
        _ => unreachable!("arity is checked before the call"),
    }
}

// There is no boolean type: comparisons give 1 or 0.
fn compare(args: &[Value], holds: fn(&Int, &Int) -> bool) -> Result {
    match integers(args)?[..] {
        [x, y] => Ok(Value::from(holds(&x, &y))),
        _ => unreachable!("arity is checked before the call"),
    }
}

macro_rules! folding_primitive {
    ($SYMBOL:tt, $NAME:ident, $identity:expr, $op:ident) => {
        const $NAME: PrimitiveFn = PrimitiveFn {
            name: stringify!($SYMBOL),
            fn_ptr: |args: &[Value]| fold_integers(args, $identity, Int::$op),
            arity: Arity::at_least(0),
        };
    };
}

macro_rules! comparison_primitive {
    ($SYMBOL:tt, $NAME:ident) => {
        paste::item! {
            const $NAME: PrimitiveFn = PrimitiveFn {
                name: stringify!($SYMBOL),
                fn_ptr: |args: &[Value]| compare(args, Int:: [<$NAME:lower>]),
                arity: Arity::exactly(2),
            };
        }
    };
}

folding_primitive!(+, PLUS, 0, wrapping_add);
folding_primitive!(*, TIMES, 1, wrapping_mul);

const MINUS: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: difference,
    arity: Arity::at_least(1),
};

const DIVIDE: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: quotient,
    arity: Arity::exactly(2),
};

comparison_primitive!(=, EQ);
comparison_primitive!(<, LT);
comparison_primitive!(<=, LE);
comparison_primitive!(>, GT);
comparison_primitive!(>=, GE);

static BUILTINS: &[PrimitiveFn] = &[PLUS, MINUS, TIMES, DIVIDE, EQ, LT, LE, GT, GE];

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    /// Built-in functions by the name they are bound to in the global scope.
    pub static ref CORE: Namespace = BUILTINS.iter().map(|func| (func.name, func)).collect();
}
