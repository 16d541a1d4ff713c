pub mod cmdline;
pub mod core;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod special_forms;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod tokens;

pub use types::{Expression, Value};
