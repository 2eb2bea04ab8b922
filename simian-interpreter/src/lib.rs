//! Tree-walking evaluator for programs parsed by `simian_core`.

pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod object;

pub use environment::{Environment, Session};
pub use evaluator::{eval_program, evaluate, Node};
pub use object::{EvaluationError, Object};
