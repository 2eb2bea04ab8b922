use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use simian_core::ast;
use simian_core::ast::write_separated;

use thiserror::Error;

#[derive(Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Rc<Object>>),
    Hash(HashPairs),
    Function(Function),
    Builtin(Builtin),
    Error(EvaluationError),
    /// Carries a `return` value up to the enclosing call. Never produced by
    /// evaluating a whole program.
    ReturnValue(Rc<Object>),
    Null,
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }
    pub fn string(value: impl Into<String>) -> Rc<Object> {
        Rc::new(Object::String(value.into()))
    }
    pub fn array(array: Vec<Rc<Object>>) -> Rc<Object> {
        Rc::new(Object::Array(array))
    }
    pub fn hash(pairs: HashPairs) -> Rc<Object> {
        Rc::new(Object::Hash(pairs))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: Rc<ast::BlockStatement>,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }
    pub fn builtin(builtin: Builtin) -> Rc<Object> {
        Rc::new(Object::Builtin(builtin))
    }
    pub fn error(error: EvaluationError) -> Rc<Object> {
        Rc::new(Object::Error(error))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Error(_) => ObjectKind::Error,
            Object::ReturnValue(_) => ObjectKind::ReturnValue,
            Object::Null => ObjectKind::Null,
        }
    }

    /// Only `false` and `null` are falsy; every other value, `0` included,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectKind {
    Integer,
    Boolean,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
    ReturnValue,
    Null,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ObjectKind::*;
        f.write_str(match self {
            Integer => "INTEGER",
            Boolean => "BOOLEAN",
            String => "STRING",
            Array => "ARRAY",
            Hash => "HASH",
            Function => "FUNCTION",
            Builtin => "BUILTIN",
            Error => "ERROR",
            ReturnValue => "RETURN_VALUE",
            Null => "NULL",
        })
    }
}

/// Canonical key for hash lookups. Only integers, booleans and strings are
/// hashable.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
}

impl TryFrom<&Object> for HashKey {
    type Error = EvaluationError;

    fn try_from(value: &Object) -> Result<Self, Self::Error> {
        match value {
            Object::Integer(int) => Ok(HashKey::Integer(*int)),
            Object::Boolean(bool) => Ok(HashKey::Boolean(*bool)),
            Object::String(str) => Ok(HashKey::String(str.as_str().into())),
            _ => Err(EvaluationError::InvalidHashKey(value.kind())),
        }
    }
}

/// Insertion-ordered key/value pairs with a derived index for lookups.
#[derive(Debug, PartialEq, Default)]
pub struct HashPairs {
    pairs: Vec<(Rc<Object>, Rc<Object>)>,
    index: HashMap<HashKey, usize>,
}

impl HashPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. A repeated key keeps its original position and takes
    /// the new value.
    pub fn insert(&mut self, key: HashKey, key_object: Rc<Object>, value: Rc<Object>) {
        match self.index.get(&key) {
            Some(&position) => self.pairs[position] = (key_object, value),
            None => {
                self.index.insert(key, self.pairs.len());
                self.pairs.push((key_object, value));
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&Rc<Object>> {
        self.index
            .get(key)
            .map(|&position| &self.pairs[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rc<Object>, Rc<Object>)> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: Rc<ast::BlockStatement>,
    /// Environment active where the literal was evaluated.
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && Rc::ptr_eq(&self.body, &other.body)
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

pub type BuiltinFn = fn(Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: ObjectKind,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectKind,
        operation: ast::InfixOperationKind,
        right: ObjectKind,
    },
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: ObjectKind,
        operation: ast::InfixOperationKind,
        right: ObjectKind,
    },
    #[error("identifier not found: {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("not a function: {0}")]
    CallNonFunction(ObjectKind),
    #[error("unusable as hash key: {0}")]
    InvalidHashKey(ObjectKind),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectKind),
    #[error("division by zero")]
    DivisionByZero,
    #[error("builtin {name}: {message}")]
    BuiltinFunctionError { name: &'static str, message: String },
}

/// Inspect form shown to users.
impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Array(elements) => {
                write!(f, "[")?;
                write_separated(f, elements)?;
                write!(f, "]")
            }
            Object::Hash(pairs) => {
                write!(f, "{{")?;
                write_separated(
                    f,
                    pairs.iter().map(|(key, value)| format!("{}: {}", key, value)),
                )?;
                write!(f, "}}")
            }
            Object::Function(function) => {
                write!(f, "fn(")?;
                write_separated(f, &function.parameters)?;
                write!(f, ") {}", function.body)
            }
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Error(error) => write!(f, "ERROR: {}", error),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
        }
    }
}
