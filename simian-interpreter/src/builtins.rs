use std::rc::Rc;

use crate::object::{Builtin, EvaluationError, Object};

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

/// Resolves a builtin by name. Consulted only after the environment chain
/// has no binding for the identifier.
pub fn lookup(name: &str) -> Option<Rc<Object>> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.name == name)
        .map(|builtin| Object::builtin(*builtin))
}

fn error(name: &'static str, message: String) -> EvaluationError {
    EvaluationError::BuiltinFunctionError { name, message }
}

fn check_argument_count(
    name: &'static str,
    expected: usize,
    args: &[Rc<Object>],
) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(error(
            name,
            format!(
                "wrong number of arguments. got={}, want={}",
                args.len(),
                expected
            ),
        ));
    }
    Ok(())
}

fn expect_array<'a>(
    name: &'static str,
    object: &'a Object,
) -> Result<&'a [Rc<Object>], EvaluationError> {
    match object {
        Object::Array(elements) => Ok(elements),
        other => Err(error(
            name,
            format!("argument must be ARRAY, got {}", other.kind()),
        )),
    }
}

fn builtin_len(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count("len", 1, &args)?;
    match args[0].as_ref() {
        Object::String(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        other => Err(error(
            "len",
            format!("argument not supported, got {}", other.kind()),
        )),
    }
}

fn builtin_first(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count("first", 1, &args)?;
    let elements = expect_array("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or_else(Object::null))
}

fn builtin_last(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count("last", 1, &args)?;
    let elements = expect_array("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or_else(Object::null))
}

fn builtin_rest(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count("rest", 1, &args)?;
    match expect_array("rest", &args[0])? {
        [] => Ok(Object::null()),
        [_, rest @ ..] => Ok(Object::array(rest.to_vec())),
    }
}

fn builtin_push(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count("push", 2, &args)?;
    let mut elements = expect_array("push", &args[0])?.to_vec();
    elements.push(args[1].clone());
    Ok(Object::array(elements))
}

fn builtin_puts(args: Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError> {
    for arg in &args {
        println!("{}", arg);
    }
    Ok(Object::null())
}
