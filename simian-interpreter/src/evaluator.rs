use std::rc::Rc;

use crate::builtins;
use crate::environment::Environment;
use crate::object::{EvaluationError, HashKey, HashPairs, Object};
use simian_core::ast;
use simian_core::ast::Expression;

/// Any syntax tree node that can be evaluated on its own.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a ast::Program),
    Statement(&'a ast::Statement),
    Block(&'a ast::BlockStatement),
    Expression(&'a Expression),
}

impl<'a> From<&'a ast::Program> for Node<'a> {
    fn from(program: &'a ast::Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a ast::Statement> for Node<'a> {
    fn from(statement: &'a ast::Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a ast::BlockStatement> for Node<'a> {
    fn from(block: &'a ast::BlockStatement) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Signal that stops evaluation of the enclosing statements.
#[derive(Debug, PartialEq)]
enum Unwind {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for Unwind {
    fn from(error: EvaluationError) -> Self {
        Unwind::Error(error)
    }
}

type Evaluation = Result<Rc<Object>, Unwind>;

/// Evaluates `node` in `environment`.
///
/// Errors come back as `Object::Error`. A `return` escaping a bare statement
/// or block comes back as `Object::ReturnValue`; programs unwrap it.
pub fn evaluate<'a>(node: impl Into<Node<'a>>, environment: &Environment) -> Rc<Object> {
    let result = match node.into() {
        Node::Program(program) => return eval_program(program, environment),
        Node::Statement(statement) => eval_statement(statement, environment),
        Node::Block(block) => eval_block_statement(block, environment),
        Node::Expression(expression) => eval_expression(expression, environment),
    };
    match result {
        Ok(object) => object,
        Err(Unwind::Return(value)) => Rc::new(Object::ReturnValue(value)),
        Err(Unwind::Error(error)) => Object::error(error),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
pub fn eval_program(program: &ast::Program, environment: &Environment) -> Rc<Object> {
    let mut output = Object::null();
    for statement in &program.statements {
        match eval_statement(statement, environment) {
            Ok(object) => output = object,
            Err(Unwind::Return(value)) => return value,
            Err(Unwind::Error(error)) => {
                tracing::debug!(%error, "evaluation stopped");
                return Object::error(error);
            }
        }
    }
    output
}

fn eval_statement(statement: &ast::Statement, environment: &Environment) -> Evaluation {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => {
            let value = eval_expression(&statement.value, environment)?;
            Err(Unwind::Return(value))
        }
        ast::Statement::Let(statement) => {
            let value = eval_expression(&statement.value, environment)?;
            environment.set(statement.identifier.name.clone(), value.clone());
            Ok(value)
        }
    }
}

fn eval_block_statement(block: &ast::BlockStatement, environment: &Environment) -> Evaluation {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_expression(expression: &Expression, environment: &Environment) -> Evaluation {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.as_str())),
        Expression::ArrayLiteral(elements) => {
            Ok(Object::array(eval_expressions(elements, environment)?))
        }
        Expression::HashLiteral(literal) => {
            let mut pairs = HashPairs::new();
            for (key, value) in literal {
                let key = eval_expression(key, environment)?;
                let hash_key = HashKey::try_from(key.as_ref())?;
                let value = eval_expression(value, environment)?;
                pairs.insert(hash_key, key, value);
            }
            Ok(Object::hash(pairs))
        }
        Expression::Identifier(identifier) => environment
            .get(&identifier.name)
            .or_else(|| builtins::lookup(&identifier.name))
            .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()).into()),
        Expression::PrefixOperation(kind, right) => {
            let right = eval_expression(right, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            Rc::clone(body),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            apply_function(&function, arguments)
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            eval_index_expression(&left, &index)
        }
    }
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &Environment,
) -> Result<Vec<Rc<Object>>, Unwind> {
    expressions
        .iter()
        .map(|expression| eval_expression(expression, environment))
        .collect()
}

fn apply_function(function: &Rc<Object>, arguments: Vec<Rc<Object>>) -> Evaluation {
    match function.as_ref() {
        Object::Function(function) => {
            let environment = Environment::new_enclosed(&function.env);
            // Missing arguments bind to null; extra ones are ignored.
            for (position, parameter) in function.parameters.iter().enumerate() {
                let argument = arguments.get(position).cloned().unwrap_or_else(Object::null);
                environment.set(parameter.name.clone(), argument);
            }
            tracing::trace!(
                parameters = function.parameters.len(),
                arguments = arguments.len(),
                depth = environment.depth(),
                "applying function"
            );

            match eval_block_statement(&function.body, &environment) {
                Err(Unwind::Return(value)) => Ok(value),
                result => result,
            }
        }
        Object::Builtin(builtin) => {
            tracing::trace!(name = builtin.name, "applying builtin");
            Ok((builtin.func)(arguments)?)
        }
        other => Err(EvaluationError::CallNonFunction(other.kind()).into()),
    }
}

fn eval_prefix_operation(kind: ast::PrefixOperationKind, right: Rc<Object>) -> Evaluation {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, _) => Ok(Object::boolean(!right.is_truthy())),
        (ast::PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        _ => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: right.kind(),
        }
        .into()),
    }
}

fn eval_infix_operation(
    kind: ast::InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Evaluation {
    use ast::InfixOperationKind;
    match (kind, left.as_ref(), right.as_ref()) {
        (_, Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (InfixOperationKind::Plus, Object::String(left), Object::String(right)) => {
            Ok(Object::string(format!("{}{}", left, right)))
        }
        (InfixOperationKind::Equal, _, _) if left.kind() == right.kind() => {
            Ok(Object::boolean(same_value(&left, &right)))
        }
        (InfixOperationKind::NotEqual, _, _) if left.kind() == right.kind() => {
            Ok(Object::boolean(!same_value(&left, &right)))
        }
        _ if left.kind() != right.kind() => Err(EvaluationError::TypeMismatch {
            left: left.kind(),
            operation: kind,
            right: right.kind(),
        }
        .into()),
        _ => Err(EvaluationError::UnknownInfixOperator {
            left: left.kind(),
            operation: kind,
            right: right.kind(),
        }
        .into()),
    }
}

fn eval_integer_infix_operation(kind: ast::InfixOperationKind, left: i64, right: i64) -> Evaluation {
    use ast::InfixOperationKind::*;
    let result = match kind {
        Plus => Object::integer(left.wrapping_add(right)),
        Minus => Object::integer(left.wrapping_sub(right)),
        Multiply => Object::integer(left.wrapping_mul(right)),
        Divide if right == 0 => return Err(EvaluationError::DivisionByZero.into()),
        Divide => Object::integer(left.wrapping_div(right)),
        LessThan => Object::boolean(left < right),
        GreaterThan => Object::boolean(left > right),
        Equal => Object::boolean(left == right),
        NotEqual => Object::boolean(left != right),
    };
    Ok(result)
}

/// Equality for two objects of the same kind: by value for scalars, by
/// identity for everything else.
fn same_value(left: &Rc<Object>, right: &Rc<Object>) -> bool {
    match (left.as_ref(), right.as_ref()) {
        (Object::String(left), Object::String(right)) => left == right,
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        (Object::Builtin(left), Object::Builtin(right)) => left == right,
        _ => Rc::ptr_eq(left, right),
    }
}

fn eval_index_expression(left: &Rc<Object>, index: &Rc<Object>) -> Evaluation {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(elements), Object::Integer(position)) => Ok(usize::try_from(*position)
            .ok()
            .and_then(|position| elements.get(position))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(pairs), _) => {
            let key = HashKey::try_from(index.as_ref())?;
            Ok(pairs.get(&key).cloned().unwrap_or_else(Object::null))
        }
        _ => Err(EvaluationError::IndexNotSupported(left.kind()).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{evaluate, Environment};
    use crate::environment::Session;
    use crate::object::{EvaluationError, HashKey, Object, ObjectKind};
    use pretty_assertions::assert_eq;
    use simian_core::ast::{InfixOperationKind, PrefixOperationKind};
    use simian_core::parser::parse;

    fn run(input: &str) -> Rc<Object> {
        let program = parse(input).unwrap();
        evaluate(&program, &Environment::new())
    }

    fn test_evaluation(inputs: Vec<(&str, Rc<Object>)>) {
        for (input, output) in inputs {
            assert_eq!(run(input), output, "{}", input);
        }
    }

    fn test_errors(inputs: Vec<(&str, EvaluationError)>) {
        for (input, error) in inputs {
            assert_eq!(run(input), Object::error(error), "{}", input);
        }
    }

    #[test]
    fn test_literals() {
        test_evaluation(vec![
            ("5;", Object::integer(5)),
            ("true;", Object::boolean(true)),
            ("false;", Object::boolean(false)),
            ("\"hello\";", Object::string("hello")),
            ("", Object::null()),
        ]);
    }

    #[test]
    fn test_integer_expressions() {
        test_evaluation(vec![
            ("--5;", Object::integer(5)),
            ("-10;", Object::integer(-10)),
            ("5 + 5 + 5 + 5 - 10", Object::integer(10)),
            ("2 * 2 * 2 * 2 * 2", Object::integer(32)),
            ("-50 + 100 + -50", Object::integer(0)),
            ("20 + 2 * -10", Object::integer(0)),
            ("50 / 2 * 2 + 10", Object::integer(60)),
            ("3 * (3 * 3) + 10", Object::integer(37)),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Object::integer(50)),
            ("7 / 2", Object::integer(3)),
        ]);
    }

    #[test]
    fn test_boolean_expressions() {
        test_evaluation(vec![
            ("1 < 2", Object::boolean(true)),
            ("1 > 2", Object::boolean(false)),
            ("1 == 1", Object::boolean(true)),
            ("1 != 2", Object::boolean(true)),
            ("true == true", Object::boolean(true)),
            ("true != false", Object::boolean(true)),
            ("(1 < 2) == true", Object::boolean(true)),
            ("(1 > 2) == true", Object::boolean(false)),
            ("\"a\" == \"a\"", Object::boolean(true)),
            ("\"a\" != \"b\"", Object::boolean(true)),
            ("if (false) { 1 } == if (false) { 2 }", Object::boolean(true)),
            ("[1] == [1]", Object::boolean(false)),
            ("let a = [1]; a == a", Object::boolean(true)),
            ("len == len", Object::boolean(true)),
        ]);
    }

    #[test]
    fn test_bang_operator() {
        test_evaluation(vec![
            ("!true", Object::boolean(false)),
            ("!false", Object::boolean(true)),
            ("!5", Object::boolean(false)),
            ("!0", Object::boolean(false)),
            ("!!true", Object::boolean(true)),
            ("!!5", Object::boolean(true)),
            ("!if (false) { 1 }", Object::boolean(true)),
        ]);
        assert!(Rc::ptr_eq(&run("!5"), &Object::boolean(false)));
        assert!(Rc::ptr_eq(&run("!if (false) { 1 }"), &Object::boolean(true)));
    }

    #[test]
    fn test_if_else_expressions() {
        test_evaluation(vec![
            ("if (true) { 10 }", Object::integer(10)),
            ("if (false) { 10 }", Object::null()),
            ("if (1) { 10 }", Object::integer(10)),
            ("if (0) { 10 } else { 20 }", Object::integer(10)),
            ("if (1 < 2) { 10 }", Object::integer(10)),
            ("if (1 > 2) { 10 } else { 20 }", Object::integer(20)),
            ("if (if (false) { 1 }) { 10 } else { 20 }", Object::integer(20)),
        ]);
    }

    #[test]
    fn test_return_statements() {
        test_evaluation(vec![
            ("return 10;", Object::integer(10)),
            ("return 10; 9;", Object::integer(10)),
            ("return 2 * 5; 9;", Object::integer(10)),
            ("9; return 2 * 5; 9;", Object::integer(10)),
            (
                "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
                Object::integer(10),
            ),
            (
                "let f = fn(x) { return x; x + 10; }; f(10);",
                Object::integer(10),
            ),
            (
                "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
                Object::integer(20),
            ),
        ]);
    }

    #[test]
    fn test_error_handling() {
        use InfixOperationKind as Infix;
        test_errors(vec![
            (
                "5 + true;",
                EvaluationError::TypeMismatch {
                    left: ObjectKind::Integer,
                    operation: Infix::Plus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "5 + true; 5;",
                EvaluationError::TypeMismatch {
                    left: ObjectKind::Integer,
                    operation: Infix::Plus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "-true",
                EvaluationError::UnknownPrefixOperator {
                    operation: PrefixOperationKind::Minus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "true + false;",
                EvaluationError::UnknownInfixOperator {
                    left: ObjectKind::Boolean,
                    operation: Infix::Plus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "5; true + false; 5",
                EvaluationError::UnknownInfixOperator {
                    left: ObjectKind::Boolean,
                    operation: Infix::Plus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                EvaluationError::UnknownInfixOperator {
                    left: ObjectKind::Boolean,
                    operation: Infix::Plus,
                    right: ObjectKind::Boolean,
                },
            ),
            (
                "\"Hello\" - \"World\"",
                EvaluationError::UnknownInfixOperator {
                    left: ObjectKind::String,
                    operation: Infix::Minus,
                    right: ObjectKind::String,
                },
            ),
            (
                "1 == true",
                EvaluationError::TypeMismatch {
                    left: ObjectKind::Integer,
                    operation: Infix::Equal,
                    right: ObjectKind::Boolean,
                },
            ),
            ("foobar", EvaluationError::UnknownIdentifier("foobar".into())),
            (
                "let five = 5; five(1)",
                EvaluationError::CallNonFunction(ObjectKind::Integer),
            ),
            (
                r#"{"name": "Monkey"}[fn(x) { x }];"#,
                EvaluationError::InvalidHashKey(ObjectKind::Function),
            ),
            (
                r#"{[1]: 2}"#,
                EvaluationError::InvalidHashKey(ObjectKind::Array),
            ),
            ("1[0]", EvaluationError::IndexNotSupported(ObjectKind::Integer)),
            ("[1][true]", EvaluationError::IndexNotSupported(ObjectKind::Array)),
            ("10 / 0", EvaluationError::DivisionByZero),
        ]);
    }

    #[test]
    fn test_error_messages() {
        let tests = vec![
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("foobar", "identifier not found: foobar"),
            ("let s = \"a\"; s()", "not a function: STRING"),
            ("{}[[]]", "unusable as hash key: ARRAY"),
            ("true[0]", "index operator not supported: BOOLEAN"),
        ];

        for (input, message) in tests {
            match run(input).as_ref() {
                Object::Error(error) => assert_eq!(error.to_string(), message),
                other => panic!("expected an error for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_errors_stop_execution() {
        let env = Environment::new();
        let program = parse("let a = 1; let b = a + true; let c = 3;").unwrap();
        let result = evaluate(&program, &env);

        assert!(result.is_error());
        assert_eq!(env.get("a"), Some(Object::integer(1)));
        assert_eq!(env.get("b"), None);
        assert_eq!(env.get("c"), None);
    }

    #[test]
    fn test_let_statements() {
        test_evaluation(vec![
            ("let a = 5; a;", Object::integer(5)),
            ("let a = 5 * 5; a;", Object::integer(25)),
            ("let a = 5; let b = a; b;", Object::integer(5)),
            (
                "let a = 5; let b = a; let c = a + b + 5; c;",
                Object::integer(15),
            ),
            ("let a = 5;", Object::integer(5)),
        ]);
    }

    #[test]
    fn test_function_object() {
        let result = run("fn(x) { x + 2; };");

        match result.as_ref() {
            Object::Function(function) => {
                assert_eq!(function.parameters.len(), 1);
                assert_eq!(function.parameters[0].name.as_ref(), "x");
                assert_eq!(function.body.to_string(), "{ (x + 2) }");
            }
            other => panic!("expected a function, got {:?}", other),
        }
    }

    #[test]
    fn test_function_application() {
        test_evaluation(vec![
            ("let identity = fn(x) { x; }; identity(5);", Object::integer(5)),
            (
                "let identity = fn(x) { return x; }; identity(5);",
                Object::integer(5),
            ),
            ("let double = fn(x) { x * 2; }; double(5);", Object::integer(10)),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", Object::integer(10)),
            (
                "let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));",
                Object::integer(20),
            ),
            ("fn(x) { x; }(5)", Object::integer(5)),
            ("fn() { }()", Object::null()),
            (
                "let factorial = fn(n) { if (n < 2) { 1 } else { factorial(n - 1) * n } }; factorial(5)",
                Object::integer(120),
            ),
        ]);
    }

    #[test]
    fn test_argument_count_is_not_checked() {
        test_evaluation(vec![
            ("fn(a, b) { b }(1)", Object::null()),
            ("fn(a) { a }(1, 2, 3)", Object::integer(1)),
        ]);
    }

    #[test]
    fn test_closures() {
        test_evaluation(vec![
            (
                "let f = fn(x) { fn(y) { x + y } }; f(2)(3)",
                Object::integer(5),
            ),
            (
                "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);",
                Object::integer(4),
            ),
            (
                r#"
            let fa = fn() {
                let x = 5;
                let fb = fn() {
                    fn() { x }
                };
                fb
            };
            let temp = fa();
            let temp_ = temp();
            temp_()"#,
                Object::integer(5),
            ),
            (
                r#"
            let fa = fn() {
                let is_even = fn(x) {
                    if (x == 0) { true } else { is_odd(x - 1) }
                };
                let is_odd = fn(x) {
                    if (x == 0) { false } else { is_even(x - 1) }
                };
                is_even
            };
            let temp = fa();
            temp(3);"#,
                Object::boolean(false),
            ),
        ]);
    }

    #[test]
    fn test_recursive_functions_are_freed_with_their_session() {
        let session = Session::new();
        let program = parse(
            r#"
            let countdown = fn(n) { if (n == 0) { 0 } else { countdown(n - 1) } };
            let outer = fn() {
                let inner = fn(n) { if (n == 0) { 0 } else { inner(n - 1) } };
                inner
            };
            let inner = outer();
            countdown(3) + inner(3);"#,
        )
        .unwrap();

        assert_eq!(evaluate(&program, session.environment()), Object::integer(0));
        let weak = |name: &str| Rc::downgrade(&session.environment().get(name).unwrap());
        let (countdown, inner) = (weak("countdown"), weak("inner"));

        drop(session);

        assert!(countdown.upgrade().is_none());
        assert!(inner.upgrade().is_none());
    }

    #[test]
    fn test_bindings_inside_calls_do_not_leak() {
        let env = Environment::new();
        let program = parse("let x = 1; let f = fn() { let x = 2; x }; f();").unwrap();

        assert_eq!(evaluate(&program, &env), Object::integer(2));
        assert_eq!(env.get("x"), Some(Object::integer(1)));
    }

    #[test]
    fn test_strings() {
        test_evaluation(vec![
            (r#""Hello World!""#, Object::string("Hello World!")),
            (r#""Hello" + " " + "World!""#, Object::string("Hello World!")),
            (r#"len("four")"#, Object::integer(4)),
        ]);
    }

    #[test]
    fn test_builtins_are_shadowed_by_bindings() {
        test_evaluation(vec![
            ("let len = fn(x) { 42 }; len([1])", Object::integer(42)),
            ("len([1, 2, 3])", Object::integer(3)),
            ("rest(push([1], 2))", Object::array(vec![Object::integer(2)])),
        ]);
    }

    #[test]
    fn test_array_literals_and_indexing() {
        test_evaluation(vec![
            (
                "[1, 2 * 2, 3 + 3]",
                Object::array(vec![
                    Object::integer(1),
                    Object::integer(4),
                    Object::integer(6),
                ]),
            ),
            ("[1, 2, 3][0]", Object::integer(1)),
            ("[1, 2, 3][1]", Object::integer(2)),
            ("[1, 2, 3][2]", Object::integer(3)),
            ("let i = 0; [1][i];", Object::integer(1)),
            ("[1, 2, 3][1 + 1];", Object::integer(3)),
            ("let myArray = [1, 2, 3]; myArray[2];", Object::integer(3)),
            (
                "let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                Object::integer(6),
            ),
            ("[1, 2, 3][3]", Object::null()),
            ("[1, 2, 3][-1]", Object::null()),
            ("[][0]", Object::null()),
        ]);
    }

    #[test]
    fn test_array_errors_short_circuit() {
        test_errors(vec![(
            "[1, -true, missing]",
            EvaluationError::UnknownPrefixOperator {
                operation: PrefixOperationKind::Minus,
                right: ObjectKind::Boolean,
            },
        )]);
    }

    #[test]
    fn test_hash_literals() {
        let result = run(r#"
            let two = "two";
            {
                "one": 10 - 9,
                two: 1 + 1,
                "thr" + "ee": 6 / 2,
                4: 4,
                true: 5,
                false: 6
            }"#);

        let Object::Hash(pairs) = result.as_ref() else {
            panic!("expected a hash, got {:?}", result);
        };
        let expected = vec![
            (HashKey::String("one".into()), 1),
            (HashKey::String("two".into()), 2),
            (HashKey::String("three".into()), 3),
            (HashKey::Integer(4), 4),
            (HashKey::Boolean(true), 5),
            (HashKey::Boolean(false), 6),
        ];
        assert_eq!(pairs.len(), expected.len());
        for (key, value) in expected {
            assert_eq!(pairs.get(&key), Some(&Object::integer(value)));
        }
        assert_eq!(
            result.to_string(),
            "{one: 1, two: 2, three: 3, 4: 4, true: 5, false: 6}"
        );
    }

    #[test]
    fn test_hash_indexing() {
        test_evaluation(vec![
            (r#"{"one": 1, "two": 2}["one"]"#, Object::integer(1)),
            (r#"{"foo": 5}["foo"]"#, Object::integer(5)),
            (r#"{"foo": 5}["bar"]"#, Object::null()),
            (r#"let key = "foo"; {"foo": 5}[key]"#, Object::integer(5)),
            (r#"{}["foo"]"#, Object::null()),
            ("{5: 5}[5]", Object::integer(5)),
            ("{true: 5}[true]", Object::integer(5)),
            ("{false: 5}[false]", Object::integer(5)),
            ("{1: 1, 1: 2}[1]", Object::integer(2)),
        ]);
        test_errors(vec![
            (
                "{}[[]]",
                EvaluationError::InvalidHashKey(ObjectKind::Array),
            ),
            (
                "{}[if (false) { 1 }]",
                EvaluationError::InvalidHashKey(ObjectKind::Null),
            ),
            (
                "{}[{}]",
                EvaluationError::InvalidHashKey(ObjectKind::Hash),
            ),
        ]);
    }

    #[test]
    fn test_evaluate_single_nodes() {
        let env = Environment::new();
        let program = parse("return 1 + 2;").unwrap();

        assert_eq!(
            evaluate(&program.statements[0], &env),
            Rc::new(Object::ReturnValue(Object::integer(3)))
        );
        assert_eq!(evaluate(&program, &env), Object::integer(3));
    }
}
