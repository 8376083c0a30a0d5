use super::ValueKind;
use custom_error::custom_error;
use std::io;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub RuntimeError

    UndefinedIdentifier{name: String} = "undefined identifier: {name}",
    UnknownPrefixOperator{operator: String, operand: ValueKind} = "unknown operator: {operator}{operand}",
    UnknownInfixOperator{left: ValueKind, operator: String, right: ValueKind} = "unknown operator: {left} {operator} {right}",
    TypeMismatch{left: ValueKind, operator: String, right: ValueKind} = "type mismatch: {left} {operator} {right}",
    NotAFunction{name: String, type_name: ValueKind} = "not a function: {name} is {type_name}",
    NotIndexable{type_name: ValueKind} = "index operator not supported: {type_name}",
    UnsupportedArgType{fn_name: &'static str, type_name: ValueKind} = "argument to `{fn_name}` not supported, got {type_name}",
    IncorrectArity{name: String, got: usize, want: usize} = "wrong number of arguments to `{name}`. got={got}, want={want}",
    OutOfBounds{index: i64, len: usize} = "index {index} out of bounds for length {len}",
    InvalidRepeatCount{count: String} = "repeat count must be a number >= 0, got {count}",
    DivisionByZero = "division by zero in `%`",
    InvalidIncrementTarget{operator: String} = "operand of `{operator}` must be a variable",
    ConversionFailed{text: String} = "cannot convert \"{text}\" to a number",
    RecursiveImport{name: String} = "recursive import of '{name}'",
    UnknownImportKind{kind: String} = "unknown import kind '{kind}', expected LIB or FILE",
    ImportFailed{name: String, reason: String} = "cannot import '{name}': {reason}",
    Unsupported{construct: &'static str} = "unsupported construct: {construct}",
    SignalOutsideLoop{signal: &'static str} = "`{signal}` outside of a loop",
    CallDepthExceeded{depth: usize} = "maximum call depth of {depth} exceeded",
    EvalDepthExceeded{depth: usize} = "maximum evaluation depth of {depth} exceeded",
    Io{reason: String} = "i/o error: {reason}",
}

impl RuntimeError {
    pub fn binary_op_error(left: ValueKind, operator: impl ToString, right: ValueKind) -> Self {
        let operator = operator.to_string();
        if left == right {
            Self::UnknownInfixOperator {
                left,
                operator,
                right,
            }
        } else {
            Self::TypeMismatch {
                left,
                operator,
                right,
            }
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
