use crate::ast::{BinaryOperator, Definition, UnaryOperator};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use strum_macros::EnumDiscriminants;

mod runtime_error;
pub use runtime_error::RuntimeError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A runtime value.
///
/// `Text` keeps the quote characters of the literal it came from, so the
/// stored string for `"hi"` is four characters long. Use [`Value::text`] to
/// build one from raw content and [`Value::content`] to read it back.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, strum_macros::Display))]
#[strum_discriminants(name(ValueKind))]
pub enum Value {
    Number(f64),
    Text(String),
    Function(Arc<Definition>),
    List(Vec<Value>),
    None,
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(_) => write!(f, "{}", self.content().unwrap_or_default()),
            Self::Function(def) => match &def.name {
                Some(name) => write!(f, "<def {}>", name),
                None => write!(f, "<def>"),
            },
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Value::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::None => write!(f, "none"),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::None
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Number(if b { 1.0 } else { 0.0 })
    }
}

fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

impl Value {
    /// Builds a `Text` value from unquoted content.
    pub fn text(content: &str) -> Self {
        Self::Text(format!("\"{}\"", content))
    }

    /// The unquoted content of a `Text` value.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text(raw) => Some(strip_quotes(raw)),
            _ => None,
        }
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::Text(_) => !self.content().unwrap_or_default().is_empty(),
            Self::Function(_) => true,
            Self::List(items) => !items.is_empty(),
            Self::None => false,
        }
    }

    pub fn binary(operator: BinaryOperator, left: Value, right: Value) -> Result<Value> {
        use BinaryOperator::*;

        match operator {
            And => Ok((left.is_truthy() && right.is_truthy()).into()),
            Or => Ok((left.is_truthy() || right.is_truthy()).into()),
            Index => left.index(&right),
            Dot => Err(RuntimeError::Unsupported {
                construct: "member access",
            }),
            Eq | NotEq => {
                let equal = match (&left, &right) {
                    (Self::Number(x), Self::Number(y)) => x == y,
                    (Self::Text(_), Self::Text(_)) => left.content() == right.content(),
                    _ => {
                        return Err(RuntimeError::binary_op_error(
                            left.kind(),
                            operator,
                            right.kind(),
                        ))
                    }
                };
                Ok((equal == (operator == Eq)).into())
            }
            Plus => match (&left, &right) {
                (Self::Number(x), Self::Number(y)) => Ok((x + y).into()),
                (Self::Text(_), Self::Text(_)) => Ok(Self::text(&format!(
                    "{}{}",
                    left.content().unwrap_or_default(),
                    right.content().unwrap_or_default()
                ))),
                _ => Err(RuntimeError::binary_op_error(
                    left.kind(),
                    operator,
                    right.kind(),
                )),
            },
            Minus | Asterisk | Slash | Percent | Caret | Lt | Le | Gt | Ge => {
                match (&left, &right) {
                    (Self::Number(x), Self::Number(y)) => eval_number_infix(operator, *x, *y),
                    _ => Err(RuntimeError::binary_op_error(
                        left.kind(),
                        operator,
                        right.kind(),
                    )),
                }
            }
        }
    }

    /// Applies `!` or prefix `-`. The increment family needs a binding and is
    /// handled by the evaluator.
    pub fn prefix(operator: UnaryOperator, operand: Value) -> Result<Value> {
        match (operator, &operand) {
            (UnaryOperator::Bang, Self::Number(n)) => Ok((*n == 0.0).into()),
            (UnaryOperator::Minus, Self::Number(n)) => Ok((-n).into()),
            _ => Err(RuntimeError::UnknownPrefixOperator {
                operator: operator.to_string(),
                operand: operand.kind(),
            }),
        }
    }

    fn index(&self, index: &Value) -> Result<Value> {
        let position = match index {
            Self::Number(n) => n.trunc(),
            other => {
                return Err(RuntimeError::binary_op_error(
                    self.kind(),
                    BinaryOperator::Index,
                    other.kind(),
                ))
            }
        };

        let checked = |len: usize| {
            if position < 0.0 || position >= len as f64 {
                Err(RuntimeError::OutOfBounds {
                    index: position as i64,
                    len,
                })
            } else {
                Ok(position as usize)
            }
        };

        match self {
            Self::List(items) => Ok(items[checked(items.len())?].clone()),
            Self::Text(_) => {
                let chars: Vec<char> = self.content().unwrap_or_default().chars().collect();
                let c = chars[checked(chars.len())?];
                Ok(Self::text(&c.to_string()))
            }
            other => Err(RuntimeError::NotIndexable {
                type_name: other.kind(),
            }),
        }
    }
}

fn eval_number_infix(operator: BinaryOperator, left: f64, right: f64) -> Result<Value> {
    use BinaryOperator::*;

    Ok(match operator {
        Plus => (left + right).into(),
        Minus => (left - right).into(),
        Asterisk => (left * right).into(),
        Slash => (left / right).into(),
        Caret => left.powf(right).into(),
        Percent => {
            let (left, right) = (left.trunc(), right.trunc());
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            (left % right).into()
        }
        Lt => (left < right).into(),
        Le => (left <= right).into(),
        Gt => (left > right).into(),
        Ge => (left >= right).into(),
        _ => {
            return Err(RuntimeError::UnknownInfixOperator {
                left: ValueKind::Number,
                operator: operator.to_string(),
                right: ValueKind::Number,
            })
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_number_arithmetic() {
        use BinaryOperator::*;

        let cases = vec![
            (Plus, 1.5, 2.0, 3.5),
            (Minus, 1.0, 3.0, -2.0),
            (Asterisk, 4.0, 2.5, 10.0),
            (Slash, 1.0, 4.0, 0.25),
            (Caret, 2.0, 10.0, 1024.0),
            (Percent, 7.0, 3.0, 1.0),
            (Percent, 7.9, 3.2, 1.0),
            (Percent, -7.0, 3.0, -1.0),
            (Lt, 1.0, 2.0, 1.0),
            (Le, 2.0, 2.0, 1.0),
            (Gt, 1.0, 2.0, 0.0),
            (Ge, 1.0, 2.0, 0.0),
            (Eq, 2.0, 2.0, 1.0),
            (NotEq, 2.0, 2.0, 0.0),
            (And, 1.0, 0.0, 0.0),
            (Or, 1.0, 0.0, 1.0),
        ];

        for (op, left, right, expected) in cases {
            assert_eq!(
                Value::binary(op, num(left), num(right)),
                Ok(num(expected)),
                "{} {} {}",
                left,
                op,
                right
            );
        }
    }

    #[test]
    fn test_division_follows_ieee() {
        assert_eq!(
            Value::binary(BinaryOperator::Slash, num(1.0), num(0.0)),
            Ok(num(f64::INFINITY))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Percent, num(1.0), num(0.5)),
            Err(RuntimeError::DivisionByZero)
        );
    }

    #[test]
    fn test_text_operations() {
        let hello = Value::Text("\"hello \"".to_owned());
        let world = Value::text("world");

        assert_eq!(
            Value::binary(BinaryOperator::Plus, hello.clone(), world.clone()),
            Ok(Value::Text("\"hello world\"".to_owned()))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Eq, world.clone(), Value::text("world")),
            Ok(num(1.0))
        );
        assert_eq!(
            Value::binary(BinaryOperator::NotEq, hello, world),
            Ok(num(1.0))
        );
    }

    #[test]
    fn test_kind_errors() {
        let cases = vec![
            (
                BinaryOperator::Plus,
                num(1.0),
                Value::text("a"),
                "type mismatch: Number + Text",
            ),
            (
                BinaryOperator::Minus,
                Value::text("a"),
                Value::text("b"),
                "unknown operator: Text - Text",
            ),
            (
                BinaryOperator::Lt,
                Value::text("a"),
                Value::text("b"),
                "unknown operator: Text < Text",
            ),
            (
                BinaryOperator::Eq,
                num(1.0),
                Value::None,
                "type mismatch: Number == None",
            ),
            (
                BinaryOperator::Dot,
                num(1.0),
                num(2.0),
                "unsupported construct: member access",
            ),
        ];

        for (op, left, right, message) in cases {
            let err = Value::binary(op, left, right).expect_err("operation should fail");
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_indexing() {
        let list = Value::List(vec![num(1.0), Value::text("two"), num(3.0)]);

        assert_eq!(
            Value::binary(BinaryOperator::Index, list.clone(), num(1.0)),
            Ok(Value::text("two"))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, list.clone(), num(2.7)),
            Ok(num(3.0))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, Value::text("abc"), num(2.0)),
            Ok(Value::text("c"))
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, list.clone(), num(3.0)),
            Err(RuntimeError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, Value::text("abc"), num(-1.0)),
            Err(RuntimeError::OutOfBounds { index: -1, len: 3 })
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, num(5.0), num(0.0)),
            Err(RuntimeError::NotIndexable {
                type_name: ValueKind::Number
            })
        );
        assert_eq!(
            Value::binary(BinaryOperator::Index, list, Value::text("0")),
            Err(RuntimeError::TypeMismatch {
                left: ValueKind::List,
                operator: "[]".to_owned(),
                right: ValueKind::Text,
            })
        );
    }

    #[test]
    fn test_truthiness() {
        let cases = vec![
            (num(0.0), false),
            (num(-0.0), false),
            (num(0.5), true),
            (Value::Text("\"\"".to_owned()), false),
            (Value::Text(String::new()), false),
            (Value::text("0"), true),
            (Value::List(vec![]), false),
            (Value::List(vec![num(0.0)]), true),
            (Value::None, false),
        ];

        for (value, expected) in cases {
            assert_eq!(value.is_truthy(), expected, "truthiness of {:?}", value);
        }
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(Value::prefix(UnaryOperator::Bang, num(0.0)), Ok(num(1.0)));
        assert_eq!(Value::prefix(UnaryOperator::Bang, num(3.0)), Ok(num(0.0)));
        assert_eq!(Value::prefix(UnaryOperator::Minus, num(3.0)), Ok(num(-3.0)));
        assert_eq!(
            Value::prefix(UnaryOperator::Minus, Value::text("x"))
                .unwrap_err()
                .to_string(),
            "unknown operator: -Text"
        );
    }

    #[test]
    fn test_display() {
        let cases = vec![
            (num(3.0), "3"),
            (num(2.5), "2.5"),
            (Value::text("hi"), "hi"),
            (Value::List(vec![num(1.0), Value::text("a")]), "[1, a]"),
            (Value::None, "none"),
        ];

        for (value, expected) in cases {
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn test_kind_names() {
        let cases = vec![
            (num(1.0), "Number"),
            (Value::text("a"), "Text"),
            (Value::List(vec![]), "List"),
            (Value::None, "None"),
        ];

        for (value, expected) in cases {
            assert_eq!(value.kind().to_string(), expected);
        }
    }
}
