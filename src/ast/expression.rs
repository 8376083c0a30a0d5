use super::Definition;
use crate::value::Value;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Literal(Value),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Assign(AssignExpression),
    Call(CallExpression),
    List(Vec<Expression>),
    Function(Arc<Definition>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "{}", name),
            Self::Literal(Value::Text(raw)) => write!(f, "{}", raw),
            Self::Literal(value) => write!(f, "{}", value),
            Self::Unary(expr) => write!(f, "{}", expr),
            Self::Binary(expr) => write!(f, "{}", expr),
            Self::Assign(expr) => write!(f, "{}", expr),
            Self::Call(expr) => write!(f, "{}", expr),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(Expression::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Self::Function(def) => write!(f, "{}", def),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum BinaryOperator {
    #[strum(to_string = "&&")]
    And,
    #[strum(to_string = "||")]
    Or,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    NotEq,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "%")]
    Percent,
    #[strum(to_string = "^")]
    Caret,
    #[strum(to_string = ".")]
    Dot,
    #[strum(to_string = "[]")]
    Index,
}

impl BinaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "&&" => Self::And,
            "||" => Self::Or,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            ">=" => Self::Ge,
            ">" => Self::Gt,
            "<=" => Self::Le,
            "<" => Self::Lt,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Asterisk,
            "/" => Self::Slash,
            "%" => Self::Percent,
            "^" => Self::Caret,
            "." => Self::Dot,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum UnaryOperator {
    #[strum(to_string = "!")]
    Bang,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "++")]
    PreIncrement,
    #[strum(to_string = "--")]
    PreDecrement,
    #[strum(to_string = "++")]
    PostIncrement,
    #[strum(to_string = "--")]
    PostDecrement,
}

impl UnaryOperator {
    pub fn prefix_from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "!" => Self::Bang,
            "-" => Self::Minus,
            "++" => Self::PreIncrement,
            "--" => Self::PreDecrement,
            _ => return None,
        })
    }

    pub fn postfix_from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "++" => Some(Self::PostIncrement),
            "--" => Some(Self::PostDecrement),
            _ => None,
        }
    }

    /// The amount an increment-family operator adds to its variable.
    pub fn step(&self) -> Option<f64> {
        match self {
            Self::PreIncrement | Self::PostIncrement => Some(1.0),
            Self::PreDecrement | Self::PostDecrement => Some(-1.0),
            Self::Bang | Self::Minus => None,
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AssignOperator {
    #[strum(to_string = "=")]
    Assign,
    #[strum(to_string = "+=")]
    PlusAssign,
    #[strum(to_string = "-=")]
    MinusAssign,
    #[strum(to_string = "*=")]
    AsteriskAssign,
    #[strum(to_string = "/=")]
    SlashAssign,
    #[strum(to_string = "%=")]
    PercentAssign,
    #[strum(to_string = "^=")]
    CaretAssign,
}

impl AssignOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "=" => Self::Assign,
            "+=" => Self::PlusAssign,
            "-=" => Self::MinusAssign,
            "*=" => Self::AsteriskAssign,
            "/=" => Self::SlashAssign,
            "%=" => Self::PercentAssign,
            "^=" => Self::CaretAssign,
            _ => return None,
        })
    }

    /// The operator a compound assignment applies, `None` for plain `=`.
    pub fn binary(&self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::PlusAssign => Some(BinaryOperator::Plus),
            Self::MinusAssign => Some(BinaryOperator::Minus),
            Self::AsteriskAssign => Some(BinaryOperator::Asterisk),
            Self::SlashAssign => Some(BinaryOperator::Slash),
            Self::PercentAssign => Some(BinaryOperator::Percent),
            Self::CaretAssign => Some(BinaryOperator::Caret),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

impl Display for UnaryExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.operator.is_postfix() {
            write!(f, "({}{})", self.operand, self.operator)
        } else {
            write!(f, "({}{})", self.operator, self.operand)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

impl Display for BinaryExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.operator {
            BinaryOperator::Index => write!(f, "({}[{}])", self.left, self.right),
            BinaryOperator::Dot => write!(f, "({}.{})", self.left, self.right),
            op => write!(f, "({} {} {})", self.left, op, self.right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpression {
    pub operator: AssignOperator,
    pub name: String,
    pub value: Box<Expression>,
}

impl Display for AssignExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.operator, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let arguments: Vec<String> = self.arguments.iter().map(Expression::to_string).collect();

        write!(f, "{}({})", self.name, arguments.join(", "))
    }
}
