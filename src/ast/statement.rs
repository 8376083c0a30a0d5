use super::Expression;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Foreach(ForeachStatement),
    Repeat(RepeatStatement),
    Definition(Arc<Definition>),
    Return(Expression),
    Break,
    Continue,
    Expr(Expression),
    Empty,
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Block(stmt) => write!(f, "{}", stmt),
            Self::If(stmt) => write!(f, "{}", stmt),
            Self::While(stmt) => write!(f, "{}", stmt),
            Self::For(stmt) => write!(f, "{}", stmt),
            Self::Foreach(stmt) => write!(f, "{}", stmt),
            Self::Repeat(stmt) => write!(f, "{}", stmt),
            Self::Definition(def) => write!(f, "{}", def),
            Self::Return(expr) => write!(f, "ret {};", expr),
            Self::Break => write!(f, "break;"),
            Self::Continue => write!(f, "continue;"),
            Self::Expr(expr) => write!(f, "{};", expr),
            Self::Empty => write!(f, ";"),
        }
    }
}

fn write_statements(f: &mut Formatter, statements: &[Statement]) -> std::fmt::Result {
    write!(f, "{{ ")?;
    for stmt in statements {
        write!(f, "{} ", stmt)?;
    }
    write!(f, "}}")
}

/// A braced statement list that opens its own scope frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_statements(f, &self.statements)
    }
}

/// The body of an `if` branch or a loop. Runs in the frame of the construct
/// that owns it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopBody {
    pub statements: Vec<Statement>,
}

impl Display for LoopBody {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_statements(f, &self.statements)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: LoopBody,
    pub alternatives: Vec<(Expression, LoopBody)>,
    pub otherwise: Option<LoopBody>,
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        for (condition, body) in &self.alternatives {
            write!(f, " elif ({}) {}", condition, body)?;
        }
        if let Some(body) = &self.otherwise {
            write!(f, " else {}", body)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: LoopBody,
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Expression,
    pub condition: Expression,
    pub step: Expression,
    pub body: LoopBody,
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "for ({}, {}, {}) {}",
            self.init, self.condition, self.step, self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeachStatement {
    pub variable: String,
    pub iterable: Expression,
    pub body: LoopBody,
}

impl Display for ForeachStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "for ({} : {}) {}",
            self.variable, self.iterable, self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub count: Expression,
    pub body: LoopBody,
}

impl Display for RepeatStatement {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "repeat ({}) {}", self.count, self.body)
    }
}

/// A function definition. Function values hold it through an `Arc`, so the
/// body is never copied when a function is passed around.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub body: Block,
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "def {}", name)?,
            None => write!(f, "def ")?,
        }
        write!(f, "({}) {}", self.parameters.join(", "), self.body)
    }
}
