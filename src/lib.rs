pub mod ast;
mod builtins;
mod config;
mod error;
mod evaluator;
mod interpreter;
mod lexer;
mod parser;
pub mod repl;
mod scope;
pub mod source;
mod token;
mod value;

pub use config::Config;
pub use error::Error;
pub use interpreter::{Interpreter, Status};
pub use lexer::Lexer;
pub use parser::{parse, Parser, SyntaxError};
pub use scope::ScopeManager;
pub use source::{FileLoader, MemoryLoader, SourceLoader};
pub use token::{Token, TokenKind};
pub use value::{RuntimeError, Value, ValueKind};
