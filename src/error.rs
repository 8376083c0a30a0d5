use crate::parser::SyntaxError;
use crate::value::RuntimeError;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Error

    Syntax{source: SyntaxError} = "{source}",
    Runtime{source: RuntimeError} = "{source}",
    User{message: String} = "{message}",
}

pub type Result<T> = std::result::Result<T, Error>;
