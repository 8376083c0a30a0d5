use crate::config::Config;
use crate::interpreter::Interpreter;
use crate::scope::ScopeManager;
use crate::value::Value;
use std::io::{self, Write};

static PROMPT: &str = ">> ";

/// Reads lines from stdin and executes each one against a single scope
/// stack, so bindings persist between lines.
pub fn start(config: Config) {
    let mut interpreter = Interpreter::new(config);
    let mut scopes = ScopeManager::new();
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();

        let line = match interpreter.read_line() {
            Ok(Some(line)) => line,
            _ => return,
        };

        match interpreter.run(&line, &mut scopes) {
            Ok(Value::None) => {}
            Ok(value) => println!("{}", value),
            Err(err) => println!("ERROR: {}", err),
        }
    }
}
