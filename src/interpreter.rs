use crate::config::Config;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::scope::ScopeManager;
use crate::source::{FileLoader, SourceLoader};
use crate::value::{RuntimeError, Value};
use log::debug;
use std::io::{self, BufRead, BufReader, Write};
use std::panic;
use std::thread;

/// Stack reserved for the thread that parses and evaluates each program.
/// Together with `MAX_NESTING` and the configured depth limits it keeps deep
/// but legal programs from overflowing.
pub static EVAL_STACK_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Err,
}

/// Owns everything evaluation touches outside the scope stack: the output
/// and input streams, the loader used by `import`, and the limits.
pub struct Interpreter {
    config: Config,
    output: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
    loader: Box<dyn SourceLoader>,
}

impl Interpreter {
    /// An interpreter wired to stdout, stdin and the file system.
    pub fn new(config: Config) -> Self {
        let loader = FileLoader::from(&config);
        Self {
            config,
            output: Box::new(io::stdout()),
            input: Box::new(BufReader::new(io::stdin())),
            loader: Box::new(loader),
        }
    }

    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn with_input(mut self, input: impl BufRead + Send + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    pub(crate) fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    /// Reads one line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(len);
        Ok(Some(line))
    }

    /// Parses and evaluates `source` against `scopes`, returning the value of
    /// the last statement or of a top-level `ret`.
    ///
    /// The work happens on a scoped thread with [`EVAL_STACK_SIZE`] bytes of
    /// stack, so the caller's own stack size does not matter.
    pub fn run(&mut self, source: &str, scopes: &mut ScopeManager) -> Result<Value> {
        debug!("executing {} bytes of source", source.len());

        let result = thread::scope(|scope| -> Result<Value> {
            let worker = thread::Builder::new()
                .name("canvas-eval".to_owned())
                .stack_size(EVAL_STACK_SIZE)
                .spawn_scoped(scope, || self.evaluate(source, scopes))
                .map_err(RuntimeError::from)?;
            worker
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload))
        });

        debug!("execution finished, ok: {}", result.is_ok());
        result
    }

    fn evaluate(&mut self, source: &str, scopes: &mut ScopeManager) -> Result<Value> {
        let program = parser::parse(source)?;
        let result = Evaluator::new(self, scopes).eval_program(&program);
        self.output.flush().map_err(RuntimeError::from)?;
        result
    }

    /// Like [`Interpreter::run`], but reports a failure as one `ERROR:` line
    /// on the output.
    pub fn execute(&mut self, source: &str, scopes: &mut ScopeManager) -> Status {
        match self.run(source, scopes) {
            Ok(_) => Status::Ok,
            Err(err) => {
                let _ = writeln!(self.output, "ERROR: {}", err);
                let _ = self.output.flush();
                Status::Err
            }
        }
    }
}
