use canvas::source::load_source_unit;
use canvas::{repl, Config, Interpreter, ScopeManager, Status};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Runs a canvas script, or starts a REPL when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to execute.
    file: Option<PathBuf>,

    /// Directory searched by `import("LIB", name)`.
    #[arg(long = "lib", env = "CANVAS_LIB", default_value = ".")]
    lib_dir: PathBuf,

    /// Maximum depth of nested function calls.
    #[arg(long = "max-depth", default_value_t = Config::default().max_call_depth)]
    max_depth: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        max_call_depth: args.max_depth,
        lib_dir: args.lib_dir,
        ..Config::default()
    };

    let path = match args.file {
        Some(path) => path,
        None => {
            println!("canvas REPL, end input to quit");
            repl::start(config);
            return;
        }
    };

    let text = fs::read_to_string(&path).unwrap_or_else(|err| {
        eprintln!("Failed to read '{}': {}", path.display(), err);
        process::exit(1);
    });

    let mut interpreter = Interpreter::new(config);
    let mut scopes = ScopeManager::new();
    if interpreter.execute(&load_source_unit(&text), &mut scopes) == Status::Err {
        println!("Exited with errors.");
        process::exit(1);
    }
}
