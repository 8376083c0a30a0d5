use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use crate::source::ImportKind;
use crate::value::{RuntimeError, Value};
use lazy_static::lazy_static;
use std::collections::HashMap;

pub type Builtin = fn(&mut Evaluator<'_>, Vec<Value>) -> Result<Value>;

fn check_arity(name: &str, args: &[Value], want: usize) -> Result<()> {
    if args.len() != want {
        return Err(RuntimeError::IncorrectArity {
            name: name.to_owned(),
            got: args.len(),
            want,
        }
        .into());
    }
    Ok(())
}

fn single_arg(name: &str, args: Vec<Value>) -> Result<Value> {
    check_arity(name, &args, 1)?;
    Ok(args.into_iter().next().unwrap_or_default())
}

fn text_arg<'v>(fn_name: &'static str, value: &'v Value) -> Result<&'v str> {
    value.content().ok_or_else(|| {
        RuntimeError::UnsupportedArgType {
            fn_name,
            type_name: value.kind(),
        }
        .into()
    })
}

/// Decodes `\n` and `\\`. Any other backslash is kept as written.
fn decode_escapes(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            }
            None => decoded.push('\\'),
        }
    }

    decoded
}

/// Matches `-?[0-9]+(\.[0-9]*)?`. Exponents, signs other than a leading
/// `-`, and words like `inf` or `nan` are not numbers here.
fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn print(ev: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    let mut line: String = args.iter().map(Value::to_string).collect();
    line.push('\n');
    ev.write_output(&line)?;
    Ok(Value::None)
}

fn printf(ev: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    let mut args = args.into_iter();
    let format = match args.next() {
        Some(format) => format,
        None => {
            return Err(RuntimeError::IncorrectArity {
                name: "printf".to_owned(),
                got: 0,
                want: 1,
            }
            .into())
        }
    };
    let values: Vec<Value> = args.collect();

    let segments: Vec<&str> = text_arg("printf", &format)?.split("%s").collect();
    if segments.len() - 1 != values.len() {
        return Err(RuntimeError::IncorrectArity {
            name: "printf".to_owned(),
            got: values.len() + 1,
            want: segments.len(),
        }
        .into());
    }

    let mut text = String::new();
    for (i, segment) in segments.iter().enumerate() {
        text.push_str(&decode_escapes(segment));
        if let Some(value) = values.get(i) {
            text.push_str(&value.to_string());
        }
    }

    ev.write_output(&text)?;
    Ok(Value::None)
}

fn input(ev: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    let prompt: String = args.iter().map(Value::to_string).collect();
    ev.write_output(&prompt)?;
    let line = ev.read_input()?;
    Ok(Value::text(&line))
}

fn to_num(_: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    let arg = single_arg("to_num", args)?;
    let text = text_arg("to_num", &arg)?.trim();
    let failed = || -> Error {
        RuntimeError::ConversionFailed {
            text: text.to_owned(),
        }
        .into()
    };

    if !is_decimal(text) {
        return Err(failed());
    }
    text.parse::<f64>().map(Value::Number).map_err(|_| failed())
}

fn to_str(_: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    match single_arg("to_str", args)? {
        Value::Number(n) => Ok(Value::text(&n.to_string())),
        other => Err(RuntimeError::UnsupportedArgType {
            fn_name: "to_str",
            type_name: other.kind(),
        }
        .into()),
    }
}

fn error(_: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    let arg = single_arg("error", args)?;
    Err(Error::User {
        message: text_arg("error", &arg)?.to_owned(),
    })
}

fn import(ev: &mut Evaluator<'_>, args: Vec<Value>) -> Result<Value> {
    check_arity("import", &args, 2)?;
    let kind = ImportKind::from_argument(text_arg("import", &args[0])?)?;
    let name = text_arg("import", &args[1])?;
    ev.import(kind, name)
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        ("print", print as Builtin),
        ("printf", printf as Builtin),
        ("input", input as Builtin),
        ("to_num", to_num as Builtin),
        ("to_str", to_str as Builtin),
        ("error", error as Builtin),
        ("import", import as Builtin),
    ]
    .into_iter()
    .collect();
}
