use crate::ast::{
    AssignExpression, BinaryExpression, BinaryOperator, CallExpression, Definition, Expression,
    ForStatement, IfStatement, LoopBody, Program, RepeatStatement, Statement, UnaryExpression,
    WhileStatement,
};
use crate::builtins::BUILTINS;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::parser;
use crate::scope::ScopeManager;
use crate::source::ImportKind;
use crate::value::{RuntimeError, Value};
use log::{debug, trace};
use std::sync::Arc;

/// The outcome of evaluating a statement. Errors travel separately in the
/// `Err` side of [`Result`].
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal(Value),
    Break,
    Continue,
    Return(Value),
}

fn finish(flow: Flow) -> Result<Value> {
    match flow {
        Flow::Normal(value) | Flow::Return(value) => Ok(value),
        Flow::Break => Err(RuntimeError::SignalOutsideLoop { signal: "break" }.into()),
        Flow::Continue => Err(RuntimeError::SignalOutsideLoop { signal: "continue" }.into()),
    }
}

pub struct Evaluator<'a> {
    interpreter: &'a mut Interpreter,
    scopes: &'a mut ScopeManager,
    depth: usize,
    nesting: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(interpreter: &'a mut Interpreter, scopes: &'a mut ScopeManager) -> Self {
        Self {
            interpreter,
            scopes,
            depth: 0,
            nesting: 0,
        }
    }

    pub fn eval_program(&mut self, program: &Program) -> Result<Value> {
        let flow = self.eval_statements(&program.statements)?;
        finish(flow)
    }

    /// Runs `f` inside a fresh frame. The frame is popped whether or not `f`
    /// succeeds.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.scopes.push_frame();
        let result = f(self);
        self.scopes.pop_frame();
        result
    }

    /// Runs `f` one evaluation level deeper, failing once the configured
    /// `max_eval_depth` is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let limit = self.interpreter.config().max_eval_depth;
        if self.nesting >= limit {
            return Err(RuntimeError::EvalDepthExceeded { depth: limit }.into());
        }

        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    fn eval_statements(&mut self, statements: &[Statement]) -> Result<Flow> {
        let mut last = Value::None;
        for statement in statements {
            match self.eval_statement(statement)? {
                Flow::Normal(value) => last = value,
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal(last))
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Flow> {
        self.nested(|ev| ev.eval_nested_statement(statement))
    }

    fn eval_nested_statement(&mut self, statement: &Statement) -> Result<Flow> {
        match statement {
            Statement::Block(block) => self.scoped(|ev| ev.eval_statements(&block.statements)),
            Statement::If(stmt) => self.eval_if(stmt),
            Statement::While(stmt) => self.scoped(|ev| ev.eval_while(stmt)),
            Statement::For(stmt) => self.scoped(|ev| ev.eval_for(stmt)),
            Statement::Foreach(_) => Err(RuntimeError::Unsupported {
                construct: "foreach loop",
            }
            .into()),
            Statement::Repeat(stmt) => self.eval_repeat(stmt),
            Statement::Definition(def) => {
                self.define(def);
                Ok(Flow::Normal(Value::None))
            }
            Statement::Return(expr) => Ok(Flow::Return(self.eval_expression(expr)?)),
            Statement::Break => Ok(Flow::Break),
            Statement::Continue => Ok(Flow::Continue),
            Statement::Expr(expr) => Ok(Flow::Normal(self.eval_expression(expr)?)),
            Statement::Empty => Ok(Flow::Normal(Value::None)),
        }
    }

    /// Binds a named definition in the current frame. A name already
    /// declared in this frame keeps its old value.
    fn define(&mut self, def: &Arc<Definition>) {
        if let Some(name) = &def.name {
            if !self.scopes.is_declared_locally(name) {
                self.scopes.declare(name, Value::Function(Arc::clone(def)));
            }
        }
    }

    fn eval_if(&mut self, stmt: &IfStatement) -> Result<Flow> {
        if self.eval_expression(&stmt.condition)?.is_truthy() {
            return self.eval_statements(&stmt.consequence.statements);
        }

        for (condition, body) in &stmt.alternatives {
            if self.eval_expression(condition)?.is_truthy() {
                return self.eval_statements(&body.statements);
            }
        }

        match &stmt.otherwise {
            Some(body) => self.eval_statements(&body.statements),
            None => Ok(Flow::Normal(Value::None)),
        }
    }

    /// Runs one pass over a loop body. `Some` carries the outcome that ends
    /// the loop.
    fn eval_iteration(&mut self, body: &LoopBody) -> Result<Option<Flow>> {
        match self.eval_statements(&body.statements)? {
            Flow::Normal(_) | Flow::Continue => Ok(None),
            Flow::Break => Ok(Some(Flow::Normal(Value::None))),
            flow @ Flow::Return(_) => Ok(Some(flow)),
        }
    }

    fn eval_while(&mut self, stmt: &WhileStatement) -> Result<Flow> {
        while self.eval_expression(&stmt.condition)?.is_truthy() {
            if let Some(flow) = self.eval_iteration(&stmt.body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal(Value::None))
    }

    fn eval_for(&mut self, stmt: &ForStatement) -> Result<Flow> {
        self.eval_expression(&stmt.init)?;
        while self.eval_expression(&stmt.condition)?.is_truthy() {
            if let Some(flow) = self.eval_iteration(&stmt.body)? {
                return Ok(flow);
            }
            self.eval_expression(&stmt.step)?;
        }
        Ok(Flow::Normal(Value::None))
    }

    fn eval_repeat(&mut self, stmt: &RepeatStatement) -> Result<Flow> {
        let times = match self.eval_expression(&stmt.count)? {
            Value::Number(n) if n >= 0.0 => n.floor() as u64,
            other => {
                return Err(RuntimeError::InvalidRepeatCount {
                    count: other.to_string(),
                }
                .into())
            }
        };

        self.scoped(|ev| {
            for _ in 0..times {
                if let Some(flow) = ev.eval_iteration(&stmt.body)? {
                    return Ok(flow);
                }
            }
            Ok(Flow::Normal(Value::None))
        })
    }

    fn eval_expression(&mut self, expr: &Expression) -> Result<Value> {
        self.nested(|ev| ev.eval_nested_expression(expr))
    }

    fn eval_nested_expression(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Identifier(name) => self.lookup(name),
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Unary(expr) => self.eval_unary(expr),
            Expression::Binary(expr) => self.eval_binary(expr),
            Expression::Assign(expr) => self.eval_assign(expr),
            Expression::Call(expr) => self.eval_call(expr),
            Expression::List(items) => items
                .iter()
                .map(|item| self.eval_expression(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            Expression::Function(def) => Ok(Value::Function(Arc::clone(def))),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        self.scopes.get(name).cloned().ok_or_else(|| {
            RuntimeError::UndefinedIdentifier {
                name: name.to_owned(),
            }
            .into()
        })
    }

    fn eval_binary(&mut self, expr: &BinaryExpression) -> Result<Value> {
        if expr.operator == BinaryOperator::Dot {
            return Err(RuntimeError::Unsupported {
                construct: "member access",
            }
            .into());
        }

        let left = self.eval_expression(&expr.left)?;
        let right = self.eval_expression(&expr.right)?;
        Ok(Value::binary(expr.operator, left, right)?)
    }

    fn eval_unary(&mut self, expr: &UnaryExpression) -> Result<Value> {
        let step = match expr.operator.step() {
            Some(step) => step,
            None => {
                let operand = self.eval_expression(&expr.operand)?;
                return Ok(Value::prefix(expr.operator, operand)?);
            }
        };

        let name = match expr.operand.as_ref() {
            Expression::Identifier(name) => name,
            _ => {
                return Err(RuntimeError::InvalidIncrementTarget {
                    operator: expr.operator.to_string(),
                }
                .into())
            }
        };

        let previous = match self.lookup(name)? {
            Value::Number(n) => n,
            other => {
                return Err(RuntimeError::UnknownPrefixOperator {
                    operator: expr.operator.to_string(),
                    operand: other.kind(),
                }
                .into())
            }
        };

        let updated = previous + step;
        self.scopes.assign(name, Value::Number(updated));

        Ok(Value::Number(if expr.operator.is_postfix() {
            previous
        } else {
            updated
        }))
    }

    fn eval_assign(&mut self, expr: &AssignExpression) -> Result<Value> {
        let value = self.eval_expression(&expr.value)?;
        let value = match expr.operator.binary() {
            Some(operator) => Value::binary(operator, self.lookup(&expr.name)?, value)?,
            None => value,
        };

        self.scopes.assign(&expr.name, value.clone());
        Ok(value)
    }

    fn eval_call(&mut self, call: &CallExpression) -> Result<Value> {
        match self.scopes.get(&call.name).cloned() {
            Some(Value::Function(def)) => {
                let arguments = self.eval_arguments(&call.arguments)?;
                self.call_function(&call.name, &def, arguments)
            }
            Some(other) => Err(RuntimeError::NotAFunction {
                name: call.name.clone(),
                type_name: other.kind(),
            }
            .into()),
            None => match BUILTINS.get(call.name.as_str()) {
                Some(&builtin) => {
                    let arguments = self.eval_arguments(&call.arguments)?;
                    builtin(self, arguments)
                }
                None => Err(RuntimeError::UndefinedIdentifier {
                    name: call.name.clone(),
                }
                .into()),
            },
        }
    }

    fn eval_arguments(&mut self, arguments: &[Expression]) -> Result<Vec<Value>> {
        arguments
            .iter()
            .map(|argument| self.eval_expression(argument))
            .collect()
    }

    /// Calls a user function. The new frame sits on top of the caller's, so
    /// the body resolves free names against the call site.
    fn call_function(
        &mut self,
        name: &str,
        def: &Definition,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        if arguments.len() != def.parameters.len() {
            return Err(RuntimeError::IncorrectArity {
                name: name.to_owned(),
                got: arguments.len(),
                want: def.parameters.len(),
            }
            .into());
        }

        let limit = self.interpreter.config().max_call_depth;
        if self.depth >= limit {
            return Err(RuntimeError::CallDepthExceeded { depth: limit }.into());
        }

        debug!("calling `{}` at depth {}", name, self.depth + 1);
        self.depth += 1;
        let flow = self.scoped(|ev| {
            for (parameter, argument) in def.parameters.iter().zip(arguments) {
                ev.scopes.declare(parameter, argument);
            }
            ev.eval_statements(&def.body.statements)
        });
        self.depth -= 1;

        finish(flow?)
    }

    /// Loads a unit and runs its top-level statements in the current frame.
    pub fn import(&mut self, kind: ImportKind, name: &str) -> Result<Value> {
        self.scopes.begin_import(name)?;
        debug!("importing {} unit '{}'", kind, name);

        let result = self.import_unit(kind, name);

        self.scopes.end_import();
        debug!("finished import of '{}'", name);
        result
    }

    fn import_unit(&mut self, kind: ImportKind, name: &str) -> Result<Value> {
        let source = self.interpreter.loader().load(kind, name)?;
        let program = parser::parse(&source)?;
        trace!("unit '{}' has {} top-level statements", name, program.statements.len());

        for statement in &program.statements {
            let flow = match statement {
                Statement::Block(block) => self.eval_statements(&block.statements)?,
                other => self.eval_statement(other)?,
            };
            let stop = matches!(flow, Flow::Return(_));
            finish(flow)?;
            if stop {
                break;
            }
        }

        Ok(Value::None)
    }

    pub fn write_output(&mut self, text: &str) -> Result<()> {
        self.interpreter
            .output()
            .write_all(text.as_bytes())
            .map_err(RuntimeError::from)?;
        Ok(())
    }

    /// Flushes pending output, then blocks for one line of input. End of
    /// input reads as an empty line.
    pub fn read_input(&mut self) -> Result<String> {
        self.interpreter
            .output()
            .flush()
            .map_err(RuntimeError::from)?;
        let line = self.interpreter.read_line().map_err(RuntimeError::from)?;
        Ok(line.unwrap_or_default())
    }
}
