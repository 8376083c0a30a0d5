use crate::value::{RuntimeError, Value};
use std::collections::HashMap;

pub type Frame = HashMap<String, Value>;

/// Chained symbol tables, kept as a stack that mirrors the evaluator's
/// block and call nesting. Frame 0 is the global frame and is never popped.
///
/// A lookup walks from the innermost frame outwards, so a function body sees
/// the frames of whoever called it rather than those around its definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeManager {
    frames: Vec<Frame>,
    imports: Vec<String>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self {
            frames: vec![Frame::new()],
            imports: vec![],
        }
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
    }

    pub fn is_declared_locally(&self, name: &str) -> bool {
        self.current().contains_key(name)
    }

    pub fn declare(&mut self, name: &str, value: Value) {
        self.current_mut().insert(name.to_owned(), value);
    }

    /// Updates the nearest binding of `name`, declaring it in the current
    /// frame if there is none.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.declare(name, value),
        }
    }

    fn current(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn begin_import(&mut self, name: &str) -> Result<(), RuntimeError> {
        if self.imports.iter().any(|unit| unit == name) {
            return Err(RuntimeError::RecursiveImport {
                name: name.to_owned(),
            });
        }
        self.imports.push(name.to_owned());
        Ok(())
    }

    pub fn end_import(&mut self) {
        self.imports.pop();
    }
}
