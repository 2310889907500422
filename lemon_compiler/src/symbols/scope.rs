//! Per-function compilation scope
//!
//! Holds every local variable a function declares plus the chain of locals
//! currently visible. Blocks only shrink the visible chain; their locals stay
//! registered with the function so a later redeclaration can reuse the slot.

use super::error::{validate_name, SymbolError, SymbolResult};
use super::globals::GlobalsLookup;
use super::{FunctionId, LocalId};
use crate::config::compile_time::symbols::MAX_LOCALS_PER_FUNCTION;
use crate::types::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVariable {
    pub name: String,
    pub data_type: DataType,
    /// Source line of the declaration; 0 for parameters
    pub line: u32,
    pub function: FunctionId,
}

#[derive(Debug, Clone)]
pub struct FunctionScope {
    function: FunctionId,
    function_name: String,
    parameter_types: Vec<DataType>,
    locals: Vec<LocalVariable>,
    active: Vec<LocalId>,
    block_marks: Vec<usize>,
}

impl FunctionScope {
    /// Open the scope of a registered function with its parameters visible
    pub fn for_function(globals: &GlobalsLookup, function: FunctionId) -> SymbolResult<Self> {
        let definition = globals
            .function(function)
            .ok_or_else(|| SymbolError::internal(&format!("Unknown function id {}", function.0)))?;

        let mut scope = Self {
            function,
            function_name: definition.name.clone(),
            parameter_types: definition.parameters.iter().map(|p| p.data_type).collect(),
            locals: Vec::new(),
            active: Vec::new(),
            block_marks: Vec::new(),
        };

        for parameter in &definition.parameters {
            scope.declare_local(&parameter.name, parameter.data_type, 0)?;
        }
        Ok(scope)
    }

    pub fn function_id(&self) -> FunctionId {
        self.function
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn parameter_types(&self) -> &[DataType] {
        &self.parameter_types
    }

    /// Search the visible chain, innermost declaration first
    pub fn find_local(&self, name: &str) -> Option<LocalId> {
        self.active
            .iter()
            .rev()
            .copied()
            .find(|id| self.locals[id.0].name == name)
    }

    pub fn local(&self, id: LocalId) -> Option<&LocalVariable> {
        self.locals.get(id.0)
    }

    /// Make a local visible, reusing an out-of-scope local with the same name and type
    pub fn declare_local(&mut self, name: &str, data_type: DataType, line: u32) -> SymbolResult<LocalId> {
        validate_name(name)?;

        let reusable = self
            .locals
            .iter()
            .position(|local| local.name == name && local.data_type == data_type)
            .map(LocalId)
            .filter(|id| !self.active.contains(id));

        let id = match reusable {
            Some(id) => id,
            None => {
                if self.locals.len() >= MAX_LOCALS_PER_FUNCTION {
                    return Err(SymbolError::limit_exceeded(
                        "local variables",
                        MAX_LOCALS_PER_FUNCTION,
                    ));
                }
                self.locals.push(LocalVariable {
                    name: name.to_string(),
                    data_type,
                    line,
                    function: self.function,
                });
                LocalId(self.locals.len() - 1)
            }
        };

        self.active.push(id);
        Ok(id)
    }

    pub fn begin_block(&mut self) {
        self.block_marks.push(self.active.len());
    }

    /// Drop locals declared since the matching `begin_block`
    pub fn end_block(&mut self) -> SymbolResult<()> {
        let mark = self
            .block_marks
            .pop()
            .ok_or_else(|| SymbolError::internal("end_block without begin_block"))?;
        self.active.truncate(mark);
        Ok(())
    }

    pub fn locals(&self) -> &[LocalVariable] {
        &self.locals
    }

    pub fn visible_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Parameter;
    use assert_matches::assert_matches;

    fn scope_with_params() -> FunctionScope {
        let mut globals = GlobalsLookup::new();
        let id = globals
            .add_function(
                "update",
                DataType::Void,
                vec![Parameter::new("dx", DataType::S16)],
            )
            .unwrap();
        FunctionScope::for_function(&globals, id).unwrap()
    }

    #[test]
    fn test_parameters_are_visible_locals() {
        let scope = scope_with_params();
        let id = scope.find_local("dx").unwrap();
        assert_eq!(scope.local(id).unwrap().data_type, DataType::S16);
        assert_eq!(scope.function_name(), "update");
        assert_eq!(scope.parameter_types(), &[DataType::S16]);
    }

    #[test]
    fn test_blocks_hide_but_keep_locals() {
        let mut scope = scope_with_params();

        scope.begin_block();
        let inner = scope.declare_local("tmp", DataType::U8, 3).unwrap();
        assert_eq!(scope.find_local("tmp"), Some(inner));
        scope.end_block().unwrap();

        assert_eq!(scope.find_local("tmp"), None);
        assert_eq!(scope.locals().len(), 2);

        // Same name and type reuses the slot, a different type gets a new one
        assert_eq!(scope.declare_local("tmp", DataType::U8, 9).unwrap(), inner);
        scope.begin_block();
        let other = scope.declare_local("tmp", DataType::S32, 10).unwrap();
        assert_ne!(other, inner);
        assert_eq!(scope.find_local("tmp"), Some(other));
    }

    #[test]
    fn test_unbalanced_end_block() {
        let mut scope = scope_with_params();
        assert_matches!(scope.end_block(), Err(SymbolError::Internal { .. }));
    }
}
