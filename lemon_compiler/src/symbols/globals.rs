//! Program-wide symbols: defines, global variables and function overload sets

use super::error::{validate_name, SymbolError, SymbolResult};
use super::{FunctionId, GlobalId};
use crate::config::compile_time::symbols::{
    MAX_DEFINE_TOKENS, MAX_FUNCTION_PARAMETERS, MAX_GLOBAL_VARIABLES, MAX_OVERLOADS_PER_NAME,
};
use crate::tokens::TokenList;
use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compile-time text substitution
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    pub name: String,
    pub content: TokenList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalVariable {
    pub name: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
}

impl Parameter {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: DataType,
    pub parameters: Vec<Parameter>,
}

impl Function {
    /// Parameter types joined with commas, e.g. `u8, s32`
    pub fn signature(&self) -> String {
        self.parameters
            .iter()
            .map(|parameter| parameter.data_type.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Name-keyed lookup shared by every statement of a compilation
#[derive(Debug, Clone, Default)]
pub struct GlobalsLookup {
    defines: HashMap<String, Define>,
    globals: Vec<GlobalVariable>,
    globals_by_name: HashMap<String, GlobalId>,
    functions: Vec<Function>,
    functions_by_name: HashMap<String, Vec<FunctionId>>,
}

impl GlobalsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_define(&mut self, name: &str, content: TokenList) -> SymbolResult<()> {
        validate_name(name)?;
        self.ensure_unused_global_name(name)?;
        if content.len() > MAX_DEFINE_TOKENS {
            return Err(SymbolError::limit_exceeded("define tokens", MAX_DEFINE_TOKENS));
        }

        self.defines.insert(
            name.to_string(),
            Define {
                name: name.to_string(),
                content,
            },
        );
        Ok(())
    }

    pub fn add_global_variable(&mut self, name: &str, data_type: DataType) -> SymbolResult<GlobalId> {
        validate_name(name)?;
        self.ensure_unused_global_name(name)?;
        if data_type.is_void() {
            return Err(SymbolError::invalid_name(name, "global variables cannot be void"));
        }
        if self.globals.len() >= MAX_GLOBAL_VARIABLES {
            return Err(SymbolError::limit_exceeded("global variables", MAX_GLOBAL_VARIABLES));
        }

        let id = GlobalId(self.globals.len());
        self.globals.push(GlobalVariable {
            name: name.to_string(),
            data_type,
        });
        self.globals_by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register a function; overloads keep their registration order
    pub fn add_function(
        &mut self,
        name: &str,
        return_type: DataType,
        parameters: Vec<Parameter>,
    ) -> SymbolResult<FunctionId> {
        validate_name(name)?;
        if parameters.len() > MAX_FUNCTION_PARAMETERS {
            return Err(SymbolError::limit_exceeded(
                "function parameters",
                MAX_FUNCTION_PARAMETERS,
            ));
        }

        let candidate = Function {
            name: name.to_string(),
            return_type,
            parameters,
        };

        let overloads = self.get_functions_by_name(name);
        if overloads.len() >= MAX_OVERLOADS_PER_NAME {
            return Err(SymbolError::limit_exceeded(
                "overloads per function name",
                MAX_OVERLOADS_PER_NAME,
            ));
        }
        let same_signature = overloads.iter().any(|id| {
            let existing = &self.functions[id.0];
            existing
                .parameters
                .iter()
                .map(|p| p.data_type)
                .eq(candidate.parameters.iter().map(|p| p.data_type))
        });
        if same_signature {
            return Err(SymbolError::duplicate_function(name, &candidate.signature()));
        }

        let id = FunctionId(self.functions.len());
        self.functions.push(candidate);
        self.functions_by_name
            .entry(name.to_string())
            .or_default()
            .push(id);
        Ok(id)
    }

    fn ensure_unused_global_name(&self, name: &str) -> SymbolResult<()> {
        if self.defines.contains_key(name) {
            return Err(SymbolError::duplicate_global(name, "define"));
        }
        if self.globals_by_name.contains_key(name) {
            return Err(SymbolError::duplicate_global(name, "global variable"));
        }
        Ok(())
    }

    pub fn get_define_by_name(&self, name: &str) -> Option<&Define> {
        self.defines.get(name)
    }

    pub fn get_global_variable_by_name(&self, name: &str) -> Option<GlobalId> {
        self.globals_by_name.get(name).copied()
    }

    pub fn global_variable(&self, id: GlobalId) -> Option<&GlobalVariable> {
        self.globals.get(id.0)
    }

    /// All overloads of `name` in registration order
    pub fn get_functions_by_name(&self, name: &str) -> &[FunctionId] {
        self.functions_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.0)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(index, function)| (FunctionId(index), function))
    }

    pub fn define_count(&self) -> usize {
        self.defines.len()
    }

    pub fn global_variable_count(&self) -> usize {
        self.globals.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}
