//! Type assignment, overload resolution and implicit cast insertion

use super::error::{CompileError, CompileResult};
use super::recognition::BASE_CALL_PREFIX;
use super::signatures::{best_signature, overload_cost, select_overload};
use super::TokenProcessor;
use crate::tokens::{FunctionCall, OperatorCategory, Token, TokenList};
use crate::types::cast::{implicit_cast_cost, CANNOT_CAST};
use crate::types::DataType;

/// Wrap `slot` in an implicit cast to `target`
fn insert_cast(slot: &mut Box<Token>, target: DataType) {
    let inner = std::mem::replace(slot, Box::new(Token::constant(0)));
    **slot = Token::ValueCast {
        argument: inner,
        data_type: target,
    };
}

impl TokenProcessor<'_> {
    /// Assign data types bottom-up below `token`, using `context` as the expected type
    pub(super) fn assign_type(&mut self, token: &mut Token, context: Option<DataType>) -> CompileResult<DataType> {
        match token {
            Token::Constant { data_type, .. } => {
                let resolved = context.unwrap_or(DataType::ConstInt);
                *data_type = Some(resolved);
                Ok(resolved)
            }

            Token::Variable { data_type, .. } => Ok(*data_type),

            Token::Function(call) => self.assign_function_type(call),

            Token::MemoryAccess { address, data_type } => {
                self.assign_type(address, Some(DataType::U32))?;
                Ok(*data_type)
            }

            Token::Parenthesis {
                content, data_type, ..
            } => {
                if content.len() != 1 {
                    return Err(CompileError::malformed_content(
                        "Parenthesis content must be one token",
                        self.line,
                    ));
                }
                let inner = &mut content[0];
                if !inner.is_statement() {
                    return Err(CompileError::malformed_content(
                        "Parenthesis content must be a statement",
                        self.line,
                    ));
                }
                let resolved = self.assign_type(inner, context)?;
                *data_type = Some(resolved);
                Ok(resolved)
            }

            Token::UnaryOperation {
                argument,
                data_type,
                ..
            } => {
                let resolved = self.assign_type(argument, context)?;
                *data_type = Some(resolved);
                Ok(resolved)
            }

            Token::BinaryOperation {
                op,
                left,
                right,
                data_type,
            } => {
                let category = op.category();
                let expected = match category {
                    OperatorCategory::Symmetric => context,
                    _ => None,
                };

                let left_type = self.assign_type(left, expected)?;
                let right_context = match category {
                    OperatorCategory::Assignment => Some(left_type),
                    _ => expected,
                };
                let right_type = self.assign_type(right, right_context)?;

                if category == OperatorCategory::Other {
                    return Err(CompileError::internal(
                        &format!("Operator {} has no signature catalog", op),
                        self.line,
                    ));
                }
                let signature = best_signature(category, left_type, right_type)
                    .ok_or_else(|| CompileError::no_implicit_cast(left_type, right_type, self.line))?;
                *data_type = Some(signature.result);

                if category != OperatorCategory::Ternary && left_type.is_integer() && right_type.is_integer() {
                    if left_type.bytes() != signature.left.bytes() {
                        insert_cast(left, signature.left);
                    }
                    if right_type.bytes() != signature.right.bytes() {
                        insert_cast(right, signature.right);
                    }
                }
                Ok(signature.result)
            }

            Token::ValueCast {
                argument,
                data_type,
            } => {
                let target = *data_type;
                let original = self.assign_type(argument, Some(target))?;
                if implicit_cast_cost(original, target) == CANNOT_CAST {
                    return Err(CompileError::invalid_explicit_cast(self.line));
                }
                Ok(target)
            }

            Token::Identifier(_)
            | Token::Keyword(_)
            | Token::Operator(_)
            | Token::VarType(_)
            | Token::CommaSeparated(_) => Err(CompileError::internal(
                &format!("Cannot assign a type to a {}", token.kind_name()),
                self.line,
            )),
        }
    }

    fn assign_function_type(&mut self, call: &mut FunctionCall) -> CompileResult<DataType> {
        let argument_types = self.assign_argument_types(&mut call.arguments)?;

        if let Some(base_name) = call.name.strip_prefix(BASE_CALL_PREFIX) {
            if let Some(scope) = self.scope.as_deref() {
                if scope.function_name() == base_name {
                    let parameters = scope.parameter_types();
                    if parameters.len() != argument_types.len() {
                        return Err(CompileError::base_call_mismatch(
                            "Base function call has different parameter count".to_string(),
                            self.line,
                        ));
                    }
                    if let Some(index) = parameters
                        .iter()
                        .zip(&argument_types)
                        .position(|(parameter, argument)| parameter != argument)
                    {
                        return Err(CompileError::base_call_mismatch(
                            format!("Base function call has different parameter at index {}", index),
                            self.line,
                        ));
                    }

                    let id = scope.function_id();
                    let function = self.globals.function(id).ok_or_else(|| {
                        CompileError::internal("Current function is not registered", self.line)
                    })?;
                    call.function = Some(id);
                    call.is_base_call = true;
                    call.data_type = Some(function.return_type);
                    return Ok(function.return_type);
                }
            }
        }

        let candidates = self.globals.get_functions_by_name(&call.name);
        if candidates.is_empty() {
            return Err(CompileError::unknown_function(&call.name, self.line));
        }

        if self.preferences.trace_overload_resolution {
            for &id in candidates {
                if let Some(function) = self.globals.function(id) {
                    let parameters: Vec<DataType> =
                        function.parameters.iter().map(|p| p.data_type).collect();
                    log_debug!("Overload candidate",
                        "function" => &call.name,
                        "signature" => function.signature(),
                        "cost" => format!("{:#010x}", overload_cost(&argument_types, &parameters))
                    );
                }
            }
        }

        let id = select_overload(self.globals, candidates, &argument_types)
            .ok_or_else(|| CompileError::no_matching_overload(&call.name, self.line))?;
        let function = self
            .globals
            .function(id)
            .ok_or_else(|| CompileError::internal("Dangling function handle", self.line))?;

        call.function = Some(id);
        call.data_type = Some(function.return_type);
        Ok(function.return_type)
    }

    /// Type each argument without context; a call holds either one statement
    /// or a comma separated list of single statements.
    fn assign_argument_types(&mut self, arguments: &mut TokenList) -> CompileResult<Vec<DataType>> {
        if arguments.is_empty() {
            return Ok(Vec::new());
        }

        let mut types = Vec::new();
        if let Token::CommaSeparated(segments) = &mut arguments[0] {
            for segment in segments.iter_mut() {
                types.push(self.assign_argument_type(segment)?);
            }
        } else {
            types.push(self.assign_argument_type(arguments)?);
        }
        Ok(types)
    }

    fn assign_argument_type(&mut self, segment: &mut TokenList) -> CompileResult<DataType> {
        if segment.len() != 1 {
            return Err(CompileError::malformed_content(
                "Function parameter content must be one token",
                self.line,
            ));
        }
        let argument = &mut segment[0];
        if !argument.is_statement() {
            return Err(CompileError::malformed_content(
                "Function parameter content must be a statement",
                self.line,
            ));
        }
        self.assign_type(argument, None)
    }
}
