//! Declaration, call, memory access and cast recognition plus identifier resolution

use super::error::{CompileError, CompileResult};
use super::TokenProcessor;
use crate::symbols::VariableRef;
use crate::tokens::{FunctionCall, Keyword, ParenthesisKind, Token, TokenList};

/// Prefix marking a call of the overridden implementation
pub const BASE_CALL_PREFIX: &str = "base.";

fn parenthesis_content(token: Token) -> TokenList {
    match token {
        Token::Parenthesis { content, .. } => content,
        _ => TokenList::new(),
    }
}

fn is_parenthesis(token: Option<&Token>, expected: ParenthesisKind) -> bool {
    matches!(token, Some(Token::Parenthesis { kind, .. }) if *kind == expected)
}

impl TokenProcessor<'_> {
    /// `type name` pairs become local variables
    pub(super) fn process_variable_definitions(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        let line = self.line;
        let mut i = 0;
        while i < tokens.len() {
            let declared_type = match &tokens[i] {
                Token::Keyword(Keyword::Function) => {
                    if !matches!(tokens.get(i + 1), Some(Token::Identifier(_))) {
                        return Err(CompileError::misplaced_operand(
                            "Function keyword must be followed by an identifier",
                            line,
                        ));
                    }
                    None
                }
                Token::VarType(data_type) => Some(*data_type),
                _ => None,
            };

            if let Some(data_type) = declared_type {
                let name = match tokens.get(i + 1) {
                    None => {
                        return Err(CompileError::misplaced_operand(
                            "Type name must not be the last token",
                            line,
                        ))
                    }
                    Some(Token::Identifier(name)) => Some(name.clone()),
                    Some(_) => None,
                };

                if let Some(name) = name {
                    if data_type.is_void() {
                        return Err(CompileError::void_variable(line));
                    }
                    let scope = self.scope.as_deref_mut().ok_or_else(|| {
                        CompileError::internal("Variable declaration outside of a function", line)
                    })?;
                    if scope.find_local(&name).is_some() {
                        return Err(CompileError::duplicate_variable(line));
                    }
                    let id = scope
                        .declare_local(&name, data_type, line)
                        .map_err(|error| CompileError::from_symbol_error(error, line))?;

                    log_debug!("Declared local variable",
                        "name" => &name,
                        "type" => data_type
                    );

                    tokens.erase(i + 1);
                    tokens.replace_at(
                        i,
                        Token::Variable {
                            name,
                            variable: VariableRef::Local(id),
                            data_type,
                        },
                    );
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// `name (...)` becomes a call; overloads are picked later during typing
    pub(super) fn process_function_calls(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        let mut i = 0;
        while i + 1 < tokens.len() {
            let name = match &tokens[i] {
                Token::Identifier(name) if is_parenthesis(tokens.get(i + 1), ParenthesisKind::Parenthesis) => {
                    name.clone()
                }
                _ => {
                    i += 1;
                    continue;
                }
            };

            if !name.starts_with(BASE_CALL_PREFIX)
                && self.globals.get_functions_by_name(&name).is_empty()
            {
                return Err(CompileError::unknown_function(&name, self.line));
            }

            let arguments = parenthesis_content(tokens.erase(i + 1));
            tokens.replace_at(
                i,
                Token::Function(FunctionCall {
                    name,
                    arguments,
                    function: None,
                    is_base_call: false,
                    data_type: None,
                }),
            );
            i += 1;
        }
        Ok(())
    }

    /// `type [address]` becomes a memory access of that type
    pub(super) fn process_memory_accesses(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        let mut i = 0;
        while i + 1 < tokens.len() {
            let data_type = match &tokens[i] {
                Token::VarType(data_type) if is_parenthesis(tokens.get(i + 1), ParenthesisKind::Bracket) => {
                    *data_type
                }
                _ => {
                    i += 1;
                    continue;
                }
            };

            let mut content = parenthesis_content(tokens.erase(i + 1));
            if content.len() != 1 {
                return Err(CompileError::malformed_content(
                    "Expected exactly one token inside brackets",
                    self.line,
                ));
            }
            if !content[0].is_statement() {
                return Err(CompileError::malformed_content(
                    "Expected statement token inside brackets",
                    self.line,
                ));
            }

            let address = content.erase(0);
            tokens.replace_at(
                i,
                Token::MemoryAccess {
                    address: Box::new(address),
                    data_type,
                },
            );
            i += 1;
        }
        Ok(())
    }

    /// `type (...)` becomes an explicit cast of the parenthesis
    pub(super) fn process_explicit_casts(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        let mut i = 0;
        while i + 1 < tokens.len() {
            if let Token::VarType(data_type) = &tokens[i] {
                if is_parenthesis(tokens.get(i + 1), ParenthesisKind::Parenthesis) {
                    let data_type = *data_type;
                    let argument = tokens.erase(i + 1);
                    tokens.replace_at(
                        i,
                        Token::ValueCast {
                            argument: Box::new(argument),
                            data_type,
                        },
                    );
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Remaining identifiers resolve to locals first, then globals
    pub(super) fn process_identifiers(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        for token in tokens.iter_mut() {
            let Token::Identifier(name) = token else {
                continue;
            };
            let resolved = self.resolve_variable(name)?;
            *token = resolved;
        }
        Ok(())
    }

    fn resolve_variable(&self, name: &str) -> CompileResult<Token> {
        if let Some(scope) = self.scope.as_deref() {
            if let Some(id) = scope.find_local(name) {
                let local = scope
                    .local(id)
                    .ok_or_else(|| CompileError::internal("Dangling local variable handle", self.line))?;
                return Ok(Token::Variable {
                    name: name.to_string(),
                    variable: VariableRef::Local(id),
                    data_type: local.data_type,
                });
            }
        }

        if let Some(id) = self.globals.get_global_variable_by_name(name) {
            let global = self
                .globals
                .global_variable(id)
                .ok_or_else(|| CompileError::internal("Dangling global variable handle", self.line))?;
            return Ok(Token::Variable {
                name: name.to_string(),
                variable: VariableRef::Global(id),
                data_type: global.data_type,
            });
        }

        Err(CompileError::unresolved_identifier(name, self.line))
    }
}
