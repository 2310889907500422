//! Conversion of a parsed unit into symbol tables and raw token lists

use super::error::{UnitError, UnitResult};
use super::model::{CompilationUnit, RawToken, StatementKind, UnitFunction, UnitStatement};
use crate::symbols::{FunctionId, GlobalsLookup, Parameter};
use crate::tokens::{Keyword, Operator, Token, TokenList};
use crate::types::DataType;

/// A statement ready for the token processor
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    pub line: u32,
    pub kind: StatementKind,
    pub tokens: TokenList,
}

#[derive(Debug, Clone)]
pub struct FunctionBody {
    pub function: FunctionId,
    pub name: String,
    pub statements: Vec<PreparedStatement>,
}

/// Symbol tables plus every function body of a unit
#[derive(Debug)]
pub struct BuiltUnit {
    pub globals: GlobalsLookup,
    pub bodies: Vec<FunctionBody>,
}

impl BuiltUnit {
    pub fn statement_count(&self) -> usize {
        self.bodies.iter().map(|body| body.statements.len()).sum()
    }
}

/// Registers defines, globals and functions in declaration order
#[derive(Debug, Default)]
pub struct UnitBuilder {
    globals: GlobalsLookup,
    bodies: Vec<FunctionBody>,
}

impl UnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(mut self, unit: &CompilationUnit) -> UnitResult<BuiltUnit> {
        for define in &unit.defines {
            let content = convert_tokens(&define.tokens)?;
            self.globals.add_define(&define.name, content)?;
        }

        for global in &unit.globals {
            let data_type = parse_type(&global.data_type)?;
            self.globals.add_global_variable(&global.name, data_type)?;
        }

        for function in &unit.functions {
            self.add_function(function)?;
        }

        log_debug!("Compilation unit built",
            "defines" => self.globals.define_count(),
            "globals" => self.globals.global_variable_count(),
            "functions" => self.globals.function_count()
        );

        Ok(BuiltUnit {
            globals: self.globals,
            bodies: self.bodies,
        })
    }

    fn add_function(&mut self, function: &UnitFunction) -> UnitResult<()> {
        let return_type = parse_type(&function.return_type)?;
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| Ok(Parameter::new(&parameter.name, parse_type(&parameter.data_type)?)))
            .collect::<UnitResult<Vec<_>>>()?;

        let id = self.globals.add_function(&function.name, return_type, parameters)?;
        let statements = function
            .statements
            .iter()
            .map(prepare_statement)
            .collect::<UnitResult<Vec<_>>>()?;

        self.bodies.push(FunctionBody {
            function: id,
            name: function.name.clone(),
            statements,
        });
        Ok(())
    }
}

fn prepare_statement(statement: &UnitStatement) -> UnitResult<PreparedStatement> {
    Ok(PreparedStatement {
        line: statement.line,
        kind: statement.kind,
        tokens: convert_tokens(&statement.tokens)?,
    })
}

pub fn parse_type(name: &str) -> UnitResult<DataType> {
    DataType::from_name(name).ok_or_else(|| UnitError::unknown_type(name))
}

pub fn convert_token(raw: &RawToken) -> UnitResult<Token> {
    match raw {
        RawToken::Identifier(name) => Ok(Token::Identifier(name.clone())),
        RawToken::Constant(value) => Ok(Token::constant(*value)),
        RawToken::Operator(symbol) => Operator::from_symbol(symbol)
            .map(Token::Operator)
            .ok_or_else(|| UnitError::unknown_operator(symbol)),
        RawToken::Type(name) => parse_type(name).map(Token::VarType),
        RawToken::Keyword(word) => Keyword::from_str(word)
            .map(Token::Keyword)
            .ok_or_else(|| UnitError::unknown_keyword(word)),
    }
}

pub fn convert_tokens(raw: &[RawToken]) -> UnitResult<TokenList> {
    raw.iter().map(convert_token).collect()
}
