//! Token variants, from raw lexer output to fully typed statement nodes

use super::keyword::Keyword;
use super::operator::Operator;
use super::token_list::TokenList;
use crate::symbols::{FunctionId, VariableRef};
use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round parenthesis or square bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParenthesisKind {
    Parenthesis,
    Bracket,
}

/// Call of a named function; `function` is filled in by overload resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: TokenList,
    pub function: Option<FunctionId>,
    pub is_base_call: bool,
    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    // Raw lexer tokens
    Identifier(String),
    Keyword(Keyword),
    Operator(Operator),
    VarType(DataType),

    // Statement tokens
    Constant {
        value: i64,
        data_type: Option<DataType>,
    },
    Variable {
        name: String,
        variable: VariableRef,
        data_type: DataType,
    },
    Function(FunctionCall),
    MemoryAccess {
        address: Box<Token>,
        data_type: DataType,
    },
    Parenthesis {
        kind: ParenthesisKind,
        content: TokenList,
        data_type: Option<DataType>,
    },
    UnaryOperation {
        op: Operator,
        argument: Box<Token>,
        data_type: Option<DataType>,
    },
    BinaryOperation {
        op: Operator,
        left: Box<Token>,
        right: Box<Token>,
        data_type: Option<DataType>,
    },
    ValueCast {
        argument: Box<Token>,
        data_type: DataType,
    },

    /// Comma separated segments, e.g. function arguments
    CommaSeparated(Vec<TokenList>),
}

impl Token {
    pub fn constant(value: i64) -> Self {
        Self::Constant {
            value,
            data_type: None,
        }
    }

    pub fn identifier(name: &str) -> Self {
        Self::Identifier(name.to_string())
    }

    /// Whether the token can act as an operand and carries a data type
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Constant { .. }
                | Self::Variable { .. }
                | Self::Function(_)
                | Self::MemoryAccess { .. }
                | Self::Parenthesis { .. }
                | Self::UnaryOperation { .. }
                | Self::BinaryOperation { .. }
                | Self::ValueCast { .. }
        )
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }

    pub fn is_operator(&self, operator: Operator) -> bool {
        self.as_operator() == Some(operator)
    }

    /// Resolved type of a statement token, if assigned
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Constant { data_type, .. }
            | Self::Parenthesis { data_type, .. }
            | Self::UnaryOperation { data_type, .. }
            | Self::BinaryOperation { data_type, .. } => *data_type,
            Self::Function(call) => call.data_type,
            Self::Variable { data_type, .. }
            | Self::MemoryAccess { data_type, .. }
            | Self::ValueCast { data_type, .. } => Some(*data_type),
            _ => None,
        }
    }

    /// Kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "identifier",
            Self::Keyword(_) => "keyword",
            Self::Operator(_) => "operator",
            Self::VarType(_) => "type name",
            Self::Constant { .. } => "constant",
            Self::Variable { .. } => "variable",
            Self::Function(_) => "function call",
            Self::MemoryAccess { .. } => "memory access",
            Self::Parenthesis { .. } => "parenthesis",
            Self::UnaryOperation { .. } => "unary operation",
            Self::BinaryOperation { .. } => "binary operation",
            Self::ValueCast { .. } => "value cast",
            Self::CommaSeparated(_) => "comma separated list",
        }
    }
}

fn write_typed(f: &mut fmt::Formatter<'_>, text: impl fmt::Display, data_type: Option<DataType>) -> fmt::Result {
    match data_type {
        Some(data_type) => write!(f, "{}:{}", text, data_type),
        None => write!(f, "{}", text),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, list: &TokenList) -> fmt::Result {
    for (index, token) in list.iter().enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", token)?;
    }
    Ok(())
}

/// Compact S-expression rendering, e.g. `(= x:s32 (+ a:s32 2:s32))`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => f.write_str(name),
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::VarType(data_type) => write!(f, "{}", data_type),
            Self::Constant { value, data_type } => write_typed(f, value, *data_type),
            Self::Variable {
                name, data_type, ..
            } => write_typed(f, name, Some(*data_type)),
            Self::Function(call) => {
                f.write_str("(")?;
                write_typed(f, &call.name, call.data_type)?;
                match call.arguments.get(0) {
                    Some(Token::CommaSeparated(segments)) if call.arguments.len() == 1 => {
                        for segment in segments {
                            f.write_str(" ")?;
                            write_list(f, segment)?;
                        }
                    }
                    Some(_) => {
                        f.write_str(" ")?;
                        write_list(f, &call.arguments)?;
                    }
                    None => {}
                }
                f.write_str(")")
            }
            Self::MemoryAccess { address, data_type } => {
                write!(f, "{}[{}]", data_type, address)
            }
            Self::Parenthesis {
                kind: ParenthesisKind::Parenthesis,
                content,
                ..
            } if content.len() == 1 => write!(f, "{}", content[0]),
            Self::Parenthesis { kind, content, .. } => {
                let (open, close) = match kind {
                    ParenthesisKind::Parenthesis => ("(group", ")"),
                    ParenthesisKind::Bracket => ("[", "]"),
                };
                f.write_str(open)?;
                if !content.is_empty() {
                    if *kind == ParenthesisKind::Parenthesis {
                        f.write_str(" ")?;
                    }
                    write_list(f, content)?;
                }
                f.write_str(close)
            }
            Self::UnaryOperation { op, argument, .. } => write!(f, "({} {})", op, argument),
            Self::BinaryOperation {
                op, left, right, ..
            } => write!(f, "({} {} {})", op, left, right),
            Self::ValueCast {
                argument,
                data_type,
            } => write!(f, "(cast:{} {})", data_type, argument),
            Self::CommaSeparated(segments) => {
                f.write_str("(,")?;
                for segment in segments {
                    f.write_str(" ")?;
                    write_list(f, segment)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::LocalId;

    fn var(name: &str, data_type: DataType) -> Token {
        Token::Variable {
            name: name.to_string(),
            variable: VariableRef::Local(LocalId(0)),
            data_type,
        }
    }

    #[test]
    fn test_statement_classification() {
        assert!(Token::constant(1).is_statement());
        assert!(var("x", DataType::U8).is_statement());
        assert!(!Token::identifier("x").is_statement());
        assert!(!Token::Operator(Operator::Comma).is_statement());
        assert!(!Token::CommaSeparated(vec![]).is_statement());
        assert!(!Token::VarType(DataType::U8).is_statement());
    }

    #[test]
    fn test_data_type_access() {
        assert_eq!(Token::constant(3).data_type(), None);
        assert_eq!(var("x", DataType::S16).data_type(), Some(DataType::S16));
    }

    #[test]
    fn test_display_renders_sexpr() {
        let tree = Token::BinaryOperation {
            op: Operator::Assign,
            left: Box::new(var("x", DataType::S32)),
            right: Box::new(Token::BinaryOperation {
                op: Operator::BinaryPlus,
                left: Box::new(var("a", DataType::S32)),
                right: Box::new(Token::Constant {
                    value: 2,
                    data_type: Some(DataType::S32),
                }),
                data_type: Some(DataType::S32),
            }),
            data_type: Some(DataType::S32),
        };

        assert_eq!(tree.to_string(), "(= x:s32 (+ a:s32 2:s32))");
    }

    #[test]
    fn test_display_cast_and_memory() {
        let cast = Token::ValueCast {
            argument: Box::new(var("b", DataType::S8)),
            data_type: DataType::S32,
        };
        assert_eq!(cast.to_string(), "(cast:s32 b:s8)");

        let access = Token::MemoryAccess {
            address: Box::new(Token::constant(0xFF00)),
            data_type: DataType::U8,
        };
        assert_eq!(access.to_string(), "u8[65280]");
    }
}
