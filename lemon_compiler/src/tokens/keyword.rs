//! Statement keywords recognised by the lexer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Function,
    Global,
    Define,
    Constant,
    Return,
    Call,
    Jump,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
}

impl Keyword {
    /// Get the exact string representation as it appears in source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Global => "global",
            Self::Define => "define",
            Self::Constant => "constant",
            Self::Return => "return",
            Self::Call => "call",
            Self::Jump => "jump",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Break => "break",
            Self::Continue => "continue",
        }
    }

    pub fn from_str(word: &str) -> Option<Self> {
        let keyword = match word {
            "function" => Self::Function,
            "global" => Self::Global,
            "define" => Self::Define,
            "constant" => Self::Constant,
            "return" => Self::Return,
            "call" => Self::Call,
            "jump" => Self::Jump,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "break" => Self::Break,
            "continue" => Self::Continue,
            _ => return None,
        };
        Some(keyword)
    }
}
