//! Operator enumeration with priority and associativity tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// All operators known to the expression compiler, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Assign,
    AssignPlus,
    AssignMinus,
    AssignMultiply,
    AssignDivide,
    AssignModulo,
    AssignShiftLeft,
    AssignShiftRight,
    AssignAnd,
    AssignOr,
    AssignXor,
    BinaryPlus,
    BinaryMinus,
    BinaryMultiply,
    BinaryDivide,
    BinaryModulo,
    BinaryShiftLeft,
    BinaryShiftRight,
    BinaryAnd,
    BinaryOr,
    BinaryXor,
    LogicalAnd,
    LogicalOr,
    UnaryNot,
    UnaryBitNot,
    UnaryDecrement,
    UnaryIncrement,
    CompareEqual,
    CompareNotEqual,
    CompareLess,
    CompareLessOrEqual,
    CompareGreater,
    CompareGreaterOrEqual,
    QuestionMark,
    Colon,
    Semicolon,
    Comma,
    ParenthesisLeft,
    ParenthesisRight,
    BracketLeft,
    BracketRight,
}

/// Indexed by `Operator as usize`
const PRIORITIES: [u8; 41] = [
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, // assignments
    6, 6, // + -
    5, 5, 5, // * / %
    7, 7, // << >>
    10, // &
    12, // |
    11, // ^
    13, // &&
    14, // ||
    3, 3, 3, 3, // ! ~ -- ++
    9, 9, // == !=
    8, 8, 8, 8, // < <= > >=
    15, 15, // ? :
    18, // ;
    17, // ,
    2, 2, 2, 2, // ( ) [ ]
];

/// Indexed by priority; `true` means right-to-left
const RIGHT_TO_LEFT: [bool; 19] = [
    false, false, false, true, false, false, false, false, false, false, false, false, false,
    false, false, true, true, false, false,
];

const SYMBOLS: [&str; 41] = [
    "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=", "^=", "+", "-", "*", "/", "%",
    "<<", ">>", "&", "|", "^", "&&", "||", "!", "~", "--", "++", "==", "!=", "<", "<=", ">", ">=",
    "?", ":", ";", ",", "(", ")", "[", "]",
];

const ALL: [Operator; 41] = [
    Operator::Assign,
    Operator::AssignPlus,
    Operator::AssignMinus,
    Operator::AssignMultiply,
    Operator::AssignDivide,
    Operator::AssignModulo,
    Operator::AssignShiftLeft,
    Operator::AssignShiftRight,
    Operator::AssignAnd,
    Operator::AssignOr,
    Operator::AssignXor,
    Operator::BinaryPlus,
    Operator::BinaryMinus,
    Operator::BinaryMultiply,
    Operator::BinaryDivide,
    Operator::BinaryModulo,
    Operator::BinaryShiftLeft,
    Operator::BinaryShiftRight,
    Operator::BinaryAnd,
    Operator::BinaryOr,
    Operator::BinaryXor,
    Operator::LogicalAnd,
    Operator::LogicalOr,
    Operator::UnaryNot,
    Operator::UnaryBitNot,
    Operator::UnaryDecrement,
    Operator::UnaryIncrement,
    Operator::CompareEqual,
    Operator::CompareNotEqual,
    Operator::CompareLess,
    Operator::CompareLessOrEqual,
    Operator::CompareGreater,
    Operator::CompareGreaterOrEqual,
    Operator::QuestionMark,
    Operator::Colon,
    Operator::Semicolon,
    Operator::Comma,
    Operator::ParenthesisLeft,
    Operator::ParenthesisRight,
    Operator::BracketLeft,
    Operator::BracketRight,
];

/// Signature catalog family an operator draws from during typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Assignment,
    Symmetric,
    Comparison,
    Ternary,
    Other,
}

impl Operator {
    /// Binding rank; lower values are reduced first
    pub fn priority(self) -> u8 {
        PRIORITIES[self as usize]
    }

    /// Whether operators of this priority group right-to-left
    pub fn is_right_to_left(self) -> bool {
        is_priority_right_to_left(self.priority())
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self as usize]
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS
            .iter()
            .position(|candidate| *candidate == symbol)
            .map(|index| ALL[index])
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Self::UnaryNot | Self::UnaryBitNot | Self::UnaryDecrement | Self::UnaryIncrement
        )
    }

    pub fn category(self) -> OperatorCategory {
        match self {
            Self::Assign
            | Self::AssignPlus
            | Self::AssignMinus
            | Self::AssignMultiply
            | Self::AssignDivide
            | Self::AssignModulo
            | Self::AssignShiftLeft
            | Self::AssignShiftRight
            | Self::AssignAnd
            | Self::AssignOr
            | Self::AssignXor => OperatorCategory::Assignment,

            // Shifts and multiplication share the symmetric catalog
            Self::BinaryPlus
            | Self::BinaryMinus
            | Self::BinaryMultiply
            | Self::BinaryDivide
            | Self::BinaryModulo
            | Self::BinaryShiftLeft
            | Self::BinaryShiftRight
            | Self::BinaryAnd
            | Self::BinaryOr
            | Self::BinaryXor
            | Self::LogicalAnd
            | Self::LogicalOr
            | Self::Colon => OperatorCategory::Symmetric,

            Self::CompareEqual
            | Self::CompareNotEqual
            | Self::CompareLess
            | Self::CompareLessOrEqual
            | Self::CompareGreater
            | Self::CompareGreaterOrEqual => OperatorCategory::Comparison,

            Self::QuestionMark => OperatorCategory::Ternary,

            _ => OperatorCategory::Other,
        }
    }

    /// Message used when the operator sits where no binary reduction may take it
    pub fn not_allowed_message(self) -> String {
        if self.is_unary() {
            format!("Unary operator {} is not allowed here", self.symbol())
        } else if (self as usize) <= Self::Colon as usize {
            format!("Binary operator {} is not allowed here", self.symbol())
        } else {
            match self {
                Self::Semicolon => "Semicolon ; is only allowed in for-loops".to_string(),
                Self::Comma => "Comma , is not allowed here".to_string(),
                Self::ParenthesisLeft | Self::ParenthesisRight => {
                    format!("Parenthesis {} is not allowed here", self.symbol())
                }
                _ => format!("Bracket {} is not allowed here", self.symbol()),
            }
        }
    }
}

/// Associativity lookup by priority level
pub fn is_priority_right_to_left(priority: u8) -> bool {
    RIGHT_TO_LEFT
        .get(priority as usize)
        .copied()
        .unwrap_or(false)
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
