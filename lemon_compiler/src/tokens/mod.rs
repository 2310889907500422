//! Token model for the expression compiler
//!
//! Raw lexer tokens (identifiers, keywords, operators, type names, constants)
//! are rewritten in place by the processing stages until each statement is a
//! single typed tree of statement tokens.

pub mod keyword;
pub mod operator;
pub mod token;
pub mod token_list;

pub use keyword::Keyword;
pub use operator::{is_priority_right_to_left, Operator, OperatorCategory};
pub use token::{FunctionCall, ParenthesisKind, Token};
pub use token_list::TokenList;
