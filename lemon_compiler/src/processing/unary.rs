//! Unary operator reduction

use super::error::{CompileError, CompileResult};
use crate::tokens::{Operator, Token, TokenList};

fn fold(op: Operator, argument: Token) -> Token {
    Token::UnaryOperation {
        op,
        argument: Box::new(argument),
        data_type: None,
    }
}

/// Fold postfix `++`/`--` left to right, then prefix operators right to left
pub fn reduce_unary(tokens: &mut TokenList, line: u32) -> CompileResult<()> {
    reduce_postfix(tokens);
    reduce_prefix(tokens, line)
}

fn reduce_postfix(tokens: &mut TokenList) {
    let mut i = 1;
    while i < tokens.len() {
        if let Some(op @ (Operator::UnaryDecrement | Operator::UnaryIncrement)) = tokens[i].as_operator() {
            if tokens[i - 1].is_statement() {
                // The token after a folded postfix is not inspected again
                let argument = tokens.erase(i - 1);
                tokens.replace_at(i - 1, fold(op, argument));
                i += 1;
            }
        }
        i += 1;
    }
}

fn reduce_prefix(tokens: &mut TokenList, line: u32) -> CompileResult<()> {
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        let Some(op) = tokens[i].as_operator() else {
            continue;
        };
        let is_last = i + 1 == tokens.len();

        match op {
            Operator::BinaryMinus | Operator::UnaryNot | Operator::UnaryBitNot => {
                if is_last {
                    return Err(CompileError::misplaced_operand(
                        "Unary operator not allowed as last",
                        line,
                    ));
                }
                // A minus after an operand is the binary one
                if op == Operator::BinaryMinus && i > 0 && tokens[i - 1].as_operator().is_none() {
                    continue;
                }
                if !tokens[i + 1].is_statement() {
                    return Err(CompileError::misplaced_operand(
                        "Right of operator is no statement",
                        line,
                    ));
                }
            }
            Operator::UnaryDecrement | Operator::UnaryIncrement => {
                if is_last || !tokens[i + 1].is_statement() {
                    continue;
                }
            }
            _ => continue,
        }

        let argument = tokens.erase(i + 1);
        tokens.replace_at(i, fold(op, argument));
    }
    Ok(())
}
