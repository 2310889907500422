//! Binary operator reduction with constant folding

use super::error::{CompileError, CompileResult};
use crate::tokens::{is_priority_right_to_left, Operator, Token, TokenList};

/// Evaluate `left op right` for the foldable arithmetic operators.
///
/// Arithmetic wraps on overflow. Division and modulo by zero yield 0; shifting
/// left by a negative or oversized amount yields 0 and right shifts clamp the
/// amount into `0..=63`.
pub fn fold_constants(op: Operator, left: i64, right: i64) -> Option<i64> {
    let value = match op {
        Operator::BinaryPlus => left.wrapping_add(right),
        Operator::BinaryMinus => left.wrapping_sub(right),
        Operator::BinaryMultiply => left.wrapping_mul(right),
        Operator::BinaryDivide if right == 0 => 0,
        Operator::BinaryDivide => left.wrapping_div(right),
        Operator::BinaryModulo if right == 0 => 0,
        Operator::BinaryModulo => left.wrapping_rem(right),
        Operator::BinaryShiftLeft => {
            if (0..64).contains(&right) {
                left << right
            } else {
                0
            }
        }
        Operator::BinaryShiftRight => left >> right.clamp(0, 63),
        _ => return None,
    };
    Some(value)
}

/// Position of the operator to reduce next, or `None` once no operator is left.
///
/// Lowest priority wins; on equal priority a right-to-left level prefers the
/// later operator.
fn find_reduction(tokens: &TokenList, line: u32, allow_semicolons: bool) -> CompileResult<Option<usize>> {
    let mut best_priority = u8::MAX;
    let mut best_position = None;

    for (i, token) in tokens.iter().enumerate() {
        let Some(op) = token.as_operator() else {
            continue;
        };
        if op == Operator::Semicolon && allow_semicolons {
            continue;
        }
        if i == 0 || i + 1 == tokens.len() || op == Operator::Semicolon {
            return Err(CompileError::operator_not_allowed(op, line));
        }

        let priority = op.priority();
        let is_lower = if priority == best_priority {
            is_priority_right_to_left(priority)
        } else {
            priority < best_priority
        };
        if is_lower {
            best_priority = priority;
            best_position = Some(i);
        }
    }
    Ok(best_position)
}

/// Repeatedly fold the lowest-priority operator with its neighbours.
///
/// `allow_semicolons` keeps `;` separators in place for `for` headers.
pub fn reduce_binary(tokens: &mut TokenList, line: u32, allow_semicolons: bool) -> CompileResult<()> {
    while let Some(position) = find_reduction(tokens, line, allow_semicolons)? {
        let Some(op) = tokens[position].as_operator() else {
            return Err(CompileError::internal("Reduction position is no operator", line));
        };
        if !tokens[position - 1].is_statement() {
            return Err(CompileError::misplaced_operand("Left of operator is no statement", line));
        }
        if !tokens[position + 1].is_statement() {
            return Err(CompileError::misplaced_operand("Right of operator is no statement", line));
        }

        let folded = match (&tokens[position - 1], &tokens[position + 1]) {
            (
                Token::Constant {
                    value: left,
                    data_type,
                },
                Token::Constant { value: right, .. },
            ) => fold_constants(op, *left, *right).map(|value| Token::Constant {
                value,
                data_type: *data_type,
            }),
            _ => None,
        };

        let right = tokens.erase(position + 1);
        let left = tokens.erase(position - 1);
        let node = folded.unwrap_or_else(|| Token::BinaryOperation {
            op,
            left: Box::new(left),
            right: Box::new(right),
            data_type: None,
        });
        tokens.replace_at(position - 1, node);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn op(operator: Operator) -> Token {
        Token::Operator(operator)
    }

    fn reduce(tokens: Vec<Token>) -> CompileResult<String> {
        let mut list: TokenList = tokens.into();
        reduce_binary(&mut list, 1, false)?;
        assert_eq!(list.len(), 1);
        Ok(list[0].to_string())
    }

    fn unresolved(name: &str) -> Token {
        // Parenthesis tokens act as opaque operands here
        Token::Parenthesis {
            kind: crate::tokens::ParenthesisKind::Bracket,
            content: vec![Token::identifier(name)].into(),
            data_type: None,
        }
    }

    #[test]
    fn test_folds_with_priority() {
        let result = reduce(vec![
            Token::constant(2),
            op(Operator::BinaryPlus),
            Token::constant(3),
            op(Operator::BinaryMultiply),
            Token::constant(4),
        ])
        .unwrap();
        assert_eq!(result, "14");
    }

    #[test]
    fn test_fold_keeps_left_type() {
        let mut list: TokenList = vec![
            Token::Constant {
                value: 6,
                data_type: Some(crate::types::DataType::U8),
            },
            op(Operator::BinaryDivide),
            Token::constant(0),
        ]
        .into();
        reduce_binary(&mut list, 1, false).unwrap();
        assert_eq!(
            list[0],
            Token::Constant {
                value: 0,
                data_type: Some(crate::types::DataType::U8)
            }
        );
    }

    #[test]
    fn test_fold_edge_cases() {
        assert_eq!(fold_constants(Operator::BinaryDivide, 7, 0), Some(0));
        assert_eq!(fold_constants(Operator::BinaryModulo, 7, 0), Some(0));
        assert_eq!(fold_constants(Operator::BinaryModulo, 7, 4), Some(3));
        assert_eq!(fold_constants(Operator::BinaryShiftLeft, 1, 4), Some(16));
        assert_eq!(fold_constants(Operator::BinaryShiftLeft, 1, 64), Some(0));
        assert_eq!(fold_constants(Operator::BinaryShiftRight, -8, 100), Some(-1));
        assert_eq!(fold_constants(Operator::BinaryPlus, i64::MAX, 1), Some(i64::MIN));
        assert_eq!(fold_constants(Operator::BinaryDivide, i64::MIN, -1), Some(i64::MIN));
        assert_eq!(fold_constants(Operator::BinaryAnd, 6, 3), None);
    }

    #[test]
    fn test_non_foldable_operator_builds_node() {
        let result = reduce(vec![
            Token::constant(6),
            op(Operator::BinaryAnd),
            Token::constant(3),
        ])
        .unwrap();
        assert_eq!(result, "(& 6 3)");
    }

    #[test]
    fn test_left_associativity() {
        let result = reduce(vec![
            unresolved("a"),
            op(Operator::BinaryMinus),
            unresolved("b"),
            op(Operator::BinaryMinus),
            unresolved("c"),
        ])
        .unwrap();
        assert_eq!(result, "(- (- [a] [b]) [c])");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let result = reduce(vec![
            unresolved("a"),
            op(Operator::Assign),
            unresolved("b"),
            op(Operator::Assign),
            unresolved("c"),
        ])
        .unwrap();
        assert_eq!(result, "(= [a] (= [b] [c]))");
    }

    #[test]
    fn test_misplaced_operators() {
        let error = reduce(vec![op(Operator::BinaryPlus), Token::constant(1)]).unwrap_err();
        assert_eq!(error.message(), "Binary operator + is not allowed here");

        let error = reduce(vec![Token::constant(1), op(Operator::BinaryMultiply)]).unwrap_err();
        assert_eq!(error.message(), "Binary operator * is not allowed here");

        let error = reduce(vec![
            Token::constant(1),
            op(Operator::Semicolon),
            Token::constant(2),
        ])
        .unwrap_err();
        assert_eq!(error.message(), "Semicolon ; is only allowed in for-loops");
    }

    #[test]
    fn test_operands_must_be_statements() {
        let error = reduce(vec![
            Token::constant(1),
            op(Operator::BinaryPlus),
            op(Operator::UnaryNot),
            op(Operator::BinaryPlus),
            Token::constant(2),
        ])
        .unwrap_err();
        assert_matches!(error, CompileError::Structural { .. });
    }

    #[test]
    fn test_semicolons_kept_in_for_mode() {
        let mut list: TokenList = vec![
            Token::constant(1),
            op(Operator::BinaryPlus),
            Token::constant(1),
            op(Operator::Semicolon),
            unresolved("i"),
            op(Operator::CompareLess),
            Token::constant(10),
        ]
        .into();
        reduce_binary(&mut list, 1, true).unwrap();
        let rendered: Vec<String> = list.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["2", ";", "(< [i] 10)"]);
    }
}
