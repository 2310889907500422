//! Parenthesis grouping and comma splitting

use super::error::{CompileError, CompileResult};
use crate::tokens::{Operator, ParenthesisKind, Token, TokenList};

/// Fold every matched `( )` / `[ ]` pair into one Parenthesis token owning its interior.
///
/// Returns the deepest nesting level seen.
pub fn group_parentheses(tokens: &mut TokenList, line: u32, max_depth: usize) -> CompileResult<usize> {
    let mut stack: Vec<(ParenthesisKind, usize)> = Vec::new();
    let mut deepest = 0;

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].as_operator() {
            Some(op @ (Operator::ParenthesisLeft | Operator::BracketLeft)) => {
                let kind = if op == Operator::ParenthesisLeft {
                    ParenthesisKind::Parenthesis
                } else {
                    ParenthesisKind::Bracket
                };
                stack.push((kind, i));
                if stack.len() > max_depth {
                    return Err(CompileError::limit_exceeded("nesting levels", max_depth, line));
                }
                deepest = deepest.max(stack.len());
            }
            Some(op @ (Operator::ParenthesisRight | Operator::BracketRight)) => {
                let kind = if op == Operator::ParenthesisRight {
                    ParenthesisKind::Parenthesis
                } else {
                    ParenthesisKind::Bracket
                };
                let start = match stack.last() {
                    Some(&(open_kind, start)) if open_kind == kind => start,
                    _ => return Err(CompileError::unmatched_parenthesis(false, line)),
                };
                stack.pop();

                tokens.erase(i);
                let content = tokens.move_range(start + 1, i - start - 1);
                tokens.replace_at(
                    start,
                    Token::Parenthesis {
                        kind,
                        content,
                        data_type: None,
                    },
                );
                i = start;
            }
            _ => {}
        }
        i += 1;
    }

    if !stack.is_empty() {
        return Err(CompileError::unmatched_parenthesis(true, line));
    }
    Ok(deepest)
}

/// Wrap a list containing top-level commas into one CommaSeparated token.
///
/// Returns whether the list was split.
pub fn split_commas(tokens: &mut TokenList, line: u32, max_segments: usize) -> CompileResult<bool> {
    let positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_operator(Operator::Comma))
        .map(|(index, _)| index)
        .collect();

    if positions.is_empty() {
        return Ok(false);
    }
    if positions.len() + 1 > max_segments {
        return Err(CompileError::limit_exceeded("comma segments", max_segments, line));
    }

    // Detach back to front so earlier positions stay valid
    let mut segments = Vec::with_capacity(positions.len() + 1);
    let mut end = tokens.len();
    for &position in positions.iter().rev() {
        segments.push(tokens.move_range(position + 1, end - position - 1));
        tokens.erase(position);
        end = position;
    }
    segments.push(tokens.move_range(0, end));
    segments.reverse();

    if !tokens.is_empty() {
        return Err(CompileError::internal(
            "Token list must only contain the comma separated list afterwards",
            line,
        ));
    }
    tokens.push(Token::CommaSeparated(segments));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn op(operator: Operator) -> Token {
        Token::Operator(operator)
    }

    fn ident(name: &str) -> Token {
        Token::identifier(name)
    }

    fn depth_of(token: &Token) -> usize {
        match token {
            Token::Parenthesis { content, .. } => {
                1 + content.iter().map(depth_of).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    #[test]
    fn test_nested_grouping_preserves_depth() {
        // a + ((b) * [c])
        let mut tokens: TokenList = vec![
            ident("a"),
            op(Operator::BinaryPlus),
            op(Operator::ParenthesisLeft),
            op(Operator::ParenthesisLeft),
            ident("b"),
            op(Operator::ParenthesisRight),
            op(Operator::BinaryMultiply),
            op(Operator::BracketLeft),
            ident("c"),
            op(Operator::BracketRight),
            op(Operator::ParenthesisRight),
        ]
        .into();

        let deepest = group_parentheses(&mut tokens, 1, 64).unwrap();
        assert_eq!(deepest, 2);
        assert_eq!(tokens.len(), 3);
        assert_eq!(depth_of(&tokens[2]), 2);

        let Token::Parenthesis { content, kind, .. } = &tokens[2] else {
            panic!("expected parenthesis");
        };
        assert_eq!(*kind, ParenthesisKind::Parenthesis);
        assert_eq!(content.len(), 3);
        assert_matches!(
            content[2],
            Token::Parenthesis {
                kind: ParenthesisKind::Bracket,
                ..
            }
        );
    }

    #[test]
    fn test_empty_parenthesis_has_no_content() {
        let mut tokens: TokenList = vec![
            ident("f"),
            op(Operator::ParenthesisLeft),
            op(Operator::ParenthesisRight),
        ]
        .into();
        group_parentheses(&mut tokens, 1, 64).unwrap();
        assert_matches!(&tokens[1], Token::Parenthesis { content, .. } if content.is_empty());
    }

    #[test]
    fn test_unmatched_parentheses() {
        let mut closed: TokenList = vec![ident("a"), op(Operator::ParenthesisRight)].into();
        let error = group_parentheses(&mut closed, 7, 64).unwrap_err();
        assert_eq!(error.message(), "Parenthesis not matching (too many closed)");
        assert_eq!(error.line(), 7);

        let mut open: TokenList = vec![op(Operator::ParenthesisLeft), ident("a")].into();
        let error = group_parentheses(&mut open, 7, 64).unwrap_err();
        assert_eq!(error.message(), "Parenthesis not matching (too many open)");

        let mut crossed: TokenList = vec![
            op(Operator::ParenthesisLeft),
            ident("a"),
            op(Operator::BracketRight),
        ]
        .into();
        assert!(group_parentheses(&mut crossed, 7, 64).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let mut tokens: TokenList = vec![
            op(Operator::ParenthesisLeft),
            op(Operator::ParenthesisLeft),
            ident("a"),
            op(Operator::ParenthesisRight),
            op(Operator::ParenthesisRight),
        ]
        .into();
        assert_matches!(
            group_parentheses(&mut tokens, 1, 1),
            Err(CompileError::Internal { .. })
        );
    }

    #[test]
    fn test_split_commas() {
        let mut tokens: TokenList = vec![
            ident("a"),
            op(Operator::Comma),
            ident("b"),
            op(Operator::BinaryPlus),
            ident("c"),
            op(Operator::Comma),
            ident("d"),
        ]
        .into();

        assert!(split_commas(&mut tokens, 1, 256).unwrap());
        assert_eq!(tokens.len(), 1);
        let Token::CommaSeparated(segments) = &tokens[0] else {
            panic!("expected comma separated list");
        };
        let lengths: Vec<usize> = segments.iter().map(TokenList::len).collect();
        assert_eq!(lengths, vec![1, 3, 1]);
        assert_eq!(segments[2][0], ident("d"));
    }

    #[test]
    fn test_split_without_commas_is_noop() {
        let mut tokens: TokenList = vec![ident("a")].into();
        assert!(!split_commas(&mut tokens, 1, 256).unwrap());
        assert_eq!(tokens[0], ident("a"));
    }
}
