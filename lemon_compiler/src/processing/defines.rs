//! Define substitution

use super::error::{CompileError, CompileResult};
use crate::symbols::GlobalsLookup;
use crate::tokens::{Token, TokenList};

/// Replace every identifier naming a define with the define's tokens.
///
/// The scan resumes at the splice position, so a define whose content starts
/// with another define expands again. Returns the number of substitutions;
/// more than `max_expansions` means a self-referencing define.
pub fn expand_defines(
    tokens: &mut TokenList,
    globals: &GlobalsLookup,
    line: u32,
    max_expansions: usize,
) -> CompileResult<usize> {
    let mut expanded = 0;
    let mut i = 0;
    while i < tokens.len() {
        let define = match &tokens[i] {
            Token::Identifier(name) => globals.get_define_by_name(name),
            _ => None,
        };

        match define {
            Some(define) => {
                tokens.erase(i);
                tokens.splice(i, define.content.iter().cloned());
                expanded += 1;
                if expanded > max_expansions {
                    return Err(CompileError::limit_exceeded("define expansions", max_expansions, line));
                }
            }
            None => i += 1,
        }
    }
    Ok(expanded)
}
