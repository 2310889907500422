//! Statement token processing
//!
//! Turns the raw token list of one statement into typed expression trees.
//! Every parenthesis content and comma segment is a linear list of its own;
//! lists are reduced leaves first so an enclosing list only ever sees
//! finished statement tokens inside its parentheses.
//!
//! Stages per statement: define expansion, grouping, comma splitting,
//! recognition (declarations, calls, memory accesses, casts, identifiers),
//! unary reduction, binary reduction and finally type assignment on the
//! root statements.

mod binary;
mod defines;
mod error;
mod grouping;
mod recognition;
mod signatures;
mod typing;
mod unary;

pub use binary::{fold_constants, reduce_binary};
pub use defines::expand_defines;
pub use error::{CompileError, CompileResult};
pub use grouping::{group_parentheses, split_commas};
pub use recognition::BASE_CALL_PREFIX;
pub use signatures::{best_signature, overload_cost, select_overload, BinarySignature};
pub use unary::reduce_unary;

use crate::config::compile_time::expression::{
    MAX_COMMA_SEGMENTS, MAX_NESTING_DEPTH, MAX_TOKENS_PER_STATEMENT,
};
use crate::config::ProcessingPreferences;
use crate::symbols::{FunctionScope, GlobalsLookup};
use crate::tokens::{Token, TokenList};
use crate::types::DataType;

/// Compiles statements against a global lookup and, inside a function body,
/// the function's scope.
pub struct TokenProcessor<'a> {
    globals: &'a GlobalsLookup,
    scope: Option<&'a mut FunctionScope>,
    preferences: ProcessingPreferences,
    line: u32,
}

impl<'a> TokenProcessor<'a> {
    pub fn new(globals: &'a GlobalsLookup, scope: &'a mut FunctionScope) -> Self {
        Self {
            globals,
            scope: Some(scope),
            preferences: ProcessingPreferences::default(),
            line: 0,
        }
    }

    /// Processor for expressions outside any function; declarations are rejected
    pub fn without_function(globals: &'a GlobalsLookup) -> Self {
        Self {
            globals,
            scope: None,
            preferences: ProcessingPreferences::default(),
            line: 0,
        }
    }

    pub fn with_preferences(mut self, preferences: ProcessingPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn scope(&self) -> Option<&FunctionScope> {
        self.scope.as_deref()
    }

    pub fn scope_mut(&mut self) -> Option<&mut FunctionScope> {
        self.scope.as_deref_mut()
    }

    /// Compile one statement in place.
    ///
    /// On success `tokens` holds the typed root statements; top-level roots are
    /// typed with `result_type` as context. On failure the list is left
    /// partially processed and must be discarded.
    pub fn process_tokens(
        &mut self,
        tokens: &mut TokenList,
        line: u32,
        result_type: Option<DataType>,
    ) -> CompileResult<()> {
        self.line = line;
        let result = self.compile_statement(tokens, result_type);

        if let Err(error) = &result {
            log_error!(error.error_code(), "Statement processing failed",
                "line" => line,
                "kind" => error.kind_name(),
                "error" => error.message()
            );
        }
        result
    }

    /// Reduce the header of a `for` loop.
    ///
    /// Only grouping, unary and binary reduction run; top-level `;` separators
    /// stay in the list between the reduced parts.
    pub fn process_for_preprocessor(&mut self, tokens: &mut TokenList, line: u32) -> CompileResult<()> {
        self.line = line;
        let result = group_parentheses(tokens, line, MAX_NESTING_DEPTH)
            .and_then(|_| self.reduce_for_list(tokens, true));

        if let Err(error) = &result {
            log_error!(error.error_code(), "For-loop header processing failed",
                "line" => line,
                "error" => error.message()
            );
        }
        result
    }

    fn compile_statement(&mut self, tokens: &mut TokenList, result_type: Option<DataType>) -> CompileResult<()> {
        self.check_token_limit(tokens)?;

        let expanded = expand_defines(tokens, self.globals, self.line, MAX_TOKENS_PER_STATEMENT)?;
        if expanded > 0 {
            self.check_token_limit(tokens)?;
            self.trace_stage("defines", tokens);
        }

        let depth = group_parentheses(tokens, self.line, MAX_NESTING_DEPTH)?;
        log_debug!("Grouped parentheses", "line" => self.line, "depth" => depth);

        self.process_linear_list(tokens)?;

        for token in tokens.iter_mut().filter(|token| token.is_statement()) {
            self.assign_type(token, result_type)?;
        }
        self.trace_stage("typing", tokens);

        if self.preferences.log_statement_summaries {
            log_debug!("Statement compiled",
                "line" => self.line,
                "roots" => tokens.len(),
                "tree" => render_list(tokens)
            );
        }
        Ok(())
    }

    fn check_token_limit(&self, tokens: &TokenList) -> CompileResult<()> {
        if tokens.len() > MAX_TOKENS_PER_STATEMENT {
            return Err(CompileError::limit_exceeded(
                "tokens",
                MAX_TOKENS_PER_STATEMENT,
                self.line,
            ));
        }
        Ok(())
    }

    /// Split commas, then reduce each resulting segment
    fn process_linear_list(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        if split_commas(tokens, self.line, MAX_COMMA_SEGMENTS)? {
            if let Some(Token::CommaSeparated(segments)) = tokens.get_mut(0) {
                for segment in segments.iter_mut() {
                    self.process_segment(segment)?;
                }
            }
            return Ok(());
        }
        self.process_segment(tokens)
    }

    fn process_segment(&mut self, tokens: &mut TokenList) -> CompileResult<()> {
        for token in tokens.iter_mut() {
            if let Token::Parenthesis { content, .. } = token {
                if !content.is_empty() {
                    self.process_linear_list(content)?;
                }
            }
        }

        self.process_variable_definitions(tokens)?;
        self.process_function_calls(tokens)?;
        self.process_memory_accesses(tokens)?;
        self.process_explicit_casts(tokens)?;
        self.process_identifiers(tokens)?;
        self.trace_stage("recognition", tokens);

        reduce_unary(tokens, self.line)?;
        self.trace_stage("unary", tokens);

        reduce_binary(tokens, self.line, false)?;
        self.trace_stage("binary", tokens);
        Ok(())
    }

    fn reduce_for_list(&mut self, tokens: &mut TokenList, is_root: bool) -> CompileResult<()> {
        for token in tokens.iter_mut() {
            if let Token::Parenthesis { content, .. } = token {
                self.reduce_for_list(content, false)?;
            }
        }
        reduce_unary(tokens, self.line)?;
        reduce_binary(tokens, self.line, is_root)
    }

    fn trace_stage(&self, stage: &str, tokens: &TokenList) {
        if self.preferences.trace_stages {
            log_debug!("Processing stage finished",
                "stage" => stage,
                "line" => self.line,
                "tokens" => render_list(tokens)
            );
        }
    }
}

fn render_list(tokens: &TokenList) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{FunctionId, Parameter};
    use crate::tokens::{Keyword, Operator};
    use assert_matches::assert_matches;

    /// Whitespace separated source words to raw tokens
    fn lex(source: &str) -> TokenList {
        source
            .split_whitespace()
            .map(|word| {
                if let Ok(value) = word.parse::<i64>() {
                    Token::constant(value)
                } else if let Some(op) = Operator::from_symbol(word) {
                    Token::Operator(op)
                } else if let Some(data_type) = DataType::from_name(word) {
                    Token::VarType(data_type)
                } else if let Some(keyword) = Keyword::from_str(word) {
                    Token::Keyword(keyword)
                } else {
                    Token::identifier(word)
                }
            })
            .collect()
    }

    struct Fixture {
        globals: GlobalsLookup,
        main: FunctionId,
        narrow_f: FunctionId,
        wide_f: FunctionId,
    }

    fn fixture() -> Fixture {
        let mut globals = GlobalsLookup::new();
        globals.add_global_variable("counter", DataType::U32).unwrap();
        globals.add_global_variable("ratio", DataType::Float).unwrap();
        globals
            .add_define("TWO", vec![Token::constant(2)].into())
            .unwrap();
        let main = globals
            .add_function(
                "main",
                DataType::Void,
                vec![
                    Parameter::new("a", DataType::S32),
                    Parameter::new("b", DataType::S32),
                ],
            )
            .unwrap();
        let narrow_f = globals
            .add_function(
                "f",
                DataType::S8,
                vec![
                    Parameter::new("x", DataType::S8),
                    Parameter::new("y", DataType::S8),
                ],
            )
            .unwrap();
        let wide_f = globals
            .add_function(
                "f",
                DataType::S32,
                vec![
                    Parameter::new("a", DataType::S32),
                    Parameter::new("b", DataType::S32),
                ],
            )
            .unwrap();
        globals.add_function("g", DataType::U8, vec![]).unwrap();

        Fixture {
            globals,
            main,
            narrow_f,
            wide_f,
        }
    }

    fn compile_in(
        globals: &GlobalsLookup,
        scope: &mut FunctionScope,
        source: &str,
        line: u32,
    ) -> CompileResult<String> {
        let mut tokens = lex(source);
        TokenProcessor::new(globals, scope).process_tokens(&mut tokens, line, None)?;
        Ok(render_list(&tokens))
    }

    fn compile(source: &str) -> CompileResult<String> {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        compile_in(&fixture.globals, &mut scope, source, 1)
    }

    #[test]
    fn test_declaration_with_arithmetic() {
        assert_eq!(
            compile("s32 x = a + b * 2").unwrap(),
            "(= x:s32 (+ a:s32 (* b:s32 2:s32)))"
        );
    }

    #[test]
    fn test_root_carries_result_type() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        let mut tokens = lex("a < b");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut tokens, 1, None)
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].data_type(), Some(DataType::Bool));
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(compile("2 + 3 * 4").unwrap(), "14:const_int");
        assert_eq!(compile("7 / 0").unwrap(), "0:const_int");
        assert_eq!(compile("7 % 0").unwrap(), "0:const_int");
    }

    #[test]
    fn test_result_type_context() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        let mut tokens = lex("2 + 3");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut tokens, 1, Some(DataType::U8))
            .unwrap();
        assert_eq!(render_list(&tokens), "5:u8");
    }

    #[test]
    fn test_parentheses_override_priority() {
        assert_eq!(
            compile("s32 x = ( a + b ) * 2").unwrap(),
            "(= x:s32 (* (+ a:s32 b:s32) 2:s32))"
        );
    }

    #[test]
    fn test_associativity() {
        assert_eq!(
            compile("a - b - 1").unwrap(),
            "(- (- a:s32 b:s32) (cast:s32 1:const_int))"
        );
        assert_eq!(
            compile("s32 x = a = b").unwrap(),
            "(= x:s32 (= a:s32 b:s32))"
        );
    }

    #[test]
    fn test_ternary_typing() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        compile_in(&fixture.globals, &mut scope, "s8 c = 1", 1).unwrap();

        let mut tokens = lex("a < c ? a : c");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut tokens, 2, None)
            .unwrap();
        assert_eq!(
            render_list(&tokens),
            "(? (< a:s32 (cast:s32 c:s8)) (: a:s32 (cast:s32 c:s8)))"
        );
        assert_eq!(tokens[0].data_type(), Some(DataType::S32));
    }

    #[test]
    fn test_ternary_condition_must_cast_to_bool() {
        assert_matches!(
            compile("ratio ? a : b"),
            Err(CompileError::Type { .. })
        );
    }

    #[test]
    fn test_repeated_postfix_is_rejected() {
        let error = compile("a ++ ++").unwrap_err();
        assert_matches!(error, CompileError::Structural { .. });
        assert_eq!(error.message(), "Unary operator ++ is not allowed here");
    }

    #[test]
    fn test_unresolved_identifier_reports_line() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        let error = compile_in(&fixture.globals, &mut scope, "a + zzz", 42).unwrap_err();
        assert_matches!(error, CompileError::Resolution { .. });
        assert_eq!(error.line(), 42);
        assert_eq!(error.message(), "Unable to resolve identifier: zzz");
    }

    #[test]
    fn test_implicit_cast_on_narrow_operand() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();
        compile_in(&fixture.globals, &mut scope, "s8 c = 1", 1).unwrap();
        assert_eq!(
            compile_in(&fixture.globals, &mut scope, "c + a", 2).unwrap(),
            "(+ (cast:s32 c:s8) a:s32)"
        );
    }

    #[test]
    fn test_define_expansion() {
        assert_eq!(
            compile("TWO * a").unwrap(),
            "(* (cast:s32 2:const_int) a:s32)"
        );
    }

    #[test]
    fn test_global_assignment() {
        assert_eq!(compile("counter = a").unwrap(), "(= counter:u32 a:s32)");
    }

    #[test]
    fn test_overload_resolution() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();

        let mut constants = lex("f ( 1 , 2 )");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut constants, 1, None)
            .unwrap();
        assert_eq!(render_list(&constants), "(f:s8 1:const_int 2:const_int)");
        assert_matches!(&constants[0], Token::Function(call) if call.function == Some(fixture.narrow_f));

        let mut variables = lex("f ( a , b )");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut variables, 2, None)
            .unwrap();
        assert_eq!(render_list(&variables), "(f:s32 a:s32 b:s32)");
        assert_matches!(&variables[0], Token::Function(call) if call.function == Some(fixture.wide_f));
    }

    #[test]
    fn test_overload_prefers_furthest_narrowing() {
        let mut globals = GlobalsLookup::new();
        globals.add_global_variable("w", DataType::U32).unwrap();
        let byte = globals
            .add_function("f", DataType::U8, vec![Parameter::new("v", DataType::U8)])
            .unwrap();
        globals
            .add_function("f", DataType::U16, vec![Parameter::new("v", DataType::U16)])
            .unwrap();

        let mut tokens = lex("f ( w )");
        TokenProcessor::without_function(&globals)
            .process_tokens(&mut tokens, 1, None)
            .unwrap();
        assert_eq!(render_list(&tokens), "(f:u8 w:u32)");
        assert_matches!(&tokens[0], Token::Function(call) if call.function == Some(byte));
    }

    #[test]
    fn test_nested_calls() {
        assert_eq!(
            compile("f ( g ( ) , 1 )").unwrap(),
            "(f:s8 (g:u8) 1:const_int)"
        );
    }

    #[test]
    fn test_call_errors() {
        assert_matches!(
            compile("f ( a )"),
            Err(CompileError::Type { .. })
        );
        assert_matches!(
            compile("nope ( 1 )"),
            Err(CompileError::Resolution { .. })
        );
        let error = compile("f ( a + , b )").unwrap_err();
        assert_matches!(error, CompileError::Structural { .. });
    }

    #[test]
    fn test_base_call() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.wide_f).unwrap();

        let mut tokens = lex("base.f ( a , b )");
        TokenProcessor::new(&fixture.globals, &mut scope)
            .process_tokens(&mut tokens, 3, None)
            .unwrap();
        assert_matches!(
            &tokens[0],
            Token::Function(call) if call.is_base_call && call.function == Some(fixture.wide_f)
        );

        let error = compile_in(&fixture.globals, &mut scope, "base.f ( a )", 4).unwrap_err();
        assert_eq!(error.message(), "Base function call has different parameter count");

        let error = compile_in(&fixture.globals, &mut scope, "base.f ( a , 1 )", 5).unwrap_err();
        assert_eq!(error.message(), "Base function call has different parameter at index 1");
    }

    #[test]
    fn test_memory_access_and_casts() {
        assert_eq!(compile("u8 [ 65280 ]").unwrap(), "u8[65280:u32]");
        assert_eq!(compile("u8 ( a )").unwrap(), "(cast:u8 a:s32)");

        let error = compile("float ( a )").unwrap_err();
        assert_eq!(error.message(), "Explicit cast not possible");

        let error = compile("u8 [ ]").unwrap_err();
        assert_eq!(error.message(), "Expected exactly one token inside brackets");
    }

    #[test]
    fn test_declaration_errors() {
        assert_matches!(
            compile("s32 a"),
            Err(CompileError::Resolution { .. })
        );
        let error = compile("void v").unwrap_err();
        assert_eq!(error.message(), "void variables not allowed");
        let error = compile("a + u8").unwrap_err();
        assert_eq!(error.message(), "Type name must not be the last token");
    }

    #[test]
    fn test_structural_errors() {
        let error = compile("( a + b").unwrap_err();
        assert_eq!(error.message(), "Parenthesis not matching (too many open)");

        let error = compile("a + b )").unwrap_err();
        assert_eq!(error.message(), "Parenthesis not matching (too many closed)");

        let error = compile("a ; b").unwrap_err();
        assert_eq!(error.message(), "Semicolon ; is only allowed in for-loops");
    }

    #[test]
    fn test_block_scoping() {
        let fixture = fixture();
        let mut scope = FunctionScope::for_function(&fixture.globals, fixture.main).unwrap();

        scope.begin_block();
        compile_in(&fixture.globals, &mut scope, "u8 t = 1", 1).unwrap();
        assert_eq!(compile_in(&fixture.globals, &mut scope, "t", 2).unwrap(), "t:u8");
        scope.end_block().unwrap();

        assert!(compile_in(&fixture.globals, &mut scope, "t", 3).is_err());

        // Redeclaring with the same type reuses the local slot
        let locals_before = scope.locals().len();
        compile_in(&fixture.globals, &mut scope, "u8 t = 2", 4).unwrap();
        assert_eq!(scope.locals().len(), locals_before);
    }

    #[test]
    fn test_without_function() {
        let fixture = fixture();
        let mut processor = TokenProcessor::without_function(&fixture.globals);

        let mut tokens = lex("counter + 1");
        processor.process_tokens(&mut tokens, 1, None).unwrap();
        assert_eq!(render_list(&tokens), "(+ counter:u32 (cast:u32 1:const_int))");

        let mut declaration = lex("u8 t");
        assert_matches!(
            processor.process_tokens(&mut declaration, 2, None),
            Err(CompileError::Internal { .. })
        );
    }

    #[test]
    fn test_token_limit() {
        let fixture = fixture();
        let mut processor = TokenProcessor::without_function(&fixture.globals);
        let mut tokens: TokenList = (0..=MAX_TOKENS_PER_STATEMENT)
            .map(|_| Token::constant(1))
            .collect();
        let error = processor.process_tokens(&mut tokens, 1, None).unwrap_err();
        assert!(error.requires_halt());
    }

    #[test]
    fn test_for_preprocessor() {
        let fixture = fixture();
        let mut processor = TokenProcessor::without_function(&fixture.globals);
        let mut tokens = lex("1 + 1 ; ( 2 ) < 3 ; 4 ++");
        processor.process_for_preprocessor(&mut tokens, 1).unwrap();

        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["2", ";", "(< 2 3)", ";", "(++ 4)"]);
    }
}
