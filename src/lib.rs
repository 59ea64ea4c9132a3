//! A compiler from CPL, a small imperative language with `int` and `float` variables,
//! to quad code.
pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod il;
pub mod lexer;
pub mod listing;
pub mod parser;
pub mod semantic;
pub mod source_map;
pub mod span;

use log::debug;

use error::{CompileError, PositionalError};
use il::QuadProgram;
use semantic::SymbolTable;

/// Compiles CPL source code to a quad program.
///
/// Lexical errors are all reported together, parsing stops at the first syntax error,
/// and semantic errors are collected over the whole program. Errors are returned in
/// the order in which they appear in the source.
pub fn compile(source: &str) -> Result<QuadProgram, Vec<CompileError>> {
    let tokens = lexer::lex(source).map_err(into_compile_errors)?;
    debug!("lexer produced {} token(s)", tokens.len());

    let program = parser::parse(&tokens).map_err(|err| vec![CompileError::from(err)])?;
    debug!("parsed {} declaration(s)", program.declarations.len());

    let (symbols, mut errors) = SymbolTable::from_declarations(&program.declarations);
    let generated = il::generate(program, &symbols);
    errors.extend(generated.errors);

    if errors.is_empty() {
        debug!(
            "generated {} instruction(s)",
            generated.program.instructions().len()
        );
        Ok(generated.program)
    } else {
        let mut errors = into_compile_errors(errors);
        errors.sort_by_key(|err| err.range().start());
        Err(errors)
    }
}

fn into_compile_errors<E: Into<CompileError>>(errors: Vec<E>) -> Vec<CompileError> {
    errors.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Phase;

    #[test]
    fn compiles_complete_program() {
        let source = "
            /* Prints the sum of the numbers 1 to n */
            n, i, sum: int;
            {
                input(n);
                i = 1;
                sum = 0;
                while (i <= n) {
                    sum = sum + i;
                    i = i + 1;
                }
                output(sum);
            }";
        let program = compile(source).unwrap();

        assert_eq!(
            vec![
                "IINP n",
                "IASN i 1",
                "IASN sum 0",
                "L1:",
                "IEQL t1 i n",
                "JMPZ L3 t1",
                "JUMP L4",
                "L3:",
                "ILSS t2 i n",
                "JMPZ L5 t2",
                "L4:",
                "IASN t3 1",
                "JUMP L6",
                "L5:",
                "IASN t3 0",
                "L6:",
                "JMPZ L2 t3",
                "IADD sum sum i",
                "IADD i i 1",
                "JUMP L1",
                "L2:",
                "IPRT sum",
                "HALT",
            ],
            program.lines()
        );
    }

    #[test]
    fn reports_all_lexical_errors() {
        let errors = compile("x: int; { x = 1 $ 2; x = 99999999999; }").unwrap_err();

        assert_eq!(2, errors.len());
        assert!(errors.iter().all(|err| err.phase() == Phase::Lexical));
    }

    #[test]
    fn stops_at_first_syntax_error() {
        let errors = compile("x: int; { x = ; x = ; }").unwrap_err();

        assert_eq!(1, errors.len());
        assert_eq!(Phase::Syntax, errors[0].phase());
        assert_eq!(
            "syntax error: unexpected Symbol(Semicolon) when parsing an expression",
            errors[0].to_string()
        );
    }

    #[test]
    fn semantic_errors_are_sorted_by_position() {
        let source = "a: int; a: float; { if (q < 1) a = 1; else y = 2; }";
        let errors = compile(source).unwrap_err();

        let messages: Vec<_> = errors.iter().map(|err| err.message().to_owned()).collect();
        assert_eq!(
            vec![
                "'a' is already declared",
                "undeclared identifier 'q'",
                "undeclared identifier 'y'",
            ],
            messages
        );
        assert!(errors.iter().all(|err| err.phase() == Phase::Semantic));
    }
}
