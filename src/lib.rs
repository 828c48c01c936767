#![allow(clippy::module_inception)]

use std::sync::Arc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// Byte offset into a source buffer, tagged with the name of that source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Parses `source` and renders every diagnostic to its canonical text.
///
/// This is the boundary handed to a read-loop: an empty diagnostic list means
/// the parse succeeded, regardless of how many statements the program holds.
pub fn parse_source(source: &str) -> (Program, Vec<String>) {
    let (program, errors) = parser::parser::parse(source, None);
    let messages = errors.iter().map(|error| error.to_string()).collect();

    (program, messages)
}

/// Resolves a byte offset to `(line number, line text, column)`.
///
/// An offset equal to the source length points just past the final character,
/// which is where end-of-input diagnostics are reported.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = None;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        last_line = Some((line_number, line));
        start = end;
        line_number += 1;
    }

    match last_line {
        Some((number, line)) if !line.ends_with('\n') => {
            Some((number, line.to_string(), line.len()))
        }
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders a diagnostic against the source it was raised for.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedToken (Expected `=` here, found `INT`)
        -> shell
          |
        1 | let x 5;
          | ------^
    */

    let position = error.get_position();
    let mut output = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    output.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        output.push_str(&format!("   {}\n", error));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.bytes() {
        if c == b' ' || c == b'\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::{get_line_at_position, parse_source, render_error};
    use crate::parser::parser::parse;

    #[test]
    fn test_get_line_at_position() {
        let source = "let a = 1;\nlet b = 2;\n  let c = #;\n";

        let (line_number, line, line_pos) = get_line_at_position(source, 4).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "let a = 1;\n");
        assert_eq!(line_pos, 4);

        let (line_number, line, line_pos) = get_line_at_position(source, 32).unwrap();
        assert_eq!(line_number, 3);
        assert_eq!(line, "  let c = #;\n");
        assert_eq!(line_pos, 10);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        assert_eq!(get_line_at_position("", 0), Some((1, String::new(), 0)));
        assert_eq!(
            get_line_at_position("let x", 5),
            Some((1, String::from("let x"), 5))
        );
        assert_eq!(get_line_at_position("x;\n", 3), Some((2, String::new(), 0)));
        assert_eq!(get_line_at_position("x;", 10), None);
    }

    #[test]
    fn test_parse_source_renders_diagnostics() {
        let (program, errors) = parse_source("let x 5;");

        assert_eq!(
            errors,
            vec![String::from("expected next token to be =, got INT instead")]
        );
        // The trailing `5;` is still recovered as its own statement.
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn test_render_error_points_at_token() {
        let source = "let x 5;";
        let (_, errors) = parse(source, None);
        let rendered = render_error(&errors[0], source);

        assert_eq!(
            rendered,
            "Error: UnexpectedToken (Expected `=` here, found `INT`)\n\
             -> shell\n  |\n\
             1 | let x 5;\n  \
             | ------^\n"
        );
    }
}
