//! Error message formatting and display functionality
//
//       error: unrecognized directive
//        --> main.z:7:3
//         |
//       7 |   <prnt^set.index="hi">
//         |   ^^^^^^^^^^^^^^^^^^^^^
//         = help: compile in lenient mode to emit unrecognized lines as comments
//

use anstream::eprintln;
use owo_colors::{OwoColorize, Style};
use zlang_shared::{Context, ErrorLocation, UnitName, ZlangError};

use crate::stylesheet;

/// Prints a formatted error message to stderr
pub fn print(error: &ZlangError, print_debug: bool) {
    if print_debug {
        eprintln!("{error:?}");
    } else {
        let error_string = error_to_string(error);
        eprintln!("{error_string}");
    }
}

/// Converts an error to a formatted string representation
fn error_to_string(error: &ZlangError) -> String {
    let message_line = get_error_message_line(error.message());
    let maybe_location_line = error
        .unit()
        .map(|unit| get_location_line(unit, error.location()));
    let detail_lines = error.location().map_or_else(
        || get_context_lines(" ", error.context()),
        |location| get_source_lines(location, error.context(), stylesheet::ERROR_COLOR),
    );

    let mut lines = vec![message_line];
    lines.extend(maybe_location_line);
    lines.extend(detail_lines);
    lines.push(String::new());

    lines.join("\n")
}

/// Formats the main error message line
fn get_error_message_line(message: &str) -> String {
    get_message_line("error", stylesheet::ERROR_COLOR, message)
}

/// Formats a note message line
fn get_note_message_line(message: &str) -> String {
    get_message_line("note", stylesheet::NOTE_COLOR, message)
}

/// Formats a help message line
fn get_help_message_line(message: &str) -> String {
    get_message_line("help", stylesheet::HELP_COLOR, message)
}

/// Formats a message line with a colored prefix
fn get_message_line(kind: &str, kind_color: Style, message: &str) -> String {
    // <kind>: <message>
    let kind_str = kind_color.style(kind);
    let message_line = format!("{kind_str}: {message}");

    message_line.bold().to_string()
}

/// Formats the location information line
fn get_location_line(unit: &UnitName, location: Option<&ErrorLocation>) -> String {
    //  --> <unit>
    // OR
    //  --> <unit>:<line>:<column>
    let arrow = stylesheet::SOURCE_ANNOTATION.style("-->");

    location.map_or_else(
        || format!(" {arrow} {unit}"),
        |location| format!(" {arrow} {unit}:{}:{}", location.line(), location.column()),
    )
}

/// Formats the source code snippet with error highlighting
fn get_source_lines(
    location: &ErrorLocation,
    context: &[Context],
    code_highlight_color: Style,
) -> Vec<String> {
    //   |
    // 1 | <import^z="lib.z">
    //   | ^^^^^^^^^^^^^^^^^^
    let line = location.line();
    let column = location.column();
    let length = location.length();
    let line_source = location.line_source();

    // the margin is as wide as the line number
    let margin_width = line.max(1).ilog10() + 1;
    let margin = " ".repeat(margin_width as usize);

    let bar = stylesheet::SOURCE_ANNOTATION.style("|");

    let line_label = stylesheet::SOURCE_ANNOTATION.style(line.to_string());

    let pointer_indent = " ".repeat(column - 1);
    let pointer = code_highlight_color.bold().style("^".repeat(length));

    let blank_line = format!("{margin} {bar} ");
    let source_line = format!("{line_label} {bar} {line_source}");
    let pointer_line = format!("{margin} {bar} {pointer_indent}{pointer}");

    let mut source_lines = vec![blank_line, source_line, pointer_line];
    source_lines.extend(get_context_lines(&margin, context));

    source_lines
}

/// Formats notes and help text, indented by `margin`
fn get_context_lines(margin: &str, context: &[Context]) -> Vec<String> {
    context
        .iter()
        .map(|context| {
            let (equals, context_message) = match context {
                Context::Note(message) => (
                    stylesheet::NOTE_COLOR.bold().style("="),
                    get_note_message_line(message),
                ),
                Context::Help(message) => (
                    stylesheet::HELP_COLOR.bold().style("="),
                    get_help_message_line(message),
                ),
            };

            format!("{margin} {equals} {context_message}")
        })
        .collect()
}
