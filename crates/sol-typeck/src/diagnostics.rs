//! Ariadne-based rendering for resolution and built-in construction errors.
//!
//! Output is colorless so it can be compared in tests.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::error::{BuiltinError, TypeError};

fn type_error_code(err: &TypeError) -> &'static str {
    match err {
        TypeError::UnknownType { .. } => "E0001",
        TypeError::MissingName { .. } => "E0002",
        TypeError::MultipleReturns { .. } => "E0003",
        TypeError::ForwardReference { .. } => "E0004",
        TypeError::Dependency { error, .. } => builtin_error_code(error),
    }
}

fn builtin_error_code(err: &BuiltinError) -> &'static str {
    match err {
        BuiltinError::Parse { .. } => "E0100",
        BuiltinError::Resolve { error, .. } => type_error_code(error),
        BuiltinError::UnexpectedShape { .. } => "E0101",
    }
}

fn text_range_to_range(range: rowan::TextRange) -> Range<usize> {
    range.start().into()..range.end().into()
}

/// Clamp a range into `source`, widening empty ranges to one character
/// where possible.
fn clamp(range: Range<usize>, source: &str) -> Range<usize> {
    let len = source.len();
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    if start == end {
        start..(end + 1).min(len)
    } else {
        start..end
    }
}

/// Render a type error against the source the declaration came from.
pub fn render_type_error(err: &TypeError, source: &str) -> String {
    let span = clamp(text_range_to_range(err.range()), source);
    let label = match err {
        TypeError::UnknownType { .. } => "not a known type",
        TypeError::MissingName { .. } => "name expected here",
        TypeError::MultipleReturns { .. } => "declared here",
        TypeError::ForwardReference { .. } => "constructed later",
        TypeError::Dependency { .. } => "failed to construct",
    };

    let report = Report::build(ReportKind::Error, span.clone())
        .with_code(type_error_code(err))
        .with_message(err.to_string())
        .with_config(Config::default().with_color(false))
        .with_label(Label::new(span).with_message(label).with_color(Color::Red))
        .finish();

    write_report(report, source, err)
}

/// Render a built-in construction failure against its synthesized text.
pub fn render_builtin_error(err: &BuiltinError) -> String {
    let source = err.text();
    let config = Config::default().with_color(false);
    let code = builtin_error_code(err);

    let report = match err {
        BuiltinError::Parse { errors, .. } => {
            let span = errors
                .first()
                .map(|e| clamp(e.span.to_range(), source))
                .unwrap_or_else(|| clamp(0..0, source));
            let mut builder = Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(err.to_string())
                .with_config(config);
            for (i, parse_err) in errors.iter().enumerate() {
                let range = clamp(parse_err.span.to_range(), source);
                let color = if i == 0 { Color::Red } else { Color::Yellow };
                builder.add_label(
                    Label::new(range)
                        .with_message(&parse_err.message)
                        .with_color(color),
                );
                if let Some((msg, related)) = &parse_err.related {
                    builder.add_label(
                        Label::new(clamp(related.to_range(), source))
                            .with_message(msg)
                            .with_color(Color::Blue),
                    );
                }
            }
            builder.set_note("built-in declarations are fixed text; this is a defect in the registry");
            builder.finish()
        }
        BuiltinError::Resolve { error, .. } => {
            let span = clamp(text_range_to_range(error.range()), source);
            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(err.to_string())
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message(error.to_string())
                        .with_color(Color::Red),
                )
                .finish()
        }
        BuiltinError::UnexpectedShape { found, .. } => {
            let span = clamp(0..source.len(), source);
            Report::build(ReportKind::Error, span.clone())
                .with_code(code)
                .with_message(err.to_string())
                .with_config(config)
                .with_label(
                    Label::new(span)
                        .with_message(format!("found {found}"))
                        .with_color(Color::Red),
                )
                .finish()
        }
    };

    write_report(report, source, err)
}

/// Write `report` to a string, falling back to the plain message.
fn write_report(
    report: Report<'_, Range<usize>>,
    source: &str,
    fallback: &dyn std::fmt::Display,
) -> String {
    let mut buf = Vec::new();
    match report.write(Source::from(source), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::{TextRange, TextSize};

    #[test]
    fn clamp_widens_empty_ranges() {
        assert_eq!(clamp(3..3, "abcdef"), 3..4);
        assert_eq!(clamp(6..6, "abcdef"), 6..6);
        assert_eq!(clamp(2..100, "abcdef"), 2..6);
    }

    #[test]
    fn type_error_report_mentions_code_and_message() {
        let source = "struct S { Missing m; }";
        let err = TypeError::UnknownType {
            name: "Missing".into(),
            range: TextRange::new(TextSize::from(11), TextSize::from(18)),
        };
        let out = render_type_error(&err, source);
        assert!(out.contains("E0001"), "{out}");
        assert!(out.contains("unknown type `Missing`"), "{out}");
        assert!(out.contains("not a known type"), "{out}");
    }
}
