use std::io::Write;

use doctext_core::ExtractionOutcome;

/// Write the outcome as a single JSON object followed by a newline.
pub fn print_outcome(
    w: &mut dyn Write,
    outcome: &ExtractionOutcome,
    pretty: bool,
) -> std::io::Result<()> {
    let json = if pretty {
        outcome.to_json_pretty()
    } else {
        outcome.to_json()
    };
    writeln!(w, "{}", json)?;
    w.flush()
}

/// Turn a clap parse error into the one-line message reported in JSON,
/// e.g. `unexpected argument '--foo' found`.
pub fn usage_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: &ExtractionOutcome, pretty: bool) -> String {
        let mut buf = Vec::new();
        print_outcome(&mut buf, outcome, pretty).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_compact_output_is_one_line() {
        let out = render(
            &ExtractionOutcome::Success {
                text: "line one\nline two\n".into(),
            },
            false,
        );
        assert_eq!(
            out,
            "{\"success\": true, \"text\": \"line one\\nline two\\n\"}\n"
        );
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let outcome = ExtractionOutcome::Failure {
            error: "Unsupported file type: .txt".into(),
        };
        let out = render(&outcome, true);
        assert!(out.contains("\n  \"error\""));
        let parsed: ExtractionOutcome = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, outcome);
    }
}
