//! Doc comment decoration: stripping it from one comment, and finding
//! comments in a source file.

use serde::Serialize;

const LINE_PREFIX: &str = "///";
const BLOCK_OPEN: &str = "/**";
const BLOCK_CLOSE: &str = "*/";

/// Removes `///` or `/** */` decoration, leaving the markup inside.
///
/// Text without either prefix is returned trimmed but otherwise unchanged.
pub fn normalize_doc_comment(text: &str) -> String {
    let working = text.trim();

    if working.starts_with(LINE_PREFIX) {
        return working
            .split('\n')
            .map(|line| {
                let trimmed = line.trim_start();
                match trimmed.strip_prefix(LINE_PREFIX) {
                    Some(rest) => strip_one_blank(rest),
                    None => line,
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    if let Some(body) = working.strip_prefix(BLOCK_OPEN) {
        let body = body.strip_suffix(BLOCK_CLOSE).unwrap_or(body);
        return body
            .split('\n')
            .map(|line| {
                let line = line.trim_start();
                match line.strip_prefix('*') {
                    Some(rest) => strip_one_blank(rest),
                    None => line,
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
    }

    working.to_string()
}

fn strip_one_blank(text: &str) -> &str {
    text.strip_prefix([' ', '\t']).unwrap_or(text)
}

/// A documentation comment found in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocComment {
    /// 1-based line of the comment's first line.
    pub line: usize,
    /// The comment with its decoration still in place.
    pub text: String,
}

fn is_line_doc(trimmed: &str) -> bool {
    trimmed.starts_with(LINE_PREFIX) && !trimmed.starts_with("////")
}

fn is_block_doc(trimmed: &str) -> bool {
    trimmed.starts_with(BLOCK_OPEN) && !trimmed.starts_with("/***") && !trimmed.starts_with("/**/")
}

/// Finds runs of consecutive `///` lines and `/** */` blocks that start a line.
///
/// Comments following code on the same line are not doc comments and are
/// skipped. An unterminated block runs to the end of the source.
pub fn scan_doc_comments(source: &str) -> Vec<DocComment> {
    let mut comments = Vec::new();
    let mut lines = source.lines().enumerate().peekable();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim_start();

        if is_line_doc(trimmed) {
            let mut run = vec![trimmed];
            while let Some((_, next)) = lines.next_if(|(_, next)| is_line_doc(next.trim_start())) {
                run.push(next.trim_start());
            }
            comments.push(DocComment {
                line: index + 1,
                text: run.join("\n"),
            });
        } else if is_block_doc(trimmed) {
            let mut block = vec![trimmed];
            let mut closed = trimmed[BLOCK_OPEN.len()..].contains(BLOCK_CLOSE);
            while !closed && let Some((_, next)) = lines.next() {
                closed = next.contains(BLOCK_CLOSE);
                block.push(next);
            }
            comments.push(DocComment {
                line: index + 1,
                text: block.join("\n"),
            });
        }
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("  Just text.  ", "Just text.")]
    #[case::line_comment("/// Summary.\n///\n/// Details.", "Summary.\n\nDetails.")]
    #[case::line_comment_tabs("///\tTabbed.\n///No space.", "Tabbed.\nNo space.")]
    #[case::indented_lines("/// One.\n    /// Two.", "One.\nTwo.")]
    #[case::block_comment("/**\n * Summary.\n *\n * Details.\n */", "Summary.\n\nDetails.")]
    #[case::block_without_stars("/** Summary.\n    More. */", "Summary.\nMore.")]
    #[case::block_keeps_one_space_only(
        "/**\n * Summary.\n *   - indented\n */",
        "Summary.\n  - indented"
    )]
    fn normalizes_comment_decoration(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_doc_comment(input), expected);
    }

    #[test]
    fn scan_finds_line_and_block_comments() {
        let source = "\
use std::fmt;

/// Adds things.
///
/// - Returns: The sum.
fn add() {}

// not docs
//// also not docs
let x = 1; /// trailing

    /**
     * Subtracts.
     */
    fn sub() {}
";
        assert_eq!(
            scan_doc_comments(source),
            vec![
                DocComment {
                    line: 3,
                    text: "/// Adds things.\n///\n/// - Returns: The sum.".into(),
                },
                DocComment {
                    line: 12,
                    text: "/**\n     * Subtracts.\n     */".into(),
                },
            ]
        );
    }

    #[test]
    fn single_line_block_comment() {
        let comments = scan_doc_comments("/** Short. */\nfn f() {}\n");
        assert_eq!(comments.len(), 1);
        assert_eq!(normalize_doc_comment(&comments[0].text), "Short.");
    }

    #[test]
    fn separated_runs_are_separate_comments() {
        let comments = scan_doc_comments("/// One.\n\n/// Two.\n");
        let lines: Vec<_> = comments.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let comments = scan_doc_comments("/**\n * Open.\n");
        assert_eq!(comments.len(), 1);
        assert_eq!(normalize_doc_comment(&comments[0].text), "Open.");
    }
}
