use crate::block::{Block, DEFAULT_CODE_LANGUAGE};

const FENCE: &str = "```";

/// Line-processing state. Code lines accumulate until the closing fence.
enum LineState {
    Text,
    InCode { language: String, buffer: String },
}

/// Convert markdown text into a list of blocks.
///
/// Lines are split on `\n` only; anything else (including `\r`) stays on the
/// line. A fence left open at the end of the input is dropped along with its
/// content.
pub fn convert(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    let _unterminated = markdown
        .split('\n')
        .fold(LineState::Text, |state, line| {
            process_line(line, state, &mut blocks)
        });

    blocks
}

fn process_line(line: &str, state: LineState, blocks: &mut Vec<Block>) -> LineState {
    let trimmed = line.trim();

    if trimmed.starts_with(FENCE) {
        return match state {
            LineState::InCode { language, buffer } => {
                blocks.push(Block::Code {
                    content: buffer,
                    language,
                });
                LineState::Text
            }
            LineState::Text => LineState::InCode {
                language: fence_language(trimmed),
                buffer: String::new(),
            },
        };
    }

    match state {
        LineState::InCode {
            language,
            mut buffer,
        } => {
            buffer.push_str(line);
            buffer.push('\n');
            LineState::InCode { language, buffer }
        }
        LineState::Text => {
            if let Some(block) = classify(line, trimmed) {
                blocks.push(block);
            }
            LineState::Text
        }
    }
}

/// Prefixes are checked in this order, so `#### x` matches none of the
/// heading prefixes and ends up a paragraph.
fn classify(line: &str, trimmed: &str) -> Option<Block> {
    if let Some(rest) = trimmed.strip_prefix("# ") {
        Some(Block::Heading1(rest.to_string()))
    } else if let Some(rest) = trimmed.strip_prefix("## ") {
        Some(Block::Heading2(rest.to_string()))
    } else if let Some(rest) = trimmed.strip_prefix("### ") {
        Some(Block::Heading3(rest.to_string()))
    } else if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        Some(Block::BulletedListItem(rest.to_string()))
    } else if trimmed.is_empty() {
        None
    } else {
        // Paragraphs keep the line as written
        Some(Block::Paragraph(line.to_string()))
    }
}

fn fence_language(fence: &str) -> String {
    let language = fence.replace(FENCE, "");
    let language = language.trim();
    if language.is_empty() {
        DEFAULT_CODE_LANGUAGE.to_string()
    } else {
        language.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn code(content: &str, language: &str) -> Block {
        Block::Code {
            content: content.to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_headings() {
        assert_eq!(convert("# Title"), vec![Block::Heading1("Title".into())]);
        assert_eq!(convert("## Title"), vec![Block::Heading2("Title".into())]);
        assert_eq!(convert("### Title"), vec![Block::Heading3("Title".into())]);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(
            convert("- item\n* item"),
            vec![
                Block::BulletedListItem("item".into()),
                Block::BulletedListItem("item".into()),
            ]
        );
    }

    #[test]
    fn test_paragraph_keeps_surrounding_whitespace() {
        assert_eq!(
            convert("  hello  "),
            vec![Block::Paragraph("  hello  ".into())]
        );
    }

    #[test]
    fn test_heading_is_trimmed_before_prefix_match() {
        assert_eq!(
            convert("  # Title  "),
            vec![Block::Heading1("Title".into())]
        );
        assert_eq!(
            convert("\t- item "),
            vec![Block::BulletedListItem("item".into())]
        );
    }

    #[test]
    fn test_empty_input_and_blank_lines() {
        assert!(convert("").is_empty());
        assert!(convert("\n\n   \n\t\n").is_empty());
        assert_eq!(
            convert("one\n\n\ntwo\n"),
            vec![
                Block::Paragraph("one".into()),
                Block::Paragraph("two".into()),
            ]
        );
    }

    proptest! {
        #[test]
        fn block_count_matches_non_empty_lines(
            lines in proptest::collection::vec("[ #*\\-a-z\r\t]{0,8}", 0..40)
        ) {
            let input = lines.join("\n");
            let non_empty = lines.iter().filter(|l| !l.trim().is_empty()).count();
            prop_assert_eq!(convert(&input).len(), non_empty);
        }

        #[test]
        fn fence_free_input_has_no_code_blocks(
            lines in proptest::collection::vec("[ #*\\-a-z\r\t]{0,8}", 0..40)
        ) {
            let input = lines.join("\n");
            for block in convert(&input) {
                prop_assert!(!matches!(block, Block::Code { .. }), "unexpected code block: {:?}", block);
            }
        }
    }

    #[test]
    fn test_code_block_with_language() {
        let input = "```python\nline1\nline2\n```";
        assert_eq!(convert(input), vec![code("line1\nline2\n", "python")]);
    }

    #[test]
    fn test_code_block_default_language() {
        assert_eq!(
            convert("```\nfn main() {}\n```"),
            vec![code("fn main() {}\n", "plain text")]
        );
    }

    #[test]
    fn test_code_block_keeps_raw_lines() {
        let input = "```rust\n    let x = 1;\n\n# not a heading\n```";
        assert_eq!(
            convert(input),
            vec![code("    let x = 1;\n\n# not a heading\n", "rust")]
        );
    }

    #[test]
    fn test_empty_code_block() {
        assert_eq!(convert("```sh\n```"), vec![code("", "sh")]);
    }

    #[test]
    fn test_language_resets_between_fences() {
        let input = "```js\na\n```\n```\nb\n```";
        assert_eq!(
            convert(input),
            vec![code("a\n", "js"), code("b\n", "plain text")]
        );
    }

    #[test]
    fn test_indented_fence_with_spaced_language() {
        assert_eq!(
            convert("  ``` bash\necho hi\n  ```"),
            vec![code("echo hi\n", "bash")]
        );
    }

    #[test]
    fn test_unterminated_fence_is_dropped() {
        let input = "# Title\n```python\nprint('lost')\n";
        assert_eq!(convert(input), vec![Block::Heading1("Title".into())]);
    }

    #[test]
    fn test_four_hashes_become_paragraph() {
        assert_eq!(
            convert("#### Deep"),
            vec![Block::Paragraph("#### Deep".into())]
        );
    }

    #[test]
    fn test_prefix_without_space_is_paragraph() {
        assert_eq!(
            convert("#Title\n-item\n#"),
            vec![
                Block::Paragraph("#Title".into()),
                Block::Paragraph("-item".into()),
                Block::Paragraph("#".into()),
            ]
        );
    }

    #[test]
    fn test_preserves_line_order() {
        let input = "# Intro\nText\n```\ncode\n```\n- point\n## Next";
        assert_eq!(
            convert(input),
            vec![
                Block::Heading1("Intro".into()),
                Block::Paragraph("Text".into()),
                code("code\n", "plain text"),
                Block::BulletedListItem("point".into()),
                Block::Heading2("Next".into()),
            ]
        );
    }

    #[test]
    fn test_carriage_returns_stay_on_paragraphs() {
        assert_eq!(
            convert("# Head\r\nbody\r\n"),
            vec![
                Block::Heading1("Head".into()),
                Block::Paragraph("body\r".into()),
            ]
        );
    }
}
