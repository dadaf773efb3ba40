use std::sync::OnceLock;

use regex::Regex;

use crate::block::BlockType;

fn block_separator() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"\n{2,}").expect("Invalid block separator regex"))
}

/// Split markdown text into blocks on runs of two or more newlines.
///
/// Each block is trimmed. Blocks that end up empty are kept; see
/// [`segment_blocks_non_empty`] for the filtering variant.
pub fn segment_blocks(markdown: &str) -> Vec<&str> {
    block_separator().split(markdown).map(str::trim).collect()
}

/// Like [`segment_blocks`], without the blocks that are empty after trimming.
pub fn segment_blocks_non_empty(markdown: &str) -> Vec<&str> {
    segment_blocks(markdown)
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect()
}

/// Infer the structure of a block. Checks run in priority order and the
/// first match wins.
pub fn classify(block: &str) -> BlockType {
    let lines: Vec<&str> = block.split('\n').map(str::trim).collect();

    if is_heading(block) {
        BlockType::Heading
    } else if is_code(block) {
        BlockType::Code
    } else if lines.iter().all(|line| line.starts_with('>')) {
        BlockType::Quote
    } else if lines.iter().all(|line| line.starts_with("* "))
        || lines.iter().all(|line| line.starts_with("- "))
    {
        BlockType::UnorderedList
    } else if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Number of leading `#` characters
pub(crate) fn heading_marker_len(block: &str) -> usize {
    block.chars().take_while(|&c| c == '#').count()
}

/// One to six `#` followed by a whitespace character
fn is_heading(block: &str) -> bool {
    let level = heading_marker_len(block);
    (1..=6).contains(&level)
        && block[level..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
}

fn is_code(block: &str) -> bool {
    block.len() >= 6 && block.starts_with("```") && block.ends_with("```")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn separates_blocks() {
        let markdown = "
            # This is a heading

            This is a paragraph of text. It has some **bold**
            and *italic* words inside of it.

            * This is a list item
            * This is another list item
        ";
        let blocks = segment_blocks(markdown);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], "# This is a heading");
        assert!(blocks[2].ends_with("another list item"));
    }

    #[test]
    fn blocks_have_no_surrounding_whitespace() {
        let blocks = segment_blocks("\n   # heading   \n\n\n  text \t\n\n\n\n - a\n- b  ");
        assert!(!blocks.is_empty());
        for block in blocks {
            assert_eq!(block, block.trim());
        }
    }

    #[test]
    fn single_block() {
        assert_eq!(segment_blocks("\n    # This is a heading      \n"), vec!["# This is a heading"]);
    }

    #[test]
    fn whitespace_only_chunk_is_kept_as_empty_block() {
        assert_eq!(segment_blocks("a\n\n   \n\nb"), vec!["a", "", "b"]);
        assert_eq!(segment_blocks_non_empty("a\n\n   \n\nb"), vec!["a", "b"]);
    }

    #[rstest]
    #[case("# heading 1")]
    #[case("## heading 2")]
    #[case("### Heading")]
    #[case("#### heading 4")]
    #[case("##### heading 5")]
    #[case("###### heading 6")]
    fn heading_blocks(#[case] block: &str) {
        assert_eq!(classify(block), BlockType::Heading);
    }

    #[rstest]
    #[case(">some quote\n>someone said someday", BlockType::Quote)]
    #[case("* some item\n* some other item.", BlockType::UnorderedList)]
    #[case("- some item\n- some other item.", BlockType::UnorderedList)]
    #[case("1. some item\n2. some other item.", BlockType::OrderedList)]
    #[case("``` some='python'\n print(some)```", BlockType::Code)]
    #[case("```\nline1\nline2\n```", BlockType::Code)]
    #[case("A paragraph, with\n multiple lines", BlockType::Paragraph)]
    fn structural_blocks(#[case] block: &str, #[case] expected: BlockType) {
        assert_eq!(classify(block), expected);
    }

    #[rstest]
    #[case::unfinished_code("``` some code unfinished")]
    #[case::bare_fence("```")]
    #[case::list_without_space("*some list that is not done right")]
    #[case::ordered_without_space("1.some list that is not done right")]
    #[case::heading_without_space("#some heading with no space")]
    #[case::seven_hashes("####### too deep")]
    #[case::mixed_list_markers("* a\n- b")]
    #[case::ordered_gap("1. a\n3. b")]
    #[case::ordered_from_two("2. a\n3. b")]
    #[case::empty("")]
    fn lookalikes_are_paragraphs(#[case] block: &str) {
        assert_eq!(classify(block), BlockType::Paragraph);
    }

    #[test]
    fn heading_wins_over_other_patterns() {
        assert_eq!(classify("# title\n> quote"), BlockType::Heading);
    }

    #[test]
    fn ordered_list_past_nine() {
        let block: Vec<String> = (1..=11).map(|i| format!("{i}. item {i}")).collect();
        assert_eq!(classify(&block.join("\n")), BlockType::OrderedList);
    }
}
