//! Splitting ordered output into transport-sized pieces.

/// Maximum length of a single outbound message.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Opening marker of a chunk produced by [`array_split`].
pub const CHUNK_OPEN: &str = "```json";

/// Closing marker of a chunk produced by [`array_split`].
pub const CHUNK_CLOSE: &str = "```";

/// Splits an ordered sequence of lines into marker-wrapped chunks.
///
/// Lines are accumulated greedily; whenever the next line would push the
/// newline-joined chunk past [`MAX_MESSAGE_LEN`], the current chunk is
/// closed and a new one opened. A line too long to fit even an empty
/// chunk is hard-split at char boundaries first, so the cap holds for
/// every chunk. Every emitted chunk starts with [`CHUNK_OPEN`] and ends
/// with [`CHUNK_CLOSE`]. An empty input yields no chunks at all.
pub fn array_split<I, S>(lines: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    const EMPTY_LEN: usize = CHUNK_OPEN.len() + CHUNK_CLOSE.len() + 2;

    let mut chunks = Vec::new();
    let mut current = vec![CHUNK_OPEN.to_string()];
    let mut length = EMPTY_LEN;

    for line in lines {
        for piece in hard_split(&line.into(), MAX_MESSAGE_LEN - EMPTY_LEN - 1) {
            // Never flush an empty chunk; pieces are sized to fit one.
            if current.len() > 1 && length + piece.len() > MAX_MESSAGE_LEN {
                current.push(CHUNK_CLOSE.to_string());
                chunks.push(std::mem::replace(&mut current, vec![CHUNK_OPEN.to_string()]));
                length = EMPTY_LEN;
            }

            length += piece.len() + 1;
            current.push(piece);
        }
    }

    // A chunk holding only the opening marker means no line ever arrived.
    if current.len() > 1 {
        current.push(CHUNK_CLOSE.to_string());
        chunks.push(current);
    }

    chunks
}

/// Breaks `line` into pieces of at most `max` bytes at char boundaries.
fn hard_split(line: &str, max: usize) -> Vec<String> {
    if line.len() <= max {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::new();
    let mut rest = line;
    while rest.len() > max {
        let mut cut = max;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        pieces.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    pieces.push(rest.to_string());
    pieces
}

/// Splits a single string into messages of at most [`MAX_MESSAGE_LEN`]
/// bytes, preferring line boundaries. A single line longer than the limit
/// is hard-split at char boundaries.
pub fn split_content(content: &str) -> Vec<String> {
    if content.len() <= MAX_MESSAGE_LEN {
        return vec![content.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();

    for line in content.split('\n') {
        if !current.is_empty() && current.len() + line.len() + 1 > MAX_MESSAGE_LEN {
            parts.push(std::mem::take(&mut current));
        }

        if line.len() > MAX_MESSAGE_LEN {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            let mut pieces = hard_split(line, MAX_MESSAGE_LEN);
            if let Some(tail) = pieces.pop() {
                parts.extend(pieces);
                current.push_str(&tail);
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn joined_len(chunk: &[String]) -> usize {
        chunk.iter().map(String::len).sum::<usize>() + chunk.len().saturating_sub(1)
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunks = array_split(Vec::<String>::new());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_small_input_yields_one_wrapped_chunk() {
        let chunks = array_split(["a", "b"]);
        assert_eq!(chunks, vec![vec!["```json", "a", "b", "```"]]);
    }

    #[test]
    fn test_long_input_splits_at_limit() {
        let line = "x".repeat(600);
        let chunks = array_split(vec![line.clone(), line.clone(), line.clone(), line]);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.first().map(String::as_str), Some(CHUNK_OPEN));
            assert_eq!(chunk.last().map(String::as_str), Some(CHUNK_CLOSE));
            assert!(joined_len(chunk) <= MAX_MESSAGE_LEN);
        }
    }

    #[test]
    fn test_all_lines_survive_in_order() {
        let lines: Vec<String> = (0..100).map(|i| format!("line-{i}")).collect();
        let chunks = array_split(lines.clone());

        let rejoined: Vec<&String> = chunks
            .iter()
            .flat_map(|chunk| &chunk[1..chunk.len() - 1])
            .collect();
        assert_eq!(rejoined.len(), lines.len());
        for (original, kept) in lines.iter().zip(rejoined) {
            assert_eq!(original, kept);
        }
    }

    #[test]
    fn test_oversized_line_is_hard_split() {
        let chunks = array_split(["x".repeat(2500)]);

        assert_eq!(chunks.len(), 2);
        for chunk in &chunks {
            assert!(chunk.len() > 2, "no marker-only chunks");
            assert!(joined_len(chunk) <= MAX_MESSAGE_LEN);
        }

        let rejoined: String = chunks
            .iter()
            .flat_map(|chunk| &chunk[1..chunk.len() - 1])
            .map(String::as_str)
            .collect();
        assert_eq!(rejoined, "x".repeat(2500));
    }

    #[test]
    fn test_split_content_short_passthrough() {
        assert_eq!(split_content("hello"), vec!["hello".to_string()]);
    }

    #[test]
    fn test_split_content_prefers_line_boundaries() {
        let content = format!("{}\n{}", "a".repeat(1500), "b".repeat(1500));
        let parts = split_content(&content);

        assert_eq!(parts.len(), 2);
        assert!(parts[0].chars().all(|c| c == 'a'));
        assert!(parts[1].chars().all(|c| c == 'b'));
    }

    #[test]
    fn test_split_content_hard_splits_oversized_lines() {
        let content = "y".repeat(4500);
        let parts = split_content(&content);

        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() <= MAX_MESSAGE_LEN));
        assert_eq!(parts.iter().map(String::len).sum::<usize>(), 4500);
    }

    proptest! {
        #[test]
        fn prop_chunks_never_exceed_max_length(
            lines in proptest::collection::vec("[a-zA-Z0-9 ]{0,120}", 0..80)
        ) {
            for chunk in array_split(lines) {
                prop_assert!(joined_len(&chunk) <= MAX_MESSAGE_LEN);
            }
        }

        #[test]
        fn prop_oversized_lines_respect_limit(
            lines in proptest::collection::vec("[a-z]{0,2600}", 0..6)
        ) {
            for chunk in array_split(lines) {
                prop_assert!(chunk.len() > 2);
                prop_assert!(joined_len(&chunk) <= MAX_MESSAGE_LEN);
            }
        }

        #[test]
        fn prop_split_content_respects_limit(content in "[a-z \\n]{0,6000}") {
            for part in split_content(&content) {
                prop_assert!(part.len() <= MAX_MESSAGE_LEN);
            }
        }
    }
}
