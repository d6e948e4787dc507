//! Greedy word-wrap for flowing paragraph text into fixed-width PDF lines.

/// Wraps `text` into lines of at most `max_chars` characters. Paragraph
/// breaks in the input are preserved; blank input lines come back as empty
/// strings so the caller can render paragraph spacing.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() > max_chars {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            } else {
                current.push(' ');
                current.push_str(word);
            }
            // Hard-split a word longer than the line itself.
            while current.chars().count() > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                let rest: String = current.chars().skip(max_chars).collect();
                lines.push(head);
                current = rest;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn lines_never_exceed_the_budget() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        for line in wrap_text(text, 20) {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrapping_preserves_every_word() {
        let text = "one two three four five six seven eight nine ten";
        let joined = wrap_text(text, 12).join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn paragraph_breaks_become_empty_lines() {
        let lines = wrap_text("first paragraph\n\nsecond paragraph", 40);
        assert_eq!(lines, vec!["first paragraph", "", "second paragraph"]);
    }

    #[test]
    fn overlong_words_are_hard_split() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap_text("", 40).is_empty());
    }
}
