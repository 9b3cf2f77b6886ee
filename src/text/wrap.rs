/// Anything that can report the rendered pixel width of a string
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> u32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> u32,
{
    fn text_width(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Characters a width-constrained line may be cut after
const BREAK_CHARS: &[char] = &[' ', '\t', ',', '，', '.', '。', '!', '?', '、'];

/// Lines of at most this many characters get the next word pulled up
const ORPHAN_CHARS: usize = 2;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap by character count.
///
/// `\n` starts a new paragraph. Words are never split: a word longer than
/// `max_chars` sits alone on its own line. A line of one or two characters
/// followed by more text takes the next word when the result still fits.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = char_len(word);
            if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    merge_orphans(lines, max_chars)
}

fn merge_orphans(mut lines: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut i = 0;
    while i + 1 < lines.len() {
        let len = char_len(&lines[i]);
        if len <= ORPHAN_CHARS {
            let next = lines[i + 1].clone();
            let (word, rest) = match next.split_once(' ') {
                Some((word, rest)) => (word, rest),
                None => (next.as_str(), ""),
            };

            if len + 1 + char_len(word) <= max_chars {
                lines[i].push(' ');
                lines[i].push_str(word);
                if rest.is_empty() {
                    lines.remove(i + 1);
                } else {
                    lines[i + 1] = rest.to_string();
                }
                continue;
            }
        }
        i += 1;
    }
    lines
}

/// Wrap so that every line's rendered width fits `max_width`.
///
/// The longest fitting prefix is found by binary search. It is kept whole
/// when whitespace follows it; otherwise the line is cut after the nearest
/// whitespace or punctuation inside it, or at the prefix itself when there
/// is none. Punctuation never hangs past `max_width`. Lines are trimmed and never
/// empty. A single character wider than `max_width` still gets its own line.
pub fn wrap_to_width<M>(text: &str, max_width: u32, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut rest: Vec<char> = paragraph.trim().chars().collect();

        while !rest.is_empty() {
            let best = longest_fitting_prefix(&rest, max_width, measure);

            let mut cut = best;
            if best < rest.len() && !rest[best].is_whitespace() {
                // break chars inside the prefix only, so the line still fits
                if let Some(i) = (1..best).rev().find(|&i| BREAK_CHARS.contains(&rest[i])) {
                    cut = i + 1;
                }
            }

            let line: String = rest[..cut].iter().collect();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }

            rest.drain(..cut);
            let leading = rest.iter().take_while(|c| c.is_whitespace()).count();
            rest.drain(..leading);
        }
    }

    lines
}

fn longest_fitting_prefix<M>(chars: &[char], max_width: u32, measure: &M) -> usize
where
    M: TextMeasure + ?Sized,
{
    let (mut lo, mut hi) = (1usize, chars.len());
    let mut best = 1;
    while lo <= hi {
        let mid = (lo + hi) / 2;
        let prefix: String = chars[..mid].iter().collect();
        if measure.text_width(&prefix) <= max_width {
            best = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_px_per_char(text: &str) -> u32 {
        text.chars().count() as u32 * 10
    }

    #[test]
    fn test_wrap_korean_sentence() {
        let text = "안녕하세요 반갑습니다 오늘도 좋은하루";
        let lines = wrap(text, 8);

        assert_eq!(lines, vec!["안녕하세요", "반갑습니다", "오늘도 좋은하루"]);
        for line in &lines {
            assert!(line.chars().count() <= 8);
        }

        let words: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(words, text.split(' ').collect::<Vec<_>>());
    }

    #[test]
    fn test_long_word_gets_own_line() {
        let lines = wrap("짧은 아주아주아주긴단어입니다 끝", 5);
        assert_eq!(lines, vec!["짧은", "아주아주아주긴단어입니다", "끝"]);
    }

    #[test]
    fn test_orphan_line_merges_with_next_word() {
        assert_eq!(wrap("나\n오늘도 좋은", 8), vec!["나 오늘도", "좋은"]);
        // no room: the short line stays
        assert_eq!(wrap("나\n오늘도좋은하루", 8), vec!["나", "오늘도좋은하루"]);
    }

    #[test]
    fn test_paragraph_breaks_and_blank_input() {
        assert_eq!(wrap("첫 줄\n둘째 줄", 20), vec!["첫 줄", "둘째 줄"]);
        assert!(wrap("", 9).is_empty());
        assert!(wrap("   \n  ", 9).is_empty());
    }

    #[test]
    fn test_wrap_to_width_breaks_at_spaces() {
        let lines = wrap_to_width("hello there world", 80, &ten_px_per_char);
        assert_eq!(lines, vec!["hello", "there", "world"]);
        for line in &lines {
            assert!(ten_px_per_char(line) <= 80);
        }
    }

    #[test]
    fn test_wrap_to_width_cuts_after_punctuation() {
        let lines = wrap_to_width("하나,둘셋넷다섯", 50, &ten_px_per_char);
        assert_eq!(lines[0], "하나,");
        assert!(lines.iter().all(|l| !l.is_empty()));
        assert_eq!(lines.concat(), "하나,둘셋넷다섯");
    }

    #[test]
    fn test_wrap_to_width_never_hangs_punctuation() {
        let lines = wrap_to_width("abc,def ghi", 30, &ten_px_per_char);
        assert!(lines.iter().all(|l| ten_px_per_char(l) <= 30), "{:?}", lines);
        assert_eq!(lines.concat().replace(' ', ""), "abc,defghi");
        assert_eq!(lines[0], "abc");

        // the comma fits, so it stays with its word
        assert_eq!(wrap_to_width("abc, def", 40, &ten_px_per_char), vec!["abc,", "def"]);
    }

    #[test]
    fn test_wrap_to_width_without_break_points() {
        let lines = wrap_to_width("abcdefghij", 30, &ten_px_per_char);
        assert_eq!(lines, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn test_wrap_to_width_narrower_than_one_char() {
        let lines = wrap_to_width("ab", 5, &ten_px_per_char);
        assert_eq!(lines, vec!["a", "b"]);
    }
}
