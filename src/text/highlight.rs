use std::cmp::Reverse;

/// A run of a line that is either plain or highlighted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn new(text: &str, highlighted: bool) -> Self {
        Self { text: text.to_string(), highlighted }
    }
}

/// Keywords shorter than this are ignored
const MIN_KEYWORD_CHARS: usize = 2;

/// Byte ranges of every keyword occurrence, overlapping and touching
/// matches merged into maximal ranges, sorted by start.
pub fn keyword_ranges<S: AsRef<str>>(line: &str, keywords: &[S]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();

    for keyword in keywords {
        let keyword = keyword.as_ref();
        if keyword.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }

        let mut from = 0;
        while let Some(pos) = line[from..].find(keyword) {
            let start = from + pos;
            spans.push((start, start + keyword.len()));
            // step one char so overlapping occurrences are found too
            let step = line[start..].chars().next().map_or(1, char::len_utf8);
            from = start + step;
        }
    }

    spans.sort_by_key(|&(start, end)| (start, Reverse(end - start)));

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Split `line` into alternating plain and highlighted segments.
///
/// The segments concatenate back to `line` exactly.
pub fn highlight<S: AsRef<str>>(line: &str, keywords: &[S]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for (start, end) in keyword_ranges(line, keywords) {
        if start > cursor {
            segments.push(Segment::new(&line[cursor..start], false));
        }
        segments.push(Segment::new(&line[start..end], true));
        cursor = end;
    }

    if cursor < line.len() {
        segments.push(Segment::new(&line[cursor..], false));
    }
    segments
}
