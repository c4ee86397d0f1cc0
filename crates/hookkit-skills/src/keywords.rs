//! Trigger keyword extraction from free-text skill descriptions.
//!
//! Descriptions usually carry a labelled list such as
//! `"Clean up modules. 触发词: refactor, cleanup."`. Only that segment is
//! used when present; otherwise the whole description is split.

/// Labels that introduce a trigger list, matched ASCII-case-insensitively.
const TRIGGER_LABELS: &[&str] = &[
    "触发关键词",
    "触发词",
    "trigger keywords",
    "trigger words",
    "triggers",
    "keywords",
];

const DELIMITERS: &[char] = &[',', '，', '、'];

/// Extract trigger keywords from a description.
pub fn extract_trigger_keywords(description: &str) -> Vec<String> {
    match labelled_segment(description) {
        Some(segment) => split_keywords(segment),
        None => split_keywords(description),
    }
}

/// Split on `,` `，` `、`, trimming whitespace, trailing full stops and
/// unbalanced closing parentheses.
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split(DELIMITERS)
        .map(|piece| trim_unbalanced_close(piece.trim().trim_end_matches(['.', '。']).trim()))
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop trailing `)`/`）` that close a parenthesis opened outside `piece`,
/// as in `(Triggers: deploy, release)`. `fix(api)` is left alone.
fn trim_unbalanced_close(mut piece: &str) -> &str {
    loop {
        let Some(last) = piece.chars().last().filter(|c| *c == ')' || *c == '）') else {
            return piece;
        };
        let open = if last == ')' { '(' } else { '（' };
        let opens = piece.chars().filter(|c| *c == open).count();
        let closes = piece.chars().filter(|c| *c == last).count();
        if closes <= opens {
            return piece;
        }
        piece = piece[..piece.len() - last.len_utf8()].trim_end();
    }
}

/// The text after the earliest `<label>:` (or `<label>：`), cut at the end
/// of its sentence.
fn labelled_segment(description: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `description`
    let lowered = description.to_ascii_lowercase();

    let mut best: Option<usize> = None;
    for label in TRIGGER_LABELS {
        for (pos, _) in lowered.match_indices(label) {
            let after = &description[pos + label.len()..];
            let rest = after.trim_start();
            let Some(colon) = rest.chars().next().filter(|c| *c == ':' || *c == '：') else {
                continue;
            };
            let start = description.len() - rest.len() + colon.len_utf8();
            if best.is_none_or(|b| start < b) {
                best = Some(start);
            }
            break;
        }
    }

    let start = best?;
    let tail = &description[start..];
    Some(&tail[..sentence_end(tail)])
}

/// Byte offset where the trigger list ends.
fn sentence_end(text: &str) -> usize {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '。' | ';' | '；' | '\n' => return i,
            '.' => {
                if chars.peek().is_some_and(|(_, next)| next.is_whitespace()) {
                    return i;
                }
            }
            _ => {}
        }
    }
    text.len()
}
