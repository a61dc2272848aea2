//! ANSI-aware string layout helpers. Every function treats escape sequences
//! as zero-width: they count toward neither length nor truncation position.

use std::str::Chars;

const ELLIPSIS: char = '…';

/// Count of printable characters, excluding escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut count = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            skip_escape(&mut chars);
        } else {
            count += 1;
        }
    }
    count
}

/// Cut `s` down to at most `width` visible columns. Content that fits is
/// returned unchanged; otherwise the first `width - 1` visible characters
/// are kept and a single ellipsis appended. Escape sequences before the cut
/// survive, anything after it is dropped, so callers rendering truncated
/// styled text must append their own reset.
pub fn truncate(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if visible_len(s) <= width {
        return s.to_string();
    }

    let keep = width - 1;
    let mut out = String::new();
    let mut taken = 0;
    let mut chars = s.chars();
    while taken < keep {
        match chars.next() {
            Some('\x1b') => {
                out.push('\x1b');
                copy_escape(&mut chars, &mut out);
            }
            Some(ch) => {
                out.push(ch);
                taken += 1;
            }
            None => break,
        }
    }
    out.push(ELLIPSIS);
    out
}

/// Right-pad with spaces to exactly `width` visible columns. Content wider
/// than `width` is truncated instead.
pub fn pad(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len > width {
        return truncate(s, width);
    }
    let mut out = String::with_capacity(s.len() + (width - len));
    out.push_str(s);
    for _ in len..width {
        out.push(' ');
    }
    out
}

/// Surround with spaces so the content sits centered in `width` columns;
/// the odd leftover column, if any, lands on the right. Content already at
/// or beyond `width` is returned unchanged.
pub fn center(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        return s.to_string();
    }
    let leftover = width - len;
    let left = leftover / 2;
    let right = leftover - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Word-wrap `text` to lines of at most `width` visible columns. Explicit
/// newlines split first and blank lines survive as empty output lines; a
/// single word wider than `width` is hard-cut into full-width chunks. The
/// result always holds at least one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let produced_before = lines.len();
        let mut current = String::new();
        let mut current_len = 0;

        for word in raw.split_whitespace() {
            let word_len = visible_len(word);
            if current_len > 0 && current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if word_len <= width {
                current.push_str(word);
                current_len = word_len;
            } else {
                current = hard_cut(word, width, &mut lines);
                current_len = visible_len(&current);
            }
        }

        if current_len > 0 || lines.len() == produced_before {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split an over-wide word into exactly-`width` chunks, pushing each full
/// chunk and returning the (possibly empty) remainder.
fn hard_cut(word: &str, width: usize, lines: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    let mut count = 0;
    let mut chars = word.chars();
    loop {
        match chars.next() {
            Some('\x1b') => {
                chunk.push('\x1b');
                copy_escape(&mut chars, &mut chunk);
            }
            Some(ch) => {
                chunk.push(ch);
                count += 1;
                if count == width {
                    lines.push(std::mem::take(&mut chunk));
                    count = 0;
                }
            }
            None => break,
        }
    }
    chunk
}

/// Consume one escape sequence after the ESC byte has been read. Handles
/// CSI (parameters through the final byte) and, defensively, OSC payloads;
/// any other two-byte sequence is consumed as-is.
fn skip_escape(chars: &mut Chars<'_>) {
    let mut sink = String::new();
    copy_escape(chars, &mut sink);
}

fn copy_escape(chars: &mut Chars<'_>, out: &mut String) {
    match chars.next() {
        Some('[') => {
            out.push('[');
            for ch in chars.by_ref() {
                out.push(ch);
                if ('\x40'..='\x7e').contains(&ch) {
                    break;
                }
            }
        }
        Some(']') => {
            out.push(']');
            let mut prev = '\0';
            for ch in chars.by_ref() {
                out.push(ch);
                if ch == '\x07' || (prev == '\x1b' && ch == '\\') {
                    break;
                }
                prev = ch;
            }
        }
        Some(ch) => out.push(ch),
        None => {}
    }
}
