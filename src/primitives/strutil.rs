//! Small string utilities used across the MIME engine: line folding,
//! RFC 2822 whitespace rules, and dot-stuffing for NNTP/SMTP body transport.

/// Folds `text` so no line exceeds `wrap_len` columns, breaking at the last
/// space before the limit and indenting continuation lines with a single
/// space, per RFC 2822 §2.2.3 "folding white space". Used by the header-copy
/// PREFIX wrapper (`crate::mime::headercopy`).
pub fn fold_line(text: &str, wrap_len: usize) -> String {
    if wrap_len == 0 || text.len() <= wrap_len {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut line_start = 0usize;
    let mut last_space: Option<usize> = None;
    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b' ' {
            last_space = Some(i);
        }
        if i - line_start >= wrap_len {
            if let Some(sp) = last_space {
                out.push_str(&text[line_start..sp]);
                out.push_str("\r\n ");
                line_start = sp + 1;
                last_space = None;
                i = line_start;
                continue;
            }
        }
        i += 1;
    }
    out.push_str(&text[line_start..]);
    out
}

/// Doubles a leading `.` on any line, per RFC 5321/NNTP RFC 3977 §3.1.1
/// "transparency": a line consisting of a single `.` otherwise terminates
/// the data stream.
pub fn dot_stuff(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for line in body.split("\r\n") {
        if line.starts_with('.') {
            out.push('.');
        }
        out.push_str(line);
        out.push_str("\r\n");
    }
    if !body.ends_with("\r\n") && out.ends_with("\r\n") {
        out.truncate(out.len() - 2);
    }
    out
}

/// Reverses [`dot_stuff`] on article bodies read off the wire.
pub fn dot_unstuff(body: &str) -> String {
    body.split("\r\n")
        .map(|line| line.strip_prefix("..").map(|rest| format!(".{rest}")).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_line_short_text_untouched() {
        assert_eq!(fold_line("short", 78), "short");
    }

    #[test]
    fn fold_line_breaks_at_space() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen";
        let folded = fold_line(text, 20);
        assert!(folded.contains("\r\n "));
        for line in folded.split("\r\n") {
            assert!(line.trim_start().len() <= 20 || !line.contains(' '));
        }
    }

    #[test]
    fn dot_stuff_escapes_leading_dot() {
        let body = "hello\r\n.world\r\n..already\r\n";
        let stuffed = dot_stuff(body);
        assert_eq!(stuffed, "hello\r\n..world\r\n...already\r\n");
    }

    #[test]
    fn dot_unstuff_reverses_dot_stuff() {
        let body = "hello\r\n.world\r\n..already\r\n";
        let stuffed = dot_stuff(body);
        let round_tripped = dot_unstuff(&stuffed);
        assert_eq!(round_tripped, body.trim_end_matches("\r\n"));
    }
}
