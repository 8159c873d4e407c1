//! Whitespace normalization of generated Kotlin text.
//!
//! Line endings become `\n`, every line is trimmed, blank lines are dropped
//! and runs of spaces and tabs collapse to one space. String and character
//! literals are copied verbatim. The transform is idempotent.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    /// Inside a literal opened by this quote character.
    Literal(char),
}

/// Normalize `text`. `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    for line in unified.lines() {
        let line = line.trim_matches([' ', '\t']);
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        collapse_line(line, &mut out);
    }
    out.trim().to_string()
}

/// Literals never span lines in printed output, so scanning restarts in
/// code state on every line.
fn collapse_line(line: &str, out: &mut String) {
    let mut state = Scan::Code;
    let mut chars = line.chars();
    let mut in_run = false;
    while let Some(c) = chars.next() {
        match state {
            Scan::Code => {
                if c == ' ' || c == '\t' {
                    if !in_run {
                        out.push(' ');
                        in_run = true;
                    }
                    continue;
                }
                in_run = false;
                if c == '"' || c == '\'' {
                    state = Scan::Literal(c);
                }
                out.push(c);
            }
            Scan::Literal(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote {
                    state = Scan::Code;
                }
            }
        }
    }
}
