//! Low-level output helpers and placeholder rendering for the Kotlin printer.

use crate::ir_printer::KotlinPrinter;

/// Marker prefix shared by every placeholder and manual-attention comment.
pub const MARKER: &str = "!!! j2k:";

/// Keep a fragment from terminating or opening a block comment.
pub(crate) fn defuse_comment(fragment: &str) -> String {
    fragment.replace("*/", "* /").replace("/*", "/ *")
}

/// Escape text for use inside a Kotlin string literal.
pub(crate) fn escape_kotlin_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

impl KotlinPrinter {
    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(crate) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// `TODO("j2k: <reason>") /* <fragment> */`
    pub(crate) fn emit_expr_placeholder(&mut self, reason: &str, fragment: &str) {
        self.write("TODO(\"j2k: ");
        self.write(&escape_kotlin_string(reason));
        self.write("\")");
        let fragment = defuse_comment(fragment);
        let fragment = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
        if !fragment.is_empty() {
            self.write(" /* ");
            self.write(&fragment);
            self.write(" */");
        }
    }

    /// `// !!! j2k: <reason>` followed by the fragment as line comments.
    pub(crate) fn emit_decl_placeholder(&mut self, reason: &str, fragment: &str) {
        self.write_indent();
        self.write("// ");
        self.write(MARKER);
        self.write(" ");
        self.write(reason);
        self.write_line();
        for line in fragment.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            self.write_indent();
            self.write("// ");
            self.write(line);
            self.write_line();
        }
    }
}
