//! Line-oriented text builder with indentation.

use crate::Indent;

/// Fluent API for building indented source text.
///
/// # Example
///
/// ```
/// use buildinfo_emit::CodeBuilder;
///
/// let mut builder = CodeBuilder::rust();
/// builder
///     .push_line("pub trait AgentBuilder: Sized {")
///     .push_indent()
///     .push_line("fn build(self);")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(
///     builder.build(),
///     "pub trait AgentBuilder: Sized {\n    fn build(self);\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Add a line with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a `//` comment; empty text gives a bare `//` line.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.push_line("//")
        } else {
            self.push_line(&format!("// {}", text))
        }
    }

    /// Add a Rust doc comment, one `///` line per line of text.
    pub fn push_rust_doc(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.push_line("///");
            } else {
                self.push_line(&format!("/// {}", line.trim_end()));
            }
        }
        self
    }

    /// Consume the builder and return the text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::rust();
        builder
            .push_line("trait A {")
            .push_indent()
            .push_line("fn a(self);")
            .push_dedent()
            .push_dedent()
            .push_line("}");
        assert_eq!(builder.build(), "trait A {\n    fn a(self);\n}\n");
    }

    #[test]
    fn test_multiline_doc() {
        let mut builder = CodeBuilder::new(Indent::Spaces(2));
        builder
            .push_indent()
            .push_rust_doc("First line.\n\nSecond line.");
        assert_eq!(
            builder.build(),
            "  /// First line.\n  ///\n  /// Second line.\n"
        );
    }

    #[test]
    fn test_comment() {
        let mut builder = CodeBuilder::default();
        builder.push_comment("header").push_comment("").push_blank();
        assert_eq!(builder.build(), "// header\n//\n\n");
    }
}
