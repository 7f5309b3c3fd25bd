//! Indentation-aware text accumulator.

/// Indent unit written per depth level.
pub const INDENT: &str = "  ";

/// Buffers lines of generated code at a tracked indent depth.
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    lines: Vec<String>,
    depth: usize,
}

impl TextEmitter {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line at the current indent depth.
    pub fn write_line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        let mut buf = String::with_capacity(INDENT.len() * self.depth + line.len());
        for _ in 0..self.depth {
            buf.push_str(INDENT);
        }
        buf.push_str(line);
        self.lines.push(buf);
    }

    /// Appends a blank separator line.
    pub fn newline(&mut self) {
        self.lines.push(String::new());
    }

    /// Runs `f` one level deeper and restores the depth afterwards.
    ///
    /// The depth is restored on every exit path, including an `Err`
    /// propagated out of `f` and a panic unwinding through it.
    pub fn scoped_indent<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let mut guard = Dedent(self);
        f(&mut *guard.0)
    }

    /// Returns the current indent depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the accumulated text, lines joined by `\n` with a trailing `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

/// Leaves one indent level when dropped.
struct Dedent<'e>(&'e mut TextEmitter);

impl Drop for Dedent<'_> {
    fn drop(&mut self) {
        self.0.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_render() {
        let mut emitter = TextEmitter::new();
        emitter.write_line("a");
        emitter.newline();
        emitter.write_line("b");
        assert_eq!(emitter.render(), "a\n\nb\n");
    }

    #[test]
    fn test_scoped_indent_nests() {
        let mut emitter = TextEmitter::new();
        emitter.write_line("{");
        emitter.scoped_indent(|e| {
            e.write_line("x");
            e.scoped_indent(|e| e.write_line("y"));
        });
        emitter.write_line("}");
        assert_eq!(emitter.render(), "{\n  x\n    y\n}\n");
        assert_eq!(emitter.depth(), 0);
    }

    #[test]
    fn test_scoped_indent_restores_on_error() {
        let mut emitter = TextEmitter::new();
        let fail = |e: &mut TextEmitter| -> Result<(), String> {
            e.write_line("before");
            Err("boom".to_string())
        };
        let result = emitter.scoped_indent(|e| -> Result<(), String> {
            fail(e)?;
            e.write_line("never");
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(emitter.depth(), 0);
        emitter.write_line("after");
        assert_eq!(emitter.render(), "  before\nafter\n");
    }

    #[test]
    fn test_scoped_indent_restores_on_panic() {
        let mut emitter = TextEmitter::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            emitter.scoped_indent(|e| -> Result<(), String> {
                e.write_line("partial");
                panic!("emission aborted");
            })
        }));
        assert!(result.is_err());
        assert_eq!(emitter.depth(), 0);
        emitter.write_line("after");
        assert_eq!(emitter.render(), "  partial\nafter\n");
    }

    #[test]
    fn test_empty_render() {
        let emitter = TextEmitter::new();
        assert!(emitter.is_empty());
        assert_eq!(emitter.render(), "\n");
    }
}
