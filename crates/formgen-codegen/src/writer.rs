//! Indented line buffer used by every text backend.

#[derive(Debug, Clone)]
struct Line {
    text: String,
    /// Never indented, even when appended into another writer.
    raw: bool,
}

/// Accumulates generated lines with the current indentation applied.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<Line>,
    indent_unit: &'static str,
    level: usize,
}

impl CodeWriter {
    pub fn new(indent_unit: &'static str) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit,
            level: 0,
        }
    }

    /// Write one line at the current indentation. Embedded newlines start new
    /// lines at the same indentation.
    pub fn writeln(&mut self, line: impl AsRef<str>) {
        for part in line.as_ref().split('\n') {
            let text = if part.is_empty() {
                String::new()
            } else {
                format!("{}{}", self.indent_unit.repeat(self.level), part)
            };
            self.lines.push(Line { text, raw: false });
        }
    }

    /// Write a line without any indentation (preprocessor directives).
    pub fn write_raw(&mut self, line: impl Into<String>) {
        self.lines.push(Line {
            text: line.into(),
            raw: true,
        });
    }

    /// Add a blank line unless the previous line is already blank.
    pub fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| !line.text.is_empty()) {
            self.lines.push(Line {
                text: String::new(),
                raw: false,
            });
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn unindent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Remove trailing blank lines.
    pub fn trim_trailing_blank(&mut self) {
        while self.lines.last().is_some_and(|line| line.text.is_empty()) {
            self.lines.pop();
        }
    }

    /// Append another writer's lines, indented to this writer's level.
    pub fn append(&mut self, other: CodeWriter) {
        let prefix = self.indent_unit.repeat(self.level);
        for mut line in other.lines {
            if !line.raw && !line.text.is_empty() {
                line.text.insert_str(0, &prefix);
            }
            self.lines.push(line);
        }
    }

    /// Finish with a single trailing newline.
    pub fn finish(mut self) -> String {
        self.trim_trailing_blank();
        let mut out = self
            .lines
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = CodeWriter::new("    ");
        w.writeln("if x:");
        w.indent();
        w.writeln("y()\nz()");
        w.unindent();
        w.unindent();
        w.writeln("done");
        assert_eq!(w.finish(), "if x:\n    y()\n    z()\ndone\n");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let mut w = CodeWriter::new("\t");
        w.blank();
        w.writeln("a");
        w.blank();
        w.blank();
        w.writeln("b");
        w.blank();
        assert_eq!(w.finish(), "a\n\nb\n");
    }

    #[test]
    fn test_append_reindents() {
        let mut inner = CodeWriter::new("  ");
        inner.writeln("x");
        inner.blank();
        inner.writeln("y");
        let mut outer = CodeWriter::new("  ");
        outer.writeln("def f");
        outer.indent();
        outer.append(inner);
        assert_eq!(outer.finish(), "def f\n  x\n\n  y\n");
    }

    #[test]
    fn test_raw_lines_stay_in_column_zero() {
        let mut inner = CodeWriter::new("\t");
        inner.write_raw("#if defined(__WINDOWS__)");
        inner.writeln("Show();");
        inner.write_raw("#endif");
        let mut outer = CodeWriter::new("\t");
        outer.indent();
        outer.append(inner);
        assert_eq!(outer.finish(), "#if defined(__WINDOWS__)\n\tShow();\n#endif\n");
    }
}
