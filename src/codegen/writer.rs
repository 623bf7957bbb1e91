const INDENT: &str = "    ";

/// Line buffer with a nesting level. Every nesting level is four spaces.
#[derive(Debug, Default)]
pub struct SourceWriter {
    lines: Vec<String>,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", INDENT.repeat(self.depth), text));
        }
    }

    /// Push an empty line (no trailing indentation).
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn comment(&mut self, text: impl AsRef<str>) {
        self.line(format!("# {}", text.as_ref()));
    }

    pub fn push_indent(&mut self) {
        self.depth += 1;
    }

    pub fn pop_indent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `body` one level deeper.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join with `\n`, no trailing newline.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
