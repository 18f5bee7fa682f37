//! Chat message text builder
//!
//! Accumulates a UTF-8 string using the chat app's light markdown:
//! `*bold*` spans, bullet lines and blank-line separated sections.

/// String-based chat message builder
pub struct MessageBuilder {
    buf: String,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Empty line (section break)
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    // === Style ===

    /// Wrap text in bold markers
    pub fn bold(s: &str) -> String {
        format!("*{}*", s)
    }

    // === Layout Helpers ===

    /// `• key: value`
    pub fn bullet(&mut self, key: &str, value: &str) -> &mut Self {
        self.line(&format!("• {}: {}", key, value))
    }

    /// `*key:* value`
    pub fn pair(&mut self, key: &str, value: &str) -> &mut Self {
        self.line(&format!("*{}:* {}", key, value))
    }

    /// Line indented by `depth` levels of three spaces
    pub fn indented(&mut self, depth: usize, s: &str) -> &mut Self {
        self.write(&"   ".repeat(depth));
        self.line(s)
    }

    // === Build ===

    /// Finalize and return the accumulated string
    pub fn finalize(self) -> String {
        self.buf
    }

    /// Get the current buffer as a string reference
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
