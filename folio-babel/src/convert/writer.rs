//! Output buffer for the tree walk
//!
//! Block emitters over-emit blank lines freely; [`normalize`] is the single
//! place that enforces "at most one blank line between blocks". Inline
//! whitespace is tracked as a pending space so that text like
//! `Hello <strong>world</strong>` keeps its word boundary while block edges
//! stay clean.

/// Markdown hard line break.
pub const HARD_BREAK: &str = "  \n";

#[derive(Debug, Default)]
pub struct MarkdownWriter {
    out: String,
    pending_space: bool,
    // Set right after an opening marker so `** word**` never happens
    after_open: bool,
    // Where the current run of opening markers starts
    open_at: usize,
}

impl MarkdownWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text content, collapsing internal whitespace.
    pub fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let starts_ws = raw.starts_with(char::is_whitespace);
        let ends_ws = raw.ends_with(char::is_whitespace);
        let mut words = raw.split_whitespace().peekable();

        if words.peek().is_none() {
            // Whitespace-only node
            self.pending_space = true;
            return;
        }
        if starts_ws {
            self.pending_space = true;
        }
        let mut first = true;
        for word in words {
            if first {
                self.inline(word);
                first = false;
            } else {
                self.out.push(' ');
                self.out.push_str(word);
            }
        }
        self.pending_space = ends_ws;
    }

    /// Append inline content, materialising a pending space first.
    pub fn inline(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        if self.pending_space {
            if self.after_open {
                self.space_before_open();
            } else if !self.at_whitespace() {
                self.out.push(' ');
            }
        }
        self.pending_space = false;
        self.after_open = false;
        self.out.push_str(content);
    }

    /// Opening inline marker. Leading whitespace inside the span moves in
    /// front of the marker: `a<b> c</b>` becomes `a **c**`.
    pub fn open_inline(&mut self, marker: &str) {
        let chained = self.after_open;
        self.inline(marker);
        if !chained {
            self.open_at = self.out.len() - marker.len();
        }
        self.after_open = true;
    }

    /// Closing inline marker: the pending space survives to follow it.
    pub fn close_inline(&mut self, marker: &str) {
        self.after_open = false;
        self.out.push_str(marker);
    }

    /// Start a new block; pending whitespace is dropped.
    pub fn block_break(&mut self) {
        self.reset_spacing();
        self.out.push_str("\n\n");
    }

    pub fn newline(&mut self) {
        self.reset_spacing();
        self.out.push('\n');
    }

    pub fn hard_break(&mut self) {
        self.reset_spacing();
        self.out.push_str(HARD_BREAK);
    }

    /// Append verbatim text with no whitespace handling.
    pub fn raw(&mut self, text: &str) {
        self.reset_spacing();
        self.out.push_str(text);
    }

    fn reset_spacing(&mut self) {
        self.pending_space = false;
        self.after_open = false;
    }

    fn space_before_open(&mut self) {
        let before = &self.out[..self.open_at];
        if !before.is_empty() && !before.ends_with(char::is_whitespace) {
            self.out.insert(self.open_at, ' ');
        }
    }

    fn at_whitespace(&self) -> bool {
        self.out.chars().last().map_or(true, char::is_whitespace)
    }

    pub fn finish(self) -> String {
        normalize(&self.out)
    }
}

/// Collapse runs of 3+ newlines to exactly 2, strip trailing spaces from
/// lines that are not hard breaks, and trim the whole text.
pub fn normalize(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.ends_with(HARD_BREAK.trim_end_matches('\n')) && !line.trim().is_empty() {
            lines.push(line);
        } else {
            lines.push(line.trim_end());
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line);
    }
    out.trim().to_string()
}
