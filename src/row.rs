//! # Row Store
//!
//! A `Row` owns three byte arrays kept in lockstep: the raw text, its tab-expanded render form,
//! and one highlight attribute per rendered byte. `Row` never reaches across row boundaries on
//! its own; the editor is responsible for splitting, joining and reindexing.

use crate::syntax::SyntaxConf;

/// One highlight attribute per rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlType {
    Normal,
    Number,
    String,
    Match,
}

fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0 || b",.()+-/*=~%<>[];".contains(&b)
}

/// A single logical line of the buffer.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Raw bytes, no trailing newline.
    pub text: Vec<u8>,
    /// `text` with every tab expanded to spaces, up to the next `tab_stop` boundary.
    pub render: Vec<u8>,
    /// One highlight attribute per byte of `render`.
    pub hl: Vec<HlType>,
}

impl Row {
    pub fn new(text: Vec<u8>) -> Self {
        let mut row = Self { text, render: Vec::new(), hl: Vec::new() };
        row.update(None, 8);
        row
    }

    /// Rebuild `render` from `text` by tab expansion, then recompute `hl`.
    pub fn update(&mut self, syntax: Option<&SyntaxConf>, tab_stop: usize) {
        self.render.clear();
        for &b in &self.text {
            if b == b'\t' {
                self.render.push(b' ');
                while self.render.len() % tab_stop != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(b);
            }
        }
        self.update_syntax(syntax);
    }

    /// Recompute `hl` from `render`. Highlighting never carries state across row boundaries: this
    /// editor's syntax database has no multi-line comment or string support.
    fn update_syntax(&mut self, syntax: Option<&SyntaxConf>) {
        self.hl = vec![HlType::Normal; self.render.len()];
        let Some(syntax) = syntax else { return };

        let mut prev_sep = true;
        let mut in_string: Option<u8> = None;
        let mut i = 0;
        while i < self.render.len() {
            let b = self.render[i];
            let prev_hl = if i > 0 { self.hl[i - 1] } else { HlType::Normal };

            if syntax.highlight_strings {
                if let Some(quote) = in_string {
                    self.hl[i] = HlType::String;
                    if b == b'\\' && i + 1 < self.render.len() {
                        self.hl[i + 1] = HlType::String;
                        i += 2;
                        continue;
                    }
                    if b == quote {
                        in_string = None;
                        prev_sep = true;
                    }
                    i += 1;
                    continue;
                } else if b == b'"' || b == b'\'' {
                    in_string = Some(b);
                    self.hl[i] = HlType::String;
                    i += 1;
                    continue;
                }
            }

            if syntax.highlight_numbers
                && (b.is_ascii_digit() && (prev_sep || prev_hl == HlType::Number)
                    || (b == b'.' && prev_hl == HlType::Number))
            {
                self.hl[i] = HlType::Number;
            }

            prev_sep = is_separator(b);
            i += 1;
        }
    }

    /// Convert a `cx` (index into `text`) into the corresponding `rx` (index into `render`),
    /// accounting for tab expansion.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let mut rx = 0;
        for &b in &self.text[..cx] {
            if b == b'\t' {
                rx += tab_stop - 1 - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Convert an `rx` (index into `render`) back into a `cx` (index into `text`). Used to land
    /// the cursor on the byte a search match or a cursor-position report refers to.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.text.iter().enumerate() {
            if b == b'\t' {
                cur_rx += tab_stop - 1 - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.text.len()
    }

    /// Insert a byte at `at`, clamped to `[0, text.len()]`.
    pub fn insert_char(&mut self, at: usize, b: u8, syntax: Option<&SyntaxConf>, tab_stop: usize) {
        let at = at.min(self.text.len());
        self.text.insert(at, b);
        self.update(syntax, tab_stop);
    }

    /// Remove the byte at `at`, if `at < text.len()`.
    pub fn delete_char(&mut self, at: usize, syntax: Option<&SyntaxConf>, tab_stop: usize) {
        if at < self.text.len() {
            self.text.remove(at);
            self.update(syntax, tab_stop);
        }
    }

    /// Append `bytes` to the end of `text`.
    pub fn append_bytes(&mut self, bytes: &[u8], syntax: Option<&SyntaxConf>, tab_stop: usize) {
        self.text.extend_from_slice(bytes);
        self.update(syntax, tab_stop);
    }

    /// Find the first occurrence of `query` within `render`, returning its `rx` offset.
    pub fn find(&self, query: &[u8]) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        self.render.windows(query.len()).position(|w| w == query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_expansion_pads_to_stop() {
        let row = Row::new(b"\tabc".to_vec());
        assert_eq!(row.render, b"        abc");
        assert_eq!(row.render.len(), row.hl.len());
    }

    #[test]
    fn cx_rx_roundtrip_with_tabs() {
        let row = Row::new(b"\tab".to_vec());
        let rx = row.cx_to_rx(3, 8);
        assert_eq!(rx, 10);
        assert_eq!(row.rx_to_cx(rx, 8), 3);
    }

    #[test]
    fn number_highlight_requires_separator_boundary() {
        let conf = SyntaxConf::for_test_numbers_and_strings();
        let mut row = Row::new(b"a1 12 1.5".to_vec());
        row.update(Some(&conf), 8);
        assert_eq!(row.hl[1], HlType::Normal); // 'a1': not a leading digit
        assert_eq!(row.hl[3], HlType::Number);
        assert_eq!(row.hl[4], HlType::Number);
        assert_eq!(row.hl[6], HlType::Number);
        assert_eq!(row.hl[7], HlType::Number); // '.'
        assert_eq!(row.hl[8], HlType::Number);
    }

    #[test]
    fn string_highlight_handles_escape() {
        let conf = SyntaxConf::for_test_numbers_and_strings();
        let mut row = Row::new(br#""a\"b""#.to_vec());
        row.update(Some(&conf), 8);
        assert!(row.hl.iter().all(|&h| h == HlType::String));
    }

    #[test]
    fn insert_and_delete_recompute_render() {
        let mut row = Row::new(b"ac".to_vec());
        row.insert_char(1, b'b', None, 8);
        assert_eq!(row.text, b"abc");
        row.delete_char(1, None, 8);
        assert_eq!(row.text, b"ac");
    }
}
