//! Response-file tokenization.
//!
//! A response file is plain text whose tokens get spliced into the argument
//! vector in place of the token that referenced it. This module only
//! tokenizes bytes; reading the file is the caller's job, and splicing is
//! [`crate::ArgVec`] / [`crate::Scanner`] territory.
//!
//! Tokenizing rules, one left-to-right scan:
//!
//! 1. Any byte `<= 0x20`, plus DEL (0x7f), separates tokens outside quotes;
//!    runs of separators collapse, so no empty tokens are produced (a
//!    quoted empty string `""` produces nothing either).
//! 2. `"` enters quoted mode, where separators are literal. A doubled `""`
//!    inside quoted mode is one literal quote character; a lone `"` exits.
//!    The quote characters themselves never reach the token text.
//! 3. `#` as the first non-separator byte of a line starts a comment that
//!    runs to end of line. Leading separators do not disarm `#` detection;
//!    any token byte does.
//! 4. Only an unquoted newline re-arms `#` detection. A newline inside
//!    quotes is literal token text and leaves the line-start flag cleared.
//! 5. A NUL byte ends the scan, quoted or not.
//!
//! The tokenizer runs two passes over the same buffer: pass 1 counts tokens
//! and the longest token (sizing only, no allocation), pass 2 assembles
//! each token into a buffer pre-sized to that maximum and duplicates it
//! into independently owned storage. Both passes are the same state
//! machine, so they cannot disagree about boundaries.

use std::rc::Rc;

use crate::error::AllocError;

/// One token boundary pass; `sink` observes token bytes and token ends.
trait TokenSink {
    fn push(&mut self, byte: u8);
    fn finish_token(&mut self);
}

/// Counting sink for pass 1.
#[derive(Default)]
struct Measure {
    count: usize,
    max_len: usize,
    current: usize,
}

impl TokenSink for Measure {
    fn push(&mut self, _byte: u8) {
        self.current += 1;
    }

    fn finish_token(&mut self) {
        self.count += 1;
        self.max_len = self.max_len.max(self.current);
        self.current = 0;
    }
}

/// Collecting sink for pass 2. Capacity for `tokens` and `buf` is reserved
/// up front, so pushes along the way cannot fail.
struct Collect {
    tokens: Vec<Rc<str>>,
    buf: Vec<u8>,
}

impl TokenSink for Collect {
    fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    fn finish_token(&mut self) {
        self.tokens
            .push(Rc::from(String::from_utf8_lossy(&self.buf).as_ref()));
        self.buf.clear();
    }
}

fn run_pass<S: TokenSink>(bytes: &[u8], sink: &mut S) {
    let mut quoted = false;
    let mut comment = false;
    let mut line_start = true;
    let mut in_token = false;
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        i += 1;
        if b == 0 {
            break;
        }
        if !quoted {
            if b == b'\n' {
                comment = false;
                line_start = true;
            }
            if comment {
                continue;
            }
            if b <= 0x20 || b == 0x7f {
                if in_token {
                    sink.finish_token();
                    in_token = false;
                }
                continue;
            }
            if b == b'"' {
                quoted = true;
                continue;
            }
            if b == b'#' && line_start {
                comment = true;
                line_start = false;
                continue;
            }
        } else if b == b'"' {
            if bytes.get(i) == Some(&b'"') {
                i += 1; // doubled quote: one literal quote character
            } else {
                quoted = false;
                continue;
            }
        }
        sink.push(b);
        in_token = true;
        line_start = false;
    }
    if in_token {
        sink.finish_token();
    }
}

/// Tokenizes a response buffer into independently owned argument strings.
///
/// Tokens spliced into an argument vector are ordinary entries afterwards;
/// re-scanning them never re-splits. Non-UTF-8 bytes inside a token are
/// replaced, not rejected.
///
/// On allocation failure nothing is returned and nothing has been spliced
/// anywhere; the caller's vector is untouched by construction.
pub fn tokenize(bytes: &[u8]) -> Result<Vec<Rc<str>>, AllocError> {
    let mut measure = Measure::default();
    run_pass(bytes, &mut measure);

    let mut tokens: Vec<Rc<str>> = Vec::new();
    tokens.try_reserve_exact(measure.count)?;
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(measure.max_len)?;

    let mut collect = Collect { tokens, buf };
    run_pass(bytes, &mut collect);
    log::trace!(
        "tokenized {}-byte response buffer into {} token(s)",
        bytes.len(),
        collect.tokens.len()
    );
    Ok(collect.tokens)
}
