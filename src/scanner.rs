//! Host-facing scanning loop state.
//!
//! A [`Scanner`] owns one argument vector and one cursor for a scan pass
//! and exposes the matching operations as methods, so a host drives it as
//! a single object:
//!
//! ```
//! use argscan::Scanner;
//!
//! let mut args = Scanner::new(["cc", "-vo", "out.bin", "--level=3", "input.c"]);
//! let mut verbose = false;
//! let mut output = String::new();
//! let mut level = 0u32;
//! let mut files: Vec<String> = Vec::new();
//!
//! while args.has_next() {
//!     if args.prepare_next() {
//!         if args.match_short('v') {
//!             verbose = true;
//!         } else if args.match_short_value('o', &mut output, true) {
//!         } else if args.match_long_value("--level", &mut level, true) {
//!         } else if args.match_long("--") {
//!             args.disable_option_parsing();
//!         }
//!     } else {
//!         files.push(args.current().to_owned());
//!     }
//! }
//!
//! assert!(verbose);
//! assert_eq!(output, "out.bin");
//! assert_eq!(level, 3);
//! assert_eq!(files, ["input.c"]);
//! ```
//!
//! Matching attempts are free to fail: a `false` return means no cursor
//! state changed, and the host tries the next candidate spelling. Response
//! files are the host's to detect and read; the scanner only splices the
//! tokenized bytes (see [`Scanner::expand_response`]).

use std::rc::Rc;

use crate::argvec::ArgVec;
use crate::cursor::Cursor;
use crate::error::AllocError;
use crate::matcher::{long_suffix, short_step, skip_equals};
use crate::response;
use crate::value::ArgValue;

/// One scan pass over an argument vector.
#[derive(Debug, Clone)]
pub struct Scanner {
    vec: ArgVec,
    cursor: Cursor,
}

impl Scanner {
    /// Builds a scanner over a process-style argument list (entry 0 is the
    /// program name; scanning starts at entry 1).
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_vec(ArgVec::from_args(args))
    }

    /// Builds a scanner over an existing vector (e.g. one configured with
    /// an entry limit).
    pub fn from_vec(vec: ArgVec) -> Self {
        Self {
            vec,
            cursor: Cursor::new(),
        }
    }

    /// The underlying vector, reflecting any splices performed so far.
    pub fn args(&self) -> &ArgVec {
        &self.vec
    }

    /// Consumes the scanner, yielding the vector.
    pub fn into_args(self) -> ArgVec {
        self.vec
    }

    /// Entry 0 of the vector.
    pub fn program(&self) -> Option<&str> {
        self.vec.get(0)
    }

    // ── Cursor pass-throughs ─────────────────────────────────────────────────

    /// True while tokens (or bundle characters) remain.
    pub fn has_next(&self) -> bool {
        self.cursor.has_next(&self.vec)
    }

    /// Advances to the next logical token; `true` means option-like.
    pub fn prepare_next(&mut self) -> bool {
        self.cursor.prepare_next(&self.vec)
    }

    /// Treats all remaining tokens as plain arguments.
    pub fn disable_option_parsing(&mut self) {
        self.cursor.disable_option_parsing();
    }

    /// Rewinds the cursor to the start without touching vector contents.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// Unconsumed remainder of the current token.
    pub fn current(&self) -> &str {
        self.cursor.current()
    }

    /// The whole current token.
    pub fn current_full(&self) -> &str {
        self.cursor.current_full()
    }

    /// Shared handle to the current token; stays valid across splices.
    pub fn current_entry(&self) -> Option<Rc<str>> {
        self.cursor.current_entry()
    }

    // ── Long options ─────────────────────────────────────────────────────────

    /// Matches `name` as a pure flag: prefix plus optional `=`, nothing
    /// after. The caller spells the marker(s) (`"--help"`, `"-v0"`).
    pub fn match_long(&mut self, name: &str) -> bool {
        if self.cursor.in_bundle() {
            return false;
        }
        matches!(long_suffix(self.cursor.current(), name), Some(""))
    }

    /// Matches `name` and reads an explicit-negation boolean: a suffix
    /// starting with `-` means `false`, anything else (including no suffix
    /// at all) means `true`. The suffix is not otherwise consumed.
    pub fn match_long_bool(&mut self, name: &str, out: &mut bool) -> bool {
        if self.cursor.in_bundle() {
            return false;
        }
        match long_suffix(self.cursor.current(), name) {
            Some(suffix) => {
                *out = !suffix.starts_with('-');
                true
            }
            None => false,
        }
    }

    /// Matches `name` and extracts its value into `out`.
    ///
    /// A non-empty suffix (after the optional `=`) is the value. An empty
    /// suffix consumes the next vector entry when `next_token_fallback` is
    /// set (recorded for splice bookkeeping); without fallback the match
    /// still succeeds and converts the empty string.
    pub fn match_long_value<T: ArgValue>(
        &mut self,
        name: &str,
        out: &mut T,
        next_token_fallback: bool,
    ) -> bool {
        if self.cursor.in_bundle() {
            return false;
        }
        let tok = match self.cursor.current_entry() {
            Some(t) => t,
            None => return false,
        };
        let offset = self.cursor.bundle().offset;
        let suffix = match long_suffix(&tok[offset..], name) {
            Some(s) => s,
            None => return false,
        };
        self.read_value(suffix, out, next_token_fallback);
        true
    }

    // ── Short options ────────────────────────────────────────────────────────

    /// Matches the short option `ch`, honoring bundle state: `-abc` yields
    /// `a`, `b`, `c` across successive call cycles.
    pub fn match_short(&mut self, ch: char) -> bool {
        let tok = match self.cursor.current_entry() {
            Some(t) => t,
            None => return false,
        };
        match short_step(self.cursor.bundle(), &tok, ch) {
            Some(next) => {
                self.cursor.set_bundle(next);
                true
            }
            None => false,
        }
    }

    /// Matches `ch` and reads an explicit-negation boolean: a `-`
    /// immediately after means `false` and is consumed (the bundle
    /// continues past it); anything else means `true`.
    pub fn match_short_bool(&mut self, ch: char, out: &mut bool) -> bool {
        if !self.match_short(ch) {
            return false;
        }
        let enabled = !self.cursor.current().starts_with('-');
        if !enabled {
            let mut state = self.cursor.bundle();
            state.offset += 1;
            self.cursor.set_bundle(state);
        }
        *out = enabled;
        true
    }

    /// Matches `ch` and extracts the rest of the token (after an optional
    /// `=`) as its value, with the same next-token fallback rule as
    /// [`Scanner::match_long_value`]. Ends bundling for this token.
    pub fn match_short_value<T: ArgValue>(
        &mut self,
        ch: char,
        out: &mut T,
        next_token_fallback: bool,
    ) -> bool {
        let tok = match self.cursor.current_entry() {
            Some(t) => t,
            None => return false,
        };
        let state = match short_step(self.cursor.bundle(), &tok, ch) {
            Some(s) => s,
            None => return false,
        };
        let state = skip_equals(state, &tok);
        self.cursor.set_bundle(state);
        let attached = &tok[state.offset..];
        self.read_value(attached, out, next_token_fallback);
        self.cursor.finish_current_token();
        true
    }

    // ── Combined spellings ───────────────────────────────────────────────────

    /// Tries the short spelling, then the long one; first success wins and
    /// nothing is consumed twice.
    pub fn match_either(&mut self, ch: char, name: &str) -> bool {
        self.match_short(ch) || self.match_long(name)
    }

    /// Boolean variant of [`Scanner::match_either`].
    pub fn match_either_bool(&mut self, ch: char, name: &str, out: &mut bool) -> bool {
        self.match_short_bool(ch, out) || self.match_long_bool(name, out)
    }

    /// Value variant of [`Scanner::match_either`].
    pub fn match_either_value<T: ArgValue>(
        &mut self,
        ch: char,
        name: &str,
        out: &mut T,
        next_token_fallback: bool,
    ) -> bool {
        self.match_short_value(ch, out, next_token_fallback)
            || self.match_long_value(name, out, next_token_fallback)
    }

    // ── Response files ───────────────────────────────────────────────────────

    /// Tokenizes `bytes` and splices the tokens over the entry that
    /// produced the current token (the option entry when the value came
    /// from a next-token fallback). Scanning resumes at the first inserted
    /// token; an empty buffer simply removes the entry. Returns the number
    /// of tokens spliced in.
    ///
    /// On failure the vector and the cursor are exactly as before the call.
    ///
    /// # Panics
    ///
    /// Panics if no token is current (nothing to replace).
    pub fn expand_response(&mut self, bytes: &[u8]) -> Result<usize, AllocError> {
        assert!(
            self.cursor.has_current(),
            "expand_response needs a current token to replace"
        );
        let tokens = response::tokenize(bytes)?;
        let origin = self.cursor.origin_index();
        self.vec.splice_replace(origin, &tokens)?;
        self.cursor.rewind_to(origin);
        log::trace!(
            "response expansion replaced entry {origin} with {} token(s)",
            tokens.len()
        );
        Ok(tokens.len())
    }

    /// Tokenizes `bytes` and splices the tokens in front of the next unread
    /// entry, leaving the current token in place. Useful for preloading
    /// defaults before the scan proper. Returns the number of tokens
    /// spliced in.
    pub fn insert_response(&mut self, bytes: &[u8]) -> Result<usize, AllocError> {
        let tokens = response::tokenize(bytes)?;
        self.vec.splice_insert(self.cursor.next_index(), &tokens)?;
        Ok(tokens.len())
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    /// Converts an attached suffix, or the next entry under fallback, into
    /// `out`. Records whether an extra entry was consumed.
    fn read_value<T: ArgValue>(&mut self, attached: &str, out: &mut T, next_token_fallback: bool) {
        self.cursor.clear_took_next();
        if !attached.is_empty() {
            *out = T::from_arg_text(attached);
        } else if next_token_fallback {
            match self.cursor.take_next_entry(&self.vec) {
                Some(value) => *out = T::from_arg_text(&value),
                None => *out = T::from_arg_text(""),
            }
        } else {
            *out = T::from_arg_text("");
        }
    }
}
