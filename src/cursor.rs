//! Scan position and short-option-bundle state.
//!
//! A [`Cursor`] walks an [`ArgVec`] one logical token at a time. Most tokens
//! are consumed whole, but a short-option bundle such as `-abc` is consumed
//! one flag character per call cycle: [`Cursor::prepare_next`] keeps
//! returning the same token while the bundle still has unconsumed characters
//! and the previous cycle actually matched something.
//!
//! The bundle bookkeeping is a [`BundleState`] value: character offset into
//! the current token, bundle depth, and a confirmed-depth watermark. Depth
//! only grows within one token and resets when a new token is loaded; the
//! watermark is how `prepare_next` tells "the host matched a flag last
//! cycle, stay here" apart from "the host matched nothing, this bundle is
//! stalled".

use std::rc::Rc;

use crate::argvec::ArgVec;

/// Leading character that classifies a token as option-like.
pub const OPTION_MARKER: char = '-';

/// Bundle depths past this are matched but no longer counted.
///
/// Real command lines never come close; the cap only bounds the watermark
/// bookkeeping.
pub const MAX_BUNDLE_DEPTH: u8 = 255;

/// Progress through the current token: character offset, bundle depth, and
/// the confirmed-depth watermark.
///
/// `depth == 0` is the token boundary state; `depth > 0` means the token is
/// being consumed as a short-option bundle. The matching functions in
/// [`crate::matcher`] are pure over this value: they take a state and a
/// token and return the successor state without touching the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BundleState {
    /// Bytes of the current token consumed so far.
    pub offset: usize,
    /// Number of short options matched in the current token.
    pub depth: u8,
    /// Depth observed at the last `prepare_next`; a cycle that fails to
    /// raise `depth` past this watermark has matched nothing.
    pub confirmed: u8,
}

impl BundleState {
    /// True between tokens (no bundle in progress).
    pub fn at_boundary(&self) -> bool {
        self.depth == 0
    }

    /// True while a short-option bundle is being consumed.
    pub fn in_bundle(&self) -> bool {
        self.depth > 0
    }
}

/// Stateful scan position over an [`ArgVec`].
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Index of the next entry to load; one past the current token.
    index: usize,
    current: Option<Rc<str>>,
    bundle: BundleState,
    opts_enabled: bool,
    /// Set when a value match consumed the entry after the option token.
    took_next: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    /// Creates a cursor positioned before entry 1 (entry 0 is the program
    /// name and is never scanned).
    pub fn new() -> Self {
        Self {
            index: 1,
            current: None,
            bundle: BundleState::default(),
            opts_enabled: true,
            took_next: false,
        }
    }

    /// Rewinds to the start of the argument list.
    ///
    /// Vector contents and the option-parsing flag are untouched; only the
    /// position and per-token state go back to their initial values.
    pub fn reset(&mut self) {
        self.index = 1;
        self.current = None;
        self.bundle = BundleState::default();
        self.took_next = false;
    }

    /// True while there is anything left to scan: unread entries, or
    /// unconsumed characters of a bundle in progress.
    pub fn has_next(&self, vec: &ArgVec) -> bool {
        if self.bundle.in_bundle() {
            if let Some(tok) = &self.current {
                if self.bundle.offset < tok.len() {
                    return true;
                }
            }
        }
        self.index < vec.len()
    }

    /// Advances to the next logical token and classifies it.
    ///
    /// Returns `true` when the token is option-like: option parsing is
    /// enabled and the token starts with [`OPTION_MARKER`]. Mid-bundle, the
    /// same token is reported again as long as characters remain and the
    /// previous cycle raised the bundle depth; a stalled bundle is a
    /// caller contract violation (the host matched nothing yet asked to
    /// continue) and degrades to loading the next entry.
    pub fn prepare_next(&mut self, vec: &ArgVec) -> bool {
        if self.bundle.in_bundle() {
            if let Some(tok) = &self.current {
                if self.bundle.offset < tok.len() {
                    if self.bundle.confirmed < self.bundle.depth {
                        self.bundle.confirmed = self.bundle.depth;
                        return true;
                    }
                    debug_assert!(
                        self.bundle.confirmed < self.bundle.depth,
                        "stalled short-option bundle in {tok:?}: nothing matched since the last prepare_next"
                    );
                    log::debug!(
                        "abandoning stalled short-option bundle in {tok:?} at offset {}",
                        self.bundle.offset
                    );
                }
            }
            self.bundle = BundleState::default();
        }
        self.took_next = false;
        let entry = match vec.entry(self.index) {
            Some(e) => e,
            None => {
                self.current = None;
                return false;
            }
        };
        self.index += 1;
        self.bundle = BundleState::default();
        let option_like = self.opts_enabled && entry.starts_with(OPTION_MARKER);
        self.current = Some(entry);
        option_like
    }

    /// Classifies every subsequent token as non-option, regardless of a
    /// leading marker. Models the `--` terminator convention.
    pub fn disable_option_parsing(&mut self) {
        log::debug!("option parsing disabled; remaining tokens are plain arguments");
        self.opts_enabled = false;
    }

    /// True while option-like classification is active.
    pub fn option_parsing_enabled(&self) -> bool {
        self.opts_enabled
    }

    /// Unconsumed remainder of the current token.
    ///
    /// Empty when no token is loaded or the token is fully consumed.
    pub fn current(&self) -> &str {
        match &self.current {
            Some(tok) => &tok[self.bundle.offset..],
            None => "",
        }
    }

    /// The whole current token, ignoring how much of it was consumed.
    pub fn current_full(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }

    /// Shared handle to the current token's vector entry.
    pub fn current_entry(&self) -> Option<Rc<str>> {
        self.current.clone()
    }

    /// True while the current token is being consumed as a bundle.
    pub fn in_bundle(&self) -> bool {
        self.bundle.in_bundle()
    }

    /// True when the last value match consumed the entry following its
    /// option token. Splice bookkeeping needs this to find the entry a
    /// response expansion should replace.
    pub fn took_next(&self) -> bool {
        self.took_next
    }

    // ── crate-internal state access for the matcher layer ────────────────────

    pub(crate) fn bundle(&self) -> BundleState {
        self.bundle
    }

    pub(crate) fn set_bundle(&mut self, state: BundleState) {
        self.bundle = state;
    }

    /// Consumes the next unread entry as an option value.
    pub(crate) fn take_next_entry(&mut self, vec: &ArgVec) -> Option<Rc<str>> {
        let entry = vec.entry(self.index)?;
        self.index += 1;
        self.took_next = true;
        Some(entry)
    }

    pub(crate) fn clear_took_next(&mut self) {
        self.took_next = false;
    }

    /// Marks the current token fully consumed and out of bundle mode.
    pub(crate) fn finish_current_token(&mut self) {
        let len = self.current.as_deref().map_or(0, str::len);
        self.bundle = BundleState {
            offset: len,
            depth: 0,
            confirmed: 0,
        };
    }

    /// Vector index of the entry that produced the current token,
    /// accounting for an extra entry consumed as a value.
    pub(crate) fn origin_index(&self) -> usize {
        self.index
            .saturating_sub(1)
            .saturating_sub(self.took_next as usize)
    }

    pub(crate) fn has_current(&self) -> bool {
        self.current.is_some()
    }

    /// Repositions at `index` with all per-token state cleared, so the next
    /// `prepare_next` loads that entry fresh.
    pub(crate) fn rewind_to(&mut self, index: usize) {
        self.index = index;
        self.current = None;
        self.bundle = BundleState::default();
        self.took_next = false;
    }

    pub(crate) fn next_index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(args: &[&str]) -> ArgVec {
        ArgVec::from_args(args.iter().copied())
    }

    // ── has_next / prepare_next basics ───────────────────────────────────────

    #[test]
    fn program_name_only_has_no_tokens() {
        let vec = vec_of(&["prog"]);
        let cur = Cursor::new();
        assert!(!cur.has_next(&vec));
    }

    #[test]
    fn prepare_next_classifies_option_tokens() {
        let vec = vec_of(&["prog", "-v", "file"]);
        let mut cur = Cursor::new();
        assert!(cur.prepare_next(&vec));
        assert_eq!(cur.current(), "-v");
        assert!(!cur.prepare_next(&vec));
        assert_eq!(cur.current(), "file");
    }

    #[test]
    fn prepare_next_past_end_reports_non_option() {
        let vec = vec_of(&["prog"]);
        let mut cur = Cursor::new();
        assert!(!cur.prepare_next(&vec));
        assert_eq!(cur.current(), "");
    }

    #[test]
    fn lone_dash_classifies_as_option_like() {
        let vec = vec_of(&["prog", "-"]);
        let mut cur = Cursor::new();
        assert!(cur.prepare_next(&vec));
    }

    // ── disable_option_parsing ───────────────────────────────────────────────

    #[test]
    fn disabled_option_parsing_classifies_everything_plain() {
        let vec = vec_of(&["prog", "--", "-v"]);
        let mut cur = Cursor::new();
        assert!(cur.prepare_next(&vec)); // "--"
        cur.disable_option_parsing();
        assert!(!cur.prepare_next(&vec)); // "-v", but plain now
        assert_eq!(cur.current(), "-v");
    }

    // ── reset ────────────────────────────────────────────────────────────────

    #[test]
    fn reset_rewinds_to_first_argument() {
        let vec = vec_of(&["prog", "a", "b"]);
        let mut cur = Cursor::new();
        cur.prepare_next(&vec);
        cur.prepare_next(&vec);
        cur.reset();
        assert!(cur.has_next(&vec));
        cur.prepare_next(&vec);
        assert_eq!(cur.current(), "a");
    }

    #[test]
    fn reset_keeps_option_parsing_disabled() {
        let vec = vec_of(&["prog", "-v"]);
        let mut cur = Cursor::new();
        cur.disable_option_parsing();
        cur.reset();
        assert!(!cur.prepare_next(&vec));
    }

    // ── bundle interplay ─────────────────────────────────────────────────────

    #[test]
    fn has_next_is_true_while_bundle_has_characters() {
        // "-ab" is the final entry; after one matched flag the bundle still
        // holds 'b', so the scan is not over.
        let vec = vec_of(&["prog", "-ab"]);
        let mut cur = Cursor::new();
        assert!(cur.prepare_next(&vec));
        cur.set_bundle(BundleState {
            offset: 2,
            depth: 1,
            confirmed: 0,
        });
        assert!(cur.has_next(&vec));
        assert!(cur.prepare_next(&vec)); // stays on "-ab", confirms depth 1
        assert_eq!(cur.current(), "b");
    }

    #[test]
    fn exhausted_bundle_advances_to_next_entry() {
        let vec = vec_of(&["prog", "-a", "file"]);
        let mut cur = Cursor::new();
        cur.prepare_next(&vec);
        cur.set_bundle(BundleState {
            offset: 2,
            depth: 1,
            confirmed: 0,
        });
        assert!(!cur.prepare_next(&vec));
        assert_eq!(cur.current(), "file");
    }

    // ── origin bookkeeping ───────────────────────────────────────────────────

    #[test]
    fn origin_index_points_at_current_entry() {
        let vec = vec_of(&["prog", "@rsp"]);
        let mut cur = Cursor::new();
        cur.prepare_next(&vec);
        assert_eq!(cur.origin_index(), 1);
    }

    #[test]
    fn origin_index_accounts_for_consumed_value_entry() {
        let vec = vec_of(&["prog", "-o", "out"]);
        let mut cur = Cursor::new();
        cur.prepare_next(&vec);
        cur.take_next_entry(&vec).unwrap();
        assert!(cur.took_next());
        assert_eq!(cur.origin_index(), 1);
    }

    #[test]
    fn prepare_next_clears_took_next() {
        let vec = vec_of(&["prog", "-o", "out", "more"]);
        let mut cur = Cursor::new();
        cur.prepare_next(&vec);
        cur.take_next_entry(&vec).unwrap();
        cur.prepare_next(&vec);
        assert!(!cur.took_next());
    }
}
