//! End-to-end scan-loop scenarios.
//!
//! Drives a [`argscan::Scanner`] the way a compiler driver would: one host
//! loop that classifies each token, tries option spellings in priority
//! order, and collects everything else as input files. The option set here
//! is a test fixture, not a real driver table.

use argscan::Scanner;

#[derive(Debug, Default)]
struct Parsed {
    verbose: bool,
    warn: bool,
    debug: bool,
    level: i32,
    output: Option<String>,
    defines: Vec<String>,
    include_dirs: Vec<String>,
    files: Vec<String>,
    unrecognized: Vec<String>,
}

/// Reference host loop over a fixed option set.
fn drive(args: &[&str]) -> Parsed {
    let mut s = Scanner::new(args.iter().copied());
    let mut p = Parsed::default();
    let mut text = String::new();
    while s.has_next() {
        if s.prepare_next() {
            if s.match_long("--") {
                s.disable_option_parsing();
            } else if s.match_short_bool('v', &mut p.verbose) {
            } else if s.match_long_bool("--warn", &mut p.warn) {
            } else if s.match_short('g') {
                p.debug = true;
            } else if s.match_either_value('o', "--output", &mut text, true) {
                p.output = Some(text.clone());
            } else if s.match_short_value('D', &mut text, false) {
                p.defines.push(text.clone());
            } else if s.match_either_value('I', "--include-dir", &mut text, true) {
                p.include_dirs.push(text.clone());
            } else if s.match_long_value("--level", &mut p.level, true) {
            } else {
                p.unrecognized.push(s.current_full().to_owned());
            }
        } else {
            p.files.push(s.current().to_owned());
        }
    }
    p
}

#[test]
fn full_driver_style_command_line() {
    let p = drive(&[
        "cc",
        "-v",
        "-DFEATURE=1",
        "--include-dir",
        "deps/include",
        "-Isrc",
        "--output=prog.bin",
        "--level",
        "2",
        "main.c",
        "util.c",
    ]);
    assert!(p.verbose);
    assert_eq!(p.defines, ["FEATURE=1"]);
    assert_eq!(p.include_dirs, ["deps/include", "src"]);
    assert_eq!(p.output.as_deref(), Some("prog.bin"));
    assert_eq!(p.level, 2);
    assert_eq!(p.files, ["main.c", "util.c"]);
    assert!(p.unrecognized.is_empty());
}

#[test]
fn bundled_flags_equal_separate_flags() {
    let bundled = drive(&["cc", "-vg", "main.c"]);
    let separate = drive(&["cc", "-v", "-g", "main.c"]);
    assert!(bundled.verbose && bundled.debug);
    assert!(separate.verbose && separate.debug);
    assert_eq!(bundled.files, separate.files);
}

#[test]
fn bundle_ending_in_value_option() {
    // 'v' and 'g' bundle; 'o' takes the rest of the token as its value.
    let p = drive(&["cc", "-vgoout.bin", "main.c"]);
    assert!(p.verbose);
    assert!(p.debug);
    assert_eq!(p.output.as_deref(), Some("out.bin"));
    assert_eq!(p.files, ["main.c"]);
}

#[test]
fn terminator_turns_options_into_files() {
    let p = drive(&["cc", "-v", "--", "-g", "--output=x"]);
    assert!(p.verbose);
    assert!(!p.debug);
    assert_eq!(p.files, ["-g", "--output=x"]);
}

#[test]
fn level_accepts_all_base_prefixes() {
    assert_eq!(drive(&["cc", "--level=0x1F"]).level, 31);
    assert_eq!(drive(&["cc", "--level=0b101"]).level, 5);
    assert_eq!(drive(&["cc", "--level=0o17"]).level, 15);
    assert_eq!(drive(&["cc", "--level=-42"]).level, -42);
}

#[test]
fn explicit_negation_spellings() {
    let p = drive(&["cc", "--warn", "main.c"]);
    assert!(p.warn);
    let p = drive(&["cc", "--warn-", "main.c"]);
    assert!(!p.warn);
    let p = drive(&["cc", "-v-", "main.c"]);
    assert!(!p.verbose);
}

#[test]
fn unrecognized_options_fall_through_without_consuming() {
    let p = drive(&["cc", "--frobnicate", "-v", "main.c"]);
    assert_eq!(p.unrecognized, ["--frobnicate"]);
    assert!(p.verbose);
    assert_eq!(p.files, ["main.c"]);
}

#[test]
fn attached_only_value_does_not_eat_next_token() {
    // -D is driven without next-token fallback: "-D" alone reads an empty
    // define and "NAME" stays a file argument.
    let p = drive(&["cc", "-D", "NAME", "main.c"]);
    assert_eq!(p.defines, [""]);
    assert_eq!(p.files, ["NAME", "main.c"]);
}

#[test]
fn rescan_after_reset_sees_the_same_arguments() {
    let args = ["cc", "-v", "main.c"];
    let mut s = Scanner::new(args);
    let mut first = Vec::new();
    while s.has_next() {
        s.prepare_next();
        first.push(s.current_full().to_owned());
    }
    s.reset();
    let mut second = Vec::new();
    while s.has_next() {
        s.prepare_next();
        second.push(s.current_full().to_owned());
    }
    assert_eq!(first, second);
}

#[test]
fn scanned_vector_is_the_observable_output() {
    let mut s = Scanner::new(["cc", "-v", "main.c"]);
    while s.has_next() {
        s.prepare_next();
    }
    let out: Vec<String> = s
        .into_args()
        .as_slice()
        .iter()
        .map(|e| e.to_string())
        .collect();
    assert_eq!(out, ["cc", "-v", "main.c"]);
}

#[test]
fn program_name_is_not_scanned() {
    // A program name that looks like an option must never reach the loop.
    let p = drive(&["-weird-argv0", "main.c"]);
    assert!(p.unrecognized.is_empty());
    assert_eq!(p.files, ["main.c"]);
}
