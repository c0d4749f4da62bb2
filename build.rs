//! Build script to embed the default word list and the asset cache version
//!
//! Reads the bundled word list and generates Rust source code with a const array.
//! The cache version is taken from `HONEYCOMB_CACHE_VERSION` at build time so a
//! deploy can bump it without editing source.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

const DEFAULT_CACHE_VERSION: &str = "honeycomb-v1.3";

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_word_list(
        "data/wordlist.txt",
        &Path::new(&out_dir).join("wordlist.rs"),
        "EMBEDDED_WORDS",
        "Bundled dictionary word list",
    );

    let version = env::var("HONEYCOMB_CACHE_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CACHE_VERSION.to_string());
    println!("cargo:rustc-env=HONEYCOMB_CACHE_VERSION={version}");

    println!("cargo:rerun-if-changed=data/wordlist.txt");
    println!("cargo:rerun-if-env-changed=HONEYCOMB_CACHE_VERSION");
}

fn generate_word_list(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect();
    let count = words.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated word list").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[&str] = &[").unwrap();

    for word in words {
        writeln!(output, "    {word:?},").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of words in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
