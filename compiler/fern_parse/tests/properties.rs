//! Property-based tests for the parser.
//!
//! Inputs are assembled from Fern source fragments and arbitrary token
//! soups, so most of them are malformed. The parser must stay lossless,
//! deterministic and terminating on all of them, and an incremental
//! re-parse must agree with a fresh parse of the edited text.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::{codes, init_tracing};
use fern_parse::{parse, parse_incremental, ParseOptions, SyntaxTree, TextChange};
use proptest::prelude::*;

// Strategies

const FRAGMENTS: &[&str] = &[
    "var x = 1;",
    "let y: number = x + 2;\n",
    "function f(a, b?) { return a * b; }\n",
    "class C extends B { private m(): void {} }\n",
    "interface I { p: string; (): I; }\n",
    "enum E { A, B = 2, }\n",
    "module A.B { export var z; }\n",
    "if (a) b(); else { c = /re/g; }\n",
    "for (var i = 0; i < n; i++) {}\n",
    "for (k in o) o[k] = null;\n",
    "switch (v) { case 1: break; default: }\n",
    "try { throw e; } catch (e) {} finally {}\n",
    "var g = (a, b) => a + b;\n",
    "h = x => { return x; };\n",
    "var t = <T>u;\n",
    "q = a ? b : c >> 2;\n",
    "'use strict';\n",
    "// comment\n",
    "/* block */ ",
];

/// Punctuation, keywords and literals, to be mixed with no regard for the
/// grammar.
const SOUP: &[&str] = &[
    "(", ")", "{", "}", "[", "]", ";", ",", ":", "?", "=>", "=", "<", ">", "/", ".", "+", "!",
    "var", "function", "class", "module", "return", "if", "else", "new", "extends", "x", "1",
    "'s'", "\n", " ",
];

fn arb_program() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..8).prop_map(|parts| parts.concat())
}

fn arb_token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SOUP), 0..48).prop_map(|tokens| tokens.concat())
}

/// `(text, start, old_len, inserted)`: a program and an edit that stays
/// inside it.
fn arb_edit() -> impl Strategy<Value = (String, usize, usize, String)> {
    (arb_program(), any::<prop::sample::Index>(), 0usize..6, "[a-z0-9 ;(){}=\\n/]{0,6}")
        .prop_map(|(text, at, max_len, inserted)| {
            let start = at.index(text.len() + 1);
            let old_len = max_len.min(text.len() - start);
            (text, start, old_len, inserted)
        })
}

// Helpers

fn apply(text: &str, start: usize, old_len: usize, inserted: &str) -> (String, TextChange) {
    let mut new_text = String::with_capacity(text.len() + inserted.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(inserted);
    new_text.push_str(&text[start + old_len..]);
    let change = TextChange::replace(
        u32::try_from(start).unwrap(),
        u32::try_from(old_len).unwrap(),
        u32::try_from(inserted.len()).unwrap(),
    );
    (new_text, change)
}

fn positions_strictly_increase(tree: &SyntaxTree) -> bool {
    codes(tree).windows(2).all(|pair| pair[0].0 < pair[1].0)
}

// Properties

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parsing_is_lossless(text in arb_program()) {
        init_tracing();
        let tree = parse(&text, ParseOptions::default());
        prop_assert_eq!(tree.full_text(), text);
    }

    #[test]
    fn token_soups_terminate_losslessly(text in arb_token_soup()) {
        init_tracing();
        let tree = parse(&text, ParseOptions::default());
        prop_assert_eq!(tree.full_text(), text);
        prop_assert!(positions_strictly_increase(&tree), "{:?}", codes(&tree));
    }

    #[test]
    fn parsing_is_deterministic(text in arb_token_soup()) {
        init_tracing();
        let options = ParseOptions::default().with_automatic_semicolon_insertion(false);
        let first = parse(&text, options);
        let second = parse(&text, options);
        prop_assert!(first.is_equivalent_to(&second));
        prop_assert_eq!(codes(&first), codes(&second));
    }

    #[test]
    fn diagnostics_are_sorted_and_unique(text in arb_program(), soup in arb_token_soup()) {
        init_tracing();
        let text = format!("{text}{soup}");
        let tree = parse(&text, ParseOptions::default());
        prop_assert!(positions_strictly_increase(&tree), "{:?}", codes(&tree));
        let end = u32::try_from(text.len()).unwrap();
        prop_assert!(codes(&tree).iter().all(|&(position, _)| position <= end));
    }

    #[test]
    fn incremental_parse_matches_fresh_parse((text, start, old_len, inserted) in arb_edit()) {
        init_tracing();
        let old = parse(&text, ParseOptions::default());
        let (new_text, change) = apply(&text, start, old_len, &inserted);

        let incremental = parse_incremental(&old, &new_text, &[change]).unwrap();
        let fresh = parse(&new_text, ParseOptions::default());
        prop_assert_eq!(incremental.full_text(), new_text);
        prop_assert!(incremental.is_equivalent_to(&fresh));
        prop_assert_eq!(codes(&incremental), codes(&fresh));
    }

    #[test]
    fn chained_incremental_parses_match_fresh_parse(
        (text, start, old_len, inserted) in arb_edit(),
        soup in arb_token_soup(),
    ) {
        init_tracing();
        let options = ParseOptions::default().with_initial_strict_mode(true);
        let old = parse(&text, options);
        let (middle_text, first) = apply(&text, start, old_len, &inserted);
        let middle = parse_incremental(&old, &middle_text, &[first]).unwrap();

        let (new_text, second) = apply(&middle_text, middle_text.len(), 0, &soup);
        let incremental = parse_incremental(&middle, &new_text, &[second]).unwrap();
        prop_assert!(incremental.is_equivalent_to(&parse(&new_text, options)));

        // Both edits at once, against the original tree.
        let batched = parse_incremental(&old, &new_text, &[first, second]).unwrap();
        prop_assert!(batched.is_equivalent_to(&incremental));
    }
}
