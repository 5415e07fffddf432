use bstr::B;

use kwset::{dfa::DFA, nfa::NFA, Automaton, PatternID};

use crate::{ev, events};

// Patterns that are suffixes of other patterns must be reported when the
// longer pattern's path is traversed. "he" is a suffix of "she", so both
// end at the same offset.
#[test]
fn suffix_patterns_are_reported() {
    let nfa = NFA::new(&["he", "she"]).unwrap();
    assert_eq!(vec![ev(3, &[0, 1])], events(&nfa, b"ushers"));
}

#[test]
fn overlapping_matches_are_all_found() {
    let dfa = DFA::new(&["a", "ab", "bc"]).unwrap();
    assert_eq!(
        vec![ev(0, &[0]), ev(1, &[1]), ev(2, &[2])],
        events(&dfa, b"abc"),
    );
}

#[test]
fn empty_pattern_set_never_matches() {
    let nfa = NFA::new(&[] as &[&str]).unwrap();
    let dfa = DFA::from_nfa(&nfa);
    assert_eq!(0, nfa.pattern_count());
    assert!(events(&nfa, b"any haystack at all").is_empty());
    assert!(events(&dfa, b"any haystack at all").is_empty());
    assert!(!nfa.is_match(b"x"));
}

#[test]
fn first_match_mode_stops_at_first_event() {
    let dfa = DFA::new(&["bc", "ab"]).unwrap();
    let m = dfa.find(b"xabc").unwrap();
    assert_eq!(2, m.end());
    assert_eq!(&[PatternID::must(1)][..], m.pattern_ids());
    assert!(dfa.find(b"xyz").is_none());
}

#[test]
fn scans_are_restartable() {
    let nfa = NFA::new(&["ab", "b"]).unwrap();
    let haystack = b"abab";
    let first = events(&nfa, haystack);
    let second = events(&nfa, haystack);
    assert_eq!(first, second);
    assert_eq!(vec![ev(1, &[0, 1]), ev(3, &[0, 1])], first);
}

#[test]
fn iteration_continues_from_the_match_state() {
    // After reporting a match, the scan keeps going from the matched state
    // rather than restarting at the root, so a chain of overlapping
    // occurrences is fully enumerated.
    let nfa = NFA::new(&["aa"]).unwrap();
    assert_eq!(
        vec![ev(1, &[0]), ev(2, &[0]), ev(3, &[0])],
        events(&nfa, b"aaaa"),
    );
}

#[test]
fn pattern_ids_resolve_to_original_bytes() {
    let patterns = &["he", "she", "his", "hers"];
    let nfa = NFA::new(patterns).unwrap();
    let dfa = DFA::from_nfa(&nfa);
    assert_eq!(patterns.len(), nfa.pattern_count());
    assert_eq!(patterns.len(), dfa.pattern_count());
    for (i, want) in patterns.iter().enumerate() {
        let pid = PatternID::must(i);
        assert_eq!(B(want), nfa.pattern(pid));
        assert_eq!(B(want), dfa.pattern(pid));
    }
}

#[test]
fn patterns_are_raw_bytes() {
    let nfa = NFA::new(&[&b"\x00\xFF"[..]]).unwrap();
    assert_eq!(vec![ev(2, &[0])], events(&nfa, b"a\x00\xFFb"));
}

#[test]
fn utf8_is_matched_bytewise() {
    // Multi-byte sequences are independent bytes; offsets are byte
    // offsets, and here the match ends at the final byte of the 'é'.
    let nfa = NFA::new(&["é"]).unwrap();
    assert_eq!(vec![ev(4, &[0])], events(&nfa, "café".as_bytes()));
}

// More than three distinct first bytes disables the start-state prefilter;
// the plain transition loop must find the same matches.
#[test]
fn works_without_a_prefilter() {
    let nfa = NFA::new(&["ax", "bx", "cx", "dx"]).unwrap();
    assert_eq!(
        vec![ev(3, &[0]), ev(6, &[3])],
        events(&nfa, b"zzaxzdxz"),
    );
}

#[test]
fn cursor_state_is_exposed_for_resumption() {
    let nfa = NFA::new(&["ab"]).unwrap();
    let mut it = nfa.find_iter(b"abab");
    assert_eq!(nfa.start_state(), it.state());
    assert_eq!(1, it.next().unwrap().end());
    // The cursor sits in the match state, not back at the root, and
    // continuing from it finds the next occurrence.
    assert_ne!(nfa.start_state(), it.state());
    assert_eq!(3, it.next().unwrap().end());
    assert!(it.next().is_none());
}

#[test]
fn duplicate_patterns_report_both_ids() {
    let dfa = DFA::new(&["he", "he"]).unwrap();
    assert_eq!(vec![ev(1, &[0, 1])], events(&dfa, b"he"));
}

#[test]
fn empty_pattern_strings_do_not_shift_ids() {
    let nfa = NFA::new(&["", "ab", "", "b"]).unwrap();
    assert_eq!(2, nfa.pattern_count());
    assert_eq!(B("ab"), nfa.pattern(PatternID::must(0)));
    assert_eq!(B("b"), nfa.pattern(PatternID::must(1)));
    assert_eq!(vec![ev(1, &[0, 1])], events(&nfa, b"ab"));
}
