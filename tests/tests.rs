use kwset::{Automaton, PatternID};

mod matching;

/// Collect every match event from a scan as owned data, for comparisons.
pub(crate) fn events<A: Automaton>(
    aut: &A,
    haystack: &[u8],
) -> Vec<(usize, Vec<PatternID>)> {
    aut.find_iter(haystack)
        .map(|m| (m.end(), m.pattern_ids().to_vec()))
        .collect()
}

/// Shorthand for writing an expected match event.
pub(crate) fn ev(end: usize, pids: &[usize]) -> (usize, Vec<PatternID>) {
    (end, pids.iter().copied().map(PatternID::must).collect())
}
