/*!
The dense representation of a keyword automaton.

A [`DFA`] materializes the total transition function as one contiguous
row-major table with a row per state and a column per byte value, trading
`state_count x 256` entries of memory for a guaranteed single table lookup
per input byte. It is derived from the sparse [`NFA`](crate::nfa::NFA):
where the trie defines a forward transition the table uses it, and
everywhere else it copies the already-computed row entry of the failure
target. Rows are filled in breadth-first order, so a failure target's row
(always a strictly shallower state) is final before any of its dependents
are visited.
*/

use core::fmt;
use std::collections::VecDeque;

use crate::{
    automaton::Automaton,
    error::BuildError,
    nfa::NFA,
    util::{
        prefilter::Prefilter,
        primitives::{PatternID, StateID},
        registry::Patterns,
    },
};

/// The size of the alphabet in a dense automaton.
///
/// This is the number of transitions in every state's row. Patterns and
/// haystacks are raw bytes, so every row covers all 256 byte values.
pub const ALPHABET_LEN: usize = 256;

/// A keyword automaton with a fully materialized transition table.
///
/// Like the sparse representation it is derived from, a `DFA` is immutable
/// once constructed and may be shared, read-only, across any number of
/// concurrent searches. It answers every search-time question on its own:
/// it keeps a copy of the (already merged) output sets and of the pattern
/// registry, so the source NFA can be dropped.
#[derive(Clone)]
pub struct DFA {
    /// The transition table in row-major order: the successor of state `s`
    /// on byte `b` lives at `s * ALPHABET_LEN + b`. Every entry is defined.
    trans: Vec<StateID>,
    /// Per-state output sets, copied from the NFA after failure-link
    /// merging. Indexed by state.
    matches: Vec<Vec<PatternID>>,
    patterns: Patterns,
    prefilter: Option<Prefilter>,
    state_count: usize,
}

impl DFA {
    /// Build a dense automaton from an ordered collection of patterns.
    ///
    /// This builds the sparse automaton first and then converts it, which
    /// is the only construction path: the dense table is defined in terms
    /// of the trie and its failure links.
    ///
    /// # Example
    ///
    /// ```
    /// use kwset::{dfa::DFA, Automaton};
    ///
    /// # fn example() -> Result<(), kwset::BuildError> {
    /// let dfa = DFA::new(&["he", "she"])?;
    /// assert!(dfa.is_match(b"ushers"));
    /// # Ok(()) }; example().unwrap()
    /// ```
    pub fn new<I, P>(patterns: I) -> Result<DFA, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Ok(DFA::from_nfa(&NFA::new(patterns)?))
    }

    /// Convert a sparse automaton into its dense equivalent.
    ///
    /// The conversion cannot fail and is deterministic: converting the same
    /// NFA twice produces identical tables.
    pub fn from_nfa(nfa: &NFA) -> DFA {
        let state_count = nfa.state_count();
        let mut trans = vec![StateID::ZERO; state_count * ALPHABET_LEN];
        let mut queue: VecDeque<StateID> = VecDeque::new();
        // The root's row: forward transitions where defined, and a self
        // loop everywhere else. `trans` starts zeroed, i.e., pointing at
        // the root, so only the defined transitions need writing.
        for byte in 0..=255u8 {
            if let Some(next) = nfa.goto(StateID::ZERO, byte) {
                trans[byte as usize] = next;
                queue.push_back(next);
            }
        }
        while let Some(r) = queue.pop_front() {
            let fail = nfa.fail(r);
            let row = r.as_usize() * ALPHABET_LEN;
            let fail_row = fail.as_usize() * ALPHABET_LEN;
            for byte in 0..=255u8 {
                match nfa.goto(r, byte) {
                    Some(next) => {
                        trans[row + byte as usize] = next;
                        queue.push_back(next);
                    }
                    None => {
                        // The failure target is strictly shallower, so its
                        // row is already final.
                        trans[row + byte as usize] =
                            trans[fail_row + byte as usize];
                    }
                }
            }
        }
        let matches = (0..state_count)
            .map(|sid| {
                nfa.match_pattern_ids(StateID::new_unchecked(sid)).to_vec()
            })
            .collect();
        let dfa = DFA {
            trans,
            matches,
            patterns: nfa.pattern_registry().clone(),
            prefilter: nfa.prefilter().cloned(),
            state_count,
        };
        debug!(
            "determinized keyword DFA: {} patterns, {} states, \
             {} bytes on heap",
            dfa.pattern_count(),
            dfa.state_count(),
            dfa.memory_usage(),
        );
        dfa
    }

    /// Return the total number of states in this automaton.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Return the approximate heap memory used by this automaton, in
    /// bytes. Dominated by the transition table, which has
    /// `state_count x 256` entries no matter how sparse the trie was.
    pub fn memory_usage(&self) -> usize {
        self.trans.len() * core::mem::size_of::<StateID>()
            + self
                .matches
                .iter()
                .map(|m| m.len() * core::mem::size_of::<PatternID>())
                .sum::<usize>()
            + self.matches.len() * core::mem::size_of::<Vec<PatternID>>()
            + self.patterns.memory_usage()
    }
}

impl Automaton for DFA {
    #[inline]
    fn start_state(&self) -> StateID {
        StateID::ZERO
    }

    #[inline]
    fn next_state(&self, sid: StateID, byte: u8) -> StateID {
        self.trans[sid.as_usize() * ALPHABET_LEN + byte as usize]
    }

    #[inline]
    fn match_pattern_ids(&self, sid: StateID) -> &[PatternID] {
        &self.matches[sid]
    }

    #[inline]
    fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    fn pattern(&self, pid: PatternID) -> &[u8] {
        self.patterns.get(pid)
    }

    #[inline]
    fn prefilter(&self) -> Option<&Prefilter> {
        self.prefilter.as_ref()
    }
}

impl fmt::Debug for DFA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "kwset::dfa::DFA({} patterns, {} states, {} bytes)",
            self.patterns.len(),
            self.state_count,
            self.memory_usage(),
        )
    }
}
