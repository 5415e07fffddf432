/*!
The [`Automaton`] trait and the shared search loop.

Both automaton representations in this crate expose the same total
transition function: the sparse [`NFA`](crate::nfa::NFA) resolves it by
chasing failure links, while the dense [`DFA`](crate::dfa::DFA) looks it up
in a materialized table. Everything else about searching is identical, so
the search loop is written once here, as provided trait methods. That makes
the two strategies equivalent by construction: they can only differ in how
`next_state` is computed, and both compute the same function.
*/

use crate::util::{
    prefilter::Prefilter,
    primitives::{PatternID, StateID},
    search::MatchEvent,
};

/// A trait describing the interface of a compiled keyword automaton.
///
/// Implementations are immutable: searching only ever mutates the private
/// cursor owned by the iterator, so a single automaton may be shared,
/// read-only, across any number of concurrent searches.
pub trait Automaton {
    /// Return the identifier of the start (empty prefix) state.
    fn start_state(&self) -> StateID;

    /// Return the state to transition to, given the current state and the
    /// current input byte.
    ///
    /// This is a total function: it is defined for every state and every
    /// possible byte value, and it never fails. In particular, a byte with
    /// no forward transition out of the start state loops back to the start
    /// state, so a search can never get stuck.
    fn next_state(&self, sid: StateID, byte: u8) -> StateID;

    /// Return the identifiers of every pattern that ends when a search
    /// enters the given state, in ascending order.
    ///
    /// An empty slice means the state is not a match state. The returned
    /// set includes suffix patterns merged in at construction time, so no
    /// additional work is needed at search time.
    fn match_pattern_ids(&self, sid: StateID) -> &[PatternID];

    /// Return the total number of patterns in this automaton.
    fn pattern_count(&self) -> usize;

    /// Return the original bytes of the pattern with the given identifier.
    ///
    /// # Panics
    ///
    /// When `pid` does not identify a pattern in this automaton.
    fn pattern(&self, pid: PatternID) -> &[u8];

    /// Return a prefilter for skipping start-state bytes, if this automaton
    /// built one.
    ///
    /// This is an implementation detail of the search loop. The default is
    /// no prefilter, which is always correct.
    fn prefilter(&self) -> Option<&Prefilter> {
        None
    }

    /// Return an iterator over every match event in the haystack, in order
    /// of ending position.
    ///
    /// The iterator is lazy and restartable: calling this method again
    /// scans from a fresh cursor at the start state and yields the same
    /// sequence. The search never backtracks after a match, so overlapping
    /// matches keep being discovered as the scan continues.
    ///
    /// # Example
    ///
    /// ```
    /// use kwset::{dfa::DFA, Automaton, PatternID};
    ///
    /// # fn example() -> Result<(), kwset::BuildError> {
    /// let dfa = DFA::new(&["a", "ab", "bc"])?;
    /// let got: Vec<(usize, Vec<PatternID>)> = dfa
    ///     .find_iter(b"abc")
    ///     .map(|m| (m.end(), m.pattern_ids().to_vec()))
    ///     .collect();
    /// assert_eq!(
    ///     vec![
    ///         (0, vec![PatternID::must(0)]),
    ///         (1, vec![PatternID::must(1)]),
    ///         (2, vec![PatternID::must(2)]),
    ///     ],
    ///     got,
    /// );
    /// # Ok(()) }; example().unwrap()
    /// ```
    fn find_iter<'a, 'h>(&'a self, haystack: &'h [u8]) -> FindIter<'a, 'h, Self>
    where
        Self: Sized,
    {
        FindIter::new(self, haystack)
    }

    /// Return the first match event in the haystack, or `None` if there is
    /// no match.
    ///
    /// This is the early-termination mode: the scan stops at the first
    /// position whose state has a non-empty output set. Use
    /// [`Automaton::find_iter`] to enumerate every match.
    fn find<'a>(&'a self, haystack: &[u8]) -> Option<MatchEvent<'a>>
    where
        Self: Sized,
    {
        self.find_iter(haystack).next()
    }

    /// Returns true if and only if the haystack contains a match for at
    /// least one pattern.
    fn is_match(&self, haystack: &[u8]) -> bool
    where
        Self: Sized,
    {
        self.find(haystack).is_some()
    }
}

/// An iterator over every match event in a haystack.
///
/// The iterator owns the entire mutable search state: the position in the
/// haystack and the automaton state the scan is currently in. The automaton
/// itself is only read.
///
/// `'a` is the lifetime of the automaton and `'h` the lifetime of the
/// haystack. The events yielded borrow their pattern sets from the
/// automaton, not the haystack.
///
/// This is created by [`Automaton::find_iter`].
#[derive(Debug)]
pub struct FindIter<'a, 'h, A> {
    aut: &'a A,
    haystack: &'h [u8],
    /// The offset of the next byte to consume.
    at: usize,
    /// The automaton state after consuming `haystack[..at]`.
    sid: StateID,
}

impl<'a, 'h, A: Automaton> FindIter<'a, 'h, A> {
    fn new(aut: &'a A, haystack: &'h [u8]) -> FindIter<'a, 'h, A> {
        // An automaton with no patterns can never match. Jumping the cursor
        // to the end means iteration is over before it starts.
        let at = if aut.pattern_count() == 0 { haystack.len() } else { 0 };
        FindIter { aut, haystack, at, sid: aut.start_state() }
    }

    /// Return the automaton state the scan is currently in.
    ///
    /// Together with the haystack offset of the last yielded event, this is
    /// enough to resume a scan after handling a match, since iteration
    /// continues from exactly this state.
    pub fn state(&self) -> StateID {
        self.sid
    }
}

impl<'a, 'h, A: Automaton> Iterator for FindIter<'a, 'h, A> {
    type Item = MatchEvent<'a>;

    fn next(&mut self) -> Option<MatchEvent<'a>> {
        while self.at < self.haystack.len() {
            // While in the start state, nothing before the next occurrence
            // of a pattern's first byte can change the state or produce a
            // match, so let the prefilter skip ahead.
            if self.sid == self.aut.start_state() {
                if let Some(pre) = self.aut.prefilter() {
                    match pre.find(self.haystack, self.at) {
                        Some(i) => self.at = i,
                        None => {
                            self.at = self.haystack.len();
                            return None;
                        }
                    }
                }
            }
            self.sid = self.aut.next_state(self.sid, self.haystack[self.at]);
            self.at += 1;
            let pids = self.aut.match_pattern_ids(self.sid);
            if !pids.is_empty() {
                return Some(MatchEvent::new(self.at - 1, pids));
            }
        }
        None
    }
}
