/*!
The sparse representation of a keyword automaton, along with its builder.

An [`NFA`] stores only the forward trie transitions for each state. Bytes
with no forward transition are resolved at search time by chasing failure
links, which makes transitions amortized constant time with a worst case
bounded by the depth of the trie. If that bound matters, the automaton can
be converted into a [`DFA`](crate::dfa::DFA), which materializes the full
transition table and guarantees exactly one table lookup per input byte.

"NFA" is a slight misnomer kept for symmetry with the dense representation:
the automaton is deterministic, but a single input byte may require several
failure hops before a transition is found.
*/

use core::fmt;
use std::collections::VecDeque;

use crate::{
    automaton::Automaton,
    error::BuildError,
    util::{
        prefilter::Prefilter,
        primitives::{PatternID, StateID},
        registry::Patterns,
    },
};

/// A single trie state.
///
/// Forward transitions are stored sparsely, sorted by byte, since most
/// states have very few of them. The failure link and the output set are
/// filled in by the breadth-first compilation pass in [`Builder::build`].
#[derive(Clone, Debug, Default)]
struct State {
    /// Forward trie transitions, sorted by byte.
    trans: Vec<(u8, StateID)>,
    /// The state to fall back to when no forward transition is defined.
    /// Always a strictly shallower state, except for the root which fails
    /// to itself.
    fail: StateID,
    /// The identifiers of every pattern ending at this state. After
    /// compilation this includes the output set of the failure target, so
    /// that suffix patterns are never missed.
    matches: Vec<PatternID>,
}

impl State {
    fn next_state(&self, byte: u8) -> Option<StateID> {
        self.trans
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| self.trans[i].1)
    }

    fn set_next_state(&mut self, byte: u8, next: StateID) {
        match self.trans.binary_search_by_key(&byte, |&(b, _)| b) {
            Ok(i) => self.trans[i] = (byte, next),
            Err(i) => self.trans.insert(i, (byte, next)),
        }
    }
}

/// A builder for keyword automata.
///
/// Patterns are added one at a time with [`Builder::add`] and the finished
/// automaton is produced by [`Builder::build`]. Building consumes the
/// builder: there is no way to search a half-constructed automaton, and no
/// way to add patterns after compilation. A new pattern set requires a new
/// builder.
#[derive(Clone, Debug)]
pub struct Builder {
    states: Vec<State>,
    patterns: Patterns,
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

impl Builder {
    /// Create a new builder containing only the root (empty prefix) state.
    pub fn new() -> Builder {
        Builder { states: vec![State::default()], patterns: Patterns::new() }
    }

    /// Add a pattern to the automaton.
    ///
    /// The pattern is assigned the next available [`PatternID`], starting
    /// at `0` in insertion order. Patterns are raw byte strings: matching
    /// is exact and byte-wise, so multi-byte UTF-8 sequences are treated as
    /// independent bytes.
    ///
    /// An empty pattern is ignored: it is not assigned an identifier and
    /// contributes no states. Adding the same pattern twice assigns a fresh
    /// identifier that shares the existing trie states, so both identifiers
    /// are reported whenever the pattern matches.
    ///
    /// This returns an error only if the number of patterns or states
    /// exceeds the identifier space.
    pub fn add<P: AsRef<[u8]>>(&mut self, pattern: P) -> Result<(), BuildError> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Ok(());
        }
        let pid = self.patterns.next_id()?;
        let mut sid = StateID::ZERO;
        for &byte in pattern {
            sid = match self.states[sid].next_state(byte) {
                Some(next) => next,
                None => {
                    let next = self.add_state()?;
                    self.states[sid].set_next_state(byte, next);
                    next
                }
            };
        }
        self.states[sid].matches.push(pid);
        self.patterns.push(pattern);
        Ok(())
    }

    fn add_state(&mut self) -> Result<StateID, BuildError> {
        let id = StateID::new(self.states.len())
            .map_err(|_| BuildError::too_many_states(self.states.len()))?;
        self.states.push(State::default());
        Ok(id)
    }

    /// Compile the failure links and output sets and return the finished
    /// automaton.
    ///
    /// This is the point of no return: the resulting [`NFA`] is immutable
    /// and may be shared freely across threads.
    pub fn build(mut self) -> NFA {
        self.compile_failure_links();
        // Canonicalize each output set so equal automata report matches in
        // the same order regardless of merge order.
        for state in self.states.iter_mut() {
            state.matches.sort_unstable();
        }
        let prefilter = Prefilter::from_patterns(&self.patterns);
        let nfa =
            NFA { states: self.states, patterns: self.patterns, prefilter };
        debug!(
            "built keyword NFA: {} patterns, {} states, {} bytes on heap",
            nfa.pattern_count(),
            nfa.state_count(),
            nfa.memory_usage(),
        );
        nfa
    }

    /// Compute every state's failure link and merge output sets along the
    /// failure chain.
    ///
    /// States are visited in breadth-first order, i.e., strictly increasing
    /// depth. By the time a state is expanded, every shallower state has a
    /// final failure link and a fully merged output set, so each merge
    /// happens exactly once and nothing is recomputed at search time.
    fn compile_failure_links(&mut self) {
        let mut queue: VecDeque<StateID> = VecDeque::new();
        // The root fails to itself (its link is never chased further) and
        // its direct children fail back to the root by definition.
        for i in 0..self.states[StateID::ZERO].trans.len() {
            let (_, next) = self.states[StateID::ZERO].trans[i];
            self.states[next].fail = StateID::ZERO;
            queue.push_back(next);
        }
        while let Some(r) = queue.pop_front() {
            for i in 0..self.states[r].trans.len() {
                let (byte, next) = self.states[r].trans[i];
                let fail = self.resolve_failure(self.states[r].fail, byte);
                self.states[next].fail = fail;
                // A pattern ending at the failure target is a proper suffix
                // of the path to `next`, so it also ends at `next`.
                if !self.states[fail].matches.is_empty() {
                    let suffix_matches = self.states[fail].matches.clone();
                    self.states[next].matches.extend(suffix_matches);
                }
                queue.push_back(next);
            }
        }
        trace!(
            "compiled failure links for {} states",
            self.states.len(),
        );
    }

    /// Walk up the failure chain from `sid` until a state with a forward
    /// transition for `byte` is found. The root always qualifies: a byte
    /// with no transition out of the root loops back to the root.
    fn resolve_failure(&self, mut sid: StateID, byte: u8) -> StateID {
        loop {
            if let Some(next) = self.states[sid].next_state(byte) {
                return next;
            }
            if sid == StateID::ZERO {
                return StateID::ZERO;
            }
            sid = self.states[sid].fail;
        }
    }
}

/// A compiled keyword automaton in its sparse representation.
///
/// An `NFA` is built once, from the full pattern set, via [`Builder`] (or
/// the [`NFA::new`] convenience) and is immutable afterwards. Searching
/// never mutates the automaton, only the private cursor inside each
/// [`FindIter`](crate::FindIter), so a single `NFA` may back any number of
/// concurrent searches without synchronization.
#[derive(Clone)]
pub struct NFA {
    states: Vec<State>,
    patterns: Patterns,
    prefilter: Option<Prefilter>,
}

impl NFA {
    /// Build an automaton from an ordered collection of patterns.
    ///
    /// This is a convenience for adding each pattern to a [`Builder`] in
    /// order and compiling the result. Empty patterns are skipped. An empty
    /// collection is fine: the resulting automaton simply never matches.
    ///
    /// # Example
    ///
    /// ```
    /// use kwset::{nfa::NFA, Automaton};
    ///
    /// # fn example() -> Result<(), kwset::BuildError> {
    /// let nfa = NFA::new(&["bc", "ab"])?;
    /// let m = nfa.find(b"xabcx").unwrap();
    /// // "ab" ends at offset 2.
    /// assert_eq!(2, m.end());
    /// # Ok(()) }; example().unwrap()
    /// ```
    pub fn new<I, P>(patterns: I) -> Result<NFA, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut builder = Builder::new();
        for pattern in patterns {
            builder.add(pattern)?;
        }
        Ok(builder.build())
    }

    /// Return the total number of states in this automaton.
    ///
    /// There is always at least one state: the root.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Return the approximate heap memory used by this automaton, in
    /// bytes.
    pub fn memory_usage(&self) -> usize {
        let states = self.states.len() * core::mem::size_of::<State>()
            + self
                .states
                .iter()
                .map(|s| {
                    s.trans.len() * core::mem::size_of::<(u8, StateID)>()
                        + s.matches.len() * core::mem::size_of::<PatternID>()
                })
                .sum::<usize>();
        states + self.patterns.memory_usage()
    }

    /// Return the forward trie transition for the given state and byte, if
    /// one is defined.
    pub(crate) fn goto(&self, sid: StateID, byte: u8) -> Option<StateID> {
        self.states[sid].next_state(byte)
    }

    /// Return the failure link of the given state.
    pub(crate) fn fail(&self, sid: StateID) -> StateID {
        self.states[sid].fail
    }

    pub(crate) fn pattern_registry(&self) -> &Patterns {
        &self.patterns
    }
}

impl Automaton for NFA {
    #[inline]
    fn start_state(&self) -> StateID {
        StateID::ZERO
    }

    #[inline]
    fn next_state(&self, mut sid: StateID, byte: u8) -> StateID {
        // Chase failure links until some state has a forward transition for
        // this byte. Each hop strictly decreases depth and the root always
        // resolves, so this terminates after at most depth(sid) hops.
        loop {
            if let Some(next) = self.states[sid].next_state(byte) {
                return next;
            }
            if sid == StateID::ZERO {
                return StateID::ZERO;
            }
            sid = self.states[sid].fail;
        }
    }

    #[inline]
    fn match_pattern_ids(&self, sid: StateID) -> &[PatternID] {
        &self.states[sid].matches
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

impl fmt::Debug for NFA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "kwset::nfa::NFA(")?;
        for (sid, state) in self.states.iter().enumerate() {
            write!(f, "{:06}: ", sid)?;
            for (i, &(byte, next)) in state.trans.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} => {}", DebugByte(byte), next.as_usize())?;
            }
            write!(f, " (fail: {})", state.fail.as_usize())?;
            if !state.matches.is_empty() {
                let pids: Vec<usize> =
                    state.matches.iter().map(|p| p.as_usize()).collect();
                write!(f, " (matches: {:?})", pids)?;
            }
            writeln!(f)?;
        }
        write!(f, ")")
    }
}

/// A helper for printing a byte as itself when it is ASCII graphic and as
/// an escape otherwise.
struct DebugByte(u8);

impl fmt::Display for DebugByte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "{}", char::from(self.0))
        } else {
            write!(f, "\\x{:02X}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nfa(patterns: &[&str]) -> NFA {
        NFA::new(patterns).unwrap()
    }

    // Walk forward transitions only (no failure chasing) to find the state
    // corresponding to a trie path.
    fn state_for(nfa: &NFA, path: &str) -> StateID {
        let mut sid = StateID::ZERO;
        for &byte in path.as_bytes() {
            sid = nfa.goto(sid, byte).unwrap();
        }
        sid
    }

    #[test]
    fn shared_prefixes_share_states() {
        // Root plus one state per distinct prefix: s, sh, she, shed.
        let nfa = nfa(&["she", "shed"]);
        assert_eq!(5, nfa.state_count());
    }

    #[test]
    fn empty_patterns_are_ignored() {
        let mut builder = Builder::new();
        builder.add("").unwrap();
        builder.add("a").unwrap();
        builder.add("").unwrap();
        let nfa = builder.build();
        assert_eq!(1, nfa.pattern_count());
        assert_eq!(&b"a"[..], nfa.pattern(PatternID::ZERO));
        assert_eq!(2, nfa.state_count());
    }

    #[test]
    fn duplicate_patterns_share_states_but_not_ids() {
        let nfa = nfa(&["he", "he"]);
        assert_eq!(3, nfa.state_count());
        let sid = state_for(&nfa, "he");
        assert_eq!(
            &[PatternID::must(0), PatternID::must(1)][..],
            nfa.match_pattern_ids(sid),
        );
    }

    #[test]
    fn failure_links_point_strictly_shallower() {
        let nfa = nfa(&["he", "she", "his", "hers"]);
        // Recover each state's depth from the forward transitions.
        let mut depth = vec![usize::MAX; nfa.state_count()];
        depth[0] = 0;
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(StateID::ZERO);
        while let Some(sid) = queue.pop_front() {
            for byte in 0..=255u8 {
                if let Some(next) = nfa.goto(sid, byte) {
                    depth[next] = depth[sid] + 1;
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(StateID::ZERO, nfa.fail(StateID::ZERO));
        for sid in 1..nfa.state_count() {
            let sid = StateID::must(sid);
            assert!(
                depth[nfa.fail(sid)] < depth[sid],
                "failure link of state {} does not decrease depth",
                sid.as_usize(),
            );
        }
    }

    #[test]
    fn output_sets_merge_suffix_patterns() {
        let nfa = nfa(&["he", "she"]);
        // The state for "she" must also report "he", which ends at the
        // failure target.
        let sid = state_for(&nfa, "she");
        assert_eq!(
            &[PatternID::must(0), PatternID::must(1)][..],
            nfa.match_pattern_ids(sid),
        );
        // The state for "he" reports only itself.
        let sid = state_for(&nfa, "he");
        assert_eq!(&[PatternID::must(0)][..], nfa.match_pattern_ids(sid));
    }

    #[test]
    fn root_self_loops_on_undefined_bytes() {
        let nfa = nfa(&["abc"]);
        assert_eq!(StateID::ZERO, nfa.next_state(StateID::ZERO, b'z'));
        assert_eq!(StateID::ZERO, nfa.next_state(StateID::ZERO, 0xFF));
    }

    #[test]
    fn failure_chase_terminates_at_root() {
        let nfa = nfa(&["aaaa"]);
        // From the deepest state, a byte with no transition anywhere must
        // fall all the way back to the root.
        let sid = state_for(&nfa, "aaaa");
        assert_eq!(StateID::ZERO, nfa.next_state(sid, b'z'));
        // While 'a' from the deepest state falls back to depth 4 again via
        // the suffix "aaa" + 'a'.
        assert_eq!(sid, nfa.next_state(sid, b'a'));
    }
}
