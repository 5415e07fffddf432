/*!
A prefilter for quickly skipping ahead to candidate match positions.

While an automaton sits in its start state, the only bytes that can move it
anywhere are the first bytes of the patterns it was built from. When the
pattern set has at most three distinct first bytes, we can hand the skipping
over to vectorized byte searches instead of stepping the transition function
one byte at a time. Bytes skipped this way provably keep the cursor in the
start state and can never end a match (patterns are non-empty, so the start
state's output set is empty), which is why both search strategies can apply
the prefilter without changing their results.
*/

use memchr::{memchr, memchr2, memchr3};

use crate::util::registry::Patterns;

/// A searcher for the next occurrence of any pattern's first byte.
///
/// This is an implementation detail of the search loop and cannot be
/// constructed by callers. It is only exposed because
/// [`Automaton::prefilter`](crate::Automaton::prefilter) is a trait method.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prefilter {
    bytes: Bytes,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Bytes {
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
}

impl Prefilter {
    /// Build a prefilter from the registered patterns, or `None` when the
    /// set of distinct first bytes is empty or too big to search for
    /// quickly.
    pub(crate) fn from_patterns(patterns: &Patterns) -> Option<Prefilter> {
        let mut firsts: Vec<u8> = vec![];
        for byte in patterns.first_bytes() {
            if !firsts.contains(&byte) {
                firsts.push(byte);
            }
            if firsts.len() > 3 {
                return None;
            }
        }
        firsts.sort_unstable();
        let bytes = match *firsts.as_slice() {
            [a] => Bytes::One(a),
            [a, b] => Bytes::Two(a, b),
            [a, b, c] => Bytes::Three(a, b, c),
            _ => return None,
        };
        Some(Prefilter { bytes })
    }

    /// Return the position of the next candidate byte at or after `at`, or
    /// `None` when the rest of the haystack contains no candidates.
    #[inline]
    pub fn find(&self, haystack: &[u8], at: usize) -> Option<usize> {
        let found = match self.bytes {
            Bytes::One(a) => memchr(a, &haystack[at..]),
            Bytes::Two(a, b) => memchr2(a, b, &haystack[at..]),
            Bytes::Three(a, b, c) => memchr3(a, b, c, &haystack[at..]),
        };
        found.map(|i| at + i)
    }
}
