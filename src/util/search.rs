use crate::util::primitives::PatternID;

/// A match event reported at a single position in the haystack.
///
/// An event records the 0-based offset of the *last* byte of the match,
/// along with every pattern that ends at that offset. Reporting all ending
/// patterns in one event is what makes suffix matches visible: when the
/// automaton reaches the end of `she`, the event also carries `he`, since
/// output sets are merged along failure links at construction time.
///
/// The pattern identifiers borrow from the automaton that produced the
/// event, so an event cannot outlive its automaton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MatchEvent<'a> {
    /// The offset of the last byte of the match, inclusive.
    end: usize,
    /// The identifiers of every pattern ending at `end`, in ascending
    /// order. Never empty.
    patterns: &'a [PatternID],
}

impl<'a> MatchEvent<'a> {
    #[inline]
    pub(crate) fn new(end: usize, patterns: &'a [PatternID]) -> MatchEvent<'a> {
        debug_assert!(!patterns.is_empty());
        MatchEvent { end, patterns }
    }

    /// The offset of the last byte of the match.
    ///
    /// Note that this is an inclusive offset, matching the convention of
    /// reporting where in the haystack each pattern *ends*. The byte range
    /// of a particular pattern `pid` is therefore
    /// `(end + 1 - len(pid))..=end`.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The identifiers of every pattern ending at [`MatchEvent::end`], in
    /// ascending order.
    ///
    /// This is guaranteed to be non-empty.
    #[inline]
    pub fn pattern_ids(&self) -> &'a [PatternID] {
        self.patterns
    }

    /// An iterator over the identifiers of every pattern ending at
    /// [`MatchEvent::end`].
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = PatternID> + 'a {
        self.patterns.iter().copied()
    }
}
