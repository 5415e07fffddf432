use core::fmt;

use crate::util::primitives::{PatternID, StateID};

/// An error that occurred during the construction of an automaton.
///
/// The only way construction can fail is by exhausting the identifier space
/// for states or patterns. Insertion and searching are otherwise total
/// functions over their valid inputs.
#[derive(Clone, Debug)]
pub struct BuildError {
    kind: ErrorKind,
}

/// The kind of error that occurred.
#[derive(Clone, Debug)]
pub enum ErrorKind {
    /// An error that occurred because too many states were created. The
    /// number given is the number of states that were attempted, which
    /// exceeds [`StateID::LIMIT`].
    TooManyStates(usize),
    /// An error that occurred because too many patterns were added. The
    /// number given is the number of patterns that were attempted, which
    /// exceeds [`PatternID::LIMIT`].
    TooManyPatterns(usize),
}

impl BuildError {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn too_many_states(attempted: usize) -> BuildError {
        BuildError { kind: ErrorKind::TooManyStates(attempted) }
    }

    pub(crate) fn too_many_patterns(attempted: usize) -> BuildError {
        BuildError { kind: ErrorKind::TooManyPatterns(attempted) }
    }
}

impl std::error::Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::TooManyStates(attempted) => write!(
                f,
                "building the automaton requires {} states, \
                 which exceeds the limit of {}",
                attempted,
                StateID::LIMIT,
            ),
            ErrorKind::TooManyPatterns(attempted) => write!(
                f,
                "adding a pattern with identifier {} exceeds \
                 the pattern limit of {}",
                attempted,
                PatternID::LIMIT,
            ),
        }
    }
}
