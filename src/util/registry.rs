use crate::{error::BuildError, util::primitives::PatternID};

/// An append-only registry of the original pattern byte strings.
///
/// A [`PatternID`] is an index into this registry. Insertion order and
/// identifier assignment are the same thing: the first pattern added gets
/// identifier `0` and so on. The registry is the only place the original
/// bytes are kept; the automata themselves only ever store identifiers.
#[derive(Clone, Debug, Default)]
pub(crate) struct Patterns {
    pats: Vec<Box<[u8]>>,
}

impl Patterns {
    pub(crate) fn new() -> Patterns {
        Patterns::default()
    }

    /// Return the identifier that the next call to `push` will assign.
    ///
    /// This is the only fallible part of pattern registration, and it only
    /// fails when the number of patterns exceeds `PatternID::LIMIT`.
    pub(crate) fn next_id(&self) -> Result<PatternID, BuildError> {
        PatternID::new(self.pats.len())
            .map_err(|_| BuildError::too_many_patterns(self.pats.len()))
    }

    pub(crate) fn push(&mut self, pattern: &[u8]) {
        self.pats.push(pattern.to_vec().into_boxed_slice());
    }

    /// Return the original bytes of the given pattern.
    ///
    /// # Panics
    ///
    /// When `pid` was not assigned by this registry.
    pub(crate) fn get(&self, pid: PatternID) -> &[u8] {
        &self.pats[pid]
    }

    pub(crate) fn len(&self) -> usize {
        self.pats.len()
    }

    /// An iterator over the first byte of each pattern. Patterns are never
    /// empty, so this yields exactly `len` bytes.
    pub(crate) fn first_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pats.iter().map(|p| p[0])
    }

    /// Return the approximate heap memory used by this registry, in bytes.
    pub(crate) fn memory_usage(&self) -> usize {
        self.pats.iter().map(|p| p.len()).sum::<usize>()
            + self.pats.len() * core::mem::size_of::<Box<[u8]>>()
    }
}
