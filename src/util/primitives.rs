/*!
Type definitions for the identifier types used throughout this crate.

A [`StateID`] identifies a state in an automaton, whether that's the sparse
trie representation or the dense transition table. A [`PatternID`] identifies
a single keyword pattern. A pattern is assigned an auto-incrementing integer,
starting at `0`, based on the order in which patterns are added during
construction.

Both types are represented by a `u32` internally, but are clamped to a
maximum value that guarantees they are always representable by both a `usize`
and an `i32` on all supported targets. Exceeding that maximum during
construction is reported as a build error, never a panic.
*/

use core::convert::TryFrom;

/// A macro that defines the common API between our two identifier types.
/// They are identical except for their names and documentation, so we stamp
/// them out from one definition.
macro_rules! index_type {
    (
        $(#[$tydoc:meta])*
        $name:ident, $err:ident, $what:expr
    ) => {
        $(#[$tydoc])*
        #[repr(transparent)]
        #[derive(
            Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord,
        )]
        pub struct $name(u32);

        impl $name {
            /// The maximum value, represented as a `usize`.
            pub const MAX: $name =
                $name::new_unchecked(core::i32::MAX as usize - 1);

            /// The total number of values that are allowed in any single
            /// automaton built by this crate.
            pub const LIMIT: usize = $name::MAX.as_usize() + 1;

            /// The zero value.
            pub const ZERO: $name = $name::new_unchecked(0);

            /// Create a new identifier.
            ///
            /// If the given value exceeds the maximum, then this returns
            /// an error.
            #[inline]
            pub fn new(id: usize) -> Result<$name, $err> {
                $name::try_from(id)
            }

            /// Create a new identifier without checking whether the given
            /// value exceeds the maximum.
            ///
            /// Using this with a value bigger than the maximum never
            /// sacrifices memory safety, but may produce nonsense results
            /// or panics elsewhere.
            #[inline]
            pub const fn new_unchecked(id: usize) -> $name {
                $name(id as u32)
            }

            /// Like `new`, but panics if the given value is not valid.
            #[inline]
            pub fn must(id: usize) -> $name {
                match $name::new(id) {
                    Ok(id) => id,
                    Err(_) => panic!("invalid {} identifier: {}", $what, id),
                }
            }

            /// Return this identifier as a `usize`.
            #[inline]
            pub const fn as_usize(&self) -> usize {
                self.0 as usize
            }

            /// Return the identifier one greater than this one, as a
            /// `usize`. This is always correct since the maximum value is
            /// less than `usize::MAX`.
            #[inline]
            pub fn one_more(&self) -> usize {
                self.as_usize() + 1
            }
        }

        /// The error returned when a value is out of range for an
        /// identifier.
        ///
        /// This occurs when the value exceeds the maximum, where the
        /// maximum is guaranteed to fit into a `usize` and an `i32`.
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub struct $err {
            attempted: u64,
        }

        impl $err {
            /// Return the value that could not be converted.
            pub fn attempted(&self) -> u64 {
                self.attempted
            }
        }

        impl std::error::Error for $err {}

        impl core::fmt::Display for $err {
            fn fmt(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                write!(
                    f,
                    "failed to create {} from {:?}, which exceeds {:?}",
                    $what,
                    self.attempted(),
                    $name::MAX,
                )
            }
        }

        impl TryFrom<usize> for $name {
            type Error = $err;

            fn try_from(id: usize) -> Result<$name, $err> {
                if id > $name::MAX.as_usize() {
                    return Err($err { attempted: id as u64 });
                }
                Ok($name::new_unchecked(id))
            }
        }

        impl<T> core::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &T {
                &self[index.as_usize()]
            }
        }

        impl<T> core::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.as_usize()]
            }
        }

        impl<T> core::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &T {
                &self[index.as_usize()]
            }
        }

        impl<T> core::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.as_usize()]
            }
        }
    };
}

index_type!(
    /// An identifier for a keyword pattern.
    ///
    /// The identifier for a pattern corresponds to its relative position
    /// among the other patterns added during construction of an automaton.
    /// The first pattern has identifier `0`, and each subsequent pattern is
    /// `1`, `2` and so on. Identifiers are assigned in insertion order and
    /// never change once assigned.
    PatternID,
    PatternIDError,
    "pattern"
);

index_type!(
    /// An identifier for an automaton state.
    ///
    /// A state's identity is positional: it is an index into one contiguous
    /// state table. Failure links and transitions are stored as plain
    /// `StateID`s into that same table, which is what lets the automaton's
    /// cyclic transition graph live in fully owned memory without reference
    /// counting. The root (empty prefix) state is always `StateID::ZERO`.
    StateID,
    StateIDError,
    "state"
);
