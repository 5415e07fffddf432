/*!
Supporting types shared by the automaton implementations.
*/

pub mod prefilter;
pub mod primitives;
pub mod search;

pub(crate) mod registry;
