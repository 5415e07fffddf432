/*!
A library for simultaneously searching a byte haystack for many keyword
patterns, using Aho-Corasick automata.

An automaton is built once from a finite set of patterns and is immutable
afterwards. Searching reports, at every haystack position, which patterns
end there, including overlapping matches and matches of patterns that are
suffixes of other patterns.

Two equivalent representations are provided:

* [`nfa::NFA`] stores only the forward trie transitions and resolves the
  rest at search time by chasing failure links. It is small and cheap to
  build, with amortized constant time per haystack byte.
* [`dfa::DFA`] additionally materializes the full transition table, which
  costs `states x 256` entries of memory but guarantees exactly one table
  lookup per haystack byte.

Both implement the [`Automaton`] trait and share one search loop, so for
any haystack they yield identical match events.

# Example: find overlapping matches

```
use kwset::{nfa::NFA, Automaton, PatternID};

# fn example() -> Result<(), kwset::BuildError> {
let nfa = NFA::new(&["he", "she", "his", "hers"])?;
let got: Vec<(usize, Vec<PatternID>)> = nfa
    .find_iter(b"ushers")
    .map(|m| (m.end(), m.pattern_ids().to_vec()))
    .collect();
// "she" and "he" both end at offset 3; "hers" ends at offset 5. Offsets
// point at the last byte of each match.
assert_eq!(
    vec![
        (3, vec![PatternID::must(0), PatternID::must(1)]),
        (5, vec![PatternID::must(3)]),
    ],
    got,
);
// Pattern identifiers resolve back to the original bytes.
assert_eq!(&b"hers"[..], nfa.pattern(PatternID::must(3)));
# Ok(()) }; example().unwrap()
```

# Example: incremental construction

Patterns can also be added one at a time through a [`nfa::Builder`]. The
automaton only becomes searchable once `build` is called; afterwards no
more patterns can be added.

```
use kwset::{nfa::Builder, Automaton};

# fn example() -> Result<(), kwset::BuildError> {
let mut builder = Builder::new();
builder.add("rust")?;
builder.add("crust")?;
let nfa = builder.build();
// Both patterns end at the offset of the 't'.
let m = nfa.find(b"crusty").unwrap();
assert_eq!(4, m.end());
assert_eq!(2, m.pattern_ids().len());
# Ok(()) }; example().unwrap()
```

# Crate features

* **logging** - When enabled, the construction phases emit trace and debug
  messages via the [`log`](https://docs.rs/log) crate.
*/

pub use crate::{
    automaton::{Automaton, FindIter},
    error::{BuildError, ErrorKind},
    util::{
        primitives::{PatternID, PatternIDError, StateID, StateIDError},
        search::MatchEvent,
    },
};

#[macro_use]
mod macros;

pub mod dfa;
pub mod nfa;
pub mod util;

mod automaton;
mod error;
