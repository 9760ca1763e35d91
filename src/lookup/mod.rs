// Dictionary lookup - query normalization, lexicon storage and key matching

mod lexicon;
mod matcher;
mod normalize;

pub use lexicon::{Entry, Lexicon, LexiconError, LexiconKey};
pub use matcher::{search, LexiconMatcher, MatcherConfig};
pub use normalize::normalize;
