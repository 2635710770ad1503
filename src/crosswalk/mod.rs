pub mod matcher;

pub use matcher::{match_fields, Crosswalk, MatchError, MatchedPair};
