pub mod dictionary;
pub mod error;
pub mod language;
pub mod lookup;
pub mod preprocess;
pub mod state;

pub use error::{BuildError, LookupError, RuleError};
pub use lookup::{CandidateMatch, LookupResult, MatchScore};
pub use state::Snapshot;
