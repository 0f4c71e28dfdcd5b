//! Label-based jump navigation.
//!
//! The user types a short query. The first [`ANCHOR_LEN`] characters pick
//! what to look for in the visible text, every occurrence gets a short label,
//! and the remaining characters pick a label. As soon as one candidate is
//! left the caret moves there.

mod candidate;
mod config;
pub mod error;
mod filter;
pub mod host;
mod index;
mod label;
mod leap;
pub mod memory;
mod navigator;
mod options;
mod query;
mod scanner;
mod session;

pub use candidate::Candidate;
pub use candidate::CandidateKey;
pub use config::LeapCommand;
pub use config::LeapConfig;
pub use config::find_leap_home;
pub use error::LeapError;
pub use error::NavigationError;
pub use filter::ActiveSelection;
pub use filter::MatchFilter;
pub use index::MatchIndex;
pub use label::LABEL_SPACE;
pub use label::Label;
pub use label::LabelAllocator;
pub use leap::Leap;
pub use navigator::JumpRequest;
pub use navigator::MAX_SIDE_SWITCHES;
pub use navigator::ViewNavigator;
pub use options::SearchOptions;
pub use query::ANCHOR_LEN;
pub use query::CONTEXT_LEN;
pub use query::LABEL_LEN;
pub use query::MIN_SEARCH_LEN;
pub use query::Query;
pub use scanner::CorpusScanner;
pub use session::SearchSession;
pub use session::SessionEvent;
pub use session::SessionState;
pub use session::Transition;
