pub mod filter;
pub mod orchestrator;
pub mod pagination;
pub mod query;

pub use filter::FilterSpec;
pub use orchestrator::SearchOrchestrator;
pub use pagination::{PageInfo, Pagination};
pub use query::{sort_newest_first, Clause, Field, Predicate};
