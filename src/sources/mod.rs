pub mod external;
pub mod fallback;
pub mod primary;
pub mod traits;
pub mod types;

pub use external::ExternalApiSource;
pub use fallback::StaticSource;
pub use primary::PrimarySource;
pub use traits::PropertySource;
pub use types::{Acceptance, LookupOutcome, ResultPage, SearchOutcome, Tier};
