pub mod limits;
pub mod response;

pub use response::{PaginationMetadata, SearchOutcome};
