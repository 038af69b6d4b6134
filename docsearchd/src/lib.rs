pub mod config;
pub mod paginate;
pub mod search;
pub mod upstream;

pub use docsearch_query as query;
pub use search::search;
