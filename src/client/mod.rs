pub mod http;
pub mod traits;
pub mod types;

pub use http::HttpFlatClient;
pub use traits::FlatApi;
pub use types::ListParams;
