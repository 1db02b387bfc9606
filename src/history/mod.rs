pub mod store;
pub mod types;

pub use store::UploadHistory;
pub use types::UploadRecord;
