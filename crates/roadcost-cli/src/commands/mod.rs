pub mod documents;
pub mod stages;
pub mod summary;
pub mod upload;
