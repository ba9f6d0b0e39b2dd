pub mod alerts;
pub mod baseline;
pub mod profile;
pub mod projection;
pub mod summary;
pub mod timeline;
