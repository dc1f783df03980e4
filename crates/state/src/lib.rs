pub mod format;
pub mod meta;
pub mod project;
pub mod snap;
pub mod status;
pub mod store;
pub mod timeline;
