pub mod drop_zone;
pub mod status;
pub mod theme;
pub mod timeline;
