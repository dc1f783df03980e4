pub mod gst_init;
pub mod metadata;
pub mod probe;
pub mod process;
pub mod timecode;
