use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// Backend that extracts start/end timestamps from uploaded media.
#[derive(Debug, Clone, Parser)]
#[command(name = "tcline-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "TCLINE_LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: SocketAddr,

    /// Directory served at `/` (e.g. a browser frontend).
    #[arg(long, env = "TCLINE_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Largest accepted upload, in bytes.
    #[arg(long, env = "TCLINE_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Explicit ffprobe binary; otherwise one beside the server or on PATH.
    #[arg(long, env = "TCLINE_FFPROBE")]
    pub ffprobe: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ffprobe: None,
        }
    }
}
