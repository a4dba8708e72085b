//! Read-only view of the handful of user settings this crate actually consults.
//!
//! The host application owns the full configuration system (hundreds of
//! user-tunable options); this crate never parses a config file and never
//! mutates what it's given. `ConfigView` is that narrow read slice, passed by
//! shared reference into anything that needs it.

#[derive(Debug, Clone)]
pub struct ConfigView {
    /// Column at which header-copy PREFIX folding wraps continuation lines.
    pub wrap_len: usize,
    /// Headers to drop when copying/displaying unless `unignore` overrides them.
    pub weed_list: Vec<String>,
    /// Headers exempted from `weed_list`, matched by prefix.
    pub unignore_list: Vec<String>,
    /// Preferred header emission order; headers not listed keep source order.
    pub header_order: Vec<String>,
    /// Interval between IMAP NOOP/IDLE keepalives.
    pub keepalive: std::time::Duration,
    /// Whether to use IDLE when the server advertises it.
    pub use_idle: bool,
    /// Whether to emit an RFC 2047 encoded `From` display-name when composing.
    pub encode_from: bool,
    /// Maximum nesting depth the MIME parser will descend into multipart bodies.
    pub max_multipart_depth: usize,
    /// Maximum length of a single IMAP command line before it must be split.
    pub imap_max_cmdlen: usize,
    /// Number of NNTP article headers to keep in the overview cache per group.
    pub nntp_acache_len: usize,
}

impl Default for ConfigView {
    fn default() -> Self {
        Self {
            wrap_len: 78,
            weed_list: Vec::new(),
            unignore_list: Vec::new(),
            header_order: Vec::new(),
            keepalive: std::time::Duration::from_secs(240),
            use_idle: true,
            encode_from: false,
            max_multipart_depth: 30,
            imap_max_cmdlen: 8192,
            nntp_acache_len: 5000,
        }
    }
}
