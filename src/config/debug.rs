//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Log every outbound request URL (listing + history).
    pub log_requests: bool,

    /// Log memo cache hits and misses.
    pub log_cache: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Log fitted model summary (changepoints, seasonalities, residual sigma).
    pub log_fit: bool,

    /// Anything about handling the coin/horizon selection
    pub log_selection: bool,

    /// Log job dispatch and completion in the engine worker.
    pub log_engine: bool,
}

pub const DF: LogFlags = LogFlags {
    log_requests: true,
    log_selection: true,

    log_cache: false,
    log_performance: false,
    log_fit: false,
    log_engine: false,
};

/// Read by the `trace_time!` macro.
pub const LOG_PERFORMANCE: bool = DF.log_performance;
