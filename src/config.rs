//! Tasking Configuration

/// Tasking system configuration options
#[derive(Debug, Clone, Copy)]
pub struct TaskingConfig {
    /// Requested worker count; values <= 0 mean "use the hardware default"
    pub num_threads: i32,

    /// Flush denormal floats to zero process-wide (FTZ + DAZ)
    pub flush_denormals: bool,
}

impl Default for TaskingConfig {
    fn default() -> Self {
        Self {
            num_threads: -1,
            flush_denormals: false,
        }
    }
}

impl TaskingConfig {
    /// Request an exact worker count
    pub fn with_num_threads(num_threads: i32) -> Self {
        Self {
            num_threads,
            ..Self::default()
        }
    }
}
