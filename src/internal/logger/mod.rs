// src/internal/logger/mod.rs

pub mod logger;

// Export the init_logger function
pub use logger::init_logger;

// Note: The log_* macros are exported at the crate root via #[macro_export]
// and can be accessed as crate::log_debug!, crate::log_info!, etc.
