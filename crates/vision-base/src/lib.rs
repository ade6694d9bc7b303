pub mod logging;
pub mod size;

pub use logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
pub use size::Size;
