//! zipdll - ZIP 解压安装器插件
//!
//! NSIS plugin exporting `extractall` and `extractfile`. Arguments come off
//! the installer's string stack, the archive work is done by the `zip`
//! crate, progress goes to the installer's details list, and one result
//! string goes back on the stack: `"success"` or the error text.
//!
//! ## 示例
//!
//! ```no_run
//! use zipdll::{extract_all, HostStack, MemoryLog, VecStack};
//!
//! let mut stack = VecStack::with_args(&["setup.zip", "C:\\Program Files\\App"]);
//! let mut log = MemoryLog::new();
//! extract_all(&mut stack, &mut log);
//! assert_eq!(stack.pop().as_deref(), Some("success"));
//! ```

pub mod archive;
pub mod driver;
pub mod error;
pub mod messages;
#[cfg(windows)]
pub mod nsis;
pub mod platform;
pub mod report;
pub mod stack;

// 重导出常用类型
pub use archive::{Archive, EntryInfo};
pub use driver::{extract_all, extract_file, Failure, FailureMessages, RESULT_SUCCESS};
pub use error::{ExtractError, Result};
pub use messages::{
    format_template, ExtractAllArgs, ExtractAllMessages, ExtractFileArgs, ExtractFileMessages,
    TRANSLATE_SENTINEL,
};
pub use report::{ConsoleLog, MemoryLog, Reporter};
pub use stack::{HostStack, VecStack};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
