pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod launcher;
pub mod logging;
pub mod scanner;
pub mod session;

pub use excel_search_common as common;
