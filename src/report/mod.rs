//! Report rendering: markdown document and console summary.

pub mod console;
pub mod markdown;

pub use console::print_report;
pub use markdown::generate_markdown_report;
