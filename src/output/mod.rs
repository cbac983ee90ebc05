pub mod json;
pub mod text;

pub use json::format_json_report;
pub use text::format_text_report;
