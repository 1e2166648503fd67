pub mod formatting;
pub mod menu_renderer;
pub mod prompts;
pub mod report;
pub mod table_renderer;
