mod tool;

pub use tool::ToolWithCategory;
