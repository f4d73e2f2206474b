mod tool_service;

pub use tool_service::ToolService;
