//! Event handlers for aggregation outcomes

pub mod console;
pub mod report;
pub mod composite;

// Re-export for convenience
pub use console::ConsoleEventHandler;
pub use report::ReportEventHandler;
pub use composite::CompositeEventHandler;
