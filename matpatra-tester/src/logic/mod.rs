pub mod policy;
pub mod reports;
pub mod simulation;

pub use policy::{ClerkCall, ClerkPolicy, ReviewStrategy};
pub use reports::{generate_console_report, generate_json_report, generate_markdown_report};
pub use simulation::{SessionRecord, SimulationConfig, StrategyResult, run_session, run_strategy};
