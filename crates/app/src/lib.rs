pub mod app;
pub mod error;
pub mod events;
pub mod services;
pub mod startup;

pub use app::{AppConfig, AppState};
pub use error::{AppError, Result};
pub use events::{DEFAULT_EXPORT_FILE, HostEvent, ListenStats, handle_event, listen, parse_event};
pub use services::{ReportFormat, ReportRenderer, StatsReport, Tracker};
pub use startup::{AppPaths, ensure_app_data_dir};
