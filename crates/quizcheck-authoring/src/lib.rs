//! quizcheck-authoring: spreadsheet-to-record authoring pipeline.
//!
//! Turns rows of the question sheet into validated question records for the
//! grading engine, and loads the quizcheck configuration.

pub mod config;
pub mod export;
pub mod sheet;

pub use config::{load_config_from, AuthoringConfig, GradingConfig, QuizcheckConfig};
pub use export::{export_rows, row_to_record, ExportReport, RowOutcome};
pub use sheet::{read_sheet, SheetRow};
