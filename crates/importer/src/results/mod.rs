pub mod models;
pub mod pipeline;
pub mod reader;
pub mod validator;

pub use models::{ImportReport, ImportSummary, RowError, RowErrorKind};
pub use pipeline::ResultImporter;
pub use reader::{FileCheckError, check_csv_file, read_rows};
