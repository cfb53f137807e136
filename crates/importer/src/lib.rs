pub mod error;
pub mod results;
pub mod store;
pub mod traits;

pub use error::{ImporterError, Result};
pub use results::{
    FileCheckError, ImportReport, ImportSummary, ResultImporter, RowError, RowErrorKind,
    check_csv_file,
};
pub use traits::{AthleteDirectory, EnrollmentRegistry, EventCatalog, ResultStore};
