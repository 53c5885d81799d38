// File I/O operations: import sheets in, templates and reports out

pub mod csv;
pub mod error;
pub mod payload;
pub mod reference;
pub mod report;
pub mod sheet;
pub mod template;
pub mod xlsx;

pub use error::IoError;
pub use sheet::read_rows;
