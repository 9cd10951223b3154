//! `engagekit_io_csv` v1:
//! Delimited table input/output with by-name column validation.
//!
//! - `conf`    : column names and parse formats
//! - `spec`    : typed records and errors
//! - `util`    : typed column extraction
//! - `reader`  : CSV to DataFrame with required-column check
//! - `records` : typed record loaders
//! - `writer`  : DataFrame to CSV
pub mod conf;
pub mod reader;
pub mod records;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{C_DATE_FORMAT, TUP_COLS_CONTENT_CODING, TUP_COLS_INSTAGRAM_METRICS};
pub use reader::read_csv_table;
pub use records::{load_content_coding, load_instagram_metrics};
pub use spec::{ContentCodingRecord, InstagramMetricRecord, TableError};
pub use writer::write_csv_table;
