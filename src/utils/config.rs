//! Configuration defaults and constants for the CLI.

use std::time::Duration;

/// Default timeout for endpoint requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Flush the ledger every time this many diffs have accumulated
pub const CHECKPOINT_EVERY: usize = 1000;

/// Default report location
pub const DEFAULT_OUTPUT: &str = "output/api_diff.xlsx";

/// Default location for generated test data
pub const DEFAULT_TEST_DATA_OUTPUT: &str = "config/test_data.csv";

// Delimiter sniffing only looks at the head of the table
pub const SNIFF_SAMPLE_BYTES: usize = 1024;
pub const ALLOWED_DELIMITERS: &[u8] = b",\t;";

/// How much of an undecodable response body is kept for the error message
pub const BODY_PREVIEW_CHARS: usize = 500;

// 429 handling
pub const DEFAULT_RATE_LIMIT_RETRIES: u32 = 3;
pub const DEFAULT_RATE_LIMIT_BACKOFF_SECS: f64 = 1.0;

/// Worksheet and table names in the xlsx report
pub const REPORT_SHEET_NAME: &str = "API Diff Results";
pub const REPORT_TABLE_NAME: &str = "APIDiffTable";
