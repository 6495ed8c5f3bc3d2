pub const OSCILLOSCOPE_TIME_COLUMN: &str = "second";
pub const OSCILLOSCOPE_VOLT_COLUMN: &str = "Volt";

/// Row of the oscilloscope export holding the column names.
pub const OSCILLOSCOPE_HEADER_ROW: usize = 1;

/// Rows dropped from every oscilloscope export: a stray leading line and the
/// instrument settings block that follows the column names. Data starts at row 12.
pub const OSCILLOSCOPE_SKIPPED_ROWS: [usize; 11] = [0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

pub const RPM_COLUMN: &str = "rpm";

/// Positional channel names of a force-balance run file.
pub const BALANCE_COLUMNS: [&str; 10] = [
    "Fx", "Fy", "Fz", "Tx", "Ty", "Tz", "null", "current1", "current2", RPM_COLUMN,
];
