//! SQL*Loader control descriptor.

use bench_core::COLUMNS;

/// Name of the control descriptor written once per run.
pub const CONTROL_FILE_NAME: &str = "customers_test.ctl";

/// Name of the SQL*Loader log shared by every partition of a run.
pub const LOG_FILE_NAME: &str = "customers_test.log";

/// SQL*Loader field specification for one column.
fn field_spec(column: &str) -> String {
    let name = column.to_lowercase();
    match column {
        "Birth_Date" => format!("{name} DATE \"DD-MM-YYYY\""),
        "Timejoined" => format!("{name} TIMESTAMP \"HH24:mi:ss\""),
        _ => name,
    }
}

/// Render the control descriptor appending `|`-delimited rows to `table`.
///
/// Fields are listed in partition file order.
pub fn control_file_contents(table: &str) -> String {
    let fields: Vec<String> = COLUMNS.iter().map(|c| field_spec(c)).collect();
    format!(
        "LOAD DATA APPEND INTO TABLE {} FIELDS TERMINATED BY \"|\"\n({})\n",
        table.to_uppercase(),
        fields.join(",\n ")
    )
}
