//! SQL text for the MySQL backend.

use bench_core::COLUMNS;
use std::path::Path;

/// Session settings that skip uniqueness and foreign key checks while the
/// table has no constraints.
pub const DISABLE_CHECKS: &str = "SET unique_checks = 0, foreign_key_checks = 0";

/// Generate DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_name}")
}

/// Generate CREATE TABLE statement for the benchmark table.
pub fn generate_create_table(table_name: &str) -> String {
    format!(
        "CREATE TABLE {table_name} (
    Id numeric(20, 0),
    Email varchar(50),
    Prefix varchar(50),
    Name varchar(50),
    Birth_Date date,
    Phone_Number varchar(50),
    Additional_Email varchar(50),
    Address varchar(200),
    Postcode varchar(50),
    City varchar(50),
    County varchar(50),
    Country varchar(50),
    Yearjoined numeric,
    Timejoined time,
    Link varchar(200),
    Comments varchar(50),
    Occupation varchar(100),
    Bank varchar(20),
    Password varchar(50)
)"
    )
}

/// Quote a file path as a MySQL string literal.
fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let escaped = raw.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// `LOAD DATA LOCAL INFILE` statement for one partition file.
///
/// Birth dates are written as `DD-MM-YYYY` and converted on the way in.
pub fn generate_load_data(table_name: &str, path: &Path) -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|c| {
            if *c == "Birth_Date" {
                "@birth_date".to_string()
            } else {
                (*c).to_string()
            }
        })
        .collect();

    format!(
        "LOAD DATA LOCAL INFILE {} INTO TABLE {table_name} \
         FIELDS TERMINATED BY '|' LINES TERMINATED BY '\\n' \
         ({}) SET Birth_Date = STR_TO_DATE(@birth_date, '%d-%m-%Y')",
        quote_path(path),
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::TABLE_NAME;

    #[test]
    fn test_generate_drop_table() {
        assert_eq!(
            generate_drop_table(TABLE_NAME),
            "DROP TABLE IF EXISTS customers_test"
        );
    }

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(TABLE_NAME);
        assert!(sql.starts_with("CREATE TABLE customers_test ("));
        for column in COLUMNS {
            assert!(sql.contains(&format!("    {column} ")), "missing {column}");
        }
    }

    #[test]
    fn test_generate_load_data() {
        let sql = generate_load_data(TABLE_NAME, Path::new("/data/People_data_1_25.csv"));

        assert!(sql.starts_with(
            "LOAD DATA LOCAL INFILE '/data/People_data_1_25.csv' INTO TABLE customers_test"
        ));
        assert!(sql.contains("FIELDS TERMINATED BY '|' LINES TERMINATED BY '\\n'"));
        assert!(sql.contains("(Id, Email, Prefix, Name, @birth_date, Phone_Number,"));
        assert!(sql.ends_with("SET Birth_Date = STR_TO_DATE(@birth_date, '%d-%m-%Y')"));
        assert!(!sql.contains("IGNORE 1 LINES"));
    }

    #[test]
    fn test_quote_path_escapes() {
        assert_eq!(quote_path(Path::new("/tmp/it's")), "'/tmp/it\\'s'");
    }
}
