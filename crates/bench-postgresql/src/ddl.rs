//! SQL text for the PostgreSQL backend.

/// Session directive that makes `DD-MM-YYYY` birth dates parse correctly.
pub const SET_DATESTYLE: &str = "SET datestyle = \"ISO, DMY\"";

/// Generate DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {table_name}")
}

/// Generate CREATE TABLE statement for the benchmark table.
///
/// The table is created without constraints; the primary key and indexes are
/// added by later phases.
pub fn generate_create_table(table_name: &str) -> String {
    format!(
        "CREATE TABLE {table_name} (
    Id numeric,
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

/// `COPY` statement reading `|`-delimited text rows from the client.
pub fn generate_copy(table_name: &str) -> String {
    format!("COPY {table_name} FROM STDIN WITH (FORMAT text, DELIMITER '|')")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::{COLUMNS, TABLE_NAME};

    #[test]
    fn test_generate_drop_table() {
        assert_eq!(
            generate_drop_table(TABLE_NAME),
            "DROP TABLE IF EXISTS customers_test"
        );
    }

    #[test]
    fn test_generate_create_table_column_order() {
        let sql = generate_create_table(TABLE_NAME);
        assert!(sql.starts_with("CREATE TABLE customers_test ("));
        assert!(!sql.contains("PRIMARY KEY"));

        let mut last = 0;
        for column in COLUMNS {
            let pos = sql
                .find(&format!("    {column} "))
                .unwrap_or_else(|| panic!("missing column {column}"));
            assert!(pos > last, "column {column} out of order");
            last = pos;
        }
    }

    #[test]
    fn test_generate_copy() {
        assert_eq!(
            generate_copy(TABLE_NAME),
            "COPY customers_test FROM STDIN WITH (FORMAT text, DELIMITER '|')"
        );
        assert_eq!(SET_DATESTYLE, r#"SET datestyle = "ISO, DMY""#);
    }
}
