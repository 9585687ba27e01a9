//! SQL text for the Oracle backend, shaped for SQL*Plus scripts.

/// Drop the table if present. ORA-00942 (table does not exist) is ignored.
pub fn generate_drop_table(table_name: &str) -> String {
    format!(
        "BEGIN
  EXECUTE IMMEDIATE 'DROP TABLE {table_name} PURGE';
EXCEPTION
  WHEN OTHERS THEN
    IF SQLCODE != -942 THEN
      RAISE;
    END IF;
END;
/"
    )
}

/// Generate CREATE TABLE statement for the benchmark table.
pub fn generate_create_table(table_name: &str) -> String {
    format!(
        "CREATE TABLE {table_name} (
    Id number,
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
    Yearjoined number,
    Timejoined timestamp,
    Link varchar(200),
    Comments varchar(50),
    Occupation varchar(100),
    Bank varchar(20),
    Password varchar(50)
);"
    )
}

/// Wrap a DML statement so the affected row count is printed.
pub fn row_count_block(statement: &str) -> String {
    format!(
        "BEGIN
  {statement};
  DBMS_OUTPUT.PUT_LINE(SQL%ROWCOUNT);
  COMMIT;
END;
/"
    )
}
