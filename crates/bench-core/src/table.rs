//! The benchmark table, its key and its secondary indexes.

/// Name of the benchmark table.
pub const TABLE_NAME: &str = "customers_test";

/// Column that becomes the primary key once indexes are created.
pub const PRIMARY_KEY_COLUMN: &str = "Id";

/// A secondary index on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub column: &'static str,
}

/// Secondary indexes created before the constrained load.
pub const DEFAULT_INDEXES: [IndexDefinition; 3] = [
    IndexDefinition {
        name: "CUST_INDEX_1",
        column: "Email",
    },
    IndexDefinition {
        name: "CUST_INDEX_2",
        column: "Birth_Date",
    },
    IndexDefinition {
        name: "CUST_INDEX_3",
        column: "City",
    },
];

impl IndexDefinition {
    /// `CREATE INDEX` statement for this index on `table`.
    pub fn create_statement(&self, table: &str) -> String {
        format!("CREATE INDEX {} ON {}({})", self.name, table, self.column)
    }
}

/// `ALTER TABLE ... ADD PRIMARY KEY` statement for `table`.
pub fn add_primary_key_statement(table: &str) -> String {
    format!("ALTER TABLE {table} ADD PRIMARY KEY ({PRIMARY_KEY_COLUMN})")
}

/// Statement run in the update phase.
pub fn update_statement(table: &str) -> String {
    format!("UPDATE {table} SET Comments = 'Ive been updated' WHERE Occupation = 'Firefighter'")
}

/// Statement run in the scan phase. Returns a single count.
pub fn scan_statement(table: &str) -> String {
    format!("SELECT COUNT(1) FROM {table} WHERE County IN ('Surrey', 'Shropshire')")
}
