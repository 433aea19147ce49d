/*!
# tablemaker CSV input

This crate reads the CSV files that define tables. Each file has a fixed layout:

| line | content |
|------|---------|
| 1 | column names (`ID,Name,Kind`) |
| 2 | column type tokens (`int,string,enum`) |
| 3..N | data rows |

## Usage

```rust
use tablemaker_csvs::{parse_table, CsvResult};

fn example() -> CsvResult<()> {
    let table = parse_table("ID,Name\nint,string\n1,Sword\n")?;
    assert_eq!(table.header, vec!["ID", "Name"]);
    assert_eq!(table.rows[0].get("Name"), Some("Sword"));
    Ok(())
}
```

Whole-table problems (missing header/type row, length mismatch) are errors. Data rows
with the wrong number of cells are reported in `ParsedTable::rejected` and skipped.
*/

pub mod discovery;
pub mod errors;
pub mod parser;

// Re-export main types for convenience
pub use discovery::{discover_tables, CsvSource};
pub use errors::{CsvError, CsvResult, RowShapeError};
pub use parser::{parse_table, ParsedTable, RowValue};
