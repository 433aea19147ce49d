/*!
# tablemaker Schema

Normalized table schemas built from parsed CSV rows.

A schema records, per column, the header name, the generated field name and the
declared kind (scalar or derived enum). Identifier rules and the enum derivation
algorithm live here so the code emitter and the binder agree on them.

```rust
use tablemaker_csvs::parse_table;
use tablemaker_schema::SchemaBuilder;

let table = parse_table("ID,Kind\nint,enum\n1,Weapon\n2,Armor\n3,Weapon\n").unwrap();
let schema = SchemaBuilder::new()
    .build("Items", &table.header, &table.types, &table.rows)
    .unwrap();

let kind = schema.columns[1].enum_spec().unwrap();
assert_eq!(kind.texts(), vec!["Weapon", "Armor"]);
```
*/

pub mod builder;
pub mod errors;
pub mod naming;
pub mod types;

pub use builder::{SchemaBuilder, TableNames};
pub use errors::{SchemaError, SchemaResult};
pub use types::{
    ColumnKind, ColumnSpec, EnumLiteral, EnumSpec, ScalarType, TableSchema, TypeToken, ID_COLUMN,
};
