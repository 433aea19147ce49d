/*!
# tablemaker Codegen

Generates Rust source from compiled table schemas.

For every table the emitter produces a module with:

- the table struct (`Items { records: Vec<ItemsRecord> }`) with `get(id)` and `add_record`
- the record struct, one field per column, serialized under the column's header name
- one enum per enum column, implementing `TableEnum`
- `FromRow` and `Table` impls wiring the record to `tablemaker_runtime`

The registry module (`tables.rs`) declares every table module and a `Tables` struct with
one lazily loading accessor per table.

```rust
use tablemaker_codegen::emit_schema;
use tablemaker_csvs::parse_table;
use tablemaker_schema::SchemaBuilder;

let parsed = parse_table("ID,Kind\nint,enum\n1,Weapon\n").unwrap();
let schema = SchemaBuilder::new()
    .build("Items", &parsed.header, &parsed.types, &parsed.rows)
    .unwrap();

let source = emit_schema(&schema);
assert!(source.contains("pub enum Kind {"));
```
*/

pub mod emitter;
pub mod errors;
pub mod output;

pub use emitter::{emit_manifest, emit_registry, emit_schema, RegistryEntry};
pub use errors::{CodegenError, CodegenResult};
pub use output::{ArtifactWriter, REGISTRY_FILE, TABLES_DIR};
