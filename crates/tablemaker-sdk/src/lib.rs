/*!
# tablemaker SDK

Batch pipelines over a folder of CSV tables:

- [`compile_tables`]: parse, build schemas and write generated Rust source
- [`bind_tables`]: bind each table's rows against its compiled schema and persist it

Both run every table and report failures per table instead of stopping at the first.
When two CSVs map to the same table name, the first in path order owns it in both passes.
*/

mod data_binder;
mod errors;
mod table_compiler;
mod table_names;

pub use data_binder::{bind_tables, load_compiled_schema, BindReport, BoundTableSummary};
pub use errors::{BindTablesError, BindTablesResult, CompilerError, CompilerResult, TableFailure};
pub use table_compiler::{compile_tables, CompileReport, CompiledTable};
