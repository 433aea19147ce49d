use crate::config::TablemakerConfig;
use crate::error::CliResult;
use tablemaker_runtime::{BindPolicy, FsAssetStore};
use tablemaker_sdk::bind_tables;

/// Bind and persist every table and print a summary. Returns the number of failed tables.
pub fn execute(config: &TablemakerConfig) -> CliResult<usize> {
    let csv_folder = config.csv_folder();
    let source_root = config.source_root();
    let store = FsAssetStore::new(config.object_folder());
    let policy = if config.fail_fast {
        BindPolicy::FailFast
    } else {
        BindPolicy::SkipInvalidRows
    };

    println!("Binding table data");
    println!("CSV folder: {}", csv_folder.display());
    println!("Object folder: {}", store.root().display());
    println!("Policy: {:?}", policy);

    let report = bind_tables(&csv_folder, &source_root, &store, policy)?;

    for table in &report.bound {
        println!(
            "  ✅ {}: {} record(s) -> {}",
            table.table,
            table.records,
            store.path_for(&table.table).display()
        );
        for rejected in &table.malformed_rows {
            println!("     skipped {}", rejected);
        }
        for rejected in &table.rejected_rows {
            println!("     skipped {}", rejected);
        }
    }
    for failure in &report.failures {
        println!("  ❌ {}", failure);
    }

    println!(
        "Bound {} table(s), {} failed, {} row(s) rejected",
        report.bound.len(),
        report.failures.len(),
        report.rejected_row_count()
    );

    Ok(report.failures.len())
}
