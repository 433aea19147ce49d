use crate::config::TablemakerConfig;
use crate::error::CliResult;
use tablemaker_sdk::compile_tables;

/// Compile every table and print a summary. Returns the number of failed tables.
pub fn execute(config: &TablemakerConfig) -> CliResult<usize> {
    let csv_folder = config.csv_folder();
    let source_root = config.source_root();

    println!("Compiling tables");
    println!("CSV folder: {}", csv_folder.display());
    println!("Source root: {}", source_root.display());

    let report = compile_tables(&csv_folder, &source_root)?;

    for table in &report.compiled {
        println!(
            "  ✅ {} -> {}",
            table.schema.table_name,
            table.module_path.display()
        );
        for rejected in &table.rejected_rows {
            println!("     skipped {}", rejected);
        }
    }
    for failure in &report.failures {
        println!("  ❌ {}", failure);
    }

    println!(
        "Compiled {} table(s), {} failed. Registry: {}",
        report.compiled.len(),
        report.failures.len(),
        report.registry_path.display()
    );

    Ok(report.failures.len())
}
