use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Compilation failed: {0}")]
    Compile(#[from] tablemaker_sdk::CompilerError),

    #[error("Binding failed: {0}")]
    Bind(#[from] tablemaker_sdk::BindTablesError),
}
