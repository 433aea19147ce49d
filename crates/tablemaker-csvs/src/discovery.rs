/*!
# CSV Discovery

Finds table sources under a folder. Every `.csv` file (any case) below the folder is a
table; its name is the file name up to the first `.`.

Discovery only lists files. Contents are read per table with [`CsvSource::read`], so an
unreadable or non-UTF-8 file fails that table alone.
*/

use crate::errors::{CsvError, CsvResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One discovered table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSource {
    pub name: String,
    pub path: PathBuf,
}

impl CsvSource {
    /// Read the file as UTF-8 text.
    pub fn read(&self) -> CsvResult<String> {
        let bytes = fs::read(&self.path)?;
        String::from_utf8(bytes).map_err(|e| CsvError::InvalidEncoding {
            path: self.path.clone(),
            offset: e.utf8_error().valid_up_to(),
        })
    }
}

/// Enumerate all CSV tables under `folder`, sorted by path.
pub fn discover_tables<P: AsRef<Path>>(folder: P) -> CsvResult<Vec<CsvSource>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(CsvError::MissingFolder(folder.display().to_string()));
    }

    let mut sources = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_csv(entry.path()) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let name = match file_name.split('.').next() {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => continue,
        };

        debug!("Discovered table {} at {}", name, entry.path().display());

        sources.push(CsvSource {
            name,
            path: entry.path().to_path_buf(),
        });
    }

    sources.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(sources)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_csv_files_sorted_by_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Weapons.csv"), "ID\nint\n").unwrap();
        fs::write(dir.path().join("Armor.CSV"), "ID\nint\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("Monsters.csv"), "ID\nint\n").unwrap();

        let sources = discover_tables(dir.path()).unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Armor", "Weapons", "Monsters"]);
        assert_eq!(sources[0].read().unwrap(), "ID\nint\n");
    }

    #[test]
    fn test_name_stops_at_first_dot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Items.v2.csv"), "ID\nint\n").unwrap();

        let sources = discover_tables(dir.path()).unwrap();
        assert_eq!(sources[0].name, "Items");
    }

    #[test]
    fn test_non_utf8_file_is_listed_and_fails_on_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Latin.csv"), b"ID,Name\nint,string\n1,Caf\xe9\n").unwrap();
        fs::write(dir.path().join("Weapons.csv"), "ID\nint\n").unwrap();

        let sources = discover_tables(dir.path()).unwrap();
        assert_eq!(sources.len(), 2);

        match sources[0].read() {
            Err(CsvError::InvalidEncoding { path, offset }) => {
                assert_eq!(path, dir.path().join("Latin.csv"));
                assert_eq!(offset, 24);
            }
            other => panic!("expected encoding error, got {:?}", other),
        }
        assert_eq!(sources[1].read().unwrap(), "ID\nint\n");
    }

    #[test]
    fn test_missing_folder_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = discover_tables(dir.path().join("nope"));
        assert!(matches!(result, Err(CsvError::MissingFolder(_))));
    }
}
