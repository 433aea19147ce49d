//! Table name ownership across one batch of CSV sources.

use std::collections::HashMap;
use std::path::PathBuf;
use tablemaker_csvs::CsvSource;
use tablemaker_schema::{SchemaError, TableNames};
use tracing::warn;

/// Claim the type and module name of every source, in discovery order.
///
/// Claims are made from file names alone, before any CSV is read, so the first source
/// owns its name even if it later fails to parse or build. A later source whose type or
/// module name is already owned gets the error built by `duplicate(table, first, second)`.
pub(crate) fn claim_table_names<E, F>(
    sources: &[CsvSource],
    duplicate: F,
) -> Vec<Result<TableNames, E>>
where
    E: From<SchemaError>,
    F: Fn(String, PathBuf, PathBuf) -> E,
{
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    sources
        .iter()
        .map(|source| {
            let names = TableNames::from_source(&source.name)?;

            let owner = [&names.type_name, &names.module_name]
                .into_iter()
                .find_map(|key| claimed.get(key));
            if let Some(first) = owner {
                warn!(
                    "Table {} in {} is already defined by {}",
                    names.type_name,
                    source.path.display(),
                    first.display()
                );
                return Err(duplicate(
                    names.type_name,
                    first.clone(),
                    source.path.clone(),
                ));
            }

            claimed.insert(names.type_name.clone(), source.path.clone());
            claimed.insert(names.module_name.clone(), source.path.clone());
            Ok(names)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum ClaimError {
        Schema,
        Duplicate(String, PathBuf, PathBuf),
    }

    impl From<SchemaError> for ClaimError {
        fn from(_: SchemaError) -> Self {
            ClaimError::Schema
        }
    }

    fn source(name: &str, path: &str) -> CsvSource {
        CsvSource {
            name: name.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_first_source_owns_the_name() {
        let sources = vec![
            source("Items", "Tables/Items.csv"),
            source("item_list", "Tables/item_list.csv"),
            source("Items", "Tables/more/Items.csv"),
        ];

        let claims = claim_table_names(&sources, ClaimError::Duplicate);

        assert_eq!(claims[0].as_ref().unwrap().type_name, "Items");
        assert_eq!(claims[1].as_ref().unwrap().module_name, "item_list");
        assert_eq!(
            claims[2],
            Err(ClaimError::Duplicate(
                "Items".to_string(),
                PathBuf::from("Tables/Items.csv"),
                PathBuf::from("Tables/more/Items.csv"),
            ))
        );
    }

    #[test]
    fn test_type_name_collision_across_spellings() {
        let sources = vec![
            source("item_list", "Tables/item_list.csv"),
            source("ItemList", "Tables/ItemList.csv"),
        ];

        let claims = claim_table_names(&sources, ClaimError::Duplicate);

        assert!(claims[0].is_ok());
        assert!(matches!(claims[1], Err(ClaimError::Duplicate(..))));
    }

    #[test]
    fn test_invalid_name_claims_nothing() {
        let sources = vec![
            source("std", "Tables/std.csv"),
            source("Std", "Tables/more/Std.csv"),
        ];

        let claims = claim_table_names(&sources, ClaimError::Duplicate);

        assert_eq!(claims[0], Err(ClaimError::Schema));
        assert_eq!(claims[1], Err(ClaimError::Schema));
    }
}
