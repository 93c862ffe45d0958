//! `pedersen generators`: fixture tables of the value and blinding families

use crate::{common::FileOps, Result};
use clap::Args;
use pedersen_core::{FixtureTable, GeneratorDeriver, BLINDING_LABEL, VALUE_LABEL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Generators command configuration
#[derive(Debug, Clone, Args)]
pub struct GeneratorsArgs {
    /// Points to print per family
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// First points of both families as `(x, y)` hex pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorTables {
    #[serde(rename = "G")]
    pub value: FixtureTable,
    #[serde(rename = "H")]
    pub blinding: FixtureTable,
}

impl GeneratorTables {
    pub fn derive(deriver: &GeneratorDeriver, count: usize) -> Result<Self> {
        Ok(Self {
            value: deriver.fixture_table(VALUE_LABEL, count)?,
            blinding: deriver.fixture_table(BLINDING_LABEL, count)?,
        })
    }
}

pub fn handle_generators_command(args: GeneratorsArgs) -> Result<()> {
    let deriver = GeneratorDeriver::new();
    let tables = GeneratorTables::derive(&deriver, args.count)?;

    match args.output {
        Some(path) => {
            FileOps::write_json(&tables, &path)?;
            tracing::info!(path = %path.display(), count = args.count, "generator tables written");
        }
        None => println!("{}", serde_json::to_string_pretty(&tables)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tables_match_fixture() {
        let fixture: GeneratorTables =
            serde_json::from_str(include_str!("../../pedersen-core/fixtures/generators.json"))
                .unwrap();
        let tables = GeneratorTables::derive(&GeneratorDeriver::new(), 10).unwrap();
        assert_eq!(tables, fixture);
    }

    #[test]
    fn test_output_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generators.json");
        handle_generators_command(GeneratorsArgs {
            count: 3,
            output: Some(path.clone()),
        })
        .unwrap();

        let written: GeneratorTables = FileOps::read_json(&path).unwrap();
        assert_eq!(written.value.0.len(), 3);
        assert_eq!(written.blinding.0.len(), 3);
        // The blinding table opens with its first hashed point, not the generator
        assert_ne!(written.value.0[0], written.blinding.0[0]);
        assert_eq!(
            written.blinding.0[0][0],
            "b60022c6bb8b8fe3e63d11b118a4200d83c620b5cc38324a4c46ad564fe853bf"
        );
    }
}
