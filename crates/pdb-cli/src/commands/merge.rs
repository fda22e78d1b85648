//! Merge command implementation

use anyhow::{Context, Result};
use pdb_core::MergeConfig;
use pdb_merge::{merge, write_outputs, InputFile, MergeInputs};
use std::path::Path;

use crate::cli::{GlobalArgs, MergeArgs};
use crate::commands::common::{format_size, load_config};

/// Execute the merge command
pub async fn execute(args: &MergeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let merge_config = apply_overrides(config.merge, args);
    let root = Path::new(&global.project_dir);

    println!("Reading SQL files...");
    let inputs = MergeInputs::load(root, &merge_config).context("Failed to read input files")?;
    for file in InputFile::ALL {
        let content = inputs.get(file);
        if content.is_empty() {
            log::debug!("{} is empty or missing", file.file_name());
        } else {
            println!("  ✓ {} ({})", file.file_name(), format_size(content.len()));
        }
    }

    println!("Merging...");
    let outputs = merge(&inputs).context("Failed to merge SQL files")?;

    let written = write_outputs(&merge_config.output_dir_absolute(root), &outputs)
        .context("Failed to write merged files")?;

    println!();
    for (path, content) in written.iter().zip([&outputs.schema, &outputs.sample_data]) {
        println!(
            "Created: {} ({})",
            path.display(),
            format_size(content.len())
        );
    }
    Ok(())
}

/// Command-line directories take precedence over the config file
fn apply_overrides(mut config: MergeConfig, args: &MergeArgs) -> MergeConfig {
    if let Some(dir) = &args.db_dir {
        config.db_dir = dir.clone();
    }
    if let Some(dir) = &args.loyalty_db_dir {
        config.loyalty_db_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    config
}
