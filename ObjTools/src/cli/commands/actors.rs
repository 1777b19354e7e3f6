//! CLI commands for actor parameter lookups

use std::path::Path;

use crate::actor::{extract_horns, find_actor_packs};
use crate::cli::progress::print_diagnostics;
use crate::config::ToolConfig;
use crate::msyt::read_name_map;
use crate::output::{JsonStyle, write_json};
use crate::record::ComponentLocator;

/// Print or write the `{actor: horn attachment}` map
pub fn horns(config: &ToolConfig, names_path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let names = read_name_map(names_path)?;
    let packs = find_actor_packs(&config.paths.actor_root)?;
    let locator = ComponentLocator::new(&config.paths.resident_common)
        .with_max_depth(config.resolver.max_parent_depth);

    let result = extract_horns(&packs, &locator, &names)?;
    let materials = result.materials();

    match output {
        Some(path) => {
            write_json(path, &materials, JsonStyle::Pretty)?;
            println!("{} horn materials written to {}", materials.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&materials)?),
    }
    print_diagnostics(&result.diagnostics);
    Ok(())
}
