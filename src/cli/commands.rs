//! Command dispatch for the navtree binary

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::export::to_json_pretty;
use crate::application::load_path;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{NavDocument, NavIndex};
use crate::render::{to_html, to_indented, to_termtree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { dir } => show_config(cli, dir.as_deref()),
        _ => {
            let file = command
                .input()
                .ok_or_else(|| CliError::InvalidArgs("missing input file".into()))?;
            let settings = effective_settings(cli, file.parent())?;
            let document = load(file, &settings)?;
            run_on_document(command, &document, &settings)
        }
    }
}

/// Layered settings with command line flags applied last.
pub fn effective_settings(cli: &Cli, dir: Option<&Path>) -> CliResult<Settings> {
    let mut settings = Settings::load(dir)?;
    if cli.no_resolve {
        settings.resolve_deferred = false;
    }
    if cli.strict {
        settings.strict_deferred = true;
    }
    debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

#[instrument(level = "debug", skip(settings))]
pub fn load(file: &Path, settings: &Settings) -> CliResult<NavDocument> {
    let document = load_path(file, settings)?;
    let deferred = document.tree.deferred_refs();
    if settings.resolve_deferred && !deferred.is_empty() {
        output::warning(&format!(
            "{} child script(s) not found: {}",
            deferred.len(),
            deferred.iter().join(", ")
        ));
    }
    Ok(document)
}

fn run_on_document(
    command: &Commands,
    document: &NavDocument,
    settings: &Settings,
) -> CliResult<()> {
    let tree = &document.tree;
    match command {
        Commands::Tree { file } => {
            output::info(&to_termtree(tree, &file.display().to_string()));
        }
        Commands::Flat {
            max_depth, indent, ..
        } => {
            let indent = indent.unwrap_or(settings.indent);
            let max_depth = max_depth.or(settings.max_depth);
            print!("{}", to_indented(tree, indent, max_depth));
        }
        Commands::Find { target, .. } => {
            let node = tree
                .find_by_target(target)
                .ok_or_else(|| CliError::NotFound(target.clone()))?;
            output::header(node.label());
            output::action("target", target);
            output::action("path", &node.label_path().iter().join(" > "));
            for child in node.children() {
                output::detail(&child);
            }
        }
        Commands::Index { page, .. } => match page {
            Some(page) => {
                let (chunk, script) = index_chunk(&document.index, page)?;
                output::action("chunk", &chunk);
                output::detail(&script);
            }
            None => {
                for (pos, entry) in document.index.iter().enumerate() {
                    output::info(&format!("{}\t{}", pos, entry));
                }
            }
        },
        Commands::Html { .. } => print!("{}", to_html(tree)?),
        Commands::Export { .. } => output::info(&to_json_pretty(document)),
        Commands::Config { .. } | Commands::Completion { .. } => {}
    }
    Ok(())
}

/// Chunk number of `page` and the name of the script holding that chunk.
pub fn index_chunk(index: &NavIndex, page: &str) -> CliResult<(usize, String)> {
    let chunk = index
        .chunk_for(page)
        .ok_or_else(|| CliError::NoChunk(page.to_string()))?;
    Ok((chunk, format!("navtreeindex{}.js", chunk)))
}

fn show_config(cli: &Cli, dir: Option<&Path>) -> CliResult<()> {
    let settings = effective_settings(cli, dir)?;
    print!("{}", settings.to_toml()?);
    Ok(())
}
