mod cli;
mod console;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use archiver_core::app::{
    ArchiveMode, Archiver, ArchiverBuilder, read_templates, template_labels,
};
use archiver_core::domain::ArchiveOutcome;
use archiver_core::impls::{FsVault, JsonSettingsStore, ScriptedChooser};
use archiver_core::ports::{Chooser, NoteStore, SettingsStore};

use crate::cli::{Cli, Commands, ConfigCommands, apply_setting};
use crate::console::{ConsoleNotifier, PromptChooser};

#[tokio::main]
async fn main() -> Result<()> {
    // ログは stderr（通知は stdout）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings_store = JsonSettingsStore::new(cli.settings_path());
    let settings = settings_store.load().await.with_context(|| {
        format!(
            "failed to load settings from {}",
            settings_store.path().display()
        )
    })?;
    let vault = Arc::new(FsVault::new(&cli.vault));

    match cli.command {
        Commands::Archive {
            note,
            move_source,
            template,
        } => {
            let archiver = build_archiver(vault.clone(), template.clone())?;
            let active = vault.note_at(&note).await?;
            let mode = if move_source {
                ArchiveMode::MoveSource
            } else {
                ArchiveMode::CopyOnly
            };
            let outcome = archiver.archive_note(active.as_ref(), &settings, mode).await?;
            report_cancel(&outcome, template.as_deref());
        }
        Commands::ArchiveTasks { note, template } => {
            let archiver = build_archiver(vault.clone(), template.clone())?;
            let active = vault.note_at(&note).await?;
            let outcome = archiver
                .archive_completed_tasks(active.as_ref(), &settings)
                .await?;
            report_cancel(&outcome, template.as_deref());
        }
        Commands::Templates => {
            let templates = read_templates(vault.as_ref(), &settings.template_folder).await?;
            let labels = template_labels(&templates, &settings.template_folder);
            for (label, template) in labels.iter().zip(&templates) {
                println!("{label}\t{}", template.note);
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            ConfigCommands::Set { key, value } => {
                let mut settings = settings;
                apply_setting(&mut settings, key, &value)?;
                settings_store.save(&settings).await.with_context(|| {
                    format!(
                        "failed to save settings to {}",
                        settings_store.path().display()
                    )
                })?;
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
        },
    }

    Ok(())
}

/// `--template` picks by label; otherwise the user is prompted.
fn build_archiver(vault: Arc<FsVault>, template: Option<String>) -> Result<Archiver> {
    let chooser: Arc<dyn Chooser> = match template {
        Some(label) => Arc::new(ScriptedChooser::label(label)),
        None => Arc::new(PromptChooser),
    };
    let archiver = ArchiverBuilder::new()
        .vault(vault)
        .chooser(chooser)
        .notifier(Arc::new(ConsoleNotifier))
        .build()?;
    Ok(archiver)
}

fn report_cancel(outcome: &ArchiveOutcome, template: Option<&str>) {
    if *outcome != ArchiveOutcome::Cancelled {
        return;
    }
    match template {
        Some(label) => warn!(template = label, "no template with that name; nothing archived"),
        None => warn!("no template chosen; nothing archived"),
    }
}
