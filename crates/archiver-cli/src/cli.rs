//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use archiver_core::domain::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "archiver",
    version,
    about = "Template-driven archival of Markdown notes"
)]
pub struct Cli {
    /// Vault root directory.
    #[arg(long, global = true, default_value = ".")]
    pub vault: PathBuf,

    /// Settings file. Defaults to `<vault>/.archiver/settings.json`.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| self.vault.join(".archiver").join("settings.json"))
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template against a note into a new archive note.
    Archive {
        /// Vault-relative path of the note to archive.
        note: String,
        /// Tag the note and move it into the processed folder.
        #[arg(long = "move")]
        move_source: bool,
        /// Template label to use instead of prompting (base name, or the
        /// folder-relative path when base names collide).
        #[arg(long)]
        template: Option<String>,
    },
    /// Move completed checklist items into the note's completed-tasks archive.
    ArchiveTasks {
        note: String,
        #[arg(long)]
        template: Option<String>,
    },
    /// List the templates in the configured template folder.
    Templates,
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as JSON.
    Show,
    /// Change one setting and save it.
    Set { key: SettingKey, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    #[value(alias = "templateFolder")]
    TemplateFolder,
    #[value(alias = "archiveFolder")]
    ArchiveFolder,
    #[value(alias = "archiveFileNamePattern")]
    ArchiveFileNamePattern,
    #[value(alias = "includeOriginalContent")]
    IncludeOriginalContent,
    #[value(alias = "processedFolder")]
    ProcessedFolder,
    #[value(alias = "processedTag")]
    ProcessedTag,
}

/// Apply `value` to one setting. Blank text values fall back to defaults.
pub fn apply_setting(settings: &mut Settings, key: SettingKey, value: &str) -> Result<()> {
    match key {
        SettingKey::TemplateFolder => settings.set_template_folder(value),
        SettingKey::ArchiveFolder => settings.set_archive_folder(value),
        SettingKey::ArchiveFileNamePattern => settings.set_archive_file_name_pattern(value),
        SettingKey::IncludeOriginalContent => {
            let include = value
                .trim()
                .parse::<bool>()
                .with_context(|| format!("expected true or false, got {value:?}"))?;
            settings.set_include_original_content(include);
        }
        SettingKey::ProcessedFolder => settings.set_processed_folder(value),
        SettingKey::ProcessedTag => settings.set_processed_tag(value),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_archive_with_move() {
        let cli = Cli::try_parse_from([
            "archiver",
            "--vault",
            "/notes",
            "archive",
            "Inbox/Note.md",
            "--move",
            "--template",
            "Basic",
        ])
        .unwrap();

        assert_eq!(cli.settings_path(), PathBuf::from("/notes/.archiver/settings.json"));
        match cli.command {
            Commands::Archive {
                note,
                move_source,
                template,
            } => {
                assert_eq!(note, "Inbox/Note.md");
                assert!(move_source);
                assert_eq!(template.as_deref(), Some("Basic"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_keys_accept_camel_case() {
        let cli = Cli::try_parse_from(["archiver", "config", "set", "processedTag", "#done"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set {
                    key: SettingKey::ProcessedTag,
                    ..
                }
            }
        ));
    }

    #[test]
    fn apply_setting_normalizes_values() {
        let mut settings = Settings::default();
        apply_setting(&mut settings, SettingKey::ArchiveFolder, "/Old//Archive/").unwrap();
        apply_setting(&mut settings, SettingKey::ProcessedTag, " #done ").unwrap();
        apply_setting(&mut settings, SettingKey::ArchiveFileNamePattern, "  ").unwrap();
        apply_setting(&mut settings, SettingKey::IncludeOriginalContent, "false").unwrap();

        assert_eq!(settings.archive_folder, "Old/Archive");
        assert_eq!(settings.processed_tag, "done");
        assert_eq!(settings.archive_file_name_pattern, "{{date}} - {{title}}");
        assert!(!settings.include_original_content);
    }

    #[test]
    fn apply_setting_rejects_non_bool() {
        let mut settings = Settings::default();
        assert!(apply_setting(&mut settings, SettingKey::IncludeOriginalContent, "maybe").is_err());
        assert!(settings.include_original_content);
    }
}
