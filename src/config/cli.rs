use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "org-directory")]
#[command(about = "Load an organization from TOML and show its department structure")]
pub struct CliConfig {
    /// Path to TOML directory file
    #[arg(short, long, default_value = "directory.toml")]
    pub config: String,

    /// Write all employees as JSON to this path
    #[arg(long)]
    pub export_json: Option<String>,

    /// Write the department structure as CSV to this path
    #[arg(long)]
    pub export_csv: Option<String>,

    /// Validate and summarize the file without applying raises
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        if let Some(path) = &self.export_json {
            validate_path("export_json", path)?;
        }
        if let Some(path) = &self.export_csv {
            validate_path("export_csv", path)?;
        }
        Ok(())
    }
}
