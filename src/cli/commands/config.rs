//! Config command - show current configuration

use crate::cli::output::print_header;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use clap::Args;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Include the remote section even when the local backend is active
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Execute the config command
///
/// API keys are always masked.
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = config_view(config, args.all)?;

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            // TOML has no null
            let mut view = view;
            strip_nulls(&mut view);
            print!("{}", toml::to_string_pretty(&view)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

/// Redacted configuration as a JSON value
pub fn config_view(config: &Config, all: bool) -> Result<serde_json::Value, serde_json::Error> {
    use crate::core::config::BackendKind;

    let mut view = serde_json::to_value(config.redacted())?;
    if !all && config.backend.kind == BackendKind::Local {
        if let Some(sections) = view.as_object_mut() {
            sections.remove("remote");
        }
    }
    Ok(view)
}

fn strip_nulls(value: &mut serde_json::Value) {
    if let Some(map) = value.as_object_mut() {
        map.retain(|_, v| !v.is_null());
        map.values_mut().for_each(strip_nulls);
    }
}
