//! smartform CLI
//!
//! Command-line tool for trying out form definitions: list fields, check
//! values, run a submission and render the Bootstrap markup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use smartform::{
    render_form, BoxError, FieldValue, FormBuilder, FormDefinition, FormEngine, PasswordVisibility,
    SubmitOutcome,
};

/// Declarative forms with debounced validation.
#[derive(Parser)]
#[command(name = "smartform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form definition file (JSON).
    #[arg(short, long, env = "SMARTFORM_FORM")]
    form: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the declared fields.
    Fields,

    /// Validate values and show errors and completion.
    Check {
        /// Field value as NAME=VALUE. May be repeated.
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Do not blur the fields after setting them.
        #[arg(long)]
        no_blur: bool,
    },

    /// Submit values; the submitted payload is printed as JSON.
    Submit {
        /// Field value as NAME=VALUE. May be repeated.
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Render the form as Bootstrap 5 HTML.
    Render {
        /// Field value as NAME=VALUE. May be repeated.
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Show this password field in clear. May be repeated.
        #[arg(long)]
        reveal: Vec<String>,

        /// Leave the set fields untouched so no errors are shown.
        #[arg(long)]
        untouched: bool,

        /// Form action URL.
        #[arg(long, default_value = "/")]
        action: String,

        /// Form method.
        #[arg(long, default_value = "post")]
        method: String,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))
}

fn fill(form: &FormEngine, values: &[(String, String)], blur: bool) -> anyhow::Result<()> {
    for (name, raw) in values {
        let field_type = form.field(name)?.field_type;
        form.set_value(name, FieldValue::from_input(field_type, raw))?;
        debug!(field = %name, "value set");
    }
    if blur {
        for (name, _) in values {
            form.set_touched(name)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let definition = FormDefinition::from_path(&cli.form)?;
    info!(path = %cli.form.display(), fields = definition.fields.len(), "form definition loaded");

    let form = FormBuilder::new()
        .fields(definition.build_fields()?)
        .options(definition.options.clone())
        .on_submit(|values| async move {
            println!("{}", serde_json::to_string_pretty(&values)?);
            Ok::<(), BoxError>(())
        })
        .build()?;

    match cli.command {
        Commands::Fields => {
            println!("{:<20} {:<10} {:<9} RULES", "NAME", "TYPE", "REQUIRED");
            println!("{:-<50}", "");
            for field in form.fields() {
                println!(
                    "{:<20} {:<10} {:<9} {}",
                    field.name,
                    field.field_type,
                    if field.required { "yes" } else { "no" },
                    field.validation.len()
                );
            }
        }

        Commands::Check { values, no_blur } => {
            fill(&form, &values, !no_blur)?;

            let mut invalid = 0;
            for field in form.fields() {
                match form.visible_error(&field.name) {
                    Some(message) => {
                        invalid += 1;
                        println!(" [!] {}: {}", field.name, message);
                    }
                    None if form.is_touched(&field.name) => println!(" [ok] {}", field.name),
                    None => println!(" [ ] {}", field.name),
                }
            }
            println!("Completion: {}%", form.completion_percentage());

            if invalid > 0 {
                anyhow::bail!("{invalid} field(s) invalid");
            }
        }

        Commands::Submit { values } => {
            fill(&form, &values, false)?;

            match form.submit().await {
                SubmitOutcome::Submitted => info!("Form submitted."),
                SubmitOutcome::Invalid(errors) => {
                    for (name, message) in errors.iter() {
                        println!(" [!] {name}: {message}");
                    }
                    anyhow::bail!("submission blocked: {} field(s) invalid", errors.len());
                }
                SubmitOutcome::Failed(err) => return Err(err.into()),
                outcome @ (SubmitOutcome::AlreadySubmitting | SubmitOutcome::Disposed) => {
                    anyhow::bail!("submission not started: {outcome:?}");
                }
            }
        }

        Commands::Render {
            values,
            reveal,
            untouched,
            action,
            method,
        } => {
            fill(&form, &values, !untouched)?;

            let mut visibility = PasswordVisibility::new();
            for name in &reveal {
                form.field(name)?;
                visibility.reveal(name);
            }
            println!("{}", render_form(&form, &visibility, &action, &method));
        }
    }

    form.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("email=a@b.com"),
            Ok(("email".to_string(), "a@b.com".to_string()))
        );
        assert_eq!(
            parse_assignment("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("bio="),
            Ok(("bio".to_string(), String::new()))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_sets() {
        let cli = Cli::try_parse_from([
            "smartform",
            "--form",
            "signup.json",
            "check",
            "--set",
            "email=a@b.com",
            "--set",
            "name=Ada",
            "--no-blur",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { values, no_blur } => {
                assert_eq!(values.len(), 2);
                assert!(no_blur);
            }
            _ => panic!("expected check"),
        }
    }
}
