//! Command execution for brainyctl.

use crate::cli::{Cli, Commands, VaultCommands};
use crate::display;
use anyhow::{bail, Result};
use brainy_common::{
    HttpTutorClient, Phase, Query, ResponseMode, SessionController, TutorConfig, VaultStore,
};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => TutorConfig::load_from(path),
        None => TutorConfig::load(),
    };

    match cli.command {
        Commands::Ask {
            question,
            step_by_step,
            profile,
            save,
            no_prompt,
        } => {
            ask(
                &config,
                question.join(" "),
                step_by_step,
                profile,
                save,
                no_prompt,
            )
            .await
        }
        Commands::Vault { action } => vault(action),
    }
}

async fn ask(
    config: &TutorConfig,
    question: String,
    step_by_step: bool,
    profile: Option<String>,
    save: bool,
    no_prompt: bool,
) -> Result<()> {
    // Configuration problems are fatal before any network attempt.
    let base_url = config.require_base_url()?;
    let client = HttpTutorClient::new(base_url, config.timeout_secs)?;

    let mode = if step_by_step {
        ResponseMode::StepByStep
    } else {
        ResponseMode::Consolidated
    };
    let query = Query::new(question.clone(), mode)
        .with_profile(profile.unwrap_or_else(|| config.profile.clone()));

    let mut session = SessionController::new(Arc::new(client), mode);

    let spinner = thinking_spinner();
    let submitted = session.submit(query).await;
    spinner.finish_and_clear();
    submitted?;

    match session.state().phase {
        Phase::Ready => {}
        Phase::Error => {
            let message = session
                .state()
                .error_message
                .clone()
                .unwrap_or_else(|| "unknown failure".to_string());
            // Already displayed; exiting here avoids a second anyhow line.
            display::print_error(&message);
            std::process::exit(1);
        }
        // submit settles into Ready or Error; anything else is a bug.
        phase => bail!("session ended in unexpected phase {phase:?}"),
    }

    let bundle = session
        .state()
        .bundle
        .clone()
        .unwrap_or_default();

    if bundle.is_empty() {
        display::print_no_content();
    } else if mode == ResponseMode::StepByStep {
        let term = Term::stdout();
        let prompt = !no_prompt && term.is_term();

        for (number, section) in bundle.clues() {
            if prompt {
                term.write_line(&format!("Press Enter to reveal clue {number}..."))?;
                term.read_line()?;
            }
            session.reveal_section(number - 1)?;
            display::print_clue_badge(number);
            display::print_section(section);
        }
        // Media and flashcards are never gated.
        for section in bundle.sections.iter().filter(|s| !s.is_revealable()) {
            display::print_section(section);
        }
    } else {
        for section in &bundle.sections {
            display::print_section(section);
        }
    }

    if save {
        let mut vault = VaultStore::open_default();
        if vault.save_if_absent(&question)? {
            println!("Saved to vault.");
        } else {
            println!("Already in vault.");
        }
    }

    Ok(())
}

fn vault(action: VaultCommands) -> Result<()> {
    let mut vault = VaultStore::open_default();

    match action {
        VaultCommands::List => {
            if vault.is_empty() {
                println!("Vault is empty.");
                return Ok(());
            }
            for (i, entry) in vault.entries().iter().enumerate() {
                display::print_vault_entry(i + 1, entry);
            }
        }
        VaultCommands::Add { text } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                bail!("nothing to save");
            }
            if vault.save_if_absent(text.trim())? {
                println!("Saved.");
            } else {
                println!("Already in vault.");
            }
        }
        VaultCommands::Remove { number } => {
            if number == 0 || number > vault.len() {
                println!("No entry {number}.");
                return Ok(());
            }
            vault.remove_at(number - 1)?;
            println!("Removed entry {number}.");
        }
    }

    Ok(())
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
