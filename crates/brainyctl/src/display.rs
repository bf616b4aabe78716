//! Display helpers for brainyctl output.

use brainy_common::{SavedQuery, Section, SectionPayload};
use console::style;

/// Print one section body. Media sections are summarized rather than
/// rendered; this is a terminal.
pub fn print_section(section: &Section) {
    match &section.payload {
        SectionPayload::Text { body } => {
            println!("{}", style(&section.key).bold());
            println!("{body}\n");
        }
        SectionPayload::Flashcard { front, back } => {
            println!("{}", style("Flashcard").bold().magenta());
            println!("  {} {front}", style("Q:").cyan());
            println!("  {} {back}\n", style("A:").green());
        }
        SectionPayload::ImageSet { images } => {
            println!(
                "{} {} image(s) received (base64, not rendered in terminal)\n",
                style("Images:").bold(),
                images.len()
            );
        }
        SectionPayload::VideoSet { urls } => {
            println!("{}", style("Videos").bold());
            for url in urls {
                println!("  {url}");
            }
            println!();
        }
    }
}

/// Badge line shown above a clue, numbered over text sections only.
pub fn print_clue_badge(number: usize) {
    println!("{}", style(format!("Clue {number}")).bold().yellow());
}

pub fn print_no_content() {
    println!("{}", style("The tutor had nothing to say about that.").dim());
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", style("error:").bold().red());
}

/// One vault row: number, date, text.
pub fn print_vault_entry(number: usize, entry: &SavedQuery) {
    println!(
        "{:>3}. {}  {}",
        number,
        style(entry.saved_at.format("%Y-%m-%d %H:%M").to_string()).dim(),
        entry.text
    );
}
