//! Colored terminal messages for the CLI.

use colored::Colorize;
use crossterm::style::Color;
use std::io::{self, IsTerminal, Write};
use termimad::{MadSkin, StyledChar};

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// A failed check, printed to stderr with its rendered diagnostic below.
pub fn violation(title: &str, details: &str) {
    eprintln!("{} {}", "✗".red().bold(), title.bold());
    for line in details.lines() {
        eprintln!("  {}", line);
    }
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Write markdown, rendered with colors when stdout is a terminal.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    if io::stdout().is_terminal() {
        write!(output, "{}", skin().term_text(markdown))
    } else {
        write!(output, "{}", markdown)
    }
}

fn skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::White);
    skin.inline_code.set_fg(Color::Yellow);
    skin.bullet = StyledChar::from_fg_char(Color::Blue, '•');
    skin
}
