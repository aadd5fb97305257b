//! User-facing console output.
//! Colors are enabled only when stdout is a TTY so scripted runs see plain text.

use owo_colors::OwoColorize;
use std::path::Path;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// One line per moved file: `moved: <src> -> <dest>` (`would move:` in a dry run).
/// Never colored; scripts parse these lines.
pub fn print_moved(src: &Path, dest: &Path, dry_run: bool) {
    let verb = if dry_run { "would move" } else { "moved" };
    println!("{verb}: {} -> {}", src.display(), dest.display());
}
