//! Titled notices, the terminal stand-in for toast notifications.

use owo_colors::OwoColorize;

pub fn success(title: &str, message: &str) {
    println!("{} {}", title.green().bold(), message);
}

pub fn info(title: &str, message: &str) {
    println!("{} {}", title.blue().bold(), message);
}

pub fn error(title: &str, message: &str) {
    eprintln!("{} {}", title.red().bold(), message);
}
