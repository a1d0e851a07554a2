// Text Styles
pub static RESET: &str = "\x1b[0m";
pub static BOLD: &str = "\x1b[1m";

// Bright Text Colors
pub static BRIGHT_RED: &str = "\x1b[91m";
pub static BRIGHT_GREEN: &str = "\x1b[92m";
pub static BRIGHT_YELLOW: &str = "\x1b[93m";

/// Wraps text in a style and resets afterwards.
pub fn styled(style: &str, text: &str) -> String {
    format!("{style}{text}{RESET}")
}
