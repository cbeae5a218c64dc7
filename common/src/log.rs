//! Logging shortcuts shared by the scanner and the CLI.
//!
//! `success!` is an `INFO` event under its own target so the terminal
//! formatter can give it a distinct glyph.

pub const SUCCESS_TARGET: &str = "netprobe::success";
pub const PRINT_TARGET: &str = "netprobe::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "netprobe::success", $($arg)*)
    };
}
