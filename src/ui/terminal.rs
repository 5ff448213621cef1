// Terminal control
//
// Screen clearing shells out to the platform clear command, the same way
// the build steps shell out to the compiler. The exit status is ignored:
// a terminal that cannot be cleared is not a build failure.

use std::process::Command;

/// The platform shell invocation for clearing the screen
///
/// Split out from [`clear_screen`] so the platform branch is testable
/// without touching a terminal.
pub fn clear_command() -> (&'static str, [&'static str; 2]) {
    if cfg!(target_os = "windows") {
        ("cmd", ["/C", "cls"])
    } else {
        ("sh", ["-c", "clear"])
    }
}

/// Clear the visible terminal buffer
///
/// Errors are silently ignored; this is side effect only.
pub fn clear_screen() {
    let (shell, args) = clear_command();
    let _ = Command::new(shell).args(args).status();
}
