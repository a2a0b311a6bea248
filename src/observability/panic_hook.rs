//! Structured crash report on panic.
//!
//! Prints version, platform, the panic message and location, and the
//! innermost tracing span (for example `recommendation{indicator=...}`), so a
//! report says which indicator was being processed.

use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 76;

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprint!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let mut lines = vec![
        "SCORECAST CRASH REPORT".to_string(),
        format!("Version: {VERSION}"),
        format!("Platform: {}", std::env::consts::OS),
        format!(
            "Time: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("PANIC: {}", panic_message(info)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }
    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("Span: {}", metadata.name()));
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push(format!("{}", std::backtrace::Backtrace::capture()));
    } else {
        lines.push("Run with RUST_BACKTRACE=1 for stack trace".to_string());
    }

    frame(&lines)
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn frame(lines: &[String]) -> String {
    let rule = "=".repeat(WIDTH);
    let mut out = format!("\n{rule}\n");
    for line in lines {
        out.push_str("  ");
        out.push_str(&truncate(line, WIDTH - 2));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.contains('\n') || s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
