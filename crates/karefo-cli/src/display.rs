//! Human-readable card for a lookup result.

use karefo_core::{Label, NerResult};

/// Print a result as a short vertical card.
pub fn print_result(result: &NerResult) {
    print!("{}", render_result(result));
}

fn render_result(result: &NerResult) -> String {
    let mut out = format!("=== {} ===\n", result.word);
    out.push_str(&format!("  {:<10} {}\n", "label", result.label));

    if let Some(note) = sentinel_note(&result.label) {
        out.push_str(&format!("  {:<10} {}\n", "status", note));
    }

    match &result.message {
        Some(message) => out.push_str(&format!("  {:<10} {}\n", "message", message)),
        None => out.push_str(&format!("  {:<10} (none)\n", "message")),
    }
    out
}

fn sentinel_note(label: &Label) -> Option<&'static str> {
    if !label.is_sentinel() {
        return None;
    }
    if label.as_str() == Label::MODEL_NOT_LOADED {
        Some("artifacts failed to load at startup")
    } else {
        Some("classifier could not process this word")
    }
}
