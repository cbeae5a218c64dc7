use std::sync::Arc;

use indicatif::ProgressStyle;
use netprobe_core::dispatcher::ProgressCallback;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TEMPLATE: &str = "{spinner:.blue} {msg} [{bar:32.green/black}] {pos}/{len} ({elapsed})";
const TICKS: &[&str] = &[
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

/// A span carrying a progress bar sized for `total` probes.
pub fn scan_span(message: &str, total: usize) -> Span {
    let span = info_span!("scan", indicatif.pb_show = true);

    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        span.pb_set_style(&style.tick_strings(TICKS).progress_chars("━╸ "));
    }
    span.pb_set_length(total as u64);
    span.pb_set_message(message);
    span
}

/// Moves the span's bar forward as probes finish.
pub fn progress_callback(span: &Span) -> ProgressCallback {
    let span: Span = span.clone();
    Arc::new(move |done: usize| span.pb_set_position(done as u64))
}
