use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Bracketed event format shared by the console and the log file.
/// Format: [TIMESTAMP] [LEVEL] [SPAN] [TARGET: FILE:LINE]: MESSAGE
///
/// `SPAN` is the innermost open span; everything a split run logs sits under
/// `split_dataset`, so setup messages logged before the run show their module
/// name there instead.
pub struct BracketedFormatter;

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Local::now();
        write!(writer, "[{}]  ", now.format("%Y-%m-%dT%H:%M:%S%.6f%:z"))?;

        write!(writer, "[{:5}] ", metadata.level())?;

        // Innermost span, or the last segment of the target outside any span
        let scope_name = match ctx.event_scope() {
            Some(scope) => scope
                .from_root()
                .last()
                .map(|span| span.name())
                .unwrap_or("unknown"),
            None => metadata.target().rsplit("::").next().unwrap_or("unknown"),
        };
        write!(writer, "[{}] ", scope_name)?;

        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?;
        } else {
            write!(writer, "[{}]: ", metadata.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
