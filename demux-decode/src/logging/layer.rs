use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use super::{LogSink, Severity};

/**
    `tracing` layer that hands every event to a [`LogSink`] under a fixed tag.

    The event's `message` becomes the line, other fields are appended as
    `name=value` pairs.
*/
pub struct LogSinkLayer<S> {
    sink: S,
    tag: &'static str,
}

impl<S: LogSink> LogSinkLayer<S> {
    pub fn new(sink: S, tag: &'static str) -> Self {
        Self { sink, tag }
    }
}

impl<S, T> Layer<T> for LogSinkLayer<S>
where
    S: LogSink,
    T: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, T>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish();
        if line.is_empty() {
            return;
        }
        self.sink
            .log(Severity::from(*event.metadata().level()), self.tag, &line);
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.message.is_empty() {
            self.fields
        } else if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}
