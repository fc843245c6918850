/*!
    Android system log sink.
*/

use std::ffi::c_int;

use demux_decode::logging::{LogSink, Severity};

/**
    Android log priorities, as in `android/log.h`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Verbose => Self::Verbose,
            Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warn => Self::Warn,
            Severity::Error => Self::Error,
            Severity::Fatal => Self::Fatal,
        }
    }
}

/**
    Writes lines to logcat. Off Android, lines go to stderr instead.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct LogcatSink;

impl LogSink for LogcatSink {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        write(Priority::from(severity) as c_int, tag, message);
    }
}

#[cfg(target_os = "android")]
fn write(priority: c_int, tag: &str, message: &str) {
    use std::ffi::{CString, c_char};

    #[link(name = "log")]
    unsafe extern "C" {
        fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }

    let tag = CString::new(tag.replace('\0', "")).unwrap_or_default();
    let text = CString::new(message.replace('\0', "")).unwrap_or_default();
    unsafe { __android_log_write(priority, tag.as_ptr(), text.as_ptr()) };
}

#[cfg(not(target_os = "android"))]
fn write(priority: c_int, tag: &str, message: &str) {
    eprintln!("{}/{tag}: {message}", priority_letter(priority));
}

#[cfg(not(target_os = "android"))]
fn priority_letter(priority: c_int) -> char {
    match priority {
        2 => 'V',
        3 => 'D',
        4 => 'I',
        5 => 'W',
        6 => 'E',
        _ => 'F',
    }
}
