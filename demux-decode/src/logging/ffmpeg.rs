/*!
    Bridge from the codec library's log callback to a [`LogSink`].
*/

use std::ffi::{CStr, c_char, c_int, c_void};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, OnceLock};

use clap::ValueEnum;
use ffmpeg_next::ffi;

use super::{FFMPEG_TAG, LogSink, Severity};

// The callback's va_list parameter has a different Rust type per target.
#[cfg(all(target_arch = "x86_64", not(target_os = "windows")))]
type VaList = *mut ffi::__va_list_tag;
#[cfg(not(all(target_arch = "x86_64", not(target_os = "windows"))))]
type VaList = ffi::va_list;

const LINE_CAPACITY: usize = 1024;

// Pending text is forwarded anyway once it grows this long without a newline.
const MAX_PENDING: usize = 4 * LINE_CAPACITY;

static BRIDGE: OnceLock<Box<dyn LogSink>> = OnceLock::new();

static PENDING: Mutex<LineAssembler> = Mutex::new(LineAssembler::new());

/**
    Joins the pieces the codec library logs one `av_log` call at a time
    (`"  Duration: "`, `"00:00:01.00"`, `"\n"`) into whole lines.
*/
#[derive(Debug)]
struct LineAssembler {
    text: String,
    /// Most severe level among the pending pieces.
    level: c_int,
    /// Whether the next piece starts a new line, as tracked by `av_log_format_line`.
    print_prefix: c_int,
}

impl LineAssembler {
    const fn new() -> Self {
        Self {
            text: String::new(),
            level: ffi::AV_LOG_TRACE,
            print_prefix: 1,
        }
    }

    /**
        Append a formatted piece, returning the completed line and its level
        once the piece ends it. Blank lines are dropped.
    */
    fn push(&mut self, level: c_int, piece: &str) -> Option<(c_int, String)> {
        if self.text.is_empty() {
            self.level = level;
        } else {
            self.level = self.level.min(level);
        }
        self.text.push_str(piece);

        if !piece.ends_with('\n') && self.text.len() < MAX_PENDING {
            return None;
        }

        let line = std::mem::take(&mut self.text);
        let line = line.trim_end_matches(['\n', '\r']);
        (!line.trim().is_empty()).then(|| (self.level, line.to_string()))
    }
}

/**
    Minimum severity the codec library reports, most quiet first.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LibraryLogLevel {
    Quiet,
    Panic,
    Fatal,
    Error,
    Warning,
    #[default]
    Info,
    Verbose,
    Debug,
    Trace,
}

impl LibraryLogLevel {
    /**
        The codec library's numeric value for this level.
    */
    pub fn as_av_level(self) -> c_int {
        match self {
            Self::Quiet => ffi::AV_LOG_QUIET,
            Self::Panic => ffi::AV_LOG_PANIC,
            Self::Fatal => ffi::AV_LOG_FATAL,
            Self::Error => ffi::AV_LOG_ERROR,
            Self::Warning => ffi::AV_LOG_WARNING,
            Self::Info => ffi::AV_LOG_INFO,
            Self::Verbose => ffi::AV_LOG_VERBOSE,
            Self::Debug => ffi::AV_LOG_DEBUG,
            Self::Trace => ffi::AV_LOG_TRACE,
        }
    }
}

/**
    Map a codec library log level to a host severity.

    Lower numbers are more severe, so the mapping is monotone: panic and
    fatal become [`Severity::Fatal`], verbose and debug become
    [`Severity::Debug`], and anything chattier than debug is
    [`Severity::Verbose`].
*/
pub fn severity_for_av_level(level: c_int) -> Severity {
    if level <= ffi::AV_LOG_FATAL {
        Severity::Fatal
    } else if level <= ffi::AV_LOG_ERROR {
        Severity::Error
    } else if level <= ffi::AV_LOG_WARNING {
        Severity::Warn
    } else if level <= ffi::AV_LOG_INFO {
        Severity::Info
    } else if level <= ffi::AV_LOG_DEBUG {
        Severity::Debug
    } else {
        Severity::Verbose
    }
}

/**
    Set the minimum level the codec library reports.
*/
pub fn set_library_log_level(level: LibraryLogLevel) {
    unsafe { ffi::av_log_set_level(level.as_av_level()) };
}

/**
    Route the codec library's log output to `sink`, reporting lines up to `level`.

    The callback is process-wide, so only the first call has any effect.
    Returns `false`, leaving the installed sink and level untouched, if a
    bridge was already installed.
*/
pub fn install_ffmpeg_log_bridge<S: LogSink>(sink: S, level: LibraryLogLevel) -> bool {
    let mut installed = false;
    BRIDGE.get_or_init(|| {
        installed = true;
        Box::new(sink)
    });
    if !installed {
        return false;
    }

    set_library_log_level(level);
    unsafe { ffi::av_log_set_callback(Some(ffmpeg_log_callback)) };
    true
}

pub fn is_bridge_installed() -> bool {
    BRIDGE.get().is_some()
}

unsafe extern "C" fn ffmpeg_log_callback(
    avcl: *mut c_void,
    level: c_int,
    fmt: *const c_char,
    vl: VaList,
) {
    if level > unsafe { ffi::av_log_get_level() } {
        return;
    }
    let Some(sink) = BRIDGE.get() else {
        return;
    };

    let completed = {
        let mut pending = PENDING.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut buf = [0 as c_char; LINE_CAPACITY];
        unsafe {
            ffi::av_log_format_line(
                avcl,
                level,
                fmt,
                vl,
                buf.as_mut_ptr(),
                LINE_CAPACITY as c_int,
                &mut pending.print_prefix,
            );
        }
        let piece = unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy();
        pending.push(level, &piece)
    };

    let Some((level, message)) = completed else {
        return;
    };
    let severity = severity_for_av_level(level);
    // Unwinding into C aborts the process.
    let _ = catch_unwind(AssertUnwindSafe(|| sink.log(severity, FFMPEG_TAG, &message)));
}
