/*!
    Android entry points for `demux-decode`.

    Loading the library registers `native_main(String)` on
    `org.lampoo.ffmpeg.MainActivity`, which decodes the file at the given
    path with the same code path as the command line tool. Codec library
    messages are logged under the `FFMPEG` tag, the decoder's own under
    `FFMPEG_JNI`.
*/

mod logcat;

use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use jni::objects::{JObject, JString};
use jni::sys::{JNI_ERR, JNI_VERSION_1_6, jint};
use jni::{JNIEnv, JavaVM, NativeMethod};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use demux_decode::logging::{self, LibraryLogLevel, LogSink, LogSinkLayer, Severity};
use demux_decode::{CodecId, VideoDecoderConfig};

pub use logcat::{LogcatSink, Priority};

pub const ACTIVITY_CLASS: &str = "org/lampoo/ffmpeg/MainActivity";
pub const NATIVE_MAIN_NAME: &str = "native_main";
pub const NATIVE_MAIN_SIGNATURE: &str = "(Ljava/lang/String;)V";

/// Tag for the decoder's own log lines.
pub const JNI_TAG: &str = "FFMPEG_JNI";

/// MediaCodec-backed H.264 decoder, when the library was built with it.
pub const MEDIACODEC_H264: &str = "h264_mediacodec";

#[derive(Debug, Error)]
enum LoadError {
    #[error("JNI call failed: {0}")]
    Jni(#[from] jni::errors::Error),

    #[error("av_jni_set_java_vm failed with code {0}")]
    JavaVm(i32),

    #[error(transparent)]
    Init(#[from] demux_decode::Error),
}

/**
    Library load hook.

    Returns `JNI_VERSION_1_6`, or `JNI_ERR` if anything fails, in which case
    the Java side sees an `UnsatisfiedLinkError`.
*/
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    match catch_unwind(AssertUnwindSafe(|| on_load(&vm))) {
        Ok(Ok(())) => JNI_VERSION_1_6,
        Ok(Err(e)) => {
            report_load_failure(&LogcatSink, &e);
            JNI_ERR
        }
        Err(_) => {
            LogcatSink.log(Severity::Fatal, JNI_TAG, "JNI_OnLoad panicked");
            JNI_ERR
        }
    }
}

// Written to the sink directly: a failure here may leave no subscriber behind.
fn report_load_failure(sink: &impl LogSink, err: &LoadError) {
    sink.log(Severity::Error, JNI_TAG, &format!("JNI_OnLoad failed: {err}"));
}

fn on_load(vm: &JavaVM) -> Result<(), LoadError> {
    install_logging();

    let mut env = vm.get_env()?;
    set_java_vm(vm)?;
    demux_decode::initialize()?;

    env.register_native_methods(
        ACTIVITY_CLASS,
        &[NativeMethod {
            name: NATIVE_MAIN_NAME.into(),
            sig: NATIVE_MAIN_SIGNATURE.into(),
            fn_ptr: native_main as *mut c_void,
        }],
    )?;

    info!("registered {ACTIVITY_CLASS}.{NATIVE_MAIN_NAME}");
    Ok(())
}

fn install_logging() {
    let sink = Arc::new(LogcatSink);
    logging::install_ffmpeg_log_bridge(sink.clone(), LibraryLogLevel::Info);

    let _ = tracing_subscriber::registry()
        .with(LogSinkLayer::new(sink, JNI_TAG).with_filter(LevelFilter::INFO))
        .try_init();
}

#[cfg(target_os = "android")]
fn set_java_vm(vm: &JavaVM) -> Result<(), LoadError> {
    use std::ffi::c_int;

    unsafe extern "C" {
        fn av_jni_set_java_vm(vm: *mut c_void, log_ctx: *mut c_void) -> c_int;
    }

    let ret = unsafe { av_jni_set_java_vm(vm.get_java_vm_pointer().cast(), std::ptr::null_mut()) };
    if ret < 0 {
        return Err(LoadError::JavaVm(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "android"))]
fn set_java_vm(_vm: &JavaVM) -> Result<(), LoadError> {
    Ok(())
}

/**
    Decoder choices for the platform: prefer MediaCodec for H.264 on Android.
*/
pub fn decoder_config() -> VideoDecoderConfig {
    let config = VideoDecoderConfig::new();
    if cfg!(target_os = "android") {
        config.with_decoder_for(CodecId::H264, MEDIACODEC_H264)
    } else {
        config
    }
}

/**
    Argument list handed to the decoder for a path from Java.

    The path follows `--`, so names like `--help` or `-clip.mp4` are never
    read as flags.
*/
pub fn platform_args(path: String) -> [String; 3] {
    ["main".to_string(), "--".to_string(), path]
}

extern "system" fn native_main<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    path: JString<'local>,
) {
    match catch_unwind(AssertUnwindSafe(|| decode_from_java(&mut env, &path))) {
        Ok(Some(status)) => info!(status, "native_main finished"),
        Ok(None) => {}
        Err(_) => error!("native_main panicked"),
    }
}

fn decode_from_java(env: &mut JNIEnv<'_>, path: &JString<'_>) -> Option<i32> {
    // JavaStr releases the UTF chars when dropped.
    let path: String = match env.get_string(path) {
        Ok(java_str) => java_str.into(),
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                error!("exception pending while reading the source path: {e}");
            } else {
                error!("could not read the source path: {e}");
            }
            return None;
        }
    };

    Some(demux_decode::run_with(platform_args(path), decoder_config()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_args_use_main_as_program_name() {
        let args = platform_args("/sdcard/clip.mp4".to_string());
        assert_eq!(args, ["main", "--", "/sdcard/clip.mp4"].map(String::from));
    }

    #[test]
    fn load_failure_reaches_the_sink_directly() {
        #[derive(Default)]
        struct Lines(std::sync::Mutex<Vec<(Severity, String, String)>>);

        impl LogSink for Lines {
            fn log(&self, severity: Severity, tag: &str, message: &str) {
                self.0.lock().unwrap().push((severity, tag.to_string(), message.to_string()));
            }
        }

        let sink = Lines::default();
        report_load_failure(&sink, &LoadError::JavaVm(-22));

        let lines = sink.0.lock().unwrap();
        assert_eq!(
            *lines,
            vec![(
                Severity::Error,
                JNI_TAG.to_string(),
                "JNI_OnLoad failed: av_jni_set_java_vm failed with code -22".to_string()
            )]
        );
    }

    #[test]
    fn registration_names() {
        assert_eq!(ACTIVITY_CLASS, "org/lampoo/ffmpeg/MainActivity");
        assert_eq!(NATIVE_MAIN_SIGNATURE, "(Ljava/lang/String;)V");
    }

    #[test]
    fn decoder_preference_follows_platform() {
        let config = decoder_config();
        if cfg!(target_os = "android") {
            assert_eq!(config.decoder_for(CodecId::H264), Some(MEDIACODEC_H264));
        } else {
            assert_eq!(config.decoder_for(CodecId::H264), None);
        }
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn missing_path_fails_like_the_command_line() {
        let status =
            demux_decode::run_with(platform_args("/no/such/clip.mp4".to_string()), decoder_config());
        assert_eq!(status, 1);
    }

    #[test]
    fn flag_like_paths_are_decoded_not_interpreted() {
        // Each is a missing file, so the run fails instead of printing and returning 0.
        for path in ["--help", "--version", "-x.mp4"] {
            let status = demux_decode::run_with(platform_args(path.to_string()), decoder_config());
            assert_eq!(status, 1, "{path}");
        }
    }
}
