use std::process::ExitCode;

fn main() -> ExitCode {
    demux_decode::logging::init_tracing();

    let status = demux_decode::run(std::env::args_os());
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
