use std::process::ExitCode;

use video_to_audio::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    process_args(args)
}
