use std::process::ExitCode;

fn main() -> ExitCode {
    csv_recode_lib::run()
}
