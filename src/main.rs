use std::process::ExitCode;

fn main() -> ExitCode {
    kisao::cli::main()
}
