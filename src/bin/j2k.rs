use clap::Parser;
use clap::error::ErrorKind;

use j2k::cli::args::CliArgs;
use j2k::cli::driver;
use j2k::tracing_config::{LogSettings, init_tracing};

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            let message = err.to_string();
            let first = message.lines().next().unwrap_or_default();
            let first = first.strip_prefix("error: ").unwrap_or(first);
            println!("{}", driver::exception_line(first));
            return;
        }
    };

    let settings = LogSettings::from_env(args.verbose, args.log_format);
    init_tracing(&settings);

    println!("{}", driver::render(&args));
}
