use goscan::cli::{Args, Command};
use goscan::logging::init_logging;
use std::process;

fn main() {
    let args = Args::parse_args();

    init_logging(args.verbose);

    let command = Command::from_args(args);
    let exit_code = command.run();

    process::exit(exit_code);
}
