mod cli;
mod jq_exec;
mod logging;

use colored::Colorize;

fn main() {
    logging::init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
