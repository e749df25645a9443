use clap::Command;
use clap_complete::Shell;

use super::CliResult;

pub fn run(shell: Shell, cmd: &mut Command) -> CliResult {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, &mut std::io::stdout());
    Ok(())
}
