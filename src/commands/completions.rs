use crate::Cli;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

pub fn run(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "ngsi", out);
}
