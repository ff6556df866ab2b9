// src/bin/cli.rs
use fuel_widget::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
