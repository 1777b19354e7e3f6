//! `objtools` command-line entry point

fn main() -> anyhow::Result<()> {
    objtools::cli::run_cli()
}
