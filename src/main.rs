mod cli;
mod path_de;

fn main() -> anyhow::Result<()> {
    // logs go to stderr; stdout is reserved for converted output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}
