use clap::Parser;
use delivery_desk::{
    Config,
    cli::{Cli, Commands},
    run,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // init-config must work before any config file exists.
    let config = if matches!(cli.command(), Commands::InitConfig) {
        Config::default()
    } else {
        Config::load(cli.config.as_deref())?
    };
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
