use bracken::Codegen;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = {
        use clap::Parser;
        args::Args::parse()
    };

    let source = match std::fs::read_to_string(&args.source) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.source);
            std::process::exit(1);
        }
    };

    info!(source = %args.source, "translating");
    let artifact = match Codegen::translate(&source) {
        Ok(artifact) => artifact,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = std::fs::write(&args.output, artifact) {
        eprintln!("error: cannot write {}: {err}", args.output);
        std::process::exit(1);
    }
    debug!(output = %args.output, "artifact written");
}
