use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    pub source: String,
    #[clap(long, default_value = "out.c")]
    pub output: String,
}
