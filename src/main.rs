use anyhow::Result;
use chat_icon_gen::icon_gen::{self, DEFAULT_OUTPUT};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "chat-icon-gen",
    version,
    about = "Draw the chat bubble application icon as a transparent PNG"
)]
struct Args {
    /// Where to write the icon.
    #[clap(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icon(&args.output)
}
