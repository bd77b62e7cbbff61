use clap::Parser;

use crate::TrailingBlock;

/// Options shared by both parts.
#[derive(clap::Args, Debug)]
pub struct Options {
    /// Count the last block even if the input does not end with a blank line
    #[arg(long)]
    pub flush_trailing: bool,

    /// Log every recorded block to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

impl Options {
    pub fn trailing(&self) -> TrailingBlock {
        if self.flush_trailing {
            TrailingBlock::Flush
        } else {
            TrailingBlock::default()
        }
    }
}

/// Largest single block sum.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Part1Args {
    #[command(flatten)]
    pub options: Options,
}

/// Sum of the largest block sums.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Part2Args {
    /// How many of the largest blocks to add up
    #[arg(long, short, default_value_t = 3)]
    pub top: usize,

    #[command(flatten)]
    pub options: Options,
}
