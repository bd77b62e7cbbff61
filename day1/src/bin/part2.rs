use anyhow::Result;
use clap::Parser;
use day1::{cli::Part2Args, find_block_totals, sum_of_largest};
use util::{read_input_lines, setup_logging};

fn main() -> Result<()> {
    let args = Part2Args::parse();
    setup_logging(args.options.verbose)?;

    let totals = find_block_totals(read_input_lines()?, args.options.trailing())?;
    let answer = sum_of_largest(&totals, args.top)?;

    println!("{answer}");

    Ok(())
}
