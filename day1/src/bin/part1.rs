use anyhow::Result;
use clap::Parser;
use day1::{cli::Part1Args, find_block_totals, get_biggest_total};
use util::{read_input_lines, setup_logging};

fn main() -> Result<()> {
    let args = Part1Args::parse();
    setup_logging(args.options.verbose)?;

    let totals = find_block_totals(read_input_lines()?, args.options.trailing())?;
    let answer = get_biggest_total(&totals)?;

    println!("{answer}");

    Ok(())
}
