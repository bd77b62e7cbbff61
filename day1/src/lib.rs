use itertools::Itertools;
use tracing::{debug, info, warn};
use util::{parse_nice, parse_number};

pub mod cli;

/// What to do with a block that is still open when the input ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingBlock {
    /// Only blocks closed by a blank line count.
    #[default]
    Drop,
    /// Record the last block even without a closing blank line.
    Flush,
}

#[derive(thiserror::Error, Debug)]
pub enum BlockError {
    #[error("malformed integer on line {line}\n{report}")]
    Malformed { line: usize, report: String },
    #[error("block sum overflowed on line {line}")]
    Overflow { line: usize },
    #[error("sum of the largest blocks overflowed")]
    SumOverflow,
}

/// Sums of each blank-line separated block, in input order.
pub fn find_block_totals(
    input: impl IntoIterator<Item = impl AsRef<str>>,
    trailing: TrailingBlock,
) -> Result<Vec<i64>, BlockError> {
    let mut totals = Vec::new();
    let mut current_total: i64 = 0;
    let mut current_lines = 0_usize;

    for (i, line) in input.into_iter().enumerate() {
        let line = line.as_ref();
        let line_no = i + 1;

        if line.is_empty() {
            debug!(line = line_no, total = current_total, "block closed");
            totals.push(current_total);
            current_total = 0;
            current_lines = 0;
        } else {
            let n = parse_nice(line, parse_number).map_err(|report| BlockError::Malformed {
                line: line_no,
                report,
            })?;
            current_total = current_total
                .checked_add(n)
                .ok_or(BlockError::Overflow { line: line_no })?;
            current_lines += 1;
        }
    }

    if current_lines > 0 {
        match trailing {
            TrailingBlock::Drop => warn!(
                total = current_total,
                lines = current_lines,
                "input ended without a blank line, dropping the last block"
            ),
            TrailingBlock::Flush => {
                debug!(total = current_total, "flushing the last block");
                totals.push(current_total);
            }
        }
    }

    Ok(totals)
}

/// Adds up the `n` largest totals, or all of them if there are fewer than `n`.
pub fn sum_of_largest(totals: &[i64], n: usize) -> Result<i64, BlockError> {
    let largest = totals
        .iter()
        .copied()
        .sorted_by(|a, b| b.cmp(a))
        .take(n)
        .collect::<Vec<_>>();

    info!(blocks = totals.len(), ?largest, "selected largest blocks");

    largest
        .into_iter()
        .try_fold(0_i64, i64::checked_add)
        .ok_or(BlockError::SumOverflow)
}

pub fn get_biggest_total(totals: &[i64]) -> Result<i64, BlockError> {
    sum_of_largest(totals, 1)
}

pub fn get_biggest_three_total(totals: &[i64]) -> Result<i64, BlockError> {
    sum_of_largest(totals, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    fn top_three(input: &str, trailing: TrailingBlock) -> i64 {
        let totals = find_block_totals(input.lines(), trailing).unwrap();
        get_biggest_three_total(&totals).unwrap()
    }

    #[test]
    fn part1() {
        let totals = find_block_totals(TEST_INPUT.lines(), TrailingBlock::Flush).unwrap();
        assert_eq!(totals, vec![6000, 4000, 11000, 24000, 10000]);

        let res = get_biggest_total(&totals);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 24000);
    }

    #[test]
    fn part2() {
        assert_eq!(top_three(TEST_INPUT, TrailingBlock::Flush), 45000);
    }

    #[test]
    fn part2_drops_unterminated_block() {
        // The sample does not end with a blank line, so the 10000 block is lost.
        let totals = find_block_totals(TEST_INPUT.lines(), TrailingBlock::Drop).unwrap();
        assert_eq!(totals, vec![6000, 4000, 11000, 24000]);
        assert_eq!(get_biggest_three_total(&totals).unwrap(), 41000);
    }

    #[rstest]
    #[case("3\n4\n\n5\n\n10\n20\n30\n\n", 72)]
    #[case("10\n20\n30\n\n3\n4\n\n5\n\n", 72)]
    #[case("5\n\n10\n20\n30\n\n3\n4\n\n", 72)]
    #[case("3\n4\n\n5\n\n10\n20\n30\n", 12)]
    #[case("1\n\n2\n\n", 3)]
    #[case("1\n\n", 1)]
    #[case("", 0)]
    #[case("7", 0)]
    #[case("1\n\n2\n\n3\n\n4\n\n", 9)]
    #[case("-5\n10\n\n\n", 5)]
    fn top_three_default_policy(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(top_three(input, TrailingBlock::Drop), expected);
    }

    #[rstest]
    #[case("3\n4\n\n5\n\n10\n20\n30", 72)]
    #[case("3\n4\n\n5\n\n10\n20\n30\n", 72)]
    #[case("7", 7)]
    #[case("", 0)]
    fn top_three_flush_policy(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(top_three(input, TrailingBlock::Flush), expected);
    }

    #[test]
    fn consecutive_blank_lines_record_empty_blocks() {
        let totals = find_block_totals("1\n\n\n2\n\n".lines(), TrailingBlock::Drop).unwrap();
        assert_eq!(totals, vec![1, 0, 2]);
    }

    #[test]
    fn exactly_three_blocks_sum_to_everything() {
        let totals = vec![8, 1, 30];
        assert_eq!(get_biggest_three_total(&totals).unwrap(), 39);
    }

    #[test]
    fn repeated_runs_agree() {
        let first = top_three(TEST_INPUT, TrailingBlock::Drop);
        let second = top_three(TEST_INPUT, TrailingBlock::Drop);
        assert_eq!(first, second);
    }

    #[test]
    fn sum_of_largest_clamps() {
        assert_eq!(sum_of_largest(&[4, 9], 5).unwrap(), 13);
        assert_eq!(sum_of_largest(&[4, 9], 0).unwrap(), 0);
    }

    #[rstest]
    #[case("1\nx\n\n", 2)]
    #[case("1\n2\n\n 3\n\n", 4)]
    #[case("12abc\n", 1)]
    fn malformed_line(#[case] input: &str, #[case] expected_line: usize) {
        let res = find_block_totals(input.lines(), TrailingBlock::Drop);
        match res {
            Err(BlockError::Malformed { line, report }) => {
                assert_eq!(line, expected_line);
                assert!(report.contains("bad input"));
            }
            other => panic!("expected a malformed line error, got {other:?}"),
        }
    }

    #[test]
    fn block_overflow() {
        let input = format!("{}\n1\n\n", i64::MAX);
        let res = find_block_totals(input.lines(), TrailingBlock::Drop);
        assert!(matches!(res, Err(BlockError::Overflow { line: 2 })));
    }

    #[test]
    fn selection_overflow() {
        let res = sum_of_largest(&[i64::MAX, 1, 0], 3);
        assert!(matches!(res, Err(BlockError::SumOverflow)));
    }
}
