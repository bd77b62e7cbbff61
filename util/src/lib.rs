use std::{
    error::Error,
    io::{self, BufRead},
    str::FromStr,
};

use anyhow::{Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{BaseErrorKind, ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

type ErrorKind = BaseErrorKind<&'static str, Box<dyn Error + Send + Sync>>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: ErrorKind,
}

/// Signed decimal integer, e.g. `-12` or `4000`.
pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, std::num::ParseIntError>,
{
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span<'a>| {
        FromStr::from_str(i.fragment())
    })(i)
}

/// Runs `parse_fun` over the whole of `l`.
///
/// On failure the error is rendered as a graphical report pointing at the
/// offending column, ready to be shown to the user.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> std::result::Result<T, String>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: std::result::Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    line.map_err(|e| render_bad_input(l, e))
}

fn first_base(e: ErrorTree<Span<'_>>) -> Option<(Span<'_>, ErrorKind)> {
    match e {
        GenericErrorTree::Base { location, kind } => Some((location, kind)),
        GenericErrorTree::Stack { base, .. } => first_base(*base),
        GenericErrorTree::Alt(alts) => alts.into_iter().find_map(first_base),
    }
}

fn render_bad_input<'a>(src: &'a str, e: ErrorTree<Span<'a>>) -> String {
    let Some((location, kind)) = first_base(e) else {
        return format!("bad input: {src:?}");
    };

    let offset = location.location_offset().into();
    let err = BadInput {
        src,
        bad_bit: miette::SourceSpan::new(offset, 0.into()),
        kind,
    };

    let mut s = String::new();
    match GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut s, &err)
    {
        Ok(()) => s,
        Err(_) => format!("{err}: {src:?}"),
    }
}

/// Reads standard input to exhaustion, one entry per line.
pub fn read_input_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();

    stdin
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("reading standard input")
}

pub fn setup_logging(verbose: bool) -> Result<()> {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(if verbose {
            LevelFilter::DEBUG.into()
        } else {
            LevelFilter::WARN.into()
        })
        .from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();

    Ok(())
}
