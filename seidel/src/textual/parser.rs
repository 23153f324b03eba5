use winnow::{
    Result as WResult,
    ascii::{digit1, space0, space1},
    combinator::{alt, delimited, separated, terminated},
    prelude::*,
};

/// One row of the augmented matrix, e.g. `4, 1, 1, 7` or `4 1 1 7`.
fn parse_row(i: &mut &str) -> WResult<Vec<f64>> {
    delimited(space0, separated(1.., parse_number, separator), space0).parse_next(i)
}

/// Either a comma (with optional spaces around it) or a run of spaces/tabs.
fn separator(i: &mut &str) -> WResult<()> {
    alt(((space0, ',', space0).void(), space1.void())).parse_next(i)
}

fn parse_number(i: &mut &str) -> WResult<f64> {
    fn myint(input: &mut &str) -> WResult<f64> {
        (winnow::combinator::opt('-'), digit1)
            .take()
            .verify_map(|s: &str| s.parse::<f64>().ok())
            .parse_next(input)
    }

    fn myfloat(i: &mut &str) -> WResult<f64> {
        winnow::ascii::float.parse_next(i)
    }
    alt((myfloat, myint)).parse_next(i)
}

/// A row followed by nothing else.
pub(super) fn parse_whole_row(i: &mut &str) -> WResult<Vec<f64>> {
    terminated(parse_row, winnow::combinator::eof).parse_next(i)
}
