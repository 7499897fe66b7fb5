use nom::bytes::complete::tag_no_case;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::sequence::preceded;
use nom::IResult;
use nom::Parser;

/// A user supplied reference to a version of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRef<'a> {
    /// An ordinal such as `v3` or `V12`.
    Number(u32),
    /// Anything else, taken literally as a version id.
    Id(&'a str),
}

/// Parses a whole `v<digits>` ordinal, case-insensitive.
pub fn parse_version_number(input: &str) -> IResult<&str, u32> {
    all_consuming(preceded(
        tag_no_case("v"),
        map_res(digit1, |digits: &str| digits.parse::<u32>()),
    ))
    .parse(input)
}

/// Classifies a reference. Ordinals too large for a version number fall back to
/// literal ids, which will simply not be found.
pub fn parse_version_ref(input: &str) -> VersionRef<'_> {
    match parse_version_number(input) {
        Ok((_, number)) => VersionRef::Number(number),
        Err(_) => VersionRef::Id(input),
    }
}
