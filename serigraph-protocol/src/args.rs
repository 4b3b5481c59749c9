//! Parameter tokenizer.
//!
//! Grammar after the mnemonic: the terminator alone (no parameters), or `=`
//! introducing a comma-separated list that runs to the terminator. There is
//! no escaping, so a value can contain neither `,` nor `;`.

use heapless::Vec;

use crate::assembler::TERMINATOR;

/// Maximum number of parameters in one command
pub const MAX_ARGS: usize = 6;

/// Ordered parameter list borrowed from the assembled command.
///
/// Valid only for the dispatch call it was built for.
pub type Args<'a> = Vec<&'a str, MAX_ARGS>;

/// Ways the parameter section can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgError {
    /// The byte after the mnemonic was neither `=` nor the terminator
    MissingSeparator,
    /// More than [`MAX_ARGS`] parameters
    TooManyArgs,
    /// Parameter bytes were not valid UTF-8
    NotUtf8,
}

/// Tokenize the parameter section of an assembled command.
///
/// `params` is the command with the mnemonic stripped, terminator still in
/// place. `=;` yields a single empty parameter.
pub fn tokenize(params: &[u8]) -> Result<Args<'_>, ArgError> {
    let mut args = Args::new();
    match params.first() {
        Some(&TERMINATOR) => Ok(args),
        Some(&b'=') => {
            let body = params
                .get(1..params.len() - 1)
                .ok_or(ArgError::MissingSeparator)?;
            for token in body.split(|&b| b == b',') {
                let token = core::str::from_utf8(token).map_err(|_| ArgError::NotUtf8)?;
                args.push(token).map_err(|_| ArgError::TooManyArgs)?;
            }
            Ok(args)
        }
        _ => Err(ArgError::MissingSeparator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parameters() {
        let args = tokenize(b";").unwrap();
        assert_eq!(args.len(), 0);
    }

    #[test]
    fn test_three_parameters() {
        let args = tokenize(b"=200,23,123;").unwrap();
        assert_eq!(args.as_slice(), &["200", "23", "123"]);
    }

    #[test]
    fn test_single_parameter() {
        let args = tokenize(b"=HX8347A;").unwrap();
        assert_eq!(args.as_slice(), &["HX8347A"]);
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(tokenize(b"200;"), Err(ArgError::MissingSeparator));
    }

    #[test]
    fn test_empty_value_list() {
        // `AT+xx=;` carries one empty parameter
        let args = tokenize(b"=;").unwrap();
        assert_eq!(args.as_slice(), &[""]);
    }

    #[test]
    fn test_empty_values_between_commas() {
        let args = tokenize(b"=1,,3;").unwrap();
        assert_eq!(args.as_slice(), &["1", "", "3"]);
    }

    #[test]
    fn test_max_parameters() {
        let args = tokenize(b"=1,2,3,4,5,6;").unwrap();
        assert_eq!(args.len(), 6);
        assert_eq!(tokenize(b"=1,2,3,4,5,6,7;"), Err(ArgError::TooManyArgs));
    }

    #[test]
    fn test_non_utf8_parameter() {
        assert_eq!(tokenize(b"=\xff\xfe;"), Err(ArgError::NotUtf8));
    }

    #[test]
    fn test_spaces_survive_tokenizing() {
        // values are not trimmed; numeric parsing downstream skips the blanks
        let args = tokenize(b"= 200 , 23;").unwrap();
        assert_eq!(args.as_slice(), &[" 200 ", " 23"]);
    }
}
