pub(crate) mod xml;

use crate::errors::FormatError;
use std::error::Error;

pub(crate) type ParserResult<T> = Result<T, FormatError>;

pub(crate) fn unparsable(error: impl Error + Send + Sync + 'static) -> FormatError {
    FormatError::Unparsable(Box::new(error))
}
