//! User intents.
//!
//! The rendering layer turns clicks or typed commands into an [`Intent`] and
//! hands it to [`Storefront::dispatch`](crate::state::Storefront::dispatch).

use std::str::FromStr;

use simple_shop_core::{ParseSortOrderError, ProductId, SortOrder};
use thiserror::Error;

/// A request to change storefront state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SortByPrice(SortOrder),
    PreviousPage,
    NextPage,
    GoToPage(usize),
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    ClearCart,
}

/// Errors from parsing a typed command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{command}: invalid {expected} {value:?}")]
    InvalidArgument {
        command: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{command} takes no arguments")]
    UnexpectedArgument { command: &'static str },

    #[error("{command} takes a single argument")]
    TooManyArguments { command: &'static str },

    #[error(transparent)]
    SortOrder(#[from] ParseSortOrderError),
}

impl FromStr for Intent {
    type Err = ParseIntentError;

    /// Parse commands like `sort asc`, `next`, `page 2`, `add 3`, `clear`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(ParseIntentError::Empty)?;
        let argument = Argument {
            value: words.next(),
            extra: words.next().is_some(),
        };

        match command.to_ascii_lowercase().as_str() {
            "sort" => {
                let order = argument.required("sort", "asc or desc")?;
                Ok(Self::SortByPrice(order.parse()?))
            }
            "prev" | "previous" => argument.none("prev", Self::PreviousPage),
            "next" => argument.none("next", Self::NextPage),
            "page" => {
                let value = argument.required("page", "a page number")?;
                value
                    .parse()
                    .map(Self::GoToPage)
                    .map_err(|_| invalid("page", "page number", value))
            }
            "add" => {
                let value = argument.required("add", "a product id")?;
                value
                    .parse()
                    .map(Self::AddToCart)
                    .map_err(|_| invalid("add", "product id", value))
            }
            "remove" => {
                let value = argument.required("remove", "a product id")?;
                value
                    .parse()
                    .map(Self::RemoveFromCart)
                    .map_err(|_| invalid("remove", "product id", value))
            }
            "clear" => argument.none("clear", Self::ClearCart),
            _ => Err(ParseIntentError::UnknownCommand(command.to_string())),
        }
    }
}

/// The words after the command name.
struct Argument<'a> {
    value: Option<&'a str>,
    extra: bool,
}

impl<'a> Argument<'a> {
    fn required(
        &self,
        command: &'static str,
        expected: &'static str,
    ) -> Result<&'a str, ParseIntentError> {
        if self.extra {
            return Err(ParseIntentError::TooManyArguments { command });
        }
        self.value
            .ok_or(ParseIntentError::MissingArgument { command, expected })
    }

    fn none(&self, command: &'static str, intent: Intent) -> Result<Intent, ParseIntentError> {
        match self.value {
            Some(_) => Err(ParseIntentError::UnexpectedArgument { command }),
            None => Ok(intent),
        }
    }
}

fn invalid(command: &'static str, expected: &'static str, value: &str) -> ParseIntentError {
    ParseIntentError::InvalidArgument {
        command,
        expected,
        value: value.to_string(),
    }
}
