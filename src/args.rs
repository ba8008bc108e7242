use std::collections::{hash_map::Entry, HashMap};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::errors::ParseError;

/// Leading character of a token that can only be an option
const OPTION_PREFIX: char = '-';
/// Splits `name=value` into the option name and its attached parameter
const VALUE_SEPARATOR: char = '=';

mod private {
    pub trait Sealed {}
}

/// Numeric types a value option can bind to.
///
/// Values are converted with [`FromStr`], so the whole token has to be a
/// literal of the target type: `"12"` binds to a `u8`, `"12 "`, `" 12"` and
/// `"12px"` do not.
pub trait Numeric: FromStr + private::Sealed {}

macro_rules! numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}
            impl Numeric for $ty {}
        )*
    };
}

numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Numeric destination with the concrete type erased
pub trait NumericSlot {
    /// Returns false and leaves the destination alone if `raw` is not a
    /// valid literal
    fn assign(&mut self, raw: &str) -> bool;
}

impl<T: Numeric> NumericSlot for T {
    fn assign(&mut self, raw: &str) -> bool {
        match raw.parse::<T>() {
            Ok(value) => {
                *self = value;
                true
            }
            Err(_) => false,
        }
    }
}

/// Writes the parameters of a matched option into its destination
pub enum Binder<'a> {
    Numeric(&'a mut dyn NumericSlot),
    Text(&'a mut String),
    Switch { destination: &'a mut bool, enable: bool },
}

impl Binder<'_> {
    fn arity(&self) -> usize {
        match self {
            Binder::Switch { .. } => 0,
            Binder::Numeric(_) | Binder::Text(_) => 1,
        }
    }

    fn apply(&mut self, option: &str, params: &[String]) -> Result<(), ParseError> {
        match self {
            Binder::Switch {
                destination,
                enable,
            } => {
                **destination = *enable;
                Ok(())
            }
            Binder::Numeric(destination) => {
                let value = single(option, params)?;
                if destination.assign(value) {
                    Ok(())
                } else {
                    Err(ParseError::InvalidOptionValue {
                        option: option.to_owned(),
                        value: value.to_owned(),
                    })
                }
            }
            Binder::Text(destination) => {
                **destination = single(option, params)?.to_owned();
                Ok(())
            }
        }
    }
}

fn single<'p>(option: &str, params: &'p [String]) -> Result<&'p str, ParseError> {
    match params {
        [value] => Ok(value.as_str()),
        _ => Err(ParseError::ArityMismatch {
            option: option.to_owned(),
            required: 1,
            found: params.len(),
        }),
    }
}

/// A caller-owned location a value option writes into: any [`Numeric`] or a
/// [`String`].
pub trait Destination<'a> {
    #[doc(hidden)]
    fn into_binder(self) -> Binder<'a>;
}

impl<'a, T: Numeric> Destination<'a> for &'a mut T {
    fn into_binder(self) -> Binder<'a> {
        Binder::Numeric(self)
    }
}

impl<'a> Destination<'a> for &'a mut String {
    fn into_binder(self) -> Binder<'a> {
        Binder::Text(self)
    }
}

struct Opt<'a> {
    /// Number of parameter tokens consumed after the option
    arity: usize,
    /// Description of the option
    description: Option<String>,
    binder: Binder<'a>,
}

impl Opt<'_> {
    fn bind(&mut self, name: &str, params: &[String]) -> Result<(), ParseError> {
        if params.len() != self.arity {
            return Err(ParseError::ArityMismatch {
                option: name.to_owned(),
                required: self.arity,
                found: params.len(),
            });
        }
        debug!(option = name, ?params, "matched option");
        self.binder.apply(name, params)
    }
}

enum Remaining<'a> {
    Single {
        destination: &'a mut String,
        filled: bool,
    },
    Many(&'a mut Vec<String>),
}

enum Token<'t> {
    /// Exact registered name, parameters follow as separate tokens
    Option(&'t str),
    /// `name=value` with a registered name
    Attached(&'t str, &'t str),
    /// Anything else, routed to the remaining-argument sink
    Plain,
}

/// Registry of options bound to caller-owned destinations.
///
/// Destinations are borrowed for `'a` and written while [`Parser::parse`]
/// runs. Writes are not rolled back when a later token fails, so after an
/// error the destinations may hold a mix of old and new values.
///
/// Registering a name twice replaces the first registration.
#[derive(Default)]
pub struct Parser<'a> {
    options: HashMap<String, Opt<'a>>,
    remaining: Option<Remaining<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option taking one parameter, either as the next token
    /// (`name value`) or attached (`name=value`).
    pub fn add_option<D: Destination<'a>>(&mut self, name: impl Into<String>, destination: D) {
        self.insert(name.into(), destination.into_binder());
    }

    /// Registers an option without parameters that stores `enable` when
    /// present.
    pub fn add_switch(
        &mut self,
        name: impl Into<String>,
        destination: &'a mut bool,
        enable: bool,
    ) {
        self.insert(
            name.into(),
            Binder::Switch {
                destination,
                enable,
            },
        );
    }

    /// Collects exactly one unmatched token. A second one is an error.
    ///
    /// Replaces any previously registered sink.
    pub fn remaining_argument(&mut self, destination: &'a mut String) {
        self.set_remaining(Remaining::Single {
            destination,
            filled: false,
        });
    }

    /// Appends every unmatched token, in input order.
    ///
    /// Replaces any previously registered sink.
    pub fn remaining_arguments(&mut self, destination: &'a mut Vec<String>) {
        self.set_remaining(Remaining::Many(destination));
    }

    /// Attaches a description to a registered option. Returns false if
    /// `name` is not registered.
    pub fn describe(&mut self, name: &str, description: impl Into<String>) -> bool {
        match self.options.get_mut(name) {
            Some(opt) => {
                opt.description = Some(description.into());
                true
            }
            None => false,
        }
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.options.get(name)?.description.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.options.get(name).map(|opt| opt.arity)
    }

    /// Parses `tokens`, which must not include the program name.
    ///
    /// A token refers to an option when it is a registered name, or
    /// `name=value` with a registered name. Any other token starting with
    /// `-` is an unknown option. Everything else goes to the
    /// remaining-argument sink, so options and plain tokens can be mixed
    /// freely.
    pub fn parse<I, S>(mut self, tokens: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_str();
            i += 1;

            match self.classify(token)? {
                Token::Option(name) => {
                    let opt = self.lookup(name)?;
                    let params: Vec<String> = tokens[i..]
                        .iter()
                        .take_while(|param| !param.starts_with(OPTION_PREFIX))
                        .take(opt.arity)
                        .cloned()
                        .collect();
                    i += params.len();
                    opt.bind(name, &params)?;
                }
                Token::Attached(name, value) => {
                    let opt = self.lookup(name)?;
                    // `name=` has no parameter at all
                    let params = if value.is_empty() {
                        Vec::new()
                    } else {
                        vec![value.to_owned()]
                    };
                    opt.bind(name, &params)?;
                }
                Token::Plain => self.collect_remaining(token)?,
            }
        }

        Ok(())
    }

    fn insert(&mut self, name: String, binder: Binder<'a>) {
        let opt = Opt {
            arity: binder.arity(),
            description: None,
            binder,
        };
        match self.options.entry(name) {
            Entry::Occupied(mut entry) => {
                debug!(option = %entry.key(), "replacing registered option");
                entry.insert(opt);
            }
            Entry::Vacant(entry) => {
                entry.insert(opt);
            }
        }
    }

    fn set_remaining(&mut self, remaining: Remaining<'a>) {
        if self.remaining.is_some() {
            debug!("replacing remaining-argument sink");
        }
        self.remaining = Some(remaining);
    }

    fn classify<'t>(&self, token: &'t str) -> Result<Token<'t>, ParseError> {
        if self.options.contains_key(token) {
            trace!(token, "option");
            return Ok(Token::Option(token));
        }
        let split = token.split_once(VALUE_SEPARATOR);
        if let Some((name, value)) = split {
            if self.options.contains_key(name) {
                trace!(token, "option with attached value");
                return Ok(Token::Attached(name, value));
            }
        }
        if token.starts_with(OPTION_PREFIX) {
            let name = split.map_or(token, |(name, _)| name);
            return Err(ParseError::UnknownOption(name.to_owned()));
        }
        trace!(token, "plain argument");
        Ok(Token::Plain)
    }

    fn lookup(&mut self, name: &str) -> Result<&mut Opt<'a>, ParseError> {
        self.options
            .get_mut(name)
            .ok_or_else(|| ParseError::UnknownOption(name.to_owned()))
    }

    fn collect_remaining(&mut self, token: &str) -> Result<(), ParseError> {
        match &mut self.remaining {
            None | Some(Remaining::Single { filled: true, .. }) => {
                Err(ParseError::UnexpectedArgument(token.to_owned()))
            }
            Some(Remaining::Single {
                destination,
                filled,
            }) => {
                debug!(token, "remaining argument");
                **destination = token.to_owned();
                *filled = true;
                Ok(())
            }
            Some(Remaining::Many(destination)) => {
                debug!(token, "remaining argument");
                destination.push(token.to_owned());
                Ok(())
            }
        }
    }
}
