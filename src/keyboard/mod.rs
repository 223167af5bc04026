//! Keyboard events and key names.
//!
//! Key names are lowercase strings such as `shift`, `numpad0` or `a`.
//! Names coming from other sources (stored configuration, platform hooks)
//! go through [`normalize`] before being compared.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag_no_case},
    character::complete::char,
    combinator::{opt, rest},
    sequence::delimited,
    IResult,
};

use std::sync::Arc;

mod error;
pub use error::Error;

pub mod hook;
pub use hook::GlobalHook;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyEvent {
    Down(Arc<str>),
    Up(Arc<str>),
}

/// A source of global key events.
///
/// Events can be delivered from any thread. They are pushed to the `sink`
/// until `uninstall` is called.
pub trait KeyEventSource {
    fn install(&mut self, sink: flume::Sender<KeyEvent>) -> Result<(), Error>;
    fn uninstall(&mut self);
}

fn key_name(i: &str) -> IResult<&str, &str> {
    let (i, _) = opt(tag_no_case("key."))(i)?;
    alt((delimited(char('\''), is_not("'"), char('\'')), rest))(i)
}

/// Returns the canonical form of a raw key name.
///
/// The name is lowercased, stripped of the `Key.` prefix and
/// of the quotes around character keys.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    let name = match key_name(raw) {
        Ok((_, name)) => name,
        Err(_) => raw,
    };

    name.trim().to_lowercase()
}
