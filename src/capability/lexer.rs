//! Logos-based lexer for capability-file lines
//!
//! The capability file is XML-shaped but is consumed one line at a time.
//! Only two line shapes carry data:
//!
//! ```text
//! <device id="nokia_n96_ver1" user_agent="NokiaN96-1" fall_back="nokia_generic_series60">
//! <capability name="model_name" value="N96"/>
//! ```
//!
//! Everything else (group tags, closing tags, comments, stray text) lexes to
//! tokens that [`parse_line`] ignores.

use logos::Logos;

/// A token with its kind, text, and byte offset in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Token kinds produced by [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    DeviceOpen,
    CapabilityOpen,
    OtherTag,
    Name,
    Eq,
    Quoted,
    SelfClose,
    Close,
    Error,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
            offset: self.inner.span().start,
        })
    }
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    #[token("<device")]
    DeviceOpen,

    #[token("<capability")]
    CapabilityOpen,

    // <devices>, <group ...>, </device>, <!-- ... and friends
    #[regex(r"</?[A-Za-z_!?][^\s>/]*")]
    OtherTag,

    #[regex(r"[A-Za-z_][A-Za-z0-9_:.\-]*")]
    Name,

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Quoted,

    #[token("/>")]
    SelfClose,

    #[token(">")]
    Close,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::DeviceOpen => TokenKind::DeviceOpen,
            LogosToken::CapabilityOpen => TokenKind::CapabilityOpen,
            LogosToken::OtherTag => TokenKind::OtherTag,
            LogosToken::Name => TokenKind::Name,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Quoted => TokenKind::Quoted,
            LogosToken::SelfClose => TokenKind::SelfClose,
            LogosToken::Close => TokenKind::Close,
        }
    }
}

/// Tokenize an entire line into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// A data-carrying line, with raw (not yet normalized) attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRecord {
    Device {
        id: String,
        user_agent: String,
        fall_back: String,
        actual_device_root: bool,
    },
    Capability {
        name: String,
        value: String,
    },
}

/// Parse one line. Returns `None` for anything that is not a complete
/// device-open or capability line.
///
/// Attributes may appear in any order; unknown attributes are ignored.
pub fn parse_line(line: &str) -> Option<LineRecord> {
    let mut tokens = Lexer::new(line).skip_while(|t| {
        !matches!(t.kind, TokenKind::DeviceOpen | TokenKind::CapabilityOpen)
    });
    let open = tokens.next()?.kind;
    let attributes = collect_attributes(tokens);
    let attribute = |name: &str| {
        attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| (*v).to_string())
    };

    match open {
        TokenKind::DeviceOpen => Some(LineRecord::Device {
            id: attribute("id")?,
            user_agent: attribute("user_agent")?,
            fall_back: attribute("fall_back")?,
            actual_device_root: attribute("actual_device_root").is_some_and(|v| v == "true"),
        }),
        TokenKind::CapabilityOpen => Some(LineRecord::Capability {
            name: attribute("name")?,
            value: attribute("value")?,
        }),
        _ => None,
    }
}

/// Collect `name="value"` pairs up to the end of the tag.
fn collect_attributes<'a>(tokens: impl Iterator<Item = Token<'a>>) -> Vec<(&'a str, &'a str)> {
    let mut attributes = Vec::new();
    let mut pending: Option<&'a str> = None;
    let mut saw_eq = false;

    for token in tokens {
        match token.kind {
            TokenKind::Name => {
                pending = Some(token.text);
                saw_eq = false;
            }
            TokenKind::Eq if pending.is_some() => saw_eq = true,
            TokenKind::Quoted if saw_eq => {
                if let Some(name) = pending.take() {
                    attributes.push((name, &token.text[1..token.text.len() - 1]));
                }
                saw_eq = false;
            }
            TokenKind::Close | TokenKind::SelfClose => break,
            _ => {
                pending = None;
                saw_eq = false;
            }
        }
    }
    attributes
}
