use clusterset_dns_domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    line: usize,
}

/// Cursor over the tokens of a Corefile-style directive block.
///
/// Tokens are whitespace separated; double quotes group text and `#` starts
/// a comment running to the end of the line. `{` and `}` open and close a
/// block when they stand alone.
#[derive(Debug, Clone)]
pub struct Dispenser {
    tokens: Vec<Token>,
    cursor: Option<usize>,
    nesting: usize,
}

impl Dispenser {
    pub fn new(input: &str) -> Self {
        Self {
            tokens: tokenize(input),
            cursor: None,
            nesting: 0,
        }
    }

    /// Advances to the next token. Returns false at the end of input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.tokens.len() {
            self.cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// Text of the current token, or "" before the first `next`.
    pub fn val(&self) -> &str {
        self.current().map_or("", |t| t.text.as_str())
    }

    /// Line of the current token.
    pub fn line(&self) -> usize {
        self.current().map_or(0, |t| t.line)
    }

    /// Advances only if the next token is on the current line.
    pub fn next_arg(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return self.next();
        };
        match self.tokens.get(cursor + 1) {
            Some(next) if next.line == self.tokens[cursor].line => {
                self.cursor = Some(cursor + 1);
                true
            }
            _ => false,
        }
    }

    /// Consumes and returns the rest of the current line, stopping before
    /// an opening brace.
    pub fn remaining_args(&mut self) -> Vec<String> {
        let mut args = Vec::new();
        while self.peek_same_line().is_some_and(|t| t.text != "{") {
            self.next_arg();
            args.push(self.val().to_string());
        }
        args
    }

    /// Steps into or through a `{ ... }` block that opens on the current
    /// line. Returns true while positioned on a directive inside the block.
    /// Running out of input before the closing brace is an error.
    pub fn next_block(&mut self) -> Result<bool, DomainError> {
        if self.nesting > 0 {
            if !self.next() {
                return Err(self.errf("unexpected end of input, missing '}'"));
            }
            if self.val() == "}" {
                self.nesting -= 1;
                return Ok(false);
            }
            return Ok(true);
        }

        if !self.peek_same_line().is_some_and(|t| t.text == "{") {
            return Ok(false);
        }
        self.next_arg();
        if !self.next() {
            return Err(self.errf("unexpected end of input, missing '}'"));
        }
        if self.val() == "}" {
            return Ok(false);
        }
        self.nesting += 1;
        Ok(true)
    }

    /// Wrong argument count for the current directive.
    pub fn arg_err(&self) -> DomainError {
        DomainError::ArgumentCount {
            directive: self.val().to_string(),
            line: self.line(),
        }
    }

    pub fn errf(&self, message: impl Into<String>) -> DomainError {
        DomainError::Parse {
            message: message.into(),
            line: self.line(),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.cursor.and_then(|c| self.tokens.get(c))
    }

    fn peek_same_line(&self) -> Option<&Token> {
        let cursor = self.cursor?;
        let line = self.tokens[cursor].line;
        self.tokens.get(cursor + 1).filter(|t| t.line == line)
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let mut chars = raw_line.chars();
        let mut current = String::new();
        let mut quoted = false;
        let mut in_token = false;

        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    quoted = !quoted;
                    in_token = true;
                }
                '\\' if quoted => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                '#' if !quoted && !in_token => break,
                c if c.is_whitespace() && !quoted => {
                    if in_token {
                        tokens.push(Token {
                            text: std::mem::take(&mut current),
                            line,
                        });
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            }
        }
        if in_token {
            tokens.push(Token {
                text: current,
                line,
            });
        }
    }
    tokens
}
