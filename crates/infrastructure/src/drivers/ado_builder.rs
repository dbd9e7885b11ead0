//! ADO.NET-style connection strings (`Key=Value;Key=Value`)
//!
//! Keys are case-insensitive and keep their first spelling. Values may be
//! wrapped in single or double quotes to carry `;`; a doubled quote inside a
//! quoted value stands for one quote character.

use application::ports::{ConnectionStringBuilder, DriverError};

/// Connection-string builder for SQL Server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdoConnectionStringBuilder {
    options: Vec<(String, String)>,
}

impl AdoConnectionStringBuilder {
    /// Create an empty builder
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

fn parse(connection_string: &str) -> Result<Vec<(String, String)>, DriverError> {
    let mut options = Vec::new();
    let mut rest = connection_string.trim_start();

    while !rest.is_empty() {
        let Some((key, after_key)) = rest.split_once('=') else {
            if rest.trim().trim_matches(';').is_empty() {
                break;
            }
            return Err(DriverError::InvalidConnectionString(format!(
                "missing '=' in '{}'",
                rest.trim()
            )));
        };
        let key = key.trim().trim_start_matches(';').trim();
        if key.is_empty() {
            return Err(DriverError::InvalidConnectionString(
                "empty option name".to_string(),
            ));
        }
        if key.contains(';') {
            return Err(DriverError::InvalidConnectionString(format!(
                "invalid option name '{key}'"
            )));
        }

        let after_key = after_key.trim_start();
        let (value, remainder) = match after_key.chars().next() {
            Some(quote @ ('"' | '\'')) => read_quoted(&after_key[1..], quote)?,
            _ => match after_key.split_once(';') {
                Some((value, remainder)) => (value.trim().to_string(), remainder),
                None => (after_key.trim().to_string(), ""),
            },
        };

        match options
            .iter_mut()
            .find(|entry: &&mut (String, String)| entry.0.eq_ignore_ascii_case(key))
        {
            Some(existing) => existing.1 = value,
            None => options.push((key.to_string(), value)),
        }
        rest = remainder.trim_start();
    }

    Ok(options)
}

fn read_quoted(input: &str, quote: char) -> Result<(String, &str), DriverError> {
    let mut value = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != quote {
            value.push(c);
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == quote) {
            chars.next();
            value.push(quote);
            continue;
        }
        let remainder = input[i + c.len_utf8()..].trim_start();
        let remainder = remainder.strip_prefix(';').unwrap_or(remainder);
        return Ok((value, remainder));
    }

    Err(DriverError::InvalidConnectionString(
        "unterminated quoted value".to_string(),
    ))
}

fn render_value(value: &str) -> String {
    let needs_quotes = value.contains(';')
        || value.starts_with(['"', '\''])
        || value.trim() != value;
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl ConnectionStringBuilder for AdoConnectionStringBuilder {
    fn set_connection_string(&mut self, connection_string: &str) -> Result<(), DriverError> {
        self.options = parse(connection_string)?;
        Ok(())
    }

    fn connection_string(&self) -> String {
        self.options
            .iter()
            .map(|(k, v)| format!("{k}={}", render_value(v)))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn get(&self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.options[i].1.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DriverError> {
        let key = key.trim();
        if key.is_empty() || key.contains(['=', ';']) {
            return Err(DriverError::InvalidConnectionString(format!(
                "invalid option name '{key}'"
            )));
        }
        match self.position(key) {
            Some(i) => self.options[i].1 = value.to_string(),
            None => self.options.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(i) => {
                self.options.remove(i);
                true
            },
            None => false,
        }
    }
}
