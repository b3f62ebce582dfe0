//! printf-style molecule ID templates such as `gene%05d`
use crate::error::{Result, SmrError};

pub const DEFAULT_ID_FORMAT: &str = "gene%05d";

/// A molecule ID template with exactly one integer placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTemplate {
    prefix: String,
    suffix: String,
    width: usize,
    zero_pad: bool,
}

impl IdTemplate {
    /// Parse a template; accepts `%d`, `%i` and `%u` with an optional `0`
    /// flag and width, and `%%` as a literal percent sign
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| SmrError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<(usize, bool)> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = if spec.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }
            if spec.is_some() {
                return Err(invalid("more than one conversion"));
            }

            let zero_pad = chars.peek() == Some(&'0');
            if zero_pad {
                chars.next();
            }
            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse::<usize>().map_err(|_| invalid("field width too large"))?
            };
            match chars.next() {
                Some('d') | Some('i') | Some('u') => spec = Some((width, zero_pad)),
                Some(_) => return Err(invalid("only integer conversions (%d, %i, %u) are supported")),
                None => return Err(invalid("incomplete conversion at end of format")),
            }
        }

        let (width, zero_pad) = spec.ok_or_else(|| invalid("no integer conversion found"))?;
        Ok(IdTemplate { prefix, suffix, width, zero_pad })
    }

    /// Render the molecule ID for `index`
    pub fn render(&self, index: u64) -> String {
        let number = if self.zero_pad {
            format!("{:0width$}", index, width = self.width)
        } else {
            format!("{:>width$}", index, width = self.width)
        };
        format!("{}{}{}", self.prefix, number, self.suffix)
    }
}

impl Default for IdTemplate {
    fn default() -> Self {
        IdTemplate {
            prefix: "gene".to_string(),
            suffix: String::new(),
            width: 5,
            zero_pad: true,
        }
    }
}
