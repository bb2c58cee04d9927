/// Printf-style template scanning and scalar verb formatting.
///
/// Supported directive shape: `%[flags][width][.precision]verb` with flags
/// `-+# 0`. `%%` is a literal percent and consumes no argument. A trailing
/// lone `%`, or one whose flags run into another `%`, is kept as literal text.

use crate::args::Arg;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub minus: bool,
    pub plus: bool,
    pub sharp: bool,
    pub space: bool,
    pub zero: bool,
}

/// One parsed `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub verb: char,
}

impl Directive {
    /// `%v` without `#` is the generic value verb that may carry attributes.
    pub fn is_generic(&self) -> bool {
        self.verb == 'v' && !self.flags.sharp
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Literal(&'a str),
    Percent,
    Directive(Directive),
}

/// Split a template into literal runs and directives, in order.
pub fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        if start > literal_start {
            out.push(Piece::Literal(&template[literal_start..start]));
        }

        let mut flags = Flags::default();
        while let Some(&(_, f)) = chars.peek() {
            match f {
                '-' => flags.minus = true,
                '+' => flags.plus = true,
                '#' => flags.sharp = true,
                ' ' => flags.space = true,
                '0' => flags.zero = true,
                _ => break,
            }
            chars.next();
        }

        let width = take_number(&mut chars);
        let precision = match chars.peek() {
            Some(&(_, '.')) => {
                chars.next();
                Some(take_number(&mut chars).unwrap_or(0))
            }
            _ => None,
        };

        match chars.peek().copied() {
            Some((end, '%')) if end == start + 1 => {
                chars.next();
                out.push(Piece::Percent);
                literal_start = end + 1;
            }
            Some((_, '%')) => {
                // flags or width with no verb stay literal; the next `%` starts afresh
                literal_start = start;
            }
            Some((end, verb)) => {
                chars.next();
                out.push(Piece::Directive(Directive { flags, width, precision, verb }));
                literal_start = end + verb.len_utf8();
            }
            None => {
                out.push(Piece::Literal(&template[start..]));
                literal_start = template.len();
            }
        }
    }

    if literal_start < template.len() {
        out.push(Piece::Literal(&template[literal_start..]));
    }
    out
}

fn take_number<I>(chars: &mut std::iter::Peekable<I>) -> Option<usize>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut number: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        number = Some(number.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    number
}

/// Format a scalar argument for one directive.
pub fn format_arg(directive: &Directive, arg: &Arg) -> String {
    let flags = directive.flags;
    let body = match (directive.verb, arg) {
        ('d', Arg::Int(i)) => signed(i.to_string(), *i >= 0, flags),
        ('d', Arg::Uint(u)) => signed(u.to_string(), true, flags),
        ('d', Arg::Float(f)) => signed(format!("{}", f.trunc()), *f >= 0.0, flags),
        ('f' | 'F', _) => match as_float(arg) {
            Some(f) => signed(
                format!("{:.*}", directive.precision.unwrap_or(6), f),
                f >= 0.0,
                flags,
            ),
            None => arg.to_string(),
        },
        ('x', Arg::Int(i)) => format!("{:x}", i),
        ('x', Arg::Uint(u)) => format!("{:x}", u),
        ('X', Arg::Int(i)) => format!("{:X}", i),
        ('X', Arg::Uint(u)) => format!("{:X}", u),
        ('x', Arg::Str(s)) => hex(s.as_bytes(), false),
        ('X', Arg::Str(s)) => hex(s.as_bytes(), true),
        ('x', Arg::Bytes(b)) => hex(b, false),
        ('X', Arg::Bytes(b)) => hex(b, true),
        ('q', Arg::Str(s) | Arg::Error(s)) => format!("{:?}", s),
        ('s' | 'v', _) => truncate(arg.to_string(), directive.precision),
        _ => arg.to_string(),
    };
    pad(body, directive)
}

fn as_float(arg: &Arg) -> Option<f64> {
    match arg {
        Arg::Float(f) => Some(*f),
        Arg::Int(i) => Some(*i as f64),
        Arg::Uint(u) => Some(*u as f64),
        _ => None,
    }
}

fn signed(body: String, non_negative: bool, flags: Flags) -> String {
    if non_negative && flags.plus {
        format!("+{}", body)
    } else if non_negative && flags.space {
        format!(" {}", body)
    } else {
        body
    }
}

fn hex(bytes: &[u8], upper: bool) -> String {
    bytes
        .iter()
        .map(|b| if upper { format!("{:02X}", b) } else { format!("{:02x}", b) })
        .collect()
}

fn truncate(body: String, precision: Option<usize>) -> String {
    match precision {
        Some(n) if body.chars().count() > n => body.chars().take(n).collect(),
        _ => body,
    }
}

fn pad(body: String, directive: &Directive) -> String {
    let Some(width) = directive.width else { return body };
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let fill = width - len;
    if directive.flags.minus {
        format!("{}{}", body, " ".repeat(fill))
    } else if directive.flags.zero && matches!(directive.verb, 'd' | 'f' | 'F' | 'x' | 'X') {
        match body.strip_prefix(['-', '+']) {
            Some(digits) => format!("{}{}{}", &body[..1], "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), body),
        }
    } else {
        format!("{}{}", " ".repeat(fill), body)
    }
}
