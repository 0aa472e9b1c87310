use crate::{
    error::RuntimeError,
    interpreter::value::{big_float, core::Value},
    util::num::{SHORTEST_EXPONENT_THRESHOLD, f64_decimal_digits, layout_fixed, layout_general, radix_digits},
};

/// An output base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Base {
    /// Base 2 with a `0b` prefix.
    Binary,
    /// Base 8 with a `0` prefix.
    Octal,
    /// Base 10, no prefix.
    #[default]
    Decimal,
    /// Base 16 with a `0x` prefix.
    Hexadecimal,
    /// Base 2 without a prefix.
    BareBinary,
}

impl Base {
    /// The numeric radix digits are rendered in.
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::Binary | Self::BareBinary => 2,
            Self::Octal => 8,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// The prefix written in front of integer digits.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Octal => "0",
            Self::Decimal | Self::BareBinary => "",
            Self::Hexadecimal => "0x",
        }
    }

    /// The float layout associated with the base.
    #[must_use]
    pub const fn float_format(self) -> FloatFormat {
        match self {
            Self::Octal | Self::Decimal => FloatFormat::General,
            Self::Binary | Self::Hexadecimal | Self::BareBinary => FloatFormat::Fixed,
        }
    }

    /// Maps a `print` format letter to a base.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::value::format::Base;
    ///
    /// assert_eq!(Base::from_letter('x'), Some(Base::Hexadecimal));
    /// assert_eq!(Base::from_letter('q'), None);
    /// ```
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'b' => Some(Self::Binary),
            'o' => Some(Self::Octal),
            'd' => Some(Self::Decimal),
            'x' => Some(Self::Hexadecimal),
            't' => Some(Self::BareBinary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.radix())
    }
}

/// How float digits are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatFormat {
    /// Positional for moderate exponents, scientific otherwise.
    General,
    /// Always positional.
    Fixed,
}

/// Options controlling [`Value::format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// The output base.
    pub base:   Base,
    /// Render integer bytes as a dotted byte string instead of digits.
    pub packed: bool,
}

impl FormatOptions {
    /// Creates options for the given base, packed mode off.
    #[must_use]
    pub const fn with_base(base: Base) -> Self {
        Self { base,
               packed: false }
    }
}

impl Value {
    /// Renders the value according to `options`.
    ///
    /// Integers get the base prefix, with the sign in front of it. Floats
    /// never get a prefix and are laid out in the base's float format.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::value::{core::Value,
    ///                                    format::{Base, FormatOptions}};
    ///
    /// let hex = FormatOptions::with_base(Base::Hexadecimal);
    /// assert_eq!(Value::Int64(-42).format(hex), "-0x2a");
    ///
    /// let packed = FormatOptions { base:   Base::Decimal,
    ///                              packed: true, };
    /// assert_eq!(Value::Int32(0x4142_0043).format(packed), "AB.C");
    /// ```
    #[must_use]
    pub fn format(&self, options: FormatOptions) -> String {
        if options.packed
           && let Some(bytes) = self.integer_bytes()
        {
            return packed_string(&bytes);
        }

        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int8(v) => format_integer(i64::from(*v), options.base),
            Self::Int16(v) => format_integer(i64::from(*v), options.base),
            Self::Int32(v) => format_integer(i64::from(*v), options.base),
            Self::Int64(v) => format_integer(*v, options.base),
            Self::Float64(f) => format_f64(*f, options.base.float_format()),
            Self::BigFloat(f) => big_float::to_text(f, options.base.float_format()),
        }
    }

    /// Decomposes the value into its character representations.
    ///
    /// The value is converted to a 32-bit code point first.
    pub fn character_info(&self) -> Result<CharacterInfo, RuntimeError> {
        Ok(CharacterInfo { code_point: self.as_i32()? })
    }

    /// Big-endian bytes of an integer payload at its native width.
    fn integer_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Int8(v) => Some(v.to_be_bytes().to_vec()),
            Self::Int16(v) => Some(v.to_be_bytes().to_vec()),
            Self::Int32(v) => Some(v.to_be_bytes().to_vec()),
            Self::Int64(v) => Some(v.to_be_bytes().to_vec()),
            Self::Bool(_) | Self::Float64(_) | Self::BigFloat(_) => None,
        }
    }
}

fn format_integer(value: i64, base: Base) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}{}", base.prefix(), radix_digits(value.unsigned_abs(), base.radix()))
}

fn format_f64(value: f64, format: FloatFormat) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-Inf" } else { "+Inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let (digits, dp) = f64_decimal_digits(value);
    let body = match format {
        FloatFormat::General => layout_general(&digits, dp, SHORTEST_EXPONENT_THRESHOLD),
        FloatFormat::Fixed => layout_fixed(&digits, dp),
    };
    if value < 0.0 { format!("-{body}") } else { body }
}

/// Renders bytes as a dotted byte string.
///
/// Leading zero bytes are skipped, zero bytes between non-zero bytes become
/// `.` and trailing zero bytes are dropped. Non-zero bytes are taken as
/// Latin-1 characters.
///
/// # Example
/// ```
/// use progcalc::interpreter::value::format::packed_string;
///
/// assert_eq!(packed_string(&[0, 0, b'h', b'i', 0, b'x', 0]), "hi.x");
/// assert_eq!(packed_string(&[0, 0]), "");
/// ```
#[must_use]
pub fn packed_string(bytes: &[u8]) -> String {
    let Some(first) = bytes.iter().position(|&b| b != 0) else {
        return String::new();
    };
    let last = bytes.iter().rposition(|&b| b != 0).unwrap_or(first);

    bytes[first..=last].iter()
                       .map(|&b| if b == 0 { '.' } else { char::from(b) })
                       .collect()
}

/// The character representations of a code point, as shown by `print /c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterInfo {
    /// The code point.
    pub code_point: i32,
}

impl CharacterInfo {
    /// The decimal code point.
    #[must_use]
    pub fn decimal(&self) -> String {
        self.code_point.to_string()
    }

    /// The escape form: `\uXXXX` inside the basic plane, `\UXXXXXXXX`
    /// otherwise.
    #[must_use]
    pub fn unicode_escape(&self) -> String {
        #[allow(clippy::cast_sign_loss)]
        let bits = self.code_point as u32;
        if bits <= 0xffff {
            format!("\\u{bits:04x}")
        } else {
            format!("\\U{bits:08x}")
        }
    }

    /// The character itself when it is printable, `{unprintable}`
    /// otherwise.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::value::format::CharacterInfo;
    ///
    /// assert_eq!(CharacterInfo { code_point: 65 }.symbol(), "A");
    /// assert_eq!(CharacterInfo { code_point: 10 }.symbol(), "{unprintable}");
    /// ```
    #[must_use]
    pub fn symbol(&self) -> String {
        u32::try_from(self.code_point).ok()
                                      .and_then(char::from_u32)
                                      .filter(|c| is_printable(*c))
                                      .map_or_else(|| "{unprintable}".to_string(), String::from)
    }
}

fn is_printable(c: char) -> bool {
    c == ' ' || !(c.is_control() || c.is_whitespace())
}
