//! Locale-aware formatting of currency amounts and dates.
//!
//! All formatting is driven by an explicit [FormatConfig] so that the output
//! never depends on the locale of the machine running the server.

use std::{fmt, iter, str::FromStr};

use numfmt::{Formatter, Precision};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, timezone::get_offset_at};

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    /// `R$ 1,00`
    PrefixSpaced,
    /// `$1.00`
    Prefix,
    /// `1,00 €`
    SuffixSpaced,
}

/// The display locales supported by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese, e.g. `R$ 1.000,00` and `20/04/2020`.
    #[default]
    PtBr,
    /// US English, e.g. `$1,000.00` and `4/20/2020`.
    EnUs,
    /// New Zealand English, e.g. `$1,000.00` and `20/04/2020`.
    EnNz,
    /// German, e.g. `1.000,00 €` and `20.4.2020`.
    DeDe,
}

impl Locale {
    /// The BCP 47 tag for the locale.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::EnNz => "en-NZ",
            Locale::DeDe => "de-DE",
        }
    }

    fn thousands_separator(self) -> char {
        match self {
            Locale::PtBr | Locale::DeDe => '.',
            Locale::EnUs | Locale::EnNz => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::PtBr | Locale::DeDe => ',',
            Locale::EnUs | Locale::EnNz => '.',
        }
    }

    fn symbol_placement(self) -> SymbolPlacement {
        match self {
            Locale::PtBr => SymbolPlacement::PrefixSpaced,
            Locale::EnUs | Locale::EnNz => SymbolPlacement::Prefix,
            Locale::DeDe => SymbolPlacement::SuffixSpaced,
        }
    }

    fn date_format(self) -> &'static [BorrowedFormatItem<'static>] {
        match self {
            Locale::PtBr | Locale::EnNz => format_description!("[day]/[month]/[year]"),
            Locale::EnUs => {
                format_description!("[month padding:none]/[day padding:none]/[year]")
            }
            Locale::DeDe => format_description!("[day padding:none].[month padding:none].[year]"),
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Ok(Locale::PtBr),
            "en-us" => Ok(Locale::EnUs),
            "en-nz" => Ok(Locale::EnNz),
            "de-de" => Ok(Locale::DeDe),
            _ => Err(Error::InvalidLocale(tag.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The currencies the dashboard can display amounts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    /// Brazilian real.
    #[default]
    Brl,
    /// United States dollar.
    Usd,
    /// New Zealand dollar.
    Nzd,
    /// Euro.
    Eur,
}

impl Currency {
    /// The ISO 4217 code of the currency.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Nzd => "NZD",
            Currency::Eur => "EUR",
        }
    }

    /// The symbol displayed next to amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd | Currency::Nzd => "$",
            Currency::Eur => "€",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "NZD" => Ok(Currency::Nzd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(Error::InvalidCurrency(code.to_owned())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Controls how amounts and dates are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    locale: Locale,
    currency: Currency,
    timezone: String,
    currency_format: CurrencyFormat,
}

impl FormatConfig {
    /// Create a new format config.
    ///
    /// `timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `timezone` is not a known timezone.
    /// Returns [Error::CurrencyFormat] if the number formatter for `locale`
    /// and `currency` could not be built.
    pub fn new(locale: Locale, currency: Currency, timezone: &str) -> Result<Self, Error> {
        if get_offset_at(timezone, OffsetDateTime::UNIX_EPOCH).is_none() {
            return Err(Error::InvalidTimezone(timezone.to_owned()));
        }

        let currency_format = CurrencyFormat::new(locale, currency)
            .map_err(|error| Error::CurrencyFormat(error.to_string()))?;

        Ok(Self {
            locale,
            currency,
            timezone: timezone.to_owned(),
            currency_format,
        })
    }

    /// The display locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The display currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The canonical timezone name dates are displayed in.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new(Locale::default(), Currency::default(), "Etc/UTC")
            .expect("the default locale, currency and timezone are valid")
    }
}

/// The numfmt formatters for one locale and currency.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrencyFormat {
    positive: Formatter,
    negative: Formatter,
    suffix: String,
    decimal_separator: char,
    zero: String,
}

impl CurrencyFormat {
    fn new(locale: Locale, currency: Currency) -> Result<Self, numfmt::Error> {
        let symbol = currency.symbol();
        let (prefix, suffix) = match locale.symbol_placement() {
            SymbolPlacement::PrefixSpaced => (format!("{symbol} "), String::new()),
            SymbolPlacement::Prefix => (symbol.to_owned(), String::new()),
            SymbolPlacement::SuffixSpaced => (String::new(), format!(" {symbol}")),
        };

        // A '.' separator also switches numfmt to a decimal comma.
        let build = |prefix: &str| -> numfmt::Result {
            Formatter::currency(prefix)?
                .separator(locale.thousands_separator())?
                .precision(Precision::Decimals(2))
                .suffix(&suffix)
        };

        let decimal_separator = locale.decimal_separator();

        Ok(Self {
            positive: build(&prefix)?,
            negative: build(&format!("-{prefix}"))?,
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            zero: format!("{prefix}0{decimal_separator}00{suffix}"),
            suffix,
            decimal_separator,
        })
    }

    /// Format an amount that is already rounded to the cent.
    fn format(&self, amount: f64) -> String {
        if amount == 0.0 {
            return self.zero.clone();
        }

        let formatted = if amount.is_sign_negative() {
            self.negative.fmt_string(amount.abs())
        } else {
            self.positive.fmt_string(amount)
        };

        // numfmt omits the last trailing zero, so we must add it ourselves.
        // For example, "12,30" is rendered as "12,3" so we append "0".
        let number = formatted
            .strip_suffix(self.suffix.as_str())
            .unwrap_or(&formatted);

        if number.chars().rev().nth(1) == Some(self.decimal_separator) {
            format!("{number}0{}", self.suffix)
        } else {
            formatted
        }
    }
}

/// Format `amount` as a currency string, e.g. `1000.0` as "R$ 1.000,00".
///
/// The amount is rounded to the nearest cent, with halves rounded away from
/// zero. Negative amounts are prefixed with a minus sign, unless they round
/// to zero.
pub fn format_currency(amount: f64, config: &FormatConfig) -> String {
    config
        .currency_format
        .format(round_half_away_from_zero(amount))
}

/// Round `amount` to two decimal places, with halves rounded away from zero.
///
/// Rounding works on the shortest decimal representation of `amount`, so
/// `1.005` rounds to `1.01` even though the nearest `f64` is slightly below
/// `1.005`.
fn round_half_away_from_zero(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }

    // `Display` for f64 never uses exponent notation.
    let shortest = amount.abs().to_string();
    let (whole, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<char> = whole
        .chars()
        .chain(fraction.chars().chain(iter::repeat('0')).take(2))
        .collect();

    if fraction.chars().nth(2).is_some_and(|digit| digit >= '5') {
        let mut carry = true;

        for digit in digits.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }

        if carry {
            digits.insert(0, '1');
        }
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    let rounded = format!(
        "{}.{}",
        whole.iter().collect::<String>(),
        cents.iter().collect::<String>()
    );

    match rounded.parse::<f64>() {
        Ok(rounded) => rounded.copysign(amount),
        Err(error) => {
            tracing::error!("Could not round the amount {amount}: {error}");
            amount
        }
    }
}

/// Format the date part of `date_time` in the configured timezone, e.g. "20/04/2020".
pub fn format_date(date_time: OffsetDateTime, config: &FormatConfig) -> String {
    let offset = get_offset_at(config.timezone(), date_time).unwrap_or_else(|| {
        tracing::warn!(
            "Unknown timezone \"{}\", displaying dates in UTC",
            config.timezone()
        );
        time::UtcOffset::UTC
    });

    let date = date_time.to_offset(offset).date();

    date.format(config.locale().date_format())
        .unwrap_or_else(|error| {
            tracing::error!("Could not format date {date}: {error}");
            date.to_string()
        })
}
