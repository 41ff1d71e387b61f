//! Tally money formatter
//!
//! Prints one amount formatted with the configured registry and locale.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::format::SymbolPosition;
use tally_core::{Currency, FormatOptions, Formatter, Money, StaticLocaleResolver};
use tally_shared::{MoneyError, TallyConfig};

#[derive(Debug, Parser)]
#[command(name = "tally-fmt")]
#[command(about = "Format a money amount")]
struct Args {
    /// Amount in major units, e.g. 1234.5 or -3
    #[arg(allow_hyphen_values = true)]
    amount: String,

    /// ISO currency code; defaults to the configured default currency
    currency: Option<String>,

    /// Drop fractional digits
    #[arg(long)]
    no_cents: bool,

    /// Append the ISO code
    #[arg(long)]
    with_currency: bool,

    /// Use HTML entities for the symbol
    #[arg(long)]
    html: bool,

    /// Place the symbol after the amount
    #[arg(long)]
    symbol_after: bool,

    /// Omit the symbol
    #[arg(long)]
    no_symbol: bool,

    /// Print "free" for zero amounts
    #[arg(long)]
    free: bool,

    /// Locale for number punctuation; overrides the configured locale
    #[arg(long)]
    locale: Option<String>,
}

impl Args {
    fn options(&self) -> FormatOptions {
        let mut options = FormatOptions::new()
            .symbol(!self.no_symbol)
            .with_currency(self.with_currency)
            .html(self.html)
            .no_cents(self.no_cents);
        if self.symbol_after {
            options = options.symbol_position(SymbolPosition::After);
        }
        if self.free {
            options = options.display_free();
        }
        options
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<MoneyError>() {
                Some(money_err) => {
                    error!(code = money_err.error_code(), "{err:#}");
                    eprintln!("error[{}]: {err:#}", money_err.error_code());
                }
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<String> {
    let config = TallyConfig::load().context("Failed to load configuration")?;
    tally_core::init(&config)?;

    let resolver = config
        .locales_file
        .as_deref()
        .map(StaticLocaleResolver::from_path)
        .transpose()?;
    let locale = args.locale.as_deref().unwrap_or(&config.locale);

    let formatter = match &resolver {
        Some(resolver) => Formatter::with_locale(resolver, locale).use_i18n(config.use_i18n),
        None => Formatter::new(),
    };

    render(args, &formatter)
}

fn render(args: &Args, formatter: &Formatter<'_>) -> anyhow::Result<String> {
    let currency = match &args.currency {
        Some(code) => Currency::wrap(code.as_str())?,
        None => tally_core::default_currency()?,
    };
    let money = Money::try_new(args.amount.as_str(), currency)?;
    debug!(?money, "Formatting");

    Ok(formatter.format(&money, &args.options()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::format::{FormatScope, NumberFormat};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tally-fmt").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_rendering() {
        let args = parse(&["1000", "usd"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "$1,000.00");
    }

    #[test]
    fn test_negative_amount_is_not_a_flag() {
        let args = parse(&["-3", "USD"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "-$3.00");
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = parse(&["1234.56", "EUR", "--no-cents", "--with-currency", "--symbol-after"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "1.234 € EUR");

        let args = parse(&["0", "USD", "--free"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "free");

        let args = parse(&["5", "USD", "--no-symbol"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "5.00");

        let args = parse(&["5", "EUR", "--html"]);
        assert_eq!(render(&args, &Formatter::new()).unwrap(), "&#x20AC;5,00");
    }

    #[test]
    fn test_locale_formatter() {
        let resolver = StaticLocaleResolver::new().with(
            "de",
            FormatScope::Currency,
            NumberFormat {
                delimiter: Some(".".into()),
                separator: Some(",".into()),
            },
        );
        let args = parse(&["1000", "USD", "--locale", "de"]);
        let formatter = Formatter::with_locale(&resolver, "de");
        assert_eq!(render(&args, &formatter).unwrap(), "$1.000,00");
    }

    #[test]
    fn test_errors_keep_their_code() {
        let args = parse(&["1", "ZZZ"]);
        let err = render(&args, &Formatter::new()).unwrap_err();
        let money_err = err.downcast_ref::<MoneyError>().unwrap();
        assert_eq!(money_err.error_code(), "UNKNOWN_CURRENCY");

        let args = parse(&["abc", "USD"]);
        let err = render(&args, &Formatter::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoneyError>().map(MoneyError::error_code),
            Some("INVALID_AMOUNT")
        );
    }
}
