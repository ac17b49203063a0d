//! Command-line Arguments

use std::path::PathBuf;

use checkout_core::form::{CAMPUSES, FEE_TYPES, PROGRAMS};
use checkout_core::FormState;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};

/// Checkout form in the terminal
#[derive(Parser, Debug)]
#[command(name = "checkout", version, about)]
pub struct Cli {
    /// Checkout backend base URL (overrides CHECKOUT_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Use the in-memory backend instead of HTTP
    #[arg(long, global = true)]
    pub demo: bool,

    /// Record customer/invoice failures in the checkout state as well as the log
    #[arg(long, global = true)]
    pub surface_submit_errors: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format a price without contacting the backend
    Price {
        /// Unit price in minor units (major units for zero-decimal currencies)
        #[arg(long, allow_negative_numbers = true)]
        unit_amount: i64,

        /// ISO currency code
        #[arg(long)]
        currency: String,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Load configuration and print the checkout view
    Config,

    /// Start a purchase and print the hosted checkout link
    Purchase {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Create the customer, then the invoice
    Submit(SubmitArgs),

    /// Apply a JSON array of actions to a fresh state and print the view
    Replay {
        /// File holding `[{"type": ..., "payload": ...}, ...]`
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, value_parser = choices(FEE_TYPES))]
    pub fee_type: String,

    #[arg(long, value_parser = choices(CAMPUSES))]
    pub campus: String,

    #[arg(long, value_parser = choices(PROGRAMS))]
    pub program: String,
}

impl SubmitArgs {
    pub fn to_form(&self) -> FormState {
        FormState {
            name: self.name.clone(),
            email: self.email.clone(),
            fee_type: self.fee_type.clone(),
            campus: self.campus.clone(),
            program: self.program.clone(),
        }
    }
}

fn choices(options: &'static [(&'static str, &'static str)]) -> PossibleValuesParser {
    PossibleValuesParser::new(options.iter().map(|(value, _)| *value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "checkout",
            "--demo",
            "submit",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--fee-type",
            "kit",
            "--campus",
            "ambler",
            "--program",
            "esthetics",
        ])
        .unwrap();

        assert!(cli.demo);
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        let form = args.to_form();
        assert_eq!(form.fee_type, "kit");
        assert_eq!(form.campus, "ambler");
    }

    #[test]
    fn test_rejects_unknown_campus() {
        let result = Cli::try_parse_from([
            "checkout", "submit", "--name", "Ada", "--email", "a@b.c", "--fee-type", "kit",
            "--campus", "pittsburgh", "--program", "teacher",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_purchase_quantity_floor() {
        assert!(Cli::try_parse_from(["checkout", "purchase", "--quantity", "0"]).is_err());
        let cli = Cli::try_parse_from(["checkout", "purchase", "--quantity", "4"]).unwrap();
        assert!(matches!(cli.command, Command::Purchase { quantity: 4 }));
    }
}
