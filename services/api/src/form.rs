use crate::cli::DataArgs;
use crate::infra::load_service;
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use fraud_check::error::AppError;
use fraud_check::screening::selection::{parse_date, parse_time};
use fraud_check::screening::{CascadeOptions, SelectionField, SelectionState, Verdict};

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Selected customer (e.g. CustomerId_4406 or 4406)
    #[arg(long)]
    pub(crate) customer_id: Option<String>,
    /// Selected account; only meaningful together with --customer-id
    #[arg(long)]
    pub(crate) account_id: Option<String>,
    /// Selected product category; only meaningful together with --account-id
    #[arg(long)]
    pub(crate) product_category: Option<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl OptionsArgs {
    fn selection(&self) -> SelectionState {
        SelectionState {
            customer_id: self.customer_id.clone(),
            account_id: self.account_id.clone(),
            product_category: self.product_category.clone(),
            ..SelectionState::default()
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    #[arg(long)]
    pub(crate) customer_id: String,
    #[arg(long)]
    pub(crate) account_id: String,
    #[arg(long)]
    pub(crate) product_category: String,
    #[arg(long)]
    pub(crate) product_id: String,
    #[arg(long)]
    pub(crate) channel_id: String,
    #[arg(long)]
    pub(crate) pricing_strategy: String,
    /// Transaction amount; negative values represent refunds and reversals
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) amount: f64,
    /// Transaction date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: NaiveDate,
    /// Transaction time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub(crate) time: NaiveTime,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl ScreenArgs {
    pub(crate) fn selection(&self) -> SelectionState {
        SelectionState {
            customer_id: Some(self.customer_id.clone()),
            account_id: Some(self.account_id.clone()),
            product_category: Some(self.product_category.clone()),
            product_id: Some(self.product_id.clone()),
            channel_id: Some(self.channel_id.clone()),
            pricing_strategy: Some(self.pricing_strategy.clone()),
            amount: Some(self.amount),
            transaction_date: Some(self.date),
            transaction_time: Some(self.time),
        }
    }
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let service = load_service(args.data.clone())?;
    let options = service.options(&args.selection());
    print!("{}", render_options(&options));
    Ok(())
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let service = load_service(args.data.clone())?;
    let verdict = service.screen(&args.selection())?;
    print!("{}", render_verdict(&verdict));
    Ok(())
}

fn render_options(options: &CascadeOptions) -> String {
    let mut output = String::from("Screening options\n");
    for field in SelectionField::cascaded() {
        let domain = options.domain(field);
        if domain.is_empty() {
            output.push_str(&format!("- {}: (none offered)\n", field.label()));
        } else {
            output.push_str(&format!("- {}: {}\n", field.label(), domain.join(", ")));
        }
    }

    if let Some(field) = options.blocked_at {
        output.push_str(&format!(
            "Select a value offered above to continue; {} has no candidates yet.\n",
            field.label()
        ));
    }
    output
}

fn render_verdict(verdict: &Verdict) -> String {
    let mut output = String::from("Transaction screening\n");
    for (name, value) in verdict.features.named() {
        output.push_str(&format!("  {name}: {value}\n"));
    }
    output.push_str(verdict.message);
    output.push('\n');
    output
}
