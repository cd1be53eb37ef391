use crate::infra::{in_memory_ledger, parse_rate, resolve_rate};
use clap::Args;
use loan_ledger::error::AppError;
use loan_ledger::ledger::{
    ApplicationRequest, Confirmation, InterestQuote, InterestRate, LoanApplication,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: u32,
    /// Loan term in months
    #[arg(long)]
    pub(crate) duration: u32,
    /// Annual rate as a fraction (defaults to APP_INTEREST_RATE, then 0.02)
    #[arg(long, value_parser = parse_rate)]
    pub(crate) rate: Option<InterestRate>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Principal for the initial submission
    #[arg(long, default_value_t = 1000)]
    pub(crate) principal: u32,
    /// Term in months for the initial submission
    #[arg(long, default_value_t = 12)]
    pub(crate) duration: u32,
    /// Principal applied by the revision step
    #[arg(long, default_value_t = 2000)]
    pub(crate) revised_principal: u32,
    /// Term in months applied by the revision step
    #[arg(long, default_value_t = 24)]
    pub(crate) revised_duration: u32,
    /// Annual rate as a fraction (defaults to APP_INTEREST_RATE, then 0.02)
    #[arg(long, value_parser = parse_rate)]
    pub(crate) rate: Option<InterestRate>,
    /// Keep the application instead of deleting it at the end
    #[arg(long)]
    pub(crate) keep: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let request = ApplicationRequest::new(args.principal, args.duration);
    let quote = InterestQuote::compute(request, resolve_rate(args.rate)?)?;
    println!("{quote}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        principal,
        duration,
        revised_principal,
        revised_duration,
        rate,
        keep,
    } = args;

    let ledger = in_memory_ledger(resolve_rate(rate)?);
    println!("Loan application ledger demo");
    println!("Interest rate: {:.4}", ledger.rate().value());

    let request = ApplicationRequest::new(principal, duration);
    println!("\nQuote");
    println!("- {}", ledger.calculate_amount(request)?);

    println!("\nIntake");
    let created = ledger.add_application(request)?;
    println!("- {}", Confirmation::received(&created));
    render_application(&created);

    println!("\nRevision");
    let revision = ApplicationRequest::new(revised_principal, revised_duration);
    println!("- {}", ledger.update_application(created.id.as_str(), revision)?);
    let updated = ledger.get_application(created.id.as_str())?;
    render_application(&updated);

    let listed = ledger.get_all_applications()?;
    println!("\nLedger holds {} application(s)", listed.len());

    if keep {
        return Ok(());
    }

    println!("\nRemoval");
    println!("- {}", ledger.delete_application(created.id.as_str())?);
    match ledger.get_application(created.id.as_str()) {
        Ok(_) => println!("- application still present after delete"),
        Err(err) => println!("- lookup after delete: {err}"),
    }

    Ok(())
}

fn render_application(application: &LoanApplication) {
    println!(
        "  {} | principal {} over {} months | interest {:.2} | total {:.2} | status {}",
        application.id,
        application.principal,
        application.duration,
        application.interest,
        application.total_amount,
        application.status.label()
    );
    match application.updated_at {
        Some(updated_at) => println!(
            "  created {} | updated {}",
            application.created_at.to_rfc3339(),
            updated_at.to_rfc3339()
        ),
        None => println!("  created {}", application.created_at.to_rfc3339()),
    }
}
