mod currency;
mod engine;
mod types;

pub use currency::{Currency, DEFAULT_CURRENCY, format_amount, parse_amount};
pub use engine::{
    PAYOFF_MONTH_CAP, amortize_loan, assess_tax, bracket_schedule, plan_retirement,
    project_savings, simulate_payoff,
};
pub use types::{
    AgeBand, Compounding, LoanSummary, LoanTerms, PayoffSummary, PayoffTerms, RetirementOutlook,
    RetirementPlan, SavingsPlan, SavingsProjection, TaxAssessment, TaxBracket, TaxProfile,
    TaxRegime,
};
