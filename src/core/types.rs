use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Compounding {
    Annual,
    Monthly,
}

impl Compounding {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Annual => 1,
            Compounding::Monthly => 12,
        }
    }

    pub fn from_periods_per_year(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(Compounding::Annual),
            12 => Some(Compounding::Monthly),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaxRegime {
    New,
    Old,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AgeBand {
    Below60,
    SixtyToEighty,
    Above80,
}

/// One row of a marginal tax schedule. The rate applies only to the
/// income slice between the previous row's bound and `upper_bound`;
/// `None` marks the open-ended top slab.
#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

// Rates in the parameter structs are annual percentages (8.0 means 8%);
// the engine converts them to periodic decimals.

#[derive(Debug, Clone, Copy)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SavingsPlan {
    pub initial_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub compounding: Compounding,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProjection {
    pub future_value: f64,
    pub total_contributions: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses: f64,
    pub inflation_rate: f64,
    pub expected_return_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementOutlook {
    pub inflated_monthly_expense: f64,
    pub required_corpus: f64,
    pub monthly_investment: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PayoffTerms {
    pub balance: f64,
    pub annual_rate: f64,
    pub monthly_payment: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffSummary {
    pub months_to_payoff: u32,
    pub total_interest_paid: f64,
    pub total_amount_paid: f64,
    pub paid_off: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TaxProfile {
    pub annual_income: f64,
    pub regime: TaxRegime,
    pub age_band: AgeBand,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAssessment {
    pub taxable_income: f64,
    pub tax_amount: f64,
    pub effective_rate: f64,
}
