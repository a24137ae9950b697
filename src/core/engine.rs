use super::types::{
    AgeBand, LoanSummary, LoanTerms, PayoffSummary, PayoffTerms, RetirementOutlook, RetirementPlan,
    SavingsPlan, SavingsProjection, TaxAssessment, TaxBracket, TaxProfile, TaxRegime,
};

/// Hard ceiling on the payoff simulation. A result that reaches the cap
/// with balance outstanding means the debt is never cleared at that
/// payment and must not be read as a real payoff time.
pub const PAYOFF_MONTH_CAP: u32 = 1000;

/// Corpus target as a multiple of annual expenses at retirement (the 4%
/// rule, inverted).
const CORPUS_EXPENSE_MULTIPLE: f64 = 25.0;

/// Health and education cess applied on top of the base income tax.
const CESS_RATE: f64 = 0.04;

const NEW_REGIME: [TaxBracket; 6] = [
    TaxBracket {
        upper_bound: Some(300_000.0),
        rate: 0.0,
    },
    TaxBracket {
        upper_bound: Some(600_000.0),
        rate: 0.05,
    },
    TaxBracket {
        upper_bound: Some(900_000.0),
        rate: 0.10,
    },
    TaxBracket {
        upper_bound: Some(1_200_000.0),
        rate: 0.15,
    },
    TaxBracket {
        upper_bound: Some(1_500_000.0),
        rate: 0.20,
    },
    TaxBracket {
        upper_bound: None,
        rate: 0.30,
    },
];

const OLD_REGIME_BELOW_60: [TaxBracket; 4] = [
    TaxBracket {
        upper_bound: Some(250_000.0),
        rate: 0.0,
    },
    TaxBracket {
        upper_bound: Some(500_000.0),
        rate: 0.05,
    },
    TaxBracket {
        upper_bound: Some(1_000_000.0),
        rate: 0.20,
    },
    TaxBracket {
        upper_bound: None,
        rate: 0.30,
    },
];

const OLD_REGIME_SIXTY_TO_EIGHTY: [TaxBracket; 4] = [
    TaxBracket {
        upper_bound: Some(300_000.0),
        rate: 0.0,
    },
    TaxBracket {
        upper_bound: Some(500_000.0),
        rate: 0.05,
    },
    TaxBracket {
        upper_bound: Some(1_000_000.0),
        rate: 0.20,
    },
    TaxBracket {
        upper_bound: None,
        rate: 0.30,
    },
];

const OLD_REGIME_ABOVE_80: [TaxBracket; 3] = [
    TaxBracket {
        upper_bound: Some(500_000.0),
        rate: 0.0,
    },
    TaxBracket {
        upper_bound: Some(1_000_000.0),
        rate: 0.20,
    },
    TaxBracket {
        upper_bound: None,
        rate: 0.30,
    },
];

/// Marginal schedule for a regime and age band. Schedules are data;
/// adding a regime or assessment year must not touch `assess_tax`.
pub fn bracket_schedule(regime: TaxRegime, band: AgeBand) -> &'static [TaxBracket] {
    match regime {
        TaxRegime::New => &NEW_REGIME,
        TaxRegime::Old => match band {
            AgeBand::Below60 => &OLD_REGIME_BELOW_60,
            AgeBand::SixtyToEighty => &OLD_REGIME_SIXTY_TO_EIGHTY,
            AgeBand::Above80 => &OLD_REGIME_ABOVE_80,
        },
    }
}

pub fn amortize_loan(terms: &LoanTerms) -> Result<LoanSummary, String> {
    validate_loan(terms)?;

    let payments = (terms.term_years * 12) as f64;
    let monthly_rate = terms.annual_rate / 100.0 / 12.0;

    let monthly_payment = if monthly_rate == 0.0 {
        terms.principal / payments
    } else {
        let growth = (1.0 + monthly_rate).powf(payments);
        terms.principal * monthly_rate * growth / (growth - 1.0)
    };

    let total_payment = monthly_payment * payments;
    Ok(LoanSummary {
        monthly_payment,
        total_payment,
        total_interest: total_payment - terms.principal,
    })
}

fn validate_loan(terms: &LoanTerms) -> Result<(), String> {
    if !terms.principal.is_finite() || terms.principal <= 0.0 {
        return Err("loan amount must be > 0".to_string());
    }
    if !terms.annual_rate.is_finite() || terms.annual_rate < 0.0 {
        return Err("interest rate must be >= 0".to_string());
    }
    if terms.term_years == 0 {
        return Err("loan term must be at least one year".to_string());
    }
    Ok(())
}

pub fn project_savings(plan: &SavingsPlan) -> Result<SavingsProjection, String> {
    validate_savings(plan)?;

    let periods_per_year = plan.compounding.periods_per_year();
    let period_rate = plan.annual_rate / 100.0 / periods_per_year as f64;
    let periods = (plan.years * periods_per_year) as f64;

    let growth = (1.0 + period_rate).powf(periods);
    let principal_future_value = plan.initial_deposit * growth;
    let contribution_future_value = if period_rate > 0.0 {
        plan.monthly_contribution * ((growth - 1.0) / period_rate)
    } else {
        plan.monthly_contribution * periods
    };

    let future_value = principal_future_value + contribution_future_value;
    // Contributions are monthly by definition; the compounding frequency
    // changes only how often interest is credited.
    let total_contributions =
        plan.initial_deposit + plan.monthly_contribution * (plan.years * 12) as f64;

    Ok(SavingsProjection {
        future_value,
        total_contributions,
        interest_earned: future_value - total_contributions,
    })
}

fn validate_savings(plan: &SavingsPlan) -> Result<(), String> {
    if !plan.initial_deposit.is_finite() || plan.initial_deposit < 0.0 {
        return Err("initial deposit must be >= 0".to_string());
    }
    if !plan.monthly_contribution.is_finite() || plan.monthly_contribution < 0.0 {
        return Err("monthly contribution must be >= 0".to_string());
    }
    if !plan.annual_rate.is_finite() || plan.annual_rate < 0.0 {
        return Err("interest rate must be >= 0".to_string());
    }
    if plan.years == 0 {
        return Err("savings horizon must be at least one year".to_string());
    }
    Ok(())
}

pub fn plan_retirement(plan: &RetirementPlan) -> Result<RetirementOutlook, String> {
    validate_retirement(plan)?;

    let years_to_retirement = (plan.retirement_age - plan.current_age) as f64;
    let months_to_retirement = years_to_retirement * 12.0;

    let inflated_monthly_expense =
        plan.monthly_expenses * (1.0 + plan.inflation_rate / 100.0).powf(years_to_retirement);
    let required_corpus = inflated_monthly_expense * 12.0 * CORPUS_EXPENSE_MULTIPLE;

    let monthly_rate = plan.expected_return_rate / 100.0 / 12.0;
    let monthly_investment = if monthly_rate == 0.0 {
        required_corpus / months_to_retirement
    } else {
        // Annuity-due: contributions land at the start of each month.
        let growth = (1.0 + monthly_rate).powf(months_to_retirement);
        required_corpus / (((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate))
    };

    Ok(RetirementOutlook {
        inflated_monthly_expense,
        required_corpus,
        monthly_investment,
    })
}

fn validate_retirement(plan: &RetirementPlan) -> Result<(), String> {
    if plan.retirement_age <= plan.current_age {
        return Err("retirement age must be greater than current age".to_string());
    }
    if !plan.monthly_expenses.is_finite() || plan.monthly_expenses <= 0.0 {
        return Err("monthly expenses must be > 0".to_string());
    }
    if !plan.inflation_rate.is_finite() || plan.inflation_rate < 0.0 {
        return Err("inflation rate must be >= 0".to_string());
    }
    if !plan.expected_return_rate.is_finite() || plan.expected_return_rate < 0.0 {
        return Err("expected return rate must be >= 0".to_string());
    }
    Ok(())
}

pub fn simulate_payoff(terms: &PayoffTerms) -> Result<PayoffSummary, String> {
    validate_payoff(terms)?;

    let monthly_rate = terms.annual_rate / 100.0 / 12.0;
    if terms.monthly_payment <= terms.balance * monthly_rate {
        return Err(
            "monthly payment does not cover the first month's interest; the balance would never shrink"
                .to_string(),
        );
    }

    let mut balance = terms.balance;
    let mut months = 0_u32;
    let mut total_interest = 0.0;

    while balance > 0.0 && months < PAYOFF_MONTH_CAP {
        let interest = balance * monthly_rate;
        total_interest += interest;
        balance = balance + interest - terms.monthly_payment;
        months += 1;

        if balance < 0.0 {
            // Final month: fold the overshoot back so the totals describe
            // a last payment that settles the balance exactly.
            total_interest += balance;
            balance = 0.0;
        }
    }

    Ok(PayoffSummary {
        months_to_payoff: months,
        total_interest_paid: total_interest,
        total_amount_paid: terms.balance + total_interest,
        paid_off: balance <= 0.0,
    })
}

fn validate_payoff(terms: &PayoffTerms) -> Result<(), String> {
    if !terms.balance.is_finite() || terms.balance <= 0.0 {
        return Err("balance must be > 0".to_string());
    }
    if !terms.annual_rate.is_finite() || terms.annual_rate <= 0.0 {
        return Err("interest rate must be > 0".to_string());
    }
    if !terms.monthly_payment.is_finite() || terms.monthly_payment <= 0.0 {
        return Err("monthly payment must be > 0".to_string());
    }
    Ok(())
}

pub fn assess_tax(profile: &TaxProfile) -> Result<TaxAssessment, String> {
    validate_tax(profile)?;

    let income = profile.annual_income;
    let mut base_tax = 0.0;
    let mut lower = 0.0;
    for bracket in bracket_schedule(profile.regime, profile.age_band) {
        let upper = bracket.upper_bound.unwrap_or(f64::INFINITY);
        if income > lower {
            base_tax += (income.min(upper) - lower) * bracket.rate;
        }
        lower = upper;
    }

    let tax_amount = base_tax * (1.0 + CESS_RATE);
    let effective_rate = if income > 0.0 {
        tax_amount / income * 100.0
    } else {
        0.0
    };

    Ok(TaxAssessment {
        taxable_income: income,
        tax_amount,
        effective_rate,
    })
}

fn validate_tax(profile: &TaxProfile) -> Result<(), String> {
    if !profile.annual_income.is_finite() || profile.annual_income < 0.0 {
        return Err("annual income must be >= 0".to_string());
    }
    Ok(())
}
