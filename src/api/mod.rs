use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AgeBand, Compounding, Currency, DEFAULT_CURRENCY, LoanSummary, LoanTerms, PayoffSummary,
    PayoffTerms, RetirementOutlook, RetirementPlan, SavingsPlan, SavingsProjection, TaxAssessment,
    TaxProfile, TaxRegime, amortize_loan, assess_tax, format_amount, parse_amount, plan_retirement,
    project_savings, simulate_payoff,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// A form field that may arrive as a JSON number or as user-typed text
/// ("₹1,23,456", "8.5%"). Every monetary amount and rate crosses this
/// boundary exactly once; the calculators only ever see plain `f64`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    fn resolve(&self, currency: Currency) -> f64 {
        match self {
            FormValue::Number(value) if value.is_finite() => *value,
            FormValue::Number(_) => 0.0,
            FormValue::Text(text) => parse_amount(text, currency),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiTaxRegime {
    New,
    Old,
}

impl From<ApiTaxRegime> for TaxRegime {
    fn from(value: ApiTaxRegime) -> Self {
        match value {
            ApiTaxRegime::New => TaxRegime::New,
            ApiTaxRegime::Old => TaxRegime::Old,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiAgeBand {
    General,
    Senior,
    #[serde(alias = "verySenior", alias = "very_senior")]
    VerySenior,
}

impl From<ApiAgeBand> for AgeBand {
    fn from(value: ApiAgeBand) -> Self {
        match value {
            ApiAgeBand::General => AgeBand::Below60,
            ApiAgeBand::Senior => AgeBand::SixtyToEighty,
            ApiAgeBand::VerySenior => AgeBand::Above80,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoanPayload {
    amount: Option<FormValue>,
    #[serde(alias = "rate")]
    interest_rate: Option<FormValue>,
    #[serde(alias = "years")]
    term_years: Option<u32>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SavingsPayload {
    initial_deposit: Option<FormValue>,
    monthly_contribution: Option<FormValue>,
    #[serde(alias = "rate", alias = "annualRate")]
    interest_rate: Option<FormValue>,
    years: Option<u32>,
    compounds_per_year: Option<u32>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    monthly_expenses: Option<FormValue>,
    inflation_rate: Option<FormValue>,
    #[serde(alias = "expectedReturnRate")]
    return_rate: Option<FormValue>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PayoffPayload {
    balance: Option<FormValue>,
    #[serde(alias = "rate")]
    interest_rate: Option<FormValue>,
    monthly_payment: Option<FormValue>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaxPayload {
    #[serde(alias = "annualIncome")]
    income: Option<FormValue>,
    regime: Option<ApiTaxRegime>,
    #[serde(alias = "ageBand")]
    age_group: Option<ApiAgeBand>,
    currency: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanResponse {
    currency: &'static str,
    #[serde(flatten)]
    summary: LoanSummary,
    display: LoanDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanDisplay {
    monthly_payment: String,
    total_payment: String,
    total_interest: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavingsResponse {
    currency: &'static str,
    #[serde(flatten)]
    projection: SavingsProjection,
    display: SavingsDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavingsDisplay {
    future_value: String,
    total_contributions: String,
    interest_earned: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetirementResponse {
    currency: &'static str,
    #[serde(flatten)]
    outlook: RetirementOutlook,
    display: RetirementDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetirementDisplay {
    inflated_monthly_expense: String,
    required_corpus: String,
    monthly_investment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayoffResponse {
    currency: &'static str,
    #[serde(flatten)]
    summary: PayoffSummary,
    display: PayoffDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayoffDisplay {
    total_interest_paid: String,
    total_amount_paid: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxResponse {
    currency: &'static str,
    #[serde(flatten)]
    assessment: TaxAssessment,
    display: TaxDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxDisplay {
    taxable_income: String,
    tax_amount: String,
    effective_rate: String,
}

#[derive(Debug, Serialize)]
struct CurrencyInfo {
    code: &'static str,
    symbol: &'static str,
}

fn request_currency(code: Option<&str>) -> Currency {
    match code {
        Some(code) => Currency::from_code(code),
        None => DEFAULT_CURRENCY,
    }
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, String> {
    field.ok_or_else(|| format!("{name} is required"))
}

fn loan_terms_from_payload(payload: &LoanPayload) -> Result<(LoanTerms, Currency), String> {
    let currency = request_currency(payload.currency.as_deref());
    let terms = LoanTerms {
        principal: required(payload.amount.as_ref(), "amount")?.resolve(currency),
        annual_rate: required(payload.interest_rate.as_ref(), "interestRate")?.resolve(currency),
        term_years: required(payload.term_years, "termYears")?,
    };
    Ok((terms, currency))
}

fn savings_plan_from_payload(payload: &SavingsPayload) -> Result<(SavingsPlan, Currency), String> {
    let currency = request_currency(payload.currency.as_deref());
    let compounding = match payload.compounds_per_year {
        None => Compounding::Monthly,
        Some(periods) => Compounding::from_periods_per_year(periods)
            .ok_or_else(|| "compoundsPerYear must be 1 or 12".to_string())?,
    };
    let plan = SavingsPlan {
        initial_deposit: required(payload.initial_deposit.as_ref(), "initialDeposit")?
            .resolve(currency),
        monthly_contribution: required(payload.monthly_contribution.as_ref(), "monthlyContribution")?
            .resolve(currency),
        annual_rate: required(payload.interest_rate.as_ref(), "interestRate")?.resolve(currency),
        years: required(payload.years, "years")?,
        compounding,
    };
    Ok((plan, currency))
}

fn retirement_plan_from_payload(
    payload: &RetirementPayload,
) -> Result<(RetirementPlan, Currency), String> {
    let currency = request_currency(payload.currency.as_deref());
    let plan = RetirementPlan {
        current_age: required(payload.current_age, "currentAge")?,
        retirement_age: required(payload.retirement_age, "retirementAge")?,
        monthly_expenses: required(payload.monthly_expenses.as_ref(), "monthlyExpenses")?
            .resolve(currency),
        inflation_rate: required(payload.inflation_rate.as_ref(), "inflationRate")?
            .resolve(currency),
        expected_return_rate: required(payload.return_rate.as_ref(), "returnRate")?
            .resolve(currency),
    };
    Ok((plan, currency))
}

fn payoff_terms_from_payload(payload: &PayoffPayload) -> Result<(PayoffTerms, Currency), String> {
    let currency = request_currency(payload.currency.as_deref());
    let terms = PayoffTerms {
        balance: required(payload.balance.as_ref(), "balance")?.resolve(currency),
        annual_rate: required(payload.interest_rate.as_ref(), "interestRate")?.resolve(currency),
        monthly_payment: required(payload.monthly_payment.as_ref(), "monthlyPayment")?
            .resolve(currency),
    };
    Ok((terms, currency))
}

fn tax_profile_from_payload(payload: &TaxPayload) -> Result<(TaxProfile, Currency), String> {
    let currency = request_currency(payload.currency.as_deref());
    let profile = TaxProfile {
        annual_income: required(payload.income.as_ref(), "income")?.resolve(currency),
        regime: payload.regime.unwrap_or(ApiTaxRegime::New).into(),
        age_band: payload.age_group.unwrap_or(ApiAgeBand::General).into(),
    };
    Ok((profile, currency))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/currencies", get(currencies_handler))
        .route("/api/loan", get(loan_get_handler).post(loan_post_handler))
        .route(
            "/api/savings",
            get(savings_get_handler).post(savings_post_handler),
        )
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route(
            "/api/payoff",
            get(payoff_get_handler).post(payoff_post_handler),
        )
        .route("/api/tax", get(tax_get_handler).post(tax_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("calculator API listening on http://{addr}");
    tracing::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn currencies_handler() -> Response {
    let currencies: Vec<CurrencyInfo> = Currency::ALL
        .iter()
        .map(|currency| CurrencyInfo {
            code: currency.code(),
            symbol: currency.symbol(),
        })
        .collect();
    json_response(StatusCode::OK, currencies)
}

async fn loan_get_handler(Query(payload): Query<LoanPayload>) -> Response {
    loan_response(&payload)
}

async fn loan_post_handler(Json(payload): Json<LoanPayload>) -> Response {
    loan_response(&payload)
}

fn loan_response(payload: &LoanPayload) -> Response {
    let (terms, currency) = match loan_terms_from_payload(payload) {
        Ok(built) => built,
        Err(msg) => return rejected("loan", &msg),
    };
    match amortize_loan(&terms) {
        Ok(summary) => json_response(
            StatusCode::OK,
            LoanResponse {
                currency: currency.code(),
                display: LoanDisplay {
                    monthly_payment: format_amount(summary.monthly_payment, currency),
                    total_payment: format_amount(summary.total_payment, currency),
                    total_interest: format_amount(summary.total_interest, currency),
                },
                summary,
            },
        ),
        Err(msg) => rejected("loan", &msg),
    }
}

async fn savings_get_handler(Query(payload): Query<SavingsPayload>) -> Response {
    savings_response(&payload)
}

async fn savings_post_handler(Json(payload): Json<SavingsPayload>) -> Response {
    savings_response(&payload)
}

fn savings_response(payload: &SavingsPayload) -> Response {
    let (plan, currency) = match savings_plan_from_payload(payload) {
        Ok(built) => built,
        Err(msg) => return rejected("savings", &msg),
    };
    match project_savings(&plan) {
        Ok(projection) => json_response(
            StatusCode::OK,
            SavingsResponse {
                currency: currency.code(),
                display: SavingsDisplay {
                    future_value: format_amount(projection.future_value, currency),
                    total_contributions: format_amount(projection.total_contributions, currency),
                    interest_earned: format_amount(projection.interest_earned, currency),
                },
                projection,
            },
        ),
        Err(msg) => rejected("savings", &msg),
    }
}

async fn retirement_get_handler(Query(payload): Query<RetirementPayload>) -> Response {
    retirement_response(&payload)
}

async fn retirement_post_handler(Json(payload): Json<RetirementPayload>) -> Response {
    retirement_response(&payload)
}

fn retirement_response(payload: &RetirementPayload) -> Response {
    let (plan, currency) = match retirement_plan_from_payload(payload) {
        Ok(built) => built,
        Err(msg) => return rejected("retirement", &msg),
    };
    match plan_retirement(&plan) {
        Ok(outlook) => json_response(
            StatusCode::OK,
            RetirementResponse {
                currency: currency.code(),
                display: RetirementDisplay {
                    inflated_monthly_expense: format_amount(
                        outlook.inflated_monthly_expense,
                        currency,
                    ),
                    required_corpus: format_amount(outlook.required_corpus, currency),
                    monthly_investment: format_amount(outlook.monthly_investment, currency),
                },
                outlook,
            },
        ),
        Err(msg) => rejected("retirement", &msg),
    }
}

async fn payoff_get_handler(Query(payload): Query<PayoffPayload>) -> Response {
    payoff_response(&payload)
}

async fn payoff_post_handler(Json(payload): Json<PayoffPayload>) -> Response {
    payoff_response(&payload)
}

fn payoff_response(payload: &PayoffPayload) -> Response {
    let (terms, currency) = match payoff_terms_from_payload(payload) {
        Ok(built) => built,
        Err(msg) => return rejected("payoff", &msg),
    };
    match simulate_payoff(&terms) {
        Ok(summary) => json_response(
            StatusCode::OK,
            PayoffResponse {
                currency: currency.code(),
                display: PayoffDisplay {
                    total_interest_paid: format_amount(summary.total_interest_paid, currency),
                    total_amount_paid: format_amount(summary.total_amount_paid, currency),
                },
                summary,
            },
        ),
        Err(msg) => rejected("payoff", &msg),
    }
}

async fn tax_get_handler(Query(payload): Query<TaxPayload>) -> Response {
    tax_response(&payload)
}

async fn tax_post_handler(Json(payload): Json<TaxPayload>) -> Response {
    tax_response(&payload)
}

fn tax_response(payload: &TaxPayload) -> Response {
    let (profile, currency) = match tax_profile_from_payload(payload) {
        Ok(built) => built,
        Err(msg) => return rejected("tax", &msg),
    };
    match assess_tax(&profile) {
        Ok(assessment) => json_response(
            StatusCode::OK,
            TaxResponse {
                currency: currency.code(),
                display: TaxDisplay {
                    taxable_income: format_amount(assessment.taxable_income, currency),
                    tax_amount: format_amount(assessment.tax_amount, currency),
                    effective_rate: format!("{:.1}%", assessment.effective_rate),
                },
                assessment,
            },
        ),
        Err(msg) => rejected("tax", &msg),
    }
}

fn rejected(calculator: &str, msg: &str) -> Response {
    tracing::debug!(calculator, error = msg, "request rejected");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
