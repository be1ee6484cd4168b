use serde::Serialize;

/// Eligibility bounds attached to a scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeEligibility {
    pub min_age: u8,
    pub max_age: u8,
    pub employment: &'static [&'static str],
    pub min_cibil: u16,
    /// Minimum years the business must have been operating, for business
    /// lending products.
    pub min_business_vintage_years: Option<u8>,
}

/// A loan product with fixed bounds, documents, and features. Catalog entries
/// are immutable and built once at process start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanScheme {
    pub id: &'static str,
    pub name: &'static str,
    pub loan_type: &'static str,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_income: f64,
    pub max_tenure_years: u8,
    pub interest_rate: &'static str,
    pub eligibility: SchemeEligibility,
    pub documents: &'static [&'static str],
    pub features: &'static [&'static str],
}

impl LoanScheme {
    pub fn amount_midpoint(&self) -> f64 {
        (self.min_amount + self.max_amount) / 2.0
    }
}

/// The product catalog, injected into the matcher rather than referenced as
/// a global.
#[derive(Debug, Clone)]
pub struct SchemeCatalog {
    schemes: Vec<LoanScheme>,
}

impl SchemeCatalog {
    pub fn standard() -> Self {
        Self {
            schemes: vec![
                LoanScheme {
                    id: "home_loan_standard",
                    name: "Standard Home Loan",
                    loan_type: "Home Loan",
                    min_amount: 500_000.0,
                    max_amount: 50_000_000.0,
                    min_income: 300_000.0,
                    max_tenure_years: 30,
                    interest_rate: "8.5% - 10.5%",
                    eligibility: SchemeEligibility {
                        min_age: 21,
                        max_age: 65,
                        employment: &["Salaried", "Self-employed"],
                        min_cibil: 650,
                        min_business_vintage_years: None,
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Salary Slips (3 months)",
                        "Bank Statements (6 months)",
                        "Property Documents",
                        "Sale Agreement",
                    ],
                    features: &[
                        "No prepayment charges after 1 year",
                        "Flexible repayment options",
                        "Property insurance included",
                        "Tax benefits under Section 80C & 24",
                    ],
                },
                LoanScheme {
                    id: "home_loan_premium",
                    name: "Premium Home Loan",
                    loan_type: "Home Loan",
                    min_amount: 2_000_000.0,
                    max_amount: 100_000_000.0,
                    min_income: 1_000_000.0,
                    max_tenure_years: 30,
                    interest_rate: "7.5% - 9.0%",
                    eligibility: SchemeEligibility {
                        min_age: 25,
                        max_age: 60,
                        employment: &["Salaried", "Self-employed"],
                        min_cibil: 750,
                        min_business_vintage_years: None,
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Salary Slips (6 months)",
                        "Bank Statements (12 months)",
                        "Property Documents",
                        "Income Tax Returns (2 years)",
                        "Property Valuation Report",
                    ],
                    features: &[
                        "Lower interest rates",
                        "Higher loan amounts",
                        "Dedicated relationship manager",
                        "Fast processing in 7 days",
                        "No processing fees",
                    ],
                },
                LoanScheme {
                    id: "personal_loan_standard",
                    name: "Standard Personal Loan",
                    loan_type: "Personal Loan",
                    min_amount: 50_000.0,
                    max_amount: 2_000_000.0,
                    min_income: 200_000.0,
                    max_tenure_years: 5,
                    interest_rate: "10.5% - 18.0%",
                    eligibility: SchemeEligibility {
                        min_age: 21,
                        max_age: 60,
                        employment: &["Salaried", "Self-employed"],
                        min_cibil: 650,
                        min_business_vintage_years: None,
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Salary Slips (3 months)",
                        "Bank Statements (3 months)",
                    ],
                    features: &[
                        "No collateral required",
                        "Quick approval in 24 hours",
                        "Flexible tenure options",
                        "Minimal documentation",
                    ],
                },
                LoanScheme {
                    id: "car_loan_standard",
                    name: "Standard Car Loan",
                    loan_type: "Car Loan",
                    min_amount: 100_000.0,
                    max_amount: 5_000_000.0,
                    min_income: 250_000.0,
                    max_tenure_years: 7,
                    interest_rate: "8.0% - 12.0%",
                    eligibility: SchemeEligibility {
                        min_age: 21,
                        max_age: 65,
                        employment: &["Salaried", "Self-employed"],
                        min_cibil: 650,
                        min_business_vintage_years: None,
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Salary Slips (3 months)",
                        "Bank Statements (6 months)",
                        "Car Quotation",
                        "Driving License",
                    ],
                    features: &[
                        "Up to 90% financing",
                        "Comprehensive insurance included",
                        "Part payment facility",
                        "Extended warranty options",
                    ],
                },
                LoanScheme {
                    id: "business_loan_sme",
                    name: "SME Business Loan",
                    loan_type: "Business Loan",
                    min_amount: 500_000.0,
                    max_amount: 10_000_000.0,
                    min_income: 500_000.0,
                    max_tenure_years: 10,
                    interest_rate: "9.5% - 15.0%",
                    eligibility: SchemeEligibility {
                        min_age: 25,
                        max_age: 65,
                        employment: &["Self-employed", "Business Owner"],
                        min_cibil: 700,
                        min_business_vintage_years: Some(2),
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Business Registration",
                        "GST Returns (12 months)",
                        "Bank Statements (12 months)",
                        "ITR (2 years)",
                        "Financial Statements",
                    ],
                    features: &[
                        "Working capital support",
                        "Equipment financing available",
                        "Flexible repayment schedules",
                        "Business advisory services",
                    ],
                },
                LoanScheme {
                    id: "education_loan_standard",
                    name: "Standard Education Loan",
                    loan_type: "Educational Loan",
                    min_amount: 100_000.0,
                    max_amount: 7_500_000.0,
                    min_income: 200_000.0,
                    max_tenure_years: 15,
                    interest_rate: "8.5% - 11.5%",
                    eligibility: SchemeEligibility {
                        min_age: 18,
                        max_age: 35,
                        employment: &["Student", "Parent/Guardian"],
                        min_cibil: 650,
                        min_business_vintage_years: None,
                    },
                    documents: &[
                        "Aadhaar Card",
                        "PAN Card",
                        "Admission Letter",
                        "Fee Structure",
                        "Academic Records",
                        "Parent/Guardian Income Proof",
                        "Bank Statements (6 months)",
                    ],
                    features: &[
                        "Moratorium period available",
                        "Tax benefits under Section 80E",
                        "Covers tuition and living expenses",
                        "Study abroad options available",
                    ],
                },
            ],
        }
    }

    pub fn schemes(&self) -> &[LoanScheme] {
        &self.schemes
    }

    pub fn by_id(&self, id: &str) -> Option<&LoanScheme> {
        self.schemes.iter().find(|scheme| scheme.id == id)
    }
}
