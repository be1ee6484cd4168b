const COMMON_DOCUMENTS: &[&str] = &[
    "Aadhaar Card",
    "PAN Card",
    "Passport Size Photos",
    "Bank Statements (6 months)",
];

const SALARIED_DOCUMENTS: &[&str] = &[
    "Salary Slips (3 months)",
    "Employment Certificate",
    "Form 16",
];

const SELF_EMPLOYED_DOCUMENTS: &[&str] = &[
    "Business Registration",
    "ITR (2 years)",
    "Profit & Loss Statement",
    "Balance Sheet",
];

const HOME_LOAN_DOCUMENTS: &[&str] = &[
    "Property Documents",
    "Sale Agreement",
    "Approved Building Plan",
];

const CAR_LOAN_DOCUMENTS: &[&str] = &["Vehicle Quotation", "Insurance Details"];

const EDUCATION_LOAN_DOCUMENTS: &[&str] = &[
    "Admission Letter",
    "Fee Structure",
    "Academic Records",
];

/// Required-document list for a loan type and employment type, matched by
/// case-insensitive substring the way the intake form values arrive.
pub fn required_documents(loan_type: &str, employment_type: &str) -> Vec<String> {
    let loan_type = loan_type.to_lowercase();
    let employment_type = employment_type.to_lowercase();

    let mut documents: Vec<String> = COMMON_DOCUMENTS.iter().map(|d| d.to_string()).collect();

    if employment_type.contains("salaried") {
        documents.extend(SALARIED_DOCUMENTS.iter().map(|d| d.to_string()));
    } else {
        documents.extend(SELF_EMPLOYED_DOCUMENTS.iter().map(|d| d.to_string()));
    }

    if loan_type.contains("home") {
        documents.extend(HOME_LOAN_DOCUMENTS.iter().map(|d| d.to_string()));
    } else if loan_type.contains("car") {
        documents.extend(CAR_LOAN_DOCUMENTS.iter().map(|d| d.to_string()));
    } else if loan_type.contains("education") {
        documents.extend(EDUCATION_LOAN_DOCUMENTS.iter().map(|d| d.to_string()));
    }

    documents
}
