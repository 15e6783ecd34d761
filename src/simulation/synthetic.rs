//! Synthetic borrowers and lenders for demos and load testing.
//!
//! Generated records stay inside the documented value ranges, so every
//! one of them can go straight through the pipeline.

use crate::core::borrower::{Borrower, EmploymentStatus, LoanPurpose, RiskStatus};
use crate::core::lender::Lender;
use crate::core::party::{BorrowerId, LenderId};
use crate::core::term::LoanTerm;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Susan", "Richard", "Jessica", "Joseph", "Sarah", "Thomas", "Karen",
    "Charles", "Nancy", "Christopher", "Lisa", "Daniel", "Margaret",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "example.com",
];

/// Purpose tags used by the generator.
pub const LOAN_PURPOSES: &[&str] = &[
    "education",
    "business",
    "home_improvement",
    "debt_consolidation",
    "medical",
    "vehicle",
    "wedding",
    "vacation",
    "other",
];

const EMPLOYMENT_STATUSES: &[EmploymentStatus] = &[
    EmploymentStatus::FullTime,
    EmploymentStatus::PartTime,
    EmploymentStatus::SelfEmployed,
    EmploymentStatus::Unemployed,
    EmploymentStatus::Retired,
    EmploymentStatus::Student,
];

const HOUSING_STATUSES: &[&str] = &["own", "mortgage", "rent", "living_with_parents", "other"];

/// Source of record identifiers.
pub trait IdGenerator {
    /// Next identifier, e.g. `b-0001` for prefix `b`.
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Deterministic counter: `b-0001`, `l-0002`, ... One counter is shared
/// across prefixes.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.issued += 1;
        format!("{}-{:04}", prefix, self.issued)
    }
}

/// Random v4 UUIDs: `b-6f1c…`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}

/// How many records to generate.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub borrower_count: usize,
    pub lender_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            borrower_count: 3,
            lender_count: 2,
        }
    }
}

/// Produces random but range-valid borrowers and lenders.
///
/// Randomness and identifiers are both injected, so a seeded RNG with
/// [`SequentialIds`] yields the same records every run.
///
/// # Examples
///
/// ```
/// use loan_matcher::simulation::synthetic::{SequentialIds, SyntheticDataGenerator};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut generator = SyntheticDataGenerator::new(StdRng::seed_from_u64(1), SequentialIds::new());
/// let borrowers = generator.borrowers(2);
/// assert_eq!(borrowers[0].id.as_str(), "b-0001");
/// assert!(borrowers.iter().all(|b| b.validate().is_ok()));
/// ```
pub struct SyntheticDataGenerator<R, G> {
    rng: R,
    ids: G,
}

impl<R: Rng, G: IdGenerator> SyntheticDataGenerator<R, G> {
    pub fn new(rng: R, ids: G) -> Self {
        Self { rng, ids }
    }

    pub fn borrowers(&mut self, count: usize) -> Vec<Borrower> {
        (0..count).map(|_| self.borrower()).collect()
    }

    pub fn lenders(&mut self, count: usize) -> Vec<Lender> {
        (0..count).map(|_| self.lender()).collect()
    }

    /// Generate both sides according to `config`.
    pub fn generate(&mut self, config: &GeneratorConfig) -> (Vec<Borrower>, Vec<Lender>) {
        let borrowers = self.borrowers(config.borrower_count);
        let lenders = self.lenders(config.lender_count);
        log::debug!(
            "generated {} borrowers and {} lenders",
            borrowers.len(),
            lenders.len()
        );
        (borrowers, lenders)
    }

    pub fn borrower(&mut self) -> Borrower {
        let name = self.name();
        let email = self.email(&name);
        let credit_score = self.rng.gen_range(500..=850);
        let income: u32 = self.rng.gen_range(20_000..=150_000);
        let employment_status = self.pick(EMPLOYMENT_STATUSES, EmploymentStatus::FullTime);

        // Loan scales with income: 5%..80% of it, within 1,000..100,000.
        let min_loan = (income / 20).max(1_000);
        let max_loan = (income / 5 * 4).min(100_000);
        let loan_amount = self.rng.gen_range(min_loan..=max_loan);

        let debt_to_income_ratio: u32 = match employment_status {
            EmploymentStatus::FullTime | EmploymentStatus::SelfEmployed => {
                self.rng.gen_range(10..=40)
            }
            EmploymentStatus::PartTime | EmploymentStatus::Retired => {
                self.rng.gen_range(20..=60)
            }
            _ => self.rng.gen_range(30..=80),
        };

        Borrower {
            id: BorrowerId::new(self.ids.next_id("b")),
            name,
            email,
            loan_amount: Decimal::from(loan_amount),
            loan_purpose: LoanPurpose::new(self.pick(LOAN_PURPOSES, "other")),
            loan_term: self.pick(&LoanTerm::STANDARD, LoanTerm::new(12)),
            credit_score,
            income: Decimal::from(income),
            employment_status,
            debt_to_income_ratio: Decimal::from(debt_to_income_ratio),
            housing_status: self.pick(HOUSING_STATUSES, "rent").to_string(),
            risk: RiskStatus::Unassessed,
        }
    }

    pub fn lender(&mut self) -> Lender {
        let name = self.name();
        let email = self.email(&name);
        let min_credit_score = self.rng.gen_range(580..=720);
        let whole_rate: u32 = self.rng.gen_range(4..=20);
        let interest_rate = Decimal::from_f64_retain(f64::from(whole_rate) + self.rng.gen::<f64>())
            .unwrap_or(Decimal::from(whole_rate))
            .round_dp(2);
        let max_risk_tolerance = self.rng.gen_range(20..=80);
        let amount_to_lend: u32 = self.rng.gen_range(10_000..=500_000);

        let purpose_count = self.rng.gen_range(1..=5);
        let mut purposes = LOAN_PURPOSES.to_vec();
        purposes.shuffle(&mut self.rng);
        let preferred_purposes = purposes
            .into_iter()
            .take(purpose_count)
            .map(LoanPurpose::new)
            .collect();

        let term_count = self.rng.gen_range(1..=4);
        let mut terms = LoanTerm::STANDARD.to_vec();
        terms.shuffle(&mut self.rng);
        terms.truncate(term_count);

        Lender {
            id: LenderId::new(self.ids.next_id("l")),
            name,
            email,
            amount_to_lend: Decimal::from(amount_to_lend),
            min_credit_score,
            interest_rate,
            max_risk_tolerance,
            preferred_purposes,
            loan_terms: terms,
        }
    }

    /// Uniform choice from `items`, or `fallback` when the pool is empty.
    fn pick<T: Clone>(&mut self, items: &[T], fallback: T) -> T {
        items.choose(&mut self.rng).cloned().unwrap_or(fallback)
    }

    fn name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES, "Alex"), self.pick(LAST_NAMES, "Morgan"))
    }

    fn email(&mut self, name: &str) -> String {
        let local = name.to_lowercase().replacen(' ', ".", 1);
        let suffix: u16 = self.rng.gen_range(0..1000);
        format!("{}{}@{}", local, suffix, self.pick(EMAIL_DOMAINS, "example.com"))
    }
}
