//! Iteration state carried from month to month
//!
//! Both states are built fresh for each run and dropped with it.

/// State of an indexed loan during amortization
///
/// Two tracks run in parallel: balances are reduced in real (non-indexed)
/// terms, while payments are reported in nominal terms by scaling with the
/// accumulated index factor.
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Months elapsed (1-indexed once advanced)
    pub month: u32,

    /// Real outstanding balance of the amortized slice
    pub real_balance: f64,

    /// Real balloon principal; only settled at term end
    pub balloon_balance: f64,

    /// Accumulated CPI factor, starts at 1.0
    pub index_factor: f64,

    /// Nominal monthly payments made so far (balloon settlement excluded)
    pub total_paid: f64,

    /// Nominal interest paid so far
    pub total_interest: f64,
}

impl LoanState {
    pub fn new(amortized_principal: f64, balloon_principal: f64) -> Self {
        Self {
            month: 0,
            real_balance: amortized_principal,
            balloon_balance: balloon_principal,
            index_factor: 1.0,
            total_paid: 0.0,
            total_interest: 0.0,
        }
    }

    /// Move to the next month, accruing one month of indexation
    pub fn advance_month(&mut self, cpi_monthly_rate: f64) {
        self.month += 1;
        self.index_factor *= 1.0 + cpi_monthly_rate;
    }

    /// Reduce the real balance and record the month's nominal flows
    pub fn apply_payment(&mut self, real_principal: f64, nominal_interest: f64, nominal_payment: f64) {
        self.real_balance -= real_principal;
        self.total_interest += nominal_interest;
        self.total_paid += nominal_payment;
    }

    /// Outstanding principal (amortized + balloon) in nominal terms
    pub fn nominal_outstanding(&self) -> f64 {
        (self.real_balance + self.balloon_balance) * self.index_factor
    }

    /// Balloon principal due at settlement, indexed to date
    pub fn indexed_balloon(&self) -> f64 {
        self.balloon_balance * self.index_factor
    }
}

/// State of an investment account during compound growth
#[derive(Debug, Clone)]
pub struct GrowthState {
    pub month: u32,

    /// Current account balance
    pub balance: f64,

    /// Gross amount paid in, opening principal included
    pub total_deposited: f64,

    /// Deposit fees plus accumulation fees charged so far
    pub total_fees: f64,
}

impl GrowthState {
    pub fn new(opening_principal: f64) -> Self {
        Self {
            month: 0,
            balance: opening_principal,
            total_deposited: opening_principal,
            total_fees: 0.0,
        }
    }

    /// Run one month: deposit, then growth, then the accumulation fee
    ///
    /// The order is fixed; reordering changes results.
    pub fn step(
        &mut self,
        gross_deposit: f64,
        deposit_fee_rate: f64,
        monthly_growth_rate: f64,
        monthly_fee_rate: f64,
    ) {
        self.month += 1;
        self.deposit(gross_deposit, deposit_fee_rate);

        self.balance *= 1.0 + monthly_growth_rate;

        let fee = self.balance * monthly_fee_rate;
        self.balance -= fee;
        self.total_fees += fee;
    }

    /// Add a deposit net of its fee, counting the gross amount as deposited
    pub fn deposit(&mut self, gross_deposit: f64, deposit_fee_rate: f64) {
        let fee = gross_deposit * deposit_fee_rate;
        self.balance += gross_deposit * (1.0 - deposit_fee_rate);
        self.total_deposited += gross_deposit;
        self.total_fees += fee;
    }

    /// Balance above what was paid in
    pub fn profit(&self) -> f64 {
        self.balance - self.total_deposited
    }
}
