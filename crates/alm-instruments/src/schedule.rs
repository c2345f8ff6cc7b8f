//! Coupon schedule generation.

use alm_core::error::{CoreError, CoreResult};
use alm_core::types::{Date, Frequency};

/// Unadjusted coupon dates from issue to maturity, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates dates backward from maturity at the coupon frequency.
    ///
    /// Each date is `maturity - k * period`, so month-end clamping never
    /// accumulates. A broken first period becomes a short front stub. Zero
    /// coupon schedules hold just the two end dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInstrument` if maturity is not after issue.
    pub fn backward(issue: Date, maturity: Date, frequency: Frequency) -> CoreResult<Self> {
        if maturity <= issue {
            return Err(CoreError::invalid_instrument(
                "Schedule",
                format!("maturity {maturity} must be after issue {issue}"),
            ));
        }

        let months = match frequency.period().and_then(|p| p.months()) {
            Some(m) if m > 0 => m,
            _ => {
                return Ok(Self {
                    dates: vec![issue, maturity],
                })
            }
        };

        let mut dates = vec![maturity];
        let mut k = 1;
        loop {
            let current = maturity.add_months(-months * k)?;
            if current <= issue {
                break;
            }
            dates.push(current);
            k += 1;
        }
        dates.push(issue);
        dates.reverse();

        Ok(Self { dates })
    }

    /// Returns all schedule dates, issue first.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns an iterator over the accrual periods `(start, end)`.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns the first date (issue).
    #[must_use]
    pub fn issue(&self) -> Date {
        self.dates[0]
    }

    /// Returns the last date (maturity).
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }
}
