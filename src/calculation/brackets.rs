//! Progressive bracket lookup.
//!
//! ISR and employment-subsidy tables share the same selection rule: rows are
//! ordered by ascending lower limit, row *i* covers `[lower_i, lower_{i+1})`,
//! the top row is unbounded, and anything below the first row falls in the
//! first row. Every non-negative base therefore selects exactly one row, even
//! when the published upper limits leave one-cent gaps between rows.

use rust_decimal::Decimal;

use crate::config::{SubsidyBracket, TaxBracket};
use crate::error::{EngineError, EngineResult, ensure_non_negative};

/// A row of a bracket table.
pub trait Bracket {
    /// Lower limit of the row, inclusive.
    fn lower_limit(&self) -> Decimal;
}

impl Bracket for TaxBracket {
    fn lower_limit(&self) -> Decimal {
        self.lower_limit
    }
}

impl Bracket for SubsidyBracket {
    fn lower_limit(&self) -> Decimal {
        self.lower_limit
    }
}

/// Selects the row of `table` covering `base`.
///
/// Returns the row index alongside the row. `table_name` only labels errors.
///
/// # Errors
///
/// - `InvalidInput` if `base` is negative
/// - `EmptyTable` if the table has no rows
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::lookup_bracket;
/// use nomina_engine::config::SubsidyBracket;
/// use rust_decimal::Decimal;
///
/// let table = vec![
///     SubsidyBracket { lower_limit: Decimal::new(1, 2), upper_limit: Some(Decimal::new(100, 0)), subsidy: Decimal::new(50, 0) },
///     SubsidyBracket { lower_limit: Decimal::new(10001, 2), upper_limit: None, subsidy: Decimal::ZERO },
/// ];
///
/// let (index, row) = lookup_bracket(&table, "subsidy", Decimal::new(100005, 3)).unwrap();
/// assert_eq!(index, 0);
/// assert_eq!(row.subsidy, Decimal::new(50, 0));
/// ```
pub fn lookup_bracket<'a, B: Bracket>(
    table: &'a [B],
    table_name: &str,
    base: Decimal,
) -> EngineResult<(usize, &'a B)> {
    ensure_non_negative("taxable_base", base)?;

    let first = table.first().ok_or_else(|| EngineError::EmptyTable {
        table: table_name.to_string(),
    })?;

    let mut selected = (0, first);
    for (index, row) in table.iter().enumerate().skip(1) {
        if base < row.lower_limit() {
            break;
        }
        selected = (index, row);
    }
    Ok(selected)
}
