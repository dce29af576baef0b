use super::loader::LoadError;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Population column coercion
// ---------------------------------------------------------------------------

/// Read the population column as numbers, one per row.
///
/// Integer and float cells are accepted as long as they fit the integer range
/// control; anything else fails the cycle with a [`LoadError`] naming the
/// offending cell (rows are numbered from 1).
pub fn population_values(dataset: &Dataset, column: usize) -> Result<Vec<f64>, LoadError> {
    dataset
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let cell = &cells[column];
            cell.as_f64()
                .filter(|v| (i64::MIN as f64..i64::MAX as f64).contains(v))
                .ok_or_else(|| LoadError::NotNumeric {
                    column: dataset.columns[column].clone(),
                    row: row + 1,
                    value: cell.to_string(),
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bounds and selection
// ---------------------------------------------------------------------------

/// Integer extent of the population column: `floor(min)..=ceil(max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationBounds {
    pub min: i64,
    pub max: i64,
}

impl PopulationBounds {
    /// Compute bounds from the population values; an empty column has none.
    pub fn from_values(values: &[f64]) -> Result<Self, LoadError> {
        if values.is_empty() {
            return Err(LoadError::NoRows);
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Ok(PopulationBounds {
            min: min.floor() as i64,
            max: max.ceil() as i64,
        })
    }

    /// Whether the range control collapses to a single value.
    pub fn is_fixed_point(&self) -> bool {
        self.min == self.max
    }
}

/// The inclusive `[lo, hi]` range chosen by the user. Always `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    pub lo: i64,
    pub hi: i64,
}

impl RangeSelection {
    /// The default selection: the whole extent.
    pub fn full(bounds: PopulationBounds) -> Self {
        RangeSelection {
            lo: bounds.min,
            hi: bounds.max,
        }
    }

    /// Pull the selection inside `bounds`, keeping `lo <= hi`.
    pub fn clamped(self, bounds: PopulationBounds) -> Self {
        let lo = self.lo.clamp(bounds.min, bounds.max);
        let hi = self.hi.clamp(bounds.min, bounds.max).max(lo);
        RangeSelection { lo, hi }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lo as f64 <= value && value <= self.hi as f64
    }
}

/// Return indices of rows whose population lies inside the selection.
pub fn filtered_indices(values: &[f64], selection: RangeSelection) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| selection.contains(**v))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFG: f64 = 41_128_771.0;
    const CHN: f64 = 1_425_887_337.0;

    #[test]
    fn full_range_keeps_every_row() {
        let values = [AFG, CHN, 5.5, 5.5, 1_000.25];
        let bounds = PopulationBounds::from_values(&values).unwrap();
        assert_eq!(bounds, PopulationBounds { min: 5, max: CHN as i64 });
        let all = filtered_indices(&values, RangeSelection::full(bounds));
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn fractional_extremes_stay_inside_full_range() {
        let values = [0.4, 10.6];
        let bounds = PopulationBounds::from_values(&values).unwrap();
        assert_eq!(bounds, PopulationBounds { min: 0, max: 11 });
        assert_eq!(filtered_indices(&values, RangeSelection::full(bounds)).len(), 2);
    }

    #[test]
    fn narrowing_to_the_minimum_keeps_afghanistan_only() {
        let values = [AFG, CHN];
        let bounds = PopulationBounds::from_values(&values).unwrap();
        assert_eq!(RangeSelection::full(bounds), RangeSelection { lo: 41_128_771, hi: 1_425_887_337 });
        let narrow = RangeSelection { lo: 41_128_771, hi: 41_128_771 };
        assert_eq!(filtered_indices(&values, narrow), vec![0]);
    }

    #[test]
    fn every_kept_row_is_inside_the_selection() {
        let values: Vec<f64> = (0..200).map(|i| (i * 37 % 101) as f64 * 1_000.0).collect();
        let selection = RangeSelection { lo: 20_000, hi: 70_000 };
        let kept = filtered_indices(&values, selection);
        assert!(!kept.is_empty());
        for i in &kept {
            assert!(values[*i] >= 20_000.0 && values[*i] <= 70_000.0);
        }
        let dropped = values.len() - kept.len();
        assert_eq!(
            dropped,
            values.iter().filter(|v| **v < 20_000.0 || **v > 70_000.0).count()
        );
    }

    #[test]
    fn widening_never_drops_rows() {
        let values: Vec<f64> = (0..50).map(|i| (i * i) as f64).collect();
        let mut previous = 0;
        for width in 0..=2_500 {
            let kept = filtered_indices(&values, RangeSelection { lo: 0, hi: width }).len();
            assert!(kept >= previous);
            previous = kept;
        }
        assert_eq!(previous, values.len());
    }

    #[test]
    fn single_value_collapses_to_a_fixed_point() {
        let values = [7.0, 7.0, 7.0];
        let bounds = PopulationBounds::from_values(&values).unwrap();
        assert!(bounds.is_fixed_point());
        assert_eq!(filtered_indices(&values, RangeSelection::full(bounds)), vec![0, 1, 2]);
    }

    #[test]
    fn clamping_keeps_lo_below_hi() {
        let bounds = PopulationBounds { min: 10, max: 100 };
        assert_eq!(
            RangeSelection { lo: -5, hi: 500 }.clamped(bounds),
            RangeSelection { lo: 10, hi: 100 }
        );
        assert_eq!(
            RangeSelection { lo: 90, hi: 20 }.clamped(bounds),
            RangeSelection { lo: 90, hi: 90 }
        );
    }

    #[test]
    fn empty_column_has_no_bounds() {
        assert!(matches!(PopulationBounds::from_values(&[]), Err(LoadError::NoRows)));
    }

    #[test]
    fn non_numeric_population_is_a_load_error() {
        let ds = Dataset::new(
            vec!["2022 Population".into()],
            vec![
                vec![CellValue::Integer(3)],
                vec![CellValue::Text("lots".into())],
            ],
        );
        let err = population_values(&ds, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column '2022 Population', row 2: 'lots' is not a number"
        );
    }

    #[test]
    fn populations_beyond_the_slider_range_are_rejected() {
        let ds = Dataset::new(
            vec!["2022 Population".into()],
            vec![
                vec![CellValue::Integer(3)],
                vec![CellValue::Float(1e19)],
            ],
        );
        assert!(matches!(
            population_values(&ds, 0),
            Err(LoadError::NotNumeric { row: 2, .. })
        ));

        let ds = Dataset::new(vec!["p".into()], vec![vec![CellValue::Float(f64::INFINITY)]]);
        assert!(population_values(&ds, 0).is_err());

        let largest = ds_with(9.2e18);
        let values = population_values(&largest, 0).unwrap();
        let bounds = PopulationBounds::from_values(&values).unwrap();
        assert_eq!(filtered_indices(&values, RangeSelection::full(bounds)), vec![0]);
    }

    fn ds_with(value: f64) -> Dataset {
        Dataset::new(vec!["p".into()], vec![vec![CellValue::Float(value)]])
    }

    #[test]
    fn missing_population_is_a_load_error() {
        let ds = Dataset::new(vec!["p".into()], vec![vec![CellValue::Null]]);
        assert!(matches!(
            population_values(&ds, 0),
            Err(LoadError::NotNumeric { row: 1, .. })
        ));
    }
}
