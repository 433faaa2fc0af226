use crate::error::{AnalysisError, Result};
use csv::StringRecord;
use hashbrown::HashMap;
use std::path::{Path, PathBuf};

/// Rows of a results table, as loaded from a CSV file with a header row.
///
/// The table is read-only once loaded; derived outputs borrow from it.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    /// File the table was loaded from, used in error messages
    path: PathBuf,
    /// Column names from the header row
    headers: StringRecord,
    /// Data rows in file order
    rows: Vec<StringRecord>,
}

impl MeasurementTable {
    pub fn new(path: impl Into<PathBuf>, headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self {
            path: path.into(),
            headers,
            rows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| AnalysisError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Returns the cells of a named column in row order.
    ///
    /// Rows shorter than the header yield an empty cell.
    ///
    /// # Errors
    /// [`AnalysisError::MissingColumn`] if the header has no such column.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &str> + '_> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| row.get(index).unwrap_or("")))
    }

    /// Returns a named column coerced to `f64`.
    ///
    /// Empty cells and non-finite values (`NaN`, `inf`) are rejected.
    ///
    /// # Errors
    /// [`AnalysisError::MissingColumn`] if the column is absent,
    /// [`AnalysisError::TypeCoercion`] for the first cell that is not a finite number.
    pub fn float_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        let mut values = Vec::with_capacity(self.rows.len());

        for (row_index, row) in self.rows.iter().enumerate() {
            let cell = row.get(index).unwrap_or("");
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => {
                    // Header is line 1, so the first data row is line 2.
                    let line = row
                        .position()
                        .map(|position| position.line())
                        .unwrap_or(row_index as u64 + 2);
                    return Err(AnalysisError::TypeCoercion {
                        path: self.path.clone(),
                        column: name.to_string(),
                        line,
                        value: cell.to_string(),
                    });
                }
            }
        }

        Ok(values)
    }
}

/// Distribution statistics of one timing column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Number of values the statistics were computed over
    pub count: usize,
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStatistics {
    /// Computes median, arithmetic mean, minimum and maximum over all values.
    ///
    /// No filtering or outlier removal is applied. For an even number of values
    /// the median is the mean of the two middle values.
    ///
    /// Returns [`None`] for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let count = sorted.len();
        let middle = count / 2;
        let median = if count % 2 == 0 {
            (sorted[middle - 1] + sorted[middle]) / 2.0
        } else {
            sorted[middle]
        };

        Some(Self {
            count,
            median,
            mean: sorted.iter().sum::<f64>() / count as f64,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

/// Occurrence count of every distinct label, ordered by descending count.
///
/// Labels with equal counts keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // Index into `entries`, which stays in first-seen order until sorted.
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for label in labels {
            match index.get(label).copied() {
                Some(slot) => entries[slot].1 += 1,
                None => {
                    index.insert(label, entries.len());
                    entries.push((label.to_string(), 1));
                }
            }
        }

        // Stable sort: ties remain in first-seen order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Sum of all counts; equals the number of rows that were counted.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(headers: &[&str], rows: &[&[&str]]) -> MeasurementTable {
        MeasurementTable::new(
            "results/test.csv",
            StringRecord::from(headers.to_vec()),
            rows.iter().map(|row| StringRecord::from(row.to_vec())).collect(),
        )
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    fn identical_values_give_identical_statistics(#[case] count: usize) {
        let values = vec![42.5; count];
        let stats = SummaryStatistics::from_values(&values).unwrap();

        assert_eq!(stats.count, count);
        assert_eq!(stats.median, 42.5);
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.min, 42.5);
        assert_eq!(stats.max, 42.5);
    }

    #[test]
    fn statistics_of_one_to_five() {
        let stats = SummaryStatistics::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn even_count_median_averages_middle_values() {
        let stats = SummaryStatistics::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn statistics_ignore_row_order() {
        let forward = [0.5, 12.0, 3.25, 7.0, 7.0, 100.0];
        let mut reversed = forward;
        reversed.reverse();
        let shuffled = [7.0, 100.0, 0.5, 7.0, 3.25, 12.0];

        let expected = SummaryStatistics::from_values(&forward).unwrap();
        assert_eq!(SummaryStatistics::from_values(&reversed).unwrap(), expected);
        assert_eq!(SummaryStatistics::from_values(&shuffled).unwrap(), expected);
    }

    #[test]
    fn no_statistics_for_empty_input() {
        assert!(SummaryStatistics::from_values(&[]).is_none());
    }

    #[test]
    fn float_column_parses_values() {
        let table = table(&["File", "Elapsed_time_ms"], &[&["a", "1.5"], &["b", "20"]]);
        assert_eq!(table.float_column("Elapsed_time_ms").unwrap(), vec![1.5, 20.0]);
    }

    #[rstest]
    #[case("fast")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn float_column_rejects_non_numeric(#[case] cell: &str) {
        let table = table(&["Elapsed_time_ms"], &[&["1.0"], &[cell]]);
        let result = table.float_column("Elapsed_time_ms");

        match result {
            Err(AnalysisError::TypeCoercion { value, line, .. }) => {
                assert_eq!(value, cell);
                assert_eq!(line, 3);
            }
            other => panic!("expected a coercion error, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_reported() {
        let table = table(&["Result"], &[&["SAT"]]);
        assert!(!table.has_column("Config"));
        assert!(matches!(
            table.column("Config"),
            Err(AnalysisError::MissingColumn { .. })
        ));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let table = table(&["File", "Config"], &[&["a", "DLIS"], &["b"]]);
        let cells: Vec<_> = table.column("Config").unwrap().collect();
        assert_eq!(cells, vec!["DLIS", ""]);
    }

    #[test]
    fn frequencies_sorted_by_descending_count() {
        let labels = ["Random", "DLIS", "VSIDS-Fast", "DLIS", "VSIDS-Fast", "DLIS"];
        let frequencies = FrequencyTable::from_labels(labels);

        assert_eq!(
            frequencies.entries(),
            &[
                ("DLIS".to_string(), 3),
                ("VSIDS-Fast".to_string(), 2),
                ("Random".to_string(), 1),
            ]
        );
    }

    #[test]
    fn frequency_ties_keep_first_seen_order() {
        let labels = ["VSIDS-Slow", "Random", "DLIS", "Random", "VSIDS-Slow", "DLIS"];
        let frequencies = FrequencyTable::from_labels(labels);
        let order: Vec<_> = frequencies.entries().iter().map(|(l, _)| l.as_str()).collect();

        assert_eq!(order, vec!["VSIDS-Slow", "Random", "DLIS"]);
    }

    #[test]
    fn frequency_counts_sum_to_row_count() {
        let labels = ["a", "b", "a", "c", "c", "c", "d"];
        let frequencies = FrequencyTable::from_labels(labels);

        assert_eq!(frequencies.total(), labels.len());
        assert_eq!(frequencies.len(), 4);
        assert!(frequencies.entries().iter().all(|(_, count)| *count >= 1));
    }
}
