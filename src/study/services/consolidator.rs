use crate::study::domain::tracked_image::short_image_name;
use crate::study::domain::{ResultRow, Timepoint};
use std::collections::{BTreeMap, BTreeSet};

/// Per-image comparison across timepoints, ready to be written as CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ComparisonTable {
    /// Cell under `column` for the row whose `short_image` is `short_image`
    pub fn cell(&self, short_image: &str, column: &str) -> Option<&str> {
        let short_index = self.header.iter().position(|h| h == "short_image")?;
        let column_index = self.header.iter().position(|h| h == column)?;
        self.rows
            .iter()
            .find(|row| row[short_index] == short_image)
            .map(|row| row[column_index].as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    CvCritical,
    CvHigh,
    SizeMb,
    Density,
}

impl Metric {
    const PIVOTED: [Metric; 4] = [Metric::CvCritical, Metric::CvHigh, Metric::SizeMb, Metric::Density];
    const WITH_DELTA: [Metric; 3] = [Metric::CvCritical, Metric::CvHigh, Metric::Density];

    fn column(&self) -> &'static str {
        match self {
            Metric::CvCritical => "cv_critical",
            Metric::CvHigh => "cv_high",
            Metric::SizeMb => "size_mb",
            Metric::Density => "density",
        }
    }

    fn cell(&self, row: &ResultRow) -> String {
        match self {
            Metric::CvCritical => row.counts.critical.to_string(),
            Metric::CvHigh => row.counts.high.to_string(),
            Metric::SizeMb => row.size.to_string(),
            Metric::Density => row.density.to_string(),
        }
    }

    fn delta(&self, later: &ResultRow, baseline: &ResultRow) -> Option<String> {
        match self {
            Metric::CvCritical => Some(format!(
                "{}",
                later.counts.critical as i64 - baseline.counts.critical as i64
            )),
            Metric::CvHigh => Some(format!(
                "{}",
                later.counts.high as i64 - baseline.counts.high as i64
            )),
            Metric::SizeMb => Some(format!(
                "{:.2}",
                later.size.megabytes() - baseline.size.megabytes()
            )),
            Metric::Density => {
                let diff = later.density.value()? - baseline.density.value()?;
                Some(format!("{:.4}", diff))
            }
        }
    }
}

type ImageKey = (String, String, String);

/// Merges per-timepoint tables and derives the per-image comparison
pub struct Consolidator;

impl Consolidator {
    /// Checks that every row carries the timepoint of the table it came from.
    ///
    /// Returns the 1-based data row number of the first mismatch.
    pub fn find_timepoint_mismatch(expected: Timepoint, rows: &[ResultRow]) -> Option<(usize, Timepoint)> {
        rows.iter()
            .enumerate()
            .find(|(_, row)| row.timepoint != expected)
            .map(|(index, row)| (index + 1, row.timepoint))
    }

    /// Concatenates tables in chronological order, keeping row order within each table
    pub fn merge(mut tables: Vec<(Timepoint, Vec<ResultRow>)>) -> Vec<ResultRow> {
        tables.sort_by_key(|(tp, _)| *tp);
        tables.into_iter().flat_map(|(_, rows)| rows).collect()
    }

    /// Pivots merged rows to one line per (image, tag, repo).
    ///
    /// Columns: `image,tag,repo,short_image`, then `<metric>_<TP>` for every
    /// timepoint present, then `delta_<metric>_<TP>_vs_T0` when T0 is present.
    /// When an image has several rows for one timepoint the first one is used.
    pub fn compare(rows: &[ResultRow]) -> ComparisonTable {
        let present: BTreeSet<Timepoint> = rows.iter().map(|row| row.timepoint).collect();

        let mut groups: BTreeMap<ImageKey, BTreeMap<Timepoint, &ResultRow>> = BTreeMap::new();
        for row in rows {
            groups
                .entry((row.image.clone(), row.tag.clone(), row.repo.clone()))
                .or_default()
                .entry(row.timepoint)
                .or_insert(row);
        }

        let later: Vec<Timepoint> = if present.contains(&Timepoint::T0) {
            present.iter().copied().filter(|tp| *tp != Timepoint::T0).collect()
        } else {
            Vec::new()
        };

        let mut header: Vec<String> = ["image", "tag", "repo", "short_image"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for metric in Metric::PIVOTED {
            for tp in &present {
                header.push(format!("{}_{}", metric.column(), tp));
            }
        }
        for metric in Metric::WITH_DELTA {
            for tp in &later {
                header.push(format!("delta_{}_{}_vs_T0", metric.column(), tp));
            }
        }

        let table_rows = groups
            .into_iter()
            .map(|((image, tag, repo), by_timepoint)| {
                let short_image = by_timepoint
                    .values()
                    .next()
                    .map(|row| short_image_name(&row.image_ref).to_string())
                    .unwrap_or_default();

                let mut cells = vec![image, tag, repo, short_image];
                for metric in Metric::PIVOTED {
                    for tp in &present {
                        cells.push(
                            by_timepoint
                                .get(tp)
                                .map(|row| metric.cell(row))
                                .unwrap_or_default(),
                        );
                    }
                }
                for metric in Metric::WITH_DELTA {
                    for tp in &later {
                        let delta = match (by_timepoint.get(tp), by_timepoint.get(&Timepoint::T0)) {
                            (Some(later_row), Some(baseline)) => metric.delta(later_row, baseline),
                            _ => None,
                        };
                        cells.push(delta.unwrap_or_default());
                    }
                }
                cells
            })
            .collect();

        ComparisonTable {
            header,
            rows: table_rows,
        }
    }
}
