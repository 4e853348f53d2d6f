use crate::study::domain::{Density, ImageSize, ScannerInfo, SeverityCounts, Timepoint, TrackedImage};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column header shared by per-timepoint and merged tables
pub const RESULT_COLUMNS: [&str; 12] = [
    "timepoint",
    "image",
    "tag",
    "repo",
    "image_ref",
    "size_mb",
    "cv_critical",
    "cv_high",
    "density",
    "trivy_db_updated_at",
    "trivy_version",
    "scan_utc",
];

/// One image measured at one timepoint
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub timepoint: Timepoint,
    /// Source reference the image was mirrored from
    pub image: String,
    pub tag: String,
    pub repo: String,
    /// Fully qualified registry reference that was scanned
    pub image_ref: String,
    pub size: ImageSize,
    pub counts: SeverityCounts,
    pub density: Density,
    pub trivy_db_updated_at: Option<String>,
    pub trivy_version: String,
    pub scan_utc: String,
}

impl ResultRow {
    /// Assembles a row from one image's measurements and aggregated findings
    pub fn new(
        timepoint: Timepoint,
        image: &TrackedImage,
        image_ref: String,
        size: ImageSize,
        (counts, density): (SeverityCounts, Density),
        scanner: &ScannerInfo,
        scan_utc: String,
    ) -> Self {
        Self {
            timepoint,
            image: image.source().to_string(),
            tag: image.tag().to_string(),
            repo: image.repo().to_string(),
            image_ref,
            size,
            counts,
            density,
            trivy_db_updated_at: scanner.db_updated_at().map(str::to_string),
            trivy_version: scanner.version().to_string(),
            scan_utc,
        }
    }

    pub fn to_record(&self) -> ResultRecord {
        ResultRecord {
            timepoint: self.timepoint.label().to_string(),
            image: self.image.clone(),
            tag: self.tag.clone(),
            repo: self.repo.clone(),
            image_ref: self.image_ref.clone(),
            size_mb: self.size.to_string(),
            cv_critical: self.counts.critical.to_string(),
            cv_high: self.counts.high.to_string(),
            density: self.density.to_string(),
            trivy_db_updated_at: self.trivy_db_updated_at.clone(),
            trivy_version: self.trivy_version.clone(),
            scan_utc: self.scan_utc.clone(),
        }
    }
}

/// Textual CSV form of a [`ResultRow`]; field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub timepoint: String,
    pub image: String,
    pub tag: String,
    pub repo: String,
    pub image_ref: String,
    pub size_mb: String,
    pub cv_critical: String,
    pub cv_high: String,
    pub density: String,
    pub trivy_db_updated_at: Option<String>,
    pub trivy_version: String,
    pub scan_utc: String,
}

impl ResultRecord {
    /// Validates and converts the record back into a typed row.
    ///
    /// Every column except `trivy_db_updated_at` is required; numeric columns
    /// must parse, and `density` may hold the sentinel.
    pub fn into_row(self) -> Result<ResultRow, String> {
        let required = [
            ("timepoint", &self.timepoint),
            ("image", &self.image),
            ("tag", &self.tag),
            ("repo", &self.repo),
            ("image_ref", &self.image_ref),
            ("size_mb", &self.size_mb),
            ("cv_critical", &self.cv_critical),
            ("cv_high", &self.cv_high),
            ("density", &self.density),
            ("trivy_version", &self.trivy_version),
            ("scan_utc", &self.scan_utc),
        ];
        if let Some((column, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("Missing value in required column {}", column));
        }

        let timepoint = Timepoint::from_str(&self.timepoint)?;
        let size_mb: f64 = parse_number(&self.size_mb, "size_mb")?;
        let critical: u64 = parse_number(&self.cv_critical, "cv_critical")?;
        let high: u64 = parse_number(&self.cv_high, "cv_high")?;
        let density = Density::parse(&self.density)
            .ok_or_else(|| format!("Non-numeric value in column density: {}", self.density))?;

        Ok(ResultRow {
            timepoint,
            image: self.image,
            tag: self.tag,
            repo: self.repo,
            image_ref: self.image_ref,
            size: ImageSize::from_megabytes(size_mb),
            counts: SeverityCounts::new(critical, high),
            density,
            trivy_db_updated_at: self
                .trivy_db_updated_at
                .filter(|value| !value.trim().is_empty()),
            trivy_version: self.trivy_version,
            scan_utc: self.scan_utc,
        })
    }
}

fn parse_number<T: FromStr>(raw: &str, column: &str) -> Result<T, String> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| format!("Non-numeric value in column {}: {}", column, raw))
}
