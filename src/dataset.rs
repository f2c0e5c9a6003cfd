//! Dataset acquisition and access
//!
//! Downloads the fixed ball-by-ball archive, extracts the CSV, and loads it
//! into a typed, immutable table shared read-only by every analysis view.
//! Schema validation happens once here; the rest of the crate works with
//! typed `Delivery` records and the `Column` enum instead of string lookups.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Fixed source archive for the ball-by-ball dataset.
pub const DATA_URL: &str = "https://github.com/WaseefKhalid/Cricklytics/raw/main/ipl_data.zip";

/// Default directory the archive is extracted into.
pub const DATA_DIR: &str = "ipl_data";

/// Name of the CSV file inside the archive.
pub const DATA_FILE: &str = "ipl_data.csv";

// ============================================================================
// Delivery record
// ============================================================================

/// One delivery (ball bowled): the atomic row of the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Delivery {
    pub ground: String,
    pub bowl_kind: String,
    pub bowl_style: String,
    pub bat_hand: String,
    /// Batsman name
    pub bat: String,
    /// Bowler name
    pub bowl: String,
    /// Team that won the toss
    pub toss: String,
    /// Team that won the match
    pub winner: String,
    /// Team batting on this delivery
    pub team_bat: String,
    /// Innings number (1 or 2)
    pub inns: u8,
    /// Delivery number within the innings; drives phase bucketing
    pub ball_id: u32,
    pub shot: String,
    pub line: String,
    pub length: String,
    /// Runs off the bat
    pub batruns: u32,
    /// Runs conceded by the bowler
    pub bowlruns: u32,
    /// Always-present marker; counted to derive balls faced/bowled
    pub ball: u8,
    /// 1 if a dismissal occurred on this delivery
    pub out: u8,
    #[serde(rename = "isSix")]
    pub is_six: u8,
    #[serde(rename = "isFour")]
    pub is_four: u8,
    #[serde(rename = "isDot")]
    pub is_dot: u8,
    /// 1 if the batsman played the ball with full control
    pub control: u8,
    #[serde(rename = "ActivityRuns")]
    pub activity_runs: u32,
}

// ============================================================================
// Schema
// ============================================================================

/// Categorical columns usable as filter or grouping dimensions.
///
/// All categorical access goes through [`Column::value`], so a filter can
/// never be misapplied to a column that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Ground,
    BowlKind,
    BowlStyle,
    BatHand,
    Bat,
    Bowl,
    Toss,
    Winner,
    TeamBat,
    Shot,
    Line,
    Length,
}

impl Column {
    /// Value of this column for a delivery.
    pub fn value<'a>(&self, d: &'a Delivery) -> &'a str {
        match self {
            Column::Ground => &d.ground,
            Column::BowlKind => &d.bowl_kind,
            Column::BowlStyle => &d.bowl_style,
            Column::BatHand => &d.bat_hand,
            Column::Bat => &d.bat,
            Column::Bowl => &d.bowl,
            Column::Toss => &d.toss,
            Column::Winner => &d.winner,
            Column::TeamBat => &d.team_bat,
            Column::Shot => &d.shot,
            Column::Line => &d.line,
            Column::Length => &d.length,
        }
    }

    /// Column name as it appears in the CSV header.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Ground => "ground",
            Column::BowlKind => "bowl_kind",
            Column::BowlStyle => "bowl_style",
            Column::BatHand => "bat_hand",
            Column::Bat => "bat",
            Column::Bowl => "bowl",
            Column::Toss => "toss",
            Column::Winner => "winner",
            Column::TeamBat => "team_bat",
            Column::Shot => "shot",
            Column::Line => "line",
            Column::Length => "length",
        }
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// The loaded ball-by-ball table. Immutable after construction; every view
/// derives filtered row sets and never writes back.
#[derive(Debug)]
pub struct Dataset {
    deliveries: Vec<Delivery>,
}

impl Dataset {
    /// Load and validate the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .from_path(path)
            .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

        let mut deliveries = Vec::new();
        for (row_num, result) in reader.deserialize::<Delivery>().enumerate() {
            // Row numbers are 1-based and skip the header line
            let delivery = result
                .with_context(|| format!("Failed to parse dataset row {}", row_num + 2))?;
            deliveries.push(delivery);
        }

        log::info!(
            "Loaded {} deliveries from {}",
            deliveries.len(),
            path.display()
        );
        Self::from_deliveries(deliveries)
    }

    /// Build a dataset from already-parsed deliveries, validating the schema
    /// invariants the analysis layer relies on.
    pub fn from_deliveries(deliveries: Vec<Delivery>) -> Result<Self> {
        if deliveries.is_empty() {
            anyhow::bail!("Dataset is empty");
        }
        for (i, d) in deliveries.iter().enumerate() {
            let row = i + 2;
            if d.out > 1 {
                anyhow::bail!("Row {}: 'out' must be 0 or 1, got {}", row, d.out);
            }
            if d.ball_id == 0 {
                anyhow::bail!("Row {}: 'ball_id' must be a positive integer", row);
            }
            if d.inns != 1 && d.inns != 2 {
                anyhow::bail!("Row {}: 'inns' must be 1 or 2, got {}", row, d.inns);
            }
        }
        Ok(Dataset { deliveries })
    }

    /// All deliveries, in file order.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Sorted distinct values of a categorical column, for selector lists.
    pub fn unique_values(&self, column: Column) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .deliveries
            .iter()
            .map(|d| column.value(d))
            .filter(|v| !v.is_empty())
            .collect();
        set.into_iter().map(|s| s.to_string()).collect()
    }
}

// ============================================================================
// Acquisition
// ============================================================================

/// Download the dataset archive and extract it into `dest`.
///
/// Returns the path of the extracted CSV file. Any failure here is fatal to
/// startup: the caller must not run against a partial dataset.
pub fn download_and_extract(url: &str, dest: &Path) -> Result<PathBuf> {
    log::info!("Downloading dataset archive from {}", url);

    let client = reqwest::blocking::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to download dataset archive: {}", url))?;
    if !response.status().is_success() {
        anyhow::bail!("Archive download failed with status {}", response.status());
    }
    let bytes = response
        .bytes()
        .context("Failed to read archive response body")?;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .context("Downloaded archive is not a valid zip file")?;

    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create data directory: {}", dest.display()))?;
    archive
        .extract(dest)
        .with_context(|| format!("Failed to extract archive into {}", dest.display()))?;

    let csv_path = dest.join(DATA_FILE);
    if !csv_path.exists() {
        anyhow::bail!("Archive did not contain {}", DATA_FILE);
    }
    log::info!("Extracted dataset to {}", csv_path.display());
    Ok(csv_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "ground,bowl_kind,bowl_style,bat_hand,bat,bowl,toss,winner,team_bat,inns,ball_id,shot,line,length,batruns,bowlruns,ball,out,isSix,isFour,isDot,control,ActivityRuns";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_load_valid_csv() {
        let file = write_csv(&[
            "Eden Gardens,pace,RF,RHB,V Kohli,J Bumrah,CSK,CSK,CSK,1,3,cover drive,outside off,full,4,4,1,0,0,1,0,1,0",
            "Eden Gardens,spin,OB,LHB,S Dhawan,R Ashwin,CSK,MI,MI,2,17,sweep,on stump,full,0,0,1,1,0,0,1,0,0",
        ]);
        let ds = Dataset::load(file.path()).expect("load should succeed");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.deliveries()[0].bat, "V Kohli");
        assert_eq!(ds.deliveries()[0].batruns, 4);
        assert_eq!(ds.deliveries()[1].is_dot, 1);
        assert_eq!(ds.deliveries()[1].activity_runs, 0);
    }

    #[test]
    fn test_load_rejects_invalid_out() {
        let file = write_csv(&[
            "Eden Gardens,pace,RF,RHB,V Kohli,J Bumrah,CSK,CSK,CSK,1,3,pull,on stump,short,0,0,1,2,0,0,1,1,0",
        ]);
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("'out' must be 0 or 1"));
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_load_rejects_zero_ball_id() {
        let file = write_csv(&[
            "Eden Gardens,pace,RF,RHB,V Kohli,J Bumrah,CSK,CSK,CSK,1,0,pull,on stump,short,0,0,1,0,0,0,1,1,0",
        ]);
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("'ball_id' must be a positive integer"));
    }

    #[test]
    fn test_load_rejects_empty_dataset() {
        let file = write_csv(&[]);
        assert!(Dataset::load(file.path()).is_err());
    }

    #[test]
    fn test_unique_values_sorted_distinct() {
        let file = write_csv(&[
            "Wankhede Stadium,pace,RF,RHB,V Kohli,J Bumrah,MI,MI,MI,1,3,pull,on stump,short,1,1,1,0,0,0,0,1,1",
            "Eden Gardens,spin,OB,RHB,V Kohli,R Ashwin,CSK,CSK,CSK,1,5,sweep,on stump,full,2,2,1,0,0,0,0,1,2",
            "Eden Gardens,pace,RF,LHB,S Dhawan,J Bumrah,CSK,CSK,CSK,2,8,cover drive,outside off,good,0,0,1,0,0,0,1,0,0",
        ]);
        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(
            ds.unique_values(Column::Ground),
            vec!["Eden Gardens".to_string(), "Wankhede Stadium".to_string()]
        );
        assert_eq!(ds.unique_values(Column::Bat).len(), 2);
    }
}
