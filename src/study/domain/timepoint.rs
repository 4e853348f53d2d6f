use std::fmt;
use std::str::FromStr;

/// One of the four longitudinal measurement occasions, nominally a week apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timepoint {
    T0,
    T1,
    T2,
    T3,
}

impl Timepoint {
    /// All timepoints in chronological order
    pub const ALL: [Timepoint; 4] = [Timepoint::T0, Timepoint::T1, Timepoint::T2, Timepoint::T3];

    /// Label used inside tables (`T0`)
    pub fn label(&self) -> &'static str {
        match self {
            Timepoint::T0 => "T0",
            Timepoint::T1 => "T1",
            Timepoint::T2 => "T2",
            Timepoint::T3 => "T3",
        }
    }

    /// Lower-case form used in file names (`t0`)
    pub fn file_stem(&self) -> &'static str {
        match self {
            Timepoint::T0 => "t0",
            Timepoint::T1 => "t1",
            Timepoint::T2 => "t2",
            Timepoint::T3 => "t3",
        }
    }
}

impl fmt::Display for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timepoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "T0" | "0" => Ok(Timepoint::T0),
            "T1" | "1" => Ok(Timepoint::T1),
            "T2" | "2" => Ok(Timepoint::T2),
            "T3" | "3" => Ok(Timepoint::T3),
            _ => Err(format!(
                "Invalid timepoint: {}. Please specify one of T0, T1, T2, T3",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timepoint_from_str_variants() {
        assert_eq!(Timepoint::from_str("t0").unwrap(), Timepoint::T0);
        assert_eq!(Timepoint::from_str("T1").unwrap(), Timepoint::T1);
        assert_eq!(Timepoint::from_str(" t2 ").unwrap(), Timepoint::T2);
        assert_eq!(Timepoint::from_str("3").unwrap(), Timepoint::T3);
    }

    #[test]
    fn test_timepoint_from_str_invalid() {
        let err = Timepoint::from_str("t4").unwrap_err();
        assert!(err.contains("Invalid timepoint"));
        assert!(err.contains("T0, T1, T2, T3"));
        assert!(Timepoint::from_str("").is_err());
    }

    #[test]
    fn test_timepoint_labels() {
        assert_eq!(Timepoint::T2.label(), "T2");
        assert_eq!(Timepoint::T2.file_stem(), "t2");
        assert_eq!(format!("{}", Timepoint::T3), "T3");
    }

    #[test]
    fn test_timepoint_ordering() {
        let mut tps = vec![Timepoint::T3, Timepoint::T0, Timepoint::T2, Timepoint::T1];
        tps.sort();
        assert_eq!(tps, Timepoint::ALL.to_vec());
    }
}
