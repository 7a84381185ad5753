/// Three-way presentation category derived from the backend verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictBucket {
    Real,
    Likely,
    Fake,
}

impl VerdictBucket {
    /// Exact, case-sensitive match; anything unrecognised falls into `Fake`.
    pub fn from_verdict(verdict: &str) -> Self {
        match verdict {
            "REAL" => VerdictBucket::Real,
            "LIKELY REAL" => VerdictBucket::Likely,
            _ => VerdictBucket::Fake,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerdictBucket::Real => "real",
            VerdictBucket::Likely => "likely",
            VerdictBucket::Fake => "fake",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VerdictBucket;

    #[test]
    fn near_misses_are_fake() {
        for verdict in ["real", "Real", " REAL", "LIKELY  REAL", "LIKELY"] {
            assert_eq!(VerdictBucket::from_verdict(verdict), VerdictBucket::Fake);
        }
    }
}
