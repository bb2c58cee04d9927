use bitflags::bitflags;

bitflags! {
    /// Rendering toggles, combined with `|`.
    ///
    /// `ALL` covers the human-readable segments only; `PROPERTIES` and `JSON`
    /// are always opt-in. Note that the generated `Options::all()` sets every
    /// bit including `JSON`, which is rarely what a caller wants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Options: u16 {
        const DATE = 1 << 0;
        const TIME = 1 << 1;
        const LEVELS = 1 << 2;
        const TAGS = 1 << 3;
        const TRACE = 1 << 4;
        const COLORS = 1 << 5;
        const PROPERTIES = 1 << 6;
        const JSON = 1 << 7;

        const ALL = Self::DATE.bits()
            | Self::TIME.bits()
            | Self::LEVELS.bits()
            | Self::TAGS.bits()
            | Self::TRACE.bits()
            | Self::COLORS.bits();
    }
}

impl Options {
    /// Parse a single option name such as `levels` or `ALL`, ignoring case.
    pub fn from_name_ci(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_uppercase())
    }

    /// Combine a list of option names. Returns the first unknown name on failure.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::empty();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                continue;
            }
            match Self::from_name_ci(name) {
                Some(flag) => options |= flag,
                None => return Err(name.trim().to_string()),
            }
        }
        Ok(options)
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_excludes_json_and_properties() {
        assert!(Options::ALL.contains(Options::DATE | Options::TRACE | Options::COLORS));
        assert!(!Options::ALL.contains(Options::JSON));
        assert!(!Options::ALL.contains(Options::PROPERTIES));
    }

    #[test]
    fn test_from_name_ci() {
        assert_eq!(Options::from_name_ci("levels"), Some(Options::LEVELS));
        assert_eq!(Options::from_name_ci(" Json "), Some(Options::JSON));
        assert_eq!(Options::from_name_ci("all"), Some(Options::ALL));
        assert_eq!(Options::from_name_ci("nope"), None);
    }

    #[test]
    fn test_from_names_combines() {
        let options = Options::from_names(["levels", "tags", ""]).unwrap();
        assert_eq!(options, Options::LEVELS | Options::TAGS);
    }

    #[test]
    fn test_from_names_reports_unknown() {
        let err = Options::from_names(["levels", "sparkles"]).unwrap_err();
        assert_eq!(err, "sparkles");
    }
}
