//! Text identifiers: accession, locus name, version and release.

use std::cmp::Ordering;

/// Largest number of digits an accession may carry and still be split into
/// a numeric part that fits an `i64`.
pub const MAX_ACCESSION_DIGITS: usize = 12;

/// Largest accession prefix length (letters only, excluding `_`).
pub const MAX_ACCESSION_LETTERS: usize = 4;

/// Payload of every text-id subtype (`gb`, `emb`, `ref`, ...).
///
/// At least one of `accession` / `name` is set for any value produced by
/// the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextseqId {
    pub accession: Option<String>,
    pub name: Option<String>,
    pub version: Option<i32>,
    pub release: Option<String>,
}

/// An accession split into its alphabetic prefix and numeric part,
/// e.g. `NM_` + `000001`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AccessionParts<'a> {
    /// Letters, optionally followed by a single `_`.
    pub prefix: &'a str,
    /// ASCII digits, at most [`MAX_ACCESSION_DIGITS`] of them.
    pub digits: &'a str,
}

impl AccessionParts<'_> {
    /// Numeric value of the digit run.
    pub fn number(&self) -> i64 {
        self.digits
            .bytes()
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'))
    }

    /// Whether the prefix ends with `_` (the RefSeq convention).
    pub fn is_underscored(&self) -> bool {
        self.prefix.ends_with('_')
    }
}

/// Split an accession into prefix and digits.
///
/// Returns `None` if the accession does not have the shape
/// `[A-Za-z]{1,4}_?[0-9]{1,12}`.
pub fn split_accession(accession: &str) -> Option<AccessionParts<'_>> {
    let letters = accession
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    if letters == 0 || letters > MAX_ACCESSION_LETTERS {
        return None;
    }
    let prefix_len = if accession.as_bytes().get(letters) == Some(&b'_') {
        letters + 1
    } else {
        letters
    };
    let digits = &accession[prefix_len..];
    if digits.is_empty()
        || digits.len() > MAX_ACCESSION_DIGITS
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    Some(AccessionParts {
        prefix: &accession[..prefix_len],
        digits,
    })
}

/// Three-way comparison of two strings ignoring ASCII case.
pub(crate) fn cmp_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    let lhs = a.bytes().map(|c| c.to_ascii_lowercase());
    let rhs = b.bytes().map(|c| c.to_ascii_lowercase());
    lhs.cmp(rhs)
}

/// Optional string comparison: missing sorts first.
fn cmp_opt_nocase(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp_ignore_ascii_case(a, b),
    }
}

fn eq_opt_nocase(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// `None` in `generic` is a wildcard; otherwise `specific` must carry an
/// equal value.
fn field_matches(generic: Option<&str>, specific: Option<&str>) -> bool {
    match (generic, specific) {
        (None, _) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (Some(_), None) => false,
    }
}

impl TextseqId {
    /// Text id with only an accession.
    pub fn with_accession(accession: impl Into<String>) -> Self {
        TextseqId {
            accession: Some(accession.into()),
            ..TextseqId::default()
        }
    }

    /// Text id with only a locus name.
    pub fn with_name(name: impl Into<String>) -> Self {
        TextseqId {
            name: Some(name.into()),
            ..TextseqId::default()
        }
    }

    /// Set the version.
    #[must_use]
    pub fn version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the locus name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the release.
    #[must_use]
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// Split the accession into prefix and digits, if it has that shape.
    pub fn accession_parts(&self) -> Option<AccessionParts<'_>> {
        self.accession.as_deref().and_then(split_accession)
    }

    /// True when an accession and a version are both present.
    pub fn is_acc_ver(&self) -> bool {
        self.accession.is_some() && self.version.is_some()
    }

    /// True when both ids carry an accession and they are equal ignoring case.
    pub fn same_accession(&self, other: &TextseqId) -> bool {
        match (&self.accession, &other.accession) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }

    /// Equality used for interning: accession and name ignore case,
    /// version and release are exact.
    pub fn equals_ignore_case(&self, other: &TextseqId) -> bool {
        eq_opt_nocase(self.accession.as_deref(), other.accession.as_deref())
            && eq_opt_nocase(self.name.as_deref(), other.name.as_deref())
            && self.version == other.version
            && self.release == other.release
    }

    /// True if `self` is the same as, or a more generic version of, `other`:
    /// every field set in `self` is set in `other` with an equal value.
    ///
    /// `ACC123` matches `ACC123.1` and `ACC123.2`; `ACC123.1` does not match
    /// `ACC123.2`.
    pub fn matches_to(&self, other: &TextseqId) -> bool {
        if self.accession.is_none() && self.name.is_none() {
            return false;
        }
        field_matches(self.accession.as_deref(), other.accession.as_deref())
            && field_matches(self.name.as_deref(), other.name.as_deref())
            && (self.version.is_none() || self.version == other.version)
            && field_matches(self.release.as_deref(), other.release.as_deref())
    }

    /// Stable ordering: accession, version, name, release; missing first.
    ///
    /// Accession and name ignore case and release is exact, so two ids
    /// compare `Equal` exactly when [`equals_ignore_case`](Self::equals_ignore_case)
    /// holds.
    pub fn compare_ordered(&self, other: &TextseqId) -> Ordering {
        cmp_opt_nocase(self.accession.as_deref(), other.accession.as_deref())
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| cmp_opt_nocase(self.name.as_deref(), other.name.as_deref()))
            .then_with(|| self.release.cmp(&other.release))
    }
}
