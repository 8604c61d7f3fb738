//! Mapper configuration.
//!
//! Packing is on by default. Either family can be switched off with an
//! environment variable, which is read once when the process-wide mapper is
//! created:
//!
//! ```text
//! SEQID_PACK_TEXTID=0   # intern every accession as its own entry
//! SEQID_PACK_GI=off     # intern every GI as its own entry
//! ```

/// Environment variable controlling accession packing.
pub const PACK_TEXTID_ENV: &str = "SEQID_PACK_TEXTID";

/// Environment variable controlling GI packing.
pub const PACK_GI_ENV: &str = "SEQID_PACK_GI";

/// Packing switches for a `SeqIdMapper`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapperConfig {
    /// Share one entry per accession family and version.
    pub pack_text_ids: bool,
    /// Share one entry for every non-zero GI.
    pub pack_gis: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            pack_text_ids: true,
            pack_gis: true,
        }
    }
}

impl MapperConfig {
    /// Every value gets its own plain entry.
    pub fn unpacked() -> Self {
        MapperConfig {
            pack_text_ids: false,
            pack_gis: false,
        }
    }

    /// Defaults overridden by `SEQID_PACK_TEXTID` and `SEQID_PACK_GI`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by the values `lookup` returns for the variable
    /// names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MapperConfig::default();
        MapperConfig {
            pack_text_ids: read_flag(&lookup, PACK_TEXTID_ENV, defaults.pack_text_ids),
            pack_gis: read_flag(&lookup, PACK_GI_ENV, defaults.pack_gis),
        }
    }
}

fn read_flag(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    let Some(value) = lookup(name) else {
        return default;
    };
    match parse_flag(&value) {
        Some(flag) => flag,
        None => {
            tracing::warn!(name, value = %value, "ignoring unrecognized boolean setting");
            default
        }
    }
}

/// `1/true/yes/on` or `0/false/no/off`, ignoring case and surrounding
/// whitespace.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["1", "true", "yes", "on"];
    const FALSE: [&str; 4] = ["0", "false", "no", "off"];
    let value = value.trim();
    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}
