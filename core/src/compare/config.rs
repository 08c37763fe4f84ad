use crate::types::Series;

/// Modality compared by default
pub const DEFAULT_MODALITY: &str = "MR";

/// Configuration for comparing two sessions
///
/// # Example
///
/// ```
/// use dicomcheck_core::CompareConfig;
///
/// let config = CompareConfig::default()
///     .with_modality("CT")
///     .deep_search(true);
///
/// assert_eq!(config.modality.as_deref(), Some("CT"));
/// assert!(config.deep_search);
/// assert!(config.require_repetition_time);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareConfig {
    /// Only series with this modality are compared; `None` compares all
    pub modality: Option<String>,

    /// Skip series that have no repetition time
    pub require_repetition_time: bool,

    /// Search nested sequences for scan and supplementary parameters
    pub deep_search: bool,

    /// Report supplementary acquisition parameters
    pub include_parameters: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            modality: Some(DEFAULT_MODALITY.to_string()),
            require_repetition_time: true,
            deep_search: false,
            include_parameters: true,
        }
    }
}

impl CompareConfig {
    /// Creates a configuration that compares every series
    ///
    /// # Example
    ///
    /// ```
    /// use dicomcheck_core::CompareConfig;
    ///
    /// let permissive = CompareConfig::permissive();
    /// assert!(permissive.modality.is_none());
    /// assert!(!permissive.require_repetition_time);
    /// ```
    pub fn permissive() -> Self {
        Self {
            modality: None,
            require_repetition_time: false,
            deep_search: false,
            include_parameters: true,
        }
    }

    /// Builder: Restrict comparison to one modality
    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        self.modality = Some(modality.into());
        self
    }

    /// Builder: Compare series of any modality
    pub fn any_modality(mut self) -> Self {
        self.modality = None;
        self
    }

    /// Builder: Skip series without a repetition time
    pub fn require_repetition_time(mut self, require: bool) -> Self {
        self.require_repetition_time = require;
        self
    }

    /// Builder: Enable deep search of nested sequences
    pub fn deep_search(mut self, enabled: bool) -> Self {
        self.deep_search = enabled;
        self
    }

    /// Builder: Report supplementary parameters
    pub fn include_parameters(mut self, include: bool) -> Self {
        self.include_parameters = include;
        self
    }

    /// Whether a series of the new session takes part in the comparison
    pub fn is_comparable(&self, series: &Series) -> bool {
        if let Some(modality) = &self.modality {
            if !series.is_modality(modality) {
                return false;
            }
        }
        !self.require_repetition_time || series.tr.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::mr_record;
    use crate::extraction::tags::MODALITY;

    #[test]
    fn test_default_config() {
        let config = CompareConfig::default();
        assert_eq!(config.modality.as_deref(), Some("MR"));
        assert!(config.require_repetition_time);
        assert!(!config.deep_search);
        assert!(config.include_parameters);
    }

    #[test]
    fn test_builder_chain() {
        let config = CompareConfig::permissive()
            .with_modality("MR")
            .require_repetition_time(true)
            .include_parameters(false);
        assert_eq!(config, CompareConfig::default().include_parameters(false));
        assert!(config.clone().any_modality().modality.is_none());
    }

    #[test]
    fn test_is_comparable() {
        let config = CompareConfig::default();
        let with_tr = Series::from_sidecar(&mr_record("1", "1.1", "T1", Some("500"), None)).unwrap();
        let without_tr = Series::from_sidecar(&mr_record("1", "1.2", "T1", None, None)).unwrap();
        let ct = Series::from_sidecar(
            &mr_record("1", "1.3", "T1", Some("500"), None).with_values(MODALITY, ["CT"]),
        )
        .unwrap();

        assert!(config.is_comparable(&with_tr));
        assert!(!config.is_comparable(&without_tr));
        assert!(!config.is_comparable(&ct));

        let permissive = CompareConfig::permissive();
        assert!(permissive.is_comparable(&without_tr));
        assert!(permissive.is_comparable(&ct));
    }
}
