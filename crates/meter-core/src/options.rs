use meter_ingest::{CsvFormat, DEFAULT_EXTENSION, SourceOrder};

/// What to do when a record source cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// Fail the whole load.
    #[default]
    Abort,
    /// Log a warning, record the source as skipped and continue.
    SkipAndWarn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub format: CsvFormat,
    /// Record source extension, without the dot.
    pub extension: String,
    pub source_order: SourceOrder,
    pub read_failure: ReadFailurePolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: CsvFormat::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            source_order: SourceOrder::default(),
            read_failure: ReadFailurePolicy::default(),
        }
    }
}

impl LoadOptions {
    pub fn with_format(mut self, format: CsvFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_source_order(mut self, order: SourceOrder) -> Self {
        self.source_order = order;
        self
    }

    pub fn with_read_failure(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure = policy;
        self
    }
}
