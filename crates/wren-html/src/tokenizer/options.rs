use super::core::TokenizerState;

/// Knobs for a single tokenizer run.
///
/// The defaults suit a standalone tokenizer with no tree builder attached:
/// lenient error handling, start in the data state, and switch content models
/// on the start tags that would make a tree builder switch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Abort on the first parse error instead of recording it.
    pub strict: bool,
    /// State the tokenizer starts in.
    pub initial_state: TokenizerState,
    /// Tag name treated as the last emitted start tag, for the
    /// appropriate-end-tag check in RCDATA, RAWTEXT and script data.
    pub last_start_tag: Option<String>,
    /// Switch to RCDATA, RAWTEXT, script data or PLAINTEXT after emitting the
    /// corresponding start tags.
    pub switch_text_modes: bool,
    /// Whether `<![CDATA[` opens a CDATA section. Only valid in foreign content,
    /// which the tree builder knows about; off by default.
    pub allow_cdata: bool,
    /// Report each parse error through the diagnostics sink.
    pub log_parse_errors: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            strict: false,
            initial_state: TokenizerState::Data,
            last_start_tag: None,
            switch_text_modes: true,
            allow_cdata: false,
            log_parse_errors: false,
        }
    }
}

impl TokenizerOptions {
    /// Set strict mode.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the initial state.
    #[must_use]
    pub const fn with_initial_state(mut self, state: TokenizerState) -> Self {
        self.initial_state = state;
        self
    }

    /// Seed the last start tag name.
    #[must_use]
    pub fn with_last_start_tag(mut self, name: Option<String>) -> Self {
        self.last_start_tag = name;
        self
    }

    /// Enable or disable content-model switching on emitted start tags.
    #[must_use]
    pub const fn with_switch_text_modes(mut self, switch: bool) -> Self {
        self.switch_text_modes = switch;
        self
    }

    /// Allow CDATA sections.
    #[must_use]
    pub const fn with_allow_cdata(mut self, allow: bool) -> Self {
        self.allow_cdata = allow;
        self
    }

    /// Enable parse error logging.
    #[must_use]
    pub const fn with_log_parse_errors(mut self, log: bool) -> Self {
        self.log_parse_errors = log;
        self
    }
}
