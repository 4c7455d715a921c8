//! Tokenizer followed by an ordered chain of filters.
//!
//! ```
//! use std::sync::Arc;
//!
//! use fabric::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use fabric::analysis::token_filter::LowercaseFilter;
//! use fabric::analysis::tokenizer::UnicodeWordTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .with_name("folded_words");
//!
//! let terms = analyzer.terms(b"Lazy DOG").unwrap();
//! assert_eq!(terms, ["lazy", "dog"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer assembled from parts. Stages are shared, so cloning is cheap.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    label: String,
    tokenizer: Arc<dyn Tokenizer>,
    stages: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Start a pipeline with `tokenizer` and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            label: tokenizer.name().to_string(),
            tokenizer,
            stages: Vec::new(),
        }
    }

    /// Append a filter; filters run in the order they were added.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.label.push('+');
        self.label.push_str(filter.name());
        self.stages.push(filter);
        self
    }

    /// Replace the generated label.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.label = name.into();
        self
    }

    /// The label, `tokenizer+filter+...` unless set with `with_name`.
    pub fn pipeline_name(&self) -> &str {
        &self.label
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.stages
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.stages
            .iter()
            .try_fold(self.tokenizer.tokenize(text)?, |tokens, stage| {
                stage.filter(tokens)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
