use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rt_core::{Error, Result};
use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};
use tracing::debug;

/// Base BPE vocabularies shipped with tiktoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseEncoding {
    O200kBase,
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

/// Used when neither the tokenizer library nor the alias table knows a model
pub const DEFAULT_ENCODING: BaseEncoding = BaseEncoding::Cl100kBase;

/// Approximations for models tiktoken has no vocabulary for
const MODEL_ALIASES: &[(&str, BaseEncoding)] = &[
    ("gpt-4o", BaseEncoding::O200kBase),
    ("gpt-4o-mini", BaseEncoding::O200kBase),
    ("gpt-4", BaseEncoding::Cl100kBase),
    ("gpt-3.5-turbo", BaseEncoding::Cl100kBase),
    ("claude-4-sonnet", BaseEncoding::Cl100kBase),
    ("claude-3.5-sonnet", BaseEncoding::Cl100kBase),
    ("anthropic-claude-4-sonnet", BaseEncoding::Cl100kBase),
    ("gemini-2.5-pro", BaseEncoding::Cl100kBase),
    ("gemini-1.5-pro", BaseEncoding::Cl100kBase),
];

impl BaseEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            BaseEncoding::O200kBase => "o200k_base",
            BaseEncoding::Cl100kBase => "cl100k_base",
            BaseEncoding::P50kBase => "p50k_base",
            BaseEncoding::P50kEdit => "p50k_edit",
            BaseEncoding::R50kBase => "r50k_base",
        }
    }

    /// Encoding tiktoken itself registers for a model name (exact or prefix match)
    pub fn for_model(model: &str) -> Option<Self> {
        match get_tokenizer(model)? {
            Tokenizer::O200kBase => Some(BaseEncoding::O200kBase),
            Tokenizer::Cl100kBase => Some(BaseEncoding::Cl100kBase),
            Tokenizer::P50kBase => Some(BaseEncoding::P50kBase),
            Tokenizer::P50kEdit => Some(BaseEncoding::P50kEdit),
            Tokenizer::R50kBase | Tokenizer::Gpt2 => Some(BaseEncoding::R50kBase),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Entry in the static alias table
    pub fn for_alias(model: &str) -> Option<Self> {
        MODEL_ALIASES
            .iter()
            .find(|(alias, _)| *alias == model)
            .map(|(_, base)| *base)
    }

    /// Resolution order: tiktoken registry, alias table, default
    pub fn resolve(model: &str) -> Self {
        Self::for_model(model)
            .or_else(|| Self::for_alias(model))
            .unwrap_or(DEFAULT_ENCODING)
    }

    fn load(&self) -> anyhow::Result<CoreBPE> {
        match self {
            BaseEncoding::O200kBase => tiktoken_rs::o200k_base(),
            BaseEncoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            BaseEncoding::P50kBase => tiktoken_rs::p50k_base(),
            BaseEncoding::P50kEdit => tiktoken_rs::p50k_edit(),
            BaseEncoding::R50kBase => tiktoken_rs::r50k_base(),
        }
    }
}

impl fmt::Display for BaseEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A loaded encoding
pub struct Encoder {
    base: BaseEncoding,
    bpe: CoreBPE,
}

impl Encoder {
    pub fn load(base: BaseEncoding) -> Result<Self> {
        let bpe = base.load().map_err(|e| Error::EncoderUnavailable {
            encoding: base.name().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base, bpe })
    }

    pub fn name(&self) -> &'static str {
        self.base.name()
    }

    /// Token count of `text`; special-token markup is counted as plain text
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder").field("base", &self.base).finish()
    }
}

/// Per-run memo of resolved encoders, keyed by lower-cased model name
#[derive(Default)]
pub struct EncoderRegistry {
    by_model: HashMap<String, Arc<Encoder>>,
    by_base: HashMap<BaseEncoding, Arc<Encoder>>,
}

impl EncoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a model name, loading its vocabulary at most once per registry
    pub fn resolve(&mut self, model: &str) -> Result<Arc<Encoder>> {
        let key = model.to_lowercase();
        if let Some(encoder) = self.by_model.get(&key) {
            return Ok(Arc::clone(encoder));
        }

        let base = BaseEncoding::resolve(&key);
        let encoder = match self.by_base.get(&base) {
            Some(encoder) => Arc::clone(encoder),
            None => {
                debug!("Loading {} for model {:?}", base, key);
                let encoder = Arc::new(Encoder::load(base)?);
                self.by_base.insert(base, Arc::clone(&encoder));
                encoder
            }
        };

        self.by_model.insert(key, Arc::clone(&encoder));
        Ok(encoder)
    }

    pub fn len(&self) -> usize {
        self.by_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        assert_eq!(BaseEncoding::resolve("gpt-4o"), BaseEncoding::O200kBase);
        assert_eq!(BaseEncoding::resolve("gpt-4"), BaseEncoding::Cl100kBase);
        assert_eq!(BaseEncoding::resolve("claude-3.5-sonnet"), BaseEncoding::Cl100kBase);
        assert_eq!(BaseEncoding::resolve("gemini-2.5-pro"), BaseEncoding::Cl100kBase);
        assert_eq!(BaseEncoding::resolve("no-such-model"), DEFAULT_ENCODING);
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(BaseEncoding::for_alias("gpt-4o-mini"), Some(BaseEncoding::O200kBase));
        assert_eq!(
            BaseEncoding::for_alias("anthropic-claude-4-sonnet"),
            Some(BaseEncoding::Cl100kBase)
        );
        assert_eq!(BaseEncoding::for_alias("llama-3"), None);
    }

    #[test]
    fn test_registry_memoizes_by_lowercase_name() {
        let mut registry = EncoderRegistry::new();

        let first = registry.resolve("GPT-4o").unwrap();
        let second = registry.resolve("gpt-4o").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "o200k_base");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_shares_base_between_models() {
        let mut registry = EncoderRegistry::new();

        let claude = registry.resolve("claude-4-sonnet").unwrap();
        let unknown = registry.resolve("mystery-model").unwrap();
        assert!(Arc::ptr_eq(&claude, &unknown));
        assert_eq!(unknown.name(), "cl100k_base");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_encoder_count() {
        let encoder = Encoder::load(BaseEncoding::O200kBase).unwrap();
        assert_eq!(encoder.count("hello world"), 2);
        assert_eq!(encoder.count(""), 0);
        assert!(encoder.count("<|endoftext|>") > 0);
    }
}
